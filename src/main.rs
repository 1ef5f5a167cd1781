mod app;
mod color;
mod data;
mod report;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::WorkloadDashboardApp;
use clap::Parser;
use data::model::TeacherFilter;
use eframe::egui;
use state::AppState;

#[derive(Parser)]
#[command(name = "workload-dashboard")]
#[command(about = "Teacher workload optimization dashboard", long_about = None)]
struct Cli {
    /// Workload table (.csv, .json or .parquet)
    #[arg(long, env = "WORKLOAD_DATA", default_value = "teacher_workload_cleaned.csv")]
    data: PathBuf,

    /// Initial teacher selection ("All" for every teacher)
    #[arg(long, default_value = data::model::ALL_LABEL)]
    teacher: String,

    /// Print a Markdown summary for the selection and exit
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let table = data::loader::load_file(&cli.data)
        .with_context(|| format!("loading workload data from {}", cli.data.display()))?;

    if table.is_empty() {
        log::warn!("{} contains no workload rows", cli.data.display());
    }

    let selection = TeacherFilter::parse(&cli.teacher);
    if let TeacherFilter::Teacher(id) = &selection {
        if !table.teacher_ids().contains(id) {
            log::warn!("Teacher '{id}' has no records; showing an empty selection");
        }
    }

    let state = AppState::new(table, selection);

    if cli.summary {
        print!("{}", report::build_summary(&state.overview, &state.view));
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Teacher Workload Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(WorkloadDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
