use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WorkloadDashboardApp {
    pub state: AppState,
}

impl WorkloadDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for WorkloadDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + teacher selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui, &self.state);
        });

        // ---- Left side panel: suggestions ----
        egui::SidePanel::left("suggestion_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: charts + records ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    plot::mean_hours_bar_chart(ui, &self.state);
                    ui.separator();
                    plot::workload_pie_chart(ui, &self.state);
                    ui.separator();
                    plot::grading_scatter_plot(ui, &self.state);
                    ui.separator();
                    egui::CollapsingHeader::new("Records")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            table::records_table(ui, &self.state);
                        });
                });
        });
    }
}
