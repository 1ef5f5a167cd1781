use std::fmt::Write;

use crate::state::{OverviewView, SelectionView};

/// Markdown rendering of the dashboard for one selection.
pub fn build_summary(overview: &OverviewView, view: &SelectionView) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Teacher Workload Summary");
    let _ = writeln!(
        output,
        "Teacher: {} ({} records)",
        view.selection,
        view.row_indices.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Average Hours per Task");

    if view.mean_by_task.is_empty() {
        let _ = writeln!(output, "No records for this selection.");
    } else {
        for (task, hours) in &view.mean_by_task {
            let count = view.count_by_task.get(task).copied().unwrap_or(0);
            let _ = writeln!(output, "- {task}: {hours:.1} hrs (n={count})");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Workload Distribution by Task (all teachers)");
    let grand_total: f64 = overview.sum_by_task.values().sum();
    if overview.sum_by_task.is_empty() {
        let _ = writeln!(output, "No records loaded.");
    } else {
        for (task, hours) in &overview.sum_by_task {
            let share = if grand_total > 0.0 {
                hours / grand_total * 100.0
            } else {
                0.0
            };
            let _ = writeln!(output, "- {task}: {hours:.1} hrs ({share:.1}%)");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grading Hours vs. Class Size (all teachers)");
    let grading = &overview.grading;
    match grading.trend {
        Some(trend) => {
            let _ = writeln!(
                output,
                "{} grading records; trend hours = {:.3} × class size {} {:.3} (R² = {:.2})",
                grading.points.len(),
                trend.slope,
                if trend.intercept < 0.0 { "-" } else { "+" },
                trend.intercept.abs(),
                trend.r_squared
            );
        }
        None => {
            let _ = writeln!(
                output,
                "{} grading records; not enough spread for a trend line.",
                grading.points.len()
            );
        }
    }

    let _ = writeln!(output);
    for line in &view.suggestions {
        let _ = writeln!(output, "{line}");
    }

    output
}
