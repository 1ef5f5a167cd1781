use std::f64::consts::TAU;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;
const SCATTER_COLOR: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);

/// Arc segments per full turn of the pie chart.
const PIE_SEGMENTS: usize = 180;

// ---------------------------------------------------------------------------
// Bar chart – mean hours per task (follows the selection)
// ---------------------------------------------------------------------------

pub fn mean_hours_bar_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Average Hours per Task");

    let means = &state.view.mean_by_task;
    if means.is_empty() {
        ui.label("No records for this selection.");
        return;
    }

    let axis_labels: Vec<String> = means.keys().cloned().collect();

    Plot::new("mean_hours_bar")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Avg Hours")
        .x_axis_label("Task")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_y(0.0)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            axis_labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, (task, hours)) in means.iter().enumerate() {
                let x = i as f64;
                let count = state.view.count_by_task.get(task).copied().unwrap_or(0);
                let bar = Bar::new(x, *hours)
                    .width(0.6)
                    .fill(state.task_colors.color_for(task))
                    .name(format!("{task} ({count} records)"));
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(task));

                plot_ui.text(
                    Text::new(PlotPoint::new(x, *hours), RichText::new(format!("{hours:.1} hrs")))
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart – total hours per task (whole table)
// ---------------------------------------------------------------------------

/// `(task, start_angle, end_angle)` for each wedge, clockwise from twelve
/// o'clock. Tasks with no hours get no wedge.
pub fn pie_wedges<'a, I>(totals: I) -> Vec<(&'a str, f64, f64)>
where
    I: IntoIterator<Item = (&'a String, &'a f64)> + Clone,
{
    let grand_total: f64 = totals.clone().into_iter().map(|(_, v)| v.max(0.0)).sum();
    if grand_total <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    let mut wedges = Vec::new();
    for (task, hours) in totals {
        let sweep = hours.max(0.0) / grand_total * TAU;
        if sweep <= 0.0 {
            continue;
        }
        wedges.push((task.as_str(), start, start + sweep));
        start += sweep;
    }
    wedges
}

/// Point on the unit circle, angle measured clockwise from twelve o'clock.
fn polar(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

pub fn workload_pie_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Workload Distribution by Task");

    let wedges = pie_wedges(&state.overview.sum_by_task);
    if wedges.is_empty() {
        ui.label("No hours recorded.");
        return;
    }

    Plot::new("workload_pie")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for &(task, start, end) in &wedges {
                let steps = (((end - start) / TAU) * PIE_SEGMENTS as f64).ceil().max(1.0) as usize;
                let mut outline = vec![[0.0, 0.0]];
                let sweep = end - start;
                outline.extend(
                    (0..=steps).map(|k| polar(start + sweep * k as f64 / steps as f64, 1.0)),
                );

                let color = state.task_colors.color_for(task);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(outline))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(task),
                );

                let share = (end - start) / TAU * 100.0;
                let [x, y] = polar((start + end) / 2.0, 0.65);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{share:.1}%")).color(Color32::BLACK),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter – grading hours vs. class size (whole table)
// ---------------------------------------------------------------------------

pub fn grading_scatter_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Grading Hours vs. Class Size");

    let grading = &state.overview.grading;
    if grading.points.is_empty() {
        ui.label("No grading records.");
        return;
    }

    let points: Vec<[f64; 2]> = grading
        .points
        .iter()
        .map(|&(size, hours)| [size as f64, hours])
        .collect();

    Plot::new("grading_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Class Size")
        .y_axis_label("Grading Hours")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(4.0)
                    .color(SCATTER_COLOR)
                    .name("grading"),
            );

            if let (Some(trend), Some((lo, hi))) = (grading.trend, grading.class_size_range()) {
                let line = Line::new(PlotPoints::from(vec![[lo, trend.at(lo)], [hi, trend.at(hi)]]))
                    .color(SCATTER_COLOR)
                    .width(2.0)
                    .name(format!("OLS trend (R² = {:.2})", trend.r_squared));
                plot_ui.line(line);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TaskAggregate;

    #[test]
    fn wedges_cover_full_circle_in_label_order() {
        let mut totals = TaskAggregate::new();
        totals.insert("grading".into(), 30.0);
        totals.insert("planning".into(), 10.0);

        let wedges = pie_wedges(&totals);
        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[0].0, "grading");
        assert!((wedges[0].2 - 0.75 * TAU).abs() < 1e-9);
        assert!((wedges[1].2 - TAU).abs() < 1e-9);
    }

    #[test]
    fn zero_total_has_no_wedges() {
        let mut totals = TaskAggregate::new();
        totals.insert("grading".into(), 0.0);
        assert!(pie_wedges(&totals).is_empty());
        assert!(pie_wedges(&TaskAggregate::new()).is_empty());
    }
}
