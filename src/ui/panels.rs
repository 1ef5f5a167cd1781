use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Title, teacher selector and record counts.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Teacher Workload Optimization Dashboard").strong());
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Teacher");

        let mut chosen = state.selection().clone();
        egui::ComboBox::from_id_salt("teacher_select")
            .selected_text(chosen.to_string())
            .width(200.0)
            .show_ui(ui, |ui: &mut Ui| {
                for option in &state.options {
                    let label = option.to_string();
                    ui.selectable_value(&mut chosen, option.clone(), label);
                }
            });
        state.select(chosen);

        ui.separator();
        ui.label(format!(
            "{} records loaded, {} selected",
            state.table.len(),
            state.view.row_indices.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – suggestions
// ---------------------------------------------------------------------------

/// Render the suggestion lines and the scalars they were derived from.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut lines = state.view.suggestions.iter();
            if let Some(header) = lines.next() {
                ui.heading(
                    RichText::new(header.trim_start_matches('#').trim())
                        .color(Color32::from_rgb(0x2e, 0xcc, 0x71))
                        .strong(),
                );
            }
            ui.separator();
            for line in lines {
                let text = line.strip_prefix("- ").unwrap_or(line);
                ui.label(RichText::new(format!("• {text}")).size(16.0));
                ui.add_space(6.0);
            }

            ui.add_space(12.0);
            ui.strong("Based on");
            let summary = &state.view.summary;
            egui::Grid::new("summary_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Total hours");
                    ui.label(format!("{:.1}", summary.total_hours));
                    ui.end_row();
                    ui.label("Grading hours");
                    ui.label(format!("{:.1}", summary.grading_hours));
                    ui.end_row();
                    ui.label("Mean class size");
                    ui.label(format!("{:.1}", summary.mean_class_size));
                    ui.end_row();
                });
        });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(format!("Generated: {}", state.generated_at)).weak());
    });
}
