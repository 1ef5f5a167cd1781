use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Rows of the current selection, in table order.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let records = state.table.records();
    let rows = &state.view.row_indices;

    ui.push_id("records_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(240.0)
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["Teacher", "Task", "Hours", "Class Size"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = &records[rows[row.index()]];
                    row.col(|ui| {
                        ui.label(&record.teacher_id);
                    });
                    row.col(|ui| {
                        ui.label(&record.task);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", record.hours_spent));
                    });
                    row.col(|ui| {
                        ui.label(record.class_size.to_string());
                    });
                });
            });
    });
}
