use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct pastel colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.72);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Task label → Color32
// ---------------------------------------------------------------------------

/// One colour per task, shared by every chart so a task keeps its colour
/// whatever the selection.
#[derive(Debug, Clone)]
pub struct TaskColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl TaskColors {
    pub fn new(tasks: &[String]) -> Self {
        let mapping = tasks
            .iter()
            .cloned()
            .zip(generate_palette(tasks.len()))
            .collect();

        TaskColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, task: &str) -> Color32 {
        self.mapping
            .get(task)
            .copied()
            .unwrap_or(self.default_color)
    }
}
