use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Hsl, Srgb};

/// Maps the distinct values of one column to distinct colours, so the same
/// location keeps its colour across charts and filter changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// One hue per value, spread evenly around the colour wheel in the
    /// order given.
    pub fn new(values: &[String]) -> Self {
        let step = 360.0 / values.len().max(1) as f32;
        let mapping = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let hsl: Hsl = Hsl::new(i as f32 * step, 0.65, 0.55);
                let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsl).into_format();
                (value.clone(), Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
            })
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}
