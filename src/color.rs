use eframe::egui::Color32;
use palette::Srgb;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Series colour: a CSS colour name, resolved to RGB at render time
// ---------------------------------------------------------------------------

/// Colour of a chart series, kept as the CSS name (`"green"`, `"gray"`) so
/// exported chart descriptions stay renderer-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeriesColor(String);

impl SeriesColor {
    pub fn named(name: &str) -> Self {
        SeriesColor(name.to_ascii_lowercase())
    }

    pub fn green() -> Self {
        Self::named("green")
    }

    pub fn gray() -> Self {
        Self::named("gray")
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Resolve the CSS name; unknown names fall back to gray.
    pub fn to_color32(&self) -> Color32 {
        let rgb: Srgb<u8> = palette::named::from_str(self.name()).unwrap_or(palette::named::GRAY);
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}
