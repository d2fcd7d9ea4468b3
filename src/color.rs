use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Bar palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<[u8; 3]> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.50);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

/// One colour per bar: the fixed colour if given, otherwise the hue palette.
pub fn bar_colors(n: usize, fixed: Option<[u8; 3]>) -> Vec<[u8; 3]> {
    match fixed {
        Some(rgb) => vec![rgb; n],
        None => generate_palette(n),
    }
}

pub fn to_color32([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}
