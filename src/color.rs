use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Diverging scale for heatmaps
// ---------------------------------------------------------------------------

/// Blue → white → red colour scale over `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingScale {
    pub min: f64,
    pub max: f64,
}

impl DivergingScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scale spanning the finite values in `values`; `[-1, 1]` if there are none.
    pub fn fitted(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            Self::new(-1.0, 1.0)
        } else {
            Self::new(min, max)
        }
    }

    /// Position of `value` on the scale in `[0, 1]`; `None` for NaN.
    pub fn position(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return Some(0.5);
        }
        Some(((value - self.min) / span).clamp(0.0, 1.0))
    }

    /// Colour for `value`. NaN cells are grey.
    pub fn color_for(&self, value: f64) -> Color32 {
        let Some(t) = self.position(value) else {
            return Color32::GRAY;
        };
        let cold: LinSrgb = Srgb::new(0.23f32, 0.30, 0.75).into_linear();
        let mid: LinSrgb = Srgb::new(0.97f32, 0.97, 0.97).into_linear();
        let hot: LinSrgb = Srgb::new(0.71f32, 0.02, 0.15).into_linear();
        let t = t as f32;
        let lin = if t < 0.5 {
            cold.mix(mid, t * 2.0)
        } else {
            mid.mix(hot, (t - 0.5) * 2.0)
        };
        to_color32(Srgb::from_linear(lin))
    }
}

/// Black or white, whichever reads better on `background`.
pub fn text_color_on(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_diverging_endpoints() {
        let scale = DivergingScale::new(-1.0, 1.0);
        assert_eq!(scale.position(-1.0), Some(0.0));
        assert_eq!(scale.position(0.0), Some(0.5));
        assert_eq!(scale.position(3.0), Some(1.0));
        assert_eq!(scale.position(f64::NAN), None);

        let cold = scale.color_for(-1.0);
        let hot = scale.color_for(1.0);
        assert!(cold.b() > cold.r());
        assert!(hot.r() > hot.b());
        assert_eq!(scale.color_for(f64::NAN), Color32::GRAY);
    }

    #[test]
    fn test_fitted_scale_ignores_nan() {
        let scale = DivergingScale::fitted([0.2, f64::NAN, -0.4, 1.0]);
        assert_eq!(scale, DivergingScale::new(-0.4, 1.0));
        assert_eq!(DivergingScale::fitted([f64::NAN]), DivergingScale::new(-1.0, 1.0));
    }

    #[test]
    fn test_text_contrast() {
        assert_eq!(text_color_on(Color32::WHITE), Color32::BLACK);
        assert_eq!(text_color_on(Color32::from_rgb(20, 20, 90)), Color32::WHITE);
    }
}
