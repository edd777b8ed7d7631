use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, vec2};

use crate::color::{generate_palette, text_color_on};
use crate::figure::PieChartSpec;

/// Longest arc drawn as a single convex polygon.
const MAX_CHUNK: f32 = FRAC_PI_2;
const ARC_STEP: f32 = 0.04;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

pub fn pie_chart(ui: &mut Ui, spec: &PieChartSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(spec.title.as_str());
    });

    let colors = generate_palette(spec.labels.len());
    let shares = shares(&spec.values);

    // ---- Legend ----
    for ((label, &value), (color, share)) in spec
        .labels
        .iter()
        .zip(&spec.values)
        .zip(colors.iter().zip(&shares))
    {
        ui.horizontal(|ui: &mut Ui| {
            let (swatch, painter) = ui.allocate_painter(vec2(12.0, 12.0), Sense::hover());
            painter.rect_filled(swatch.rect, 2.0, *color);
            ui.label(format!("{label}: {value} ({:.1}%)", share * 100.0));
        });
    }

    if shares.iter().all(|s| *s == 0.0) {
        ui.label("No data.");
        return;
    }

    // ---- Slices ----
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let center = response.rect.center();
    let radius = 0.45 * response.rect.width().min(response.rect.height());
    if radius <= 0.0 {
        return;
    }
    let background = ui.visuals().panel_fill;

    let mut start = -FRAC_PI_2;
    for (&share, &color) in shares.iter().zip(&colors) {
        if share <= 0.0 {
            continue;
        }
        let sweep = share as f32 * TAU;
        for shape in wedge(center, radius, start, sweep, color) {
            painter.add(shape);
        }
        painter.line_segment([center, point_on(center, radius, start)], Stroke::new(1.5, background));

        if share >= 0.03 {
            let mid = start + sweep / 2.0;
            painter.text(
                point_on(center, radius * 0.62, mid),
                Align2::CENTER_CENTER,
                format!("{:.1}%", share * 100.0),
                FontId::proportional(14.0),
                text_color_on(color),
            );
        }
        start += sweep;
    }
}

/// Fraction of the total for each value. Negative and non-finite values
/// count as zero.
fn shares(values: &[f64]) -> Vec<f64> {
    let clean: Vec<f64> = values
        .iter()
        .map(|&v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
        .collect();
    let total: f64 = clean.iter().sum();
    if total <= 0.0 {
        return vec![0.0; values.len()];
    }
    clean.into_iter().map(|v| v / total).collect()
}

fn point_on(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + radius * vec2(angle.cos(), angle.sin())
}

/// A slice as convex pieces: each covers at most a quarter turn.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let mut from = start;
    let end = start + sweep;
    while from < end {
        let to = (from + MAX_CHUNK).min(end);
        let steps = (((to - from) / ARC_STEP).ceil() as usize).max(1);
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for i in 0..=steps {
            let angle = from + (to - from) * i as f32 / steps as f32;
            points.push(point_on(center, radius, angle));
        }
        shapes.push(Shape::convex_polygon(points, color, egui::Stroke::NONE));
        from = to;
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares() {
        assert_eq!(shares(&[1.0, 3.0]), vec![0.25, 0.75]);
        assert_eq!(shares(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(shares(&[f64::NAN, 2.0]), vec![0.0, 1.0]);
    }

    #[test]
    fn test_wedge_splits_large_slices() {
        let center = Pos2::new(0.0, 0.0);
        assert_eq!(wedge(center, 10.0, 0.0, 0.5, Color32::RED).len(), 1);
        assert_eq!(wedge(center, 10.0, 0.0, TAU * 0.9, Color32::RED).len(), 4);
    }
}
