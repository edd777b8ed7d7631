use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::generate_palette;
use crate::figure::BarChartSpec;

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Render a categorical bar chart. Categories sit at x = 0, 1, 2, ...
pub fn bar_chart(ui: &mut Ui, id: usize, spec: &BarChartSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(spec.title.as_str());
    });

    let colors = generate_palette(spec.categories.len());
    let bars: Vec<Bar> = spec
        .categories
        .iter()
        .zip(&spec.values)
        .zip(colors)
        .enumerate()
        .filter(|(_, ((_, value), _))| !value.is_nan())
        .map(|(i, ((name, &value), color))| {
            Bar::new(i as f64, value)
                .name(name)
                .fill(color)
                .width(0.6)
        })
        .collect();

    // Empty buckets have no bar, but keep their tick so the gap is visible.
    let labels: Vec<String> = spec
        .categories
        .iter()
        .zip(&spec.values)
        .map(|(name, value)| {
            if value.is_nan() {
                format!("{name} (n/a)")
            } else {
                name.clone()
            }
        })
        .collect();

    Plot::new(("bar_chart", id))
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .x_axis_formatter(move |mark, _range| {
            let nearest = mark.value.round();
            if (mark.value - nearest).abs() > 1e-6 || nearest < 0.0 {
                return String::new();
            }
            labels.get(nearest as usize).cloned().unwrap_or_default()
        })
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(spec.y_label.as_str()));
        });
}
