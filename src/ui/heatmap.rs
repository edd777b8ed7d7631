use std::f32::consts::FRAC_PI_2;

use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Ui, pos2, vec2};

use crate::color::{DivergingScale, text_color_on};
use crate::figure::{HeatmapSpec, format_value};

const ROW_LABEL_WIDTH: f32 = 130.0;
const COL_LABEL_HEIGHT: f32 = 120.0;
const COLORBAR_WIDTH: f32 = 56.0;
const COLORBAR_STEPS: usize = 48;

// ---------------------------------------------------------------------------
// Annotated heatmap
// ---------------------------------------------------------------------------

/// Paint `spec` as a grid of coloured cells with the value printed in each.
pub fn heatmap(ui: &mut Ui, spec: &HeatmapSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(spec.title.as_str());
    });

    let n_rows = spec.row_labels.len();
    let n_cols = spec.col_labels.len();
    if n_rows == 0 || n_cols == 0 {
        ui.label("No data.");
        return;
    }

    let scale = match spec.range {
        Some((min, max)) => DivergingScale::new(min, max),
        None => DivergingScale::fitted(spec.values.iter().flatten().copied()),
    };

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let rect = response.rect;
    let grid = Rect::from_min_max(
        pos2(rect.left() + ROW_LABEL_WIDTH, rect.top() + 4.0),
        pos2(rect.right() - COLORBAR_WIDTH, rect.bottom() - COL_LABEL_HEIGHT),
    );
    if grid.width() <= 0.0 || grid.height() <= 0.0 {
        return;
    }

    let cell = vec2(grid.width() / n_cols as f32, grid.height() / n_rows as f32);
    let font = FontId::proportional(11.0);
    let label_color = ui.visuals().text_color();
    let cell_rect = |r: usize, c: usize| {
        Rect::from_min_size(
            pos2(grid.left() + c as f32 * cell.x, grid.top() + r as f32 * cell.y),
            cell,
        )
    };

    // ---- Cells ----
    for (r, row) in spec.values.iter().enumerate().take(n_rows) {
        for (c, &value) in row.iter().enumerate().take(n_cols) {
            let rect = cell_rect(r, c);
            let fill = scale.color_for(value);
            painter.rect_filled(rect.shrink(0.5), 0.0, fill);
            if cell.x >= 28.0 && cell.y >= 14.0 {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    format_value(value, 2),
                    font.clone(),
                    text_color_on(fill),
                );
            }
        }
    }

    // ---- Row labels (left) ----
    for (r, label) in spec.row_labels.iter().enumerate() {
        let y = grid.top() + (r as f32 + 0.5) * cell.y;
        painter.text(
            pos2(grid.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            label,
            font.clone(),
            label_color,
        );
    }

    // ---- Column labels (below, rotated) ----
    for (c, label) in spec.col_labels.iter().enumerate() {
        let galley = painter.layout_no_wrap(label.clone(), font.clone(), label_color);
        let size = galley.size();
        let x = grid.left() + (c as f32 + 0.5) * cell.x;
        // rotated a quarter turn counter-clockwise around `pos`
        let pos = pos2(x - size.y / 2.0, grid.bottom() + 6.0 + size.x);
        painter.add(egui::epaint::TextShape::new(pos, galley, label_color).with_angle(-FRAC_PI_2));
    }

    // ---- Colour bar ----
    let bar = Rect::from_min_max(
        pos2(grid.right() + 12.0, grid.top()),
        pos2(grid.right() + 26.0, grid.bottom()),
    );
    let step_h = bar.height() / COLORBAR_STEPS as f32;
    for i in 0..COLORBAR_STEPS {
        let t = 1.0 - (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        let value = scale.min + t * (scale.max - scale.min);
        let strip = Rect::from_min_size(
            pos2(bar.left(), bar.top() + i as f32 * step_h),
            vec2(bar.width(), step_h + 0.5),
        );
        painter.rect_filled(strip, 0.0, scale.color_for(value));
    }
    for (value, y) in [(scale.max, bar.top()), (scale.min, bar.bottom())] {
        painter.text(
            pos2(bar.right() + 3.0, y),
            Align2::LEFT_CENTER,
            format_value(value, 2),
            font.clone(),
            label_color,
        );
    }

    // ---- Hover: full-precision value of the cell under the pointer ----
    let hovered = response
        .hover_pos()
        .and_then(|p| cell_at(grid, cell, n_rows, n_cols, p))
        .and_then(|(r, c)| {
            let value = *spec.values.get(r)?.get(c)?;
            Some(format!(
                "{} × {}: {}",
                spec.row_labels[r],
                spec.col_labels[c],
                format_value(value, 4)
            ))
        });
    if let Some(text) = hovered {
        response.on_hover_text_at_pointer(text);
    }
}

/// Grid position under `pos`, if any.
fn cell_at(grid: Rect, cell: egui::Vec2, n_rows: usize, n_cols: usize, pos: Pos2) -> Option<(usize, usize)> {
    if !grid.contains(pos) {
        return None;
    }
    let c = ((pos.x - grid.left()) / cell.x) as usize;
    let r = ((pos.y - grid.top()) / cell.y) as usize;
    (r < n_rows && c < n_cols).then_some((r, c))
}
