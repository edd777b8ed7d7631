use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::figure::{Figure, SummaryTable};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar. Returns `true` when the user asks for the next figure.
pub fn top_bar(ui: &mut Ui, figure: &Figure) -> bool {
    let mut next = false;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(figure.title.as_str());
        ui.separator();
        ui.label(format!("{} chart(s)", figure.charts.len()));

        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            if ui.button("Next ▶").clicked() {
                next = true;
            }
        });
    });
    next
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

/// Render the figure's numbers as a plain striped table.
pub fn summary_table(ui: &mut Ui, table: &SummaryTable) {
    ui.add_space(4.0);
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(140.0), table.headers.len())
        .header(20.0, |mut header| {
            for title in &table.headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(title.as_str());
                });
            }
        })
        .body(|mut body| {
            for row in &table.rows {
                body.row(18.0, |mut cells| {
                    for text in row {
                        cells.col(|ui: &mut Ui| {
                            ui.label(text.as_str());
                        });
                    }
                });
            }
        });
    ui.add_space(4.0);
}
