use eframe::egui;

use crate::figure::{Chart, Figure};
use crate::ui::{heatmap, panels, pie, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Window showing a single [`Figure`].
pub struct FigureApp {
    pub figure: Figure,
}

impl FigureApp {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            if panels::top_bar(ui, &self.figure) {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        // ---- Bottom panel: summary numbers ----
        if let Some(table) = &self.figure.table {
            egui::TopBottomPanel::bottom("summary_panel")
                .resizable(true)
                .show(ctx, |ui| {
                    panels::summary_table(ui, table);
                });
        }

        // ---- Central panel: charts side by side ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let charts = &self.figure.charts;
            if charts.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Nothing to show");
                });
                return;
            }
            ui.columns(charts.len(), |columns| {
                for (idx, (col_ui, chart)) in columns.iter_mut().zip(charts).enumerate() {
                    match chart {
                        Chart::Bar(spec) => plot::bar_chart(col_ui, idx, spec),
                        Chart::Heatmap(spec) => heatmap::heatmap(col_ui, spec),
                        Chart::Pie(spec) => pie::pie_chart(col_ui, spec),
                    }
                }
            });
        });
    }
}
