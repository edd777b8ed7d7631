//! Chart descriptions and the blocking window that displays them.
//!
//! Analyses build a [`Figure`] out of plain data; [`show`] hands it to
//! `eframe` and returns once the user closes the window.

use anyhow::{Result, anyhow};
use eframe::egui;

use crate::app::FigureApp;
use crate::config::{WINDOW_MIN_SIZE, WINDOW_SIZE};

/// A bar chart: one bar per category.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    /// One value per category; NaN bars are left out of the plot.
    pub values: Vec<f64>,
}

/// An annotated matrix of values.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSpec {
    pub title: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// Row-major, `row_labels.len()` rows of `col_labels.len()` values.
    pub values: Vec<Vec<f64>>,
    /// Fixed colour range; `None` fits the range to the values.
    pub range: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChartSpec),
    Heatmap(HeatmapSpec),
    Pie(PieChartSpec),
}

/// Plain rows shown under the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything shown in one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    /// Laid out side by side, left to right.
    pub charts: Vec<Chart>,
    pub table: Option<SummaryTable>,
}

/// Open a native window for `figure` and block until it is closed.
pub fn show(figure: Figure) -> Result<()> {
    let title = figure.title.clone();
    log::debug!("Showing figure '{title}' with {} chart(s)", figure.charts.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(WINDOW_MIN_SIZE),
        // reuse the event loop so the next figure can open after this one
        run_and_return: true,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(FigureApp::new(figure)))),
    )
    .map_err(|e| anyhow!("displaying figure '{title}': {e}"))
}

/// Format a number for labels and tables; NaN reads as `n/a`.
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}
