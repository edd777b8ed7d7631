use anyhow::{Context, Result};

use super::columns::{ALCOHOL, RESIDUAL_SUGAR};
use crate::config::{DRY_MAX_SUGAR, SEMI_DRY_MAX_SUGAR, SEMI_SWEET_MAX_SUGAR};
use crate::data::filter::{DatasetView, FilterError, RowFilter};
use crate::data::model::WineDataset;
use crate::figure::{self, BarChartSpec, Chart, Figure, SummaryTable, format_value};

// ---------------------------------------------------------------------------
// Sweetness buckets
// ---------------------------------------------------------------------------

/// Residual-sugar category. Each bucket includes its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweetness {
    Dry,
    SemiDry,
    SemiSweet,
    Sweet,
}

impl Sweetness {
    pub const ALL: [Sweetness; 4] = [
        Sweetness::Dry,
        Sweetness::SemiDry,
        Sweetness::SemiSweet,
        Sweetness::Sweet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sweetness::Dry => "dry wines",
            Sweetness::SemiDry => "semi-dry wines",
            Sweetness::SemiSweet => "semi-sweet wines",
            Sweetness::Sweet => "sweet wines",
        }
    }

    /// Rows of `dataset` falling into this bucket.
    pub fn select<'a>(&self, dataset: &'a WineDataset) -> Result<DatasetView<'a>, FilterError> {
        let all = RowFilter::new(dataset);
        let bucket = match self {
            Sweetness::Dry => all.lte(RESIDUAL_SUGAR, DRY_MAX_SUGAR)?,
            Sweetness::SemiDry => all
                .gt(RESIDUAL_SUGAR, DRY_MAX_SUGAR)?
                .lte(RESIDUAL_SUGAR, SEMI_DRY_MAX_SUGAR)?,
            Sweetness::SemiSweet => all
                .gt(RESIDUAL_SUGAR, SEMI_DRY_MAX_SUGAR)?
                .lte(RESIDUAL_SUGAR, SEMI_SWEET_MAX_SUGAR)?,
            Sweetness::Sweet => all.gt(RESIDUAL_SUGAR, SEMI_SWEET_MAX_SUGAR)?,
        };
        Ok(bucket.get())
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    pub sweetness: Sweetness,
    pub count: usize,
    /// NaN when the bucket is empty.
    pub mean_alcohol: f64,
}

/// Row count and mean alcohol of every bucket, in bucket order.
pub fn summarize(dataset: &WineDataset) -> Result<Vec<BucketSummary>, FilterError> {
    Sweetness::ALL
        .iter()
        .map(|&sweetness| -> Result<BucketSummary, FilterError> {
            let rows = sweetness.select(dataset)?;
            Ok(BucketSummary {
                sweetness,
                count: rows.len(),
                mean_alcohol: rows.mean(ALCOHOL)?,
            })
        })
        .collect()
}

pub fn figure(summary: &[BucketSummary]) -> Figure {
    Figure {
        title: "Average alcohol by sweetness".to_string(),
        charts: vec![Chart::Bar(BarChartSpec {
            title: "Average alcohol, % vol".to_string(),
            x_label: "type".to_string(),
            y_label: "average alcohol".to_string(),
            categories: summary.iter().map(|b| b.sweetness.label().to_string()).collect(),
            values: summary.iter().map(|b| b.mean_alcohol).collect(),
        })],
        table: Some(SummaryTable {
            headers: vec!["type".into(), "wines".into(), "average alcohol".into()],
            rows: summary
                .iter()
                .map(|b| {
                    vec![
                        b.sweetness.label().to_string(),
                        b.count.to_string(),
                        format_value(b.mean_alcohol, 2),
                    ]
                })
                .collect(),
        }),
    }
}

/// Bucket the wines by sweetness and chart their average alcohol.
pub fn run(dataset: &WineDataset) -> Result<()> {
    let summary = summarize(dataset).context("bucketing wines by residual sugar")?;
    for bucket in &summary {
        log::info!(
            "{}: {} wines, average alcohol {}",
            bucket.sweetness.label(),
            bucket.count,
            format_value(bucket.mean_alcohol, 3)
        );
        if bucket.mean_alcohol.is_nan() {
            log::warn!("{} is empty, its average is undefined", bucket.sweetness.label());
        }
    }
    figure::show(figure(&summary))
}
