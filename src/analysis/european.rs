use anyhow::{Context, Result};

use super::columns::{ALCOHOL, PH, QUALITY, VOLATILE_ACIDITY};
use crate::config::QualityRule;
use crate::data::filter::{FilterError, RowFilter};
use crate::data::model::{TYPE_COLUMN, WineDataset};
use crate::figure::{self, BarChartSpec, Chart, Figure, PieChartSpec, SummaryTable, format_value};

const MEETS_LABEL: &str = "meets European quality";
const FAILS_LABEL: &str = "below European quality";

/// Rows passing every threshold of `rule` (all comparisons strict).
pub fn classify<'a>(dataset: &'a WineDataset, rule: &QualityRule) -> Result<RowFilter<'a>, FilterError> {
    RowFilter::new(dataset)
        .gt(ALCOHOL, rule.min_alcohol)?
        .lt(VOLATILE_ACIDITY, rule.max_volatile_acidity)?
        .gt(PH, rule.min_ph)?
        .lt(PH, rule.max_ph)
}

/// Size and mean quality of the two classes.
#[derive(Debug, Clone, PartialEq)]
pub struct QualitySplit {
    pub meets_count: usize,
    pub fails_count: usize,
    /// NaN when the class is empty.
    pub meets_mean_quality: f64,
    pub fails_mean_quality: f64,
}

pub fn summarize(dataset: &WineDataset, rule: &QualityRule) -> Result<QualitySplit, FilterError> {
    let meets_rule = classify(dataset, rule)?;
    let meets = meets_rule.get();
    let fails = meets_rule.complement();
    if meets.is_empty() || fails.is_empty() {
        log::warn!("One quality class is empty, its average quality is undefined");
    }

    Ok(QualitySplit {
        meets_count: meets.count_non_null(TYPE_COLUMN)?,
        fails_count: fails.count_non_null(TYPE_COLUMN)?,
        meets_mean_quality: meets.mean(QUALITY)?,
        fails_mean_quality: fails.mean(QUALITY)?,
    })
}

pub fn figure(split: &QualitySplit) -> Figure {
    let labels = vec![MEETS_LABEL.to_string(), FAILS_LABEL.to_string()];
    Figure {
        title: "European quality".to_string(),
        charts: vec![
            Chart::Bar(BarChartSpec {
                title: "Average quality score".to_string(),
                x_label: "type".to_string(),
                y_label: QUALITY.to_string(),
                categories: labels.clone(),
                values: vec![split.meets_mean_quality, split.fails_mean_quality],
            }),
            Chart::Pie(PieChartSpec {
                title: "Number of wines".to_string(),
                labels: labels.clone(),
                values: vec![split.meets_count as f64, split.fails_count as f64],
            }),
        ],
        table: Some(SummaryTable {
            headers: vec!["type".into(), "wines".into(), "average quality".into()],
            rows: vec![
                vec![
                    labels[0].clone(),
                    split.meets_count.to_string(),
                    format_value(split.meets_mean_quality, 3),
                ],
                vec![
                    labels[1].clone(),
                    split.fails_count.to_string(),
                    format_value(split.fails_mean_quality, 3),
                ],
            ],
        }),
    }
}

/// Split the wines by `rule` and chart quality and share of both classes.
pub fn run(dataset: &WineDataset, rule: &QualityRule) -> Result<()> {
    let split = summarize(dataset, rule).context("applying the European quality rule")?;
    log::info!(
        "European quality: {} wines (average quality {}), {} below (average quality {})",
        split.meets_count,
        format_value(split.meets_mean_quality, 3),
        split.fails_count,
        format_value(split.fails_mean_quality, 3)
    );
    figure::show(figure(&split))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::{Wine, dataset};
    use crate::config::EUROPEAN_QUALITY;

    fn wine(alcohol: f64, volatile_acidity: f64, ph: f64, quality: i64) -> Wine {
        Wine {
            alcohol,
            volatile_acidity,
            ph,
            quality,
            residual_sugar: 2.0,
            kind: "white",
        }
    }

    #[test]
    fn test_two_wine_scenario() {
        let mut red = wine(9.0, 0.5, 3.0, 6);
        red.kind = "red";
        let ds = dataset(&[red, wine(8.0, 1.5, 3.0, 5)]);

        let rule = classify(&ds, &EUROPEAN_QUALITY).unwrap();
        assert_eq!(rule.get().indices(), &[0]);
        assert_eq!(rule.complement().indices(), &[1]);

        let split = summarize(&ds, &EUROPEAN_QUALITY).unwrap();
        assert_eq!(split.meets_count, 1);
        assert_eq!(split.fails_count, 1);
        assert_eq!(split.meets_mean_quality, 6.0);
        assert_eq!(split.fails_mean_quality, 5.0);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let ds = dataset(&[
            wine(8.5, 0.5, 3.0, 5),
            wine(9.0, 1.2, 3.0, 5),
            wine(9.0, 0.5, 2.8, 5),
            wine(9.0, 0.5, 3.6, 5),
            wine(9.0, 0.5, 3.59, 7),
        ]);
        let rule = classify(&ds, &EUROPEAN_QUALITY).unwrap();
        assert_eq!(rule.get().indices(), &[4]);
    }

    #[test]
    fn test_counts_add_up_with_duplicates() {
        let ds = dataset(&[
            wine(10.0, 0.3, 3.2, 7),
            wine(10.0, 0.3, 3.2, 7),
            wine(8.0, 0.3, 3.2, 4),
            wine(8.0, 0.3, 3.2, 4),
            wine(12.0, 0.2, 3.9, 6),
        ]);
        let split = summarize(&ds, &EUROPEAN_QUALITY).unwrap();
        assert_eq!(split.meets_count + split.fails_count, ds.len());
        assert_eq!(split.meets_count, 2);
        assert_eq!(split.meets_mean_quality, 7.0);
        assert_eq!(split.fails_mean_quality, 14.0 / 3.0);
    }

    #[test]
    fn test_empty_class_has_undefined_mean() {
        let ds = dataset(&[wine(8.0, 0.3, 3.2, 4)]);
        let split = summarize(&ds, &EUROPEAN_QUALITY).unwrap();
        assert_eq!(split.meets_count, 0);
        assert!(split.meets_mean_quality.is_nan());

        let fig = figure(&split);
        let Chart::Pie(pie) = &fig.charts[1] else {
            panic!("expected a pie chart");
        };
        assert_eq!(pie.values, vec![0.0, 1.0]);
    }

    #[test]
    fn test_custom_rule_is_used() {
        let ds = dataset(&[wine(10.0, 0.3, 3.2, 7), wine(11.5, 0.3, 3.2, 8)]);
        let strict = QualityRule {
            min_alcohol: 11.0,
            ..EUROPEAN_QUALITY
        };
        let split = summarize(&ds, &strict).unwrap();
        assert_eq!((split.meets_count, split.fails_count), (1, 1));
    }
}
