use std::cmp::Ordering;

use anyhow::{Context, Result};

use super::columns::QUALITY;
use crate::data::model::WineDataset;
use crate::figure::{self, Chart, Figure, HeatmapSpec, SummaryTable, format_value};

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pearson's r over paired samples. NaN for fewer than two pairs or a
/// constant side.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }
    let (x0, y0) = pairs[0];
    if pairs.iter().all(|&(x, _)| x == x0) || pairs.iter().all(|&(_, y)| y == y0) {
        return f64::NAN;
    }
    let (sum_x, sum_y) = pairs
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    let mean_x = sum_x / n as f64;
    let mean_y = sum_y / n as f64;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

/// Pairwise correlations between all numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Symmetric, `columns.len()` square.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of numeric columns, using for each pair only the
    /// rows where both cells are numbers.
    pub fn compute(dataset: &WineDataset) -> Self {
        let columns: Vec<String> = dataset
            .numeric_columns()
            .into_iter()
            .map(str::to_string)
            .collect();
        let positions: Vec<usize> = columns
            .iter()
            .filter_map(|name| dataset.column_index(name))
            .collect();

        let n = positions.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let pairs: Vec<(f64, f64)> = dataset
                    .records
                    .iter()
                    .filter_map(|rec| {
                        let x = rec.cells.get(positions[i])?.as_f64()?;
                        let y = rec.cells.get(positions[j])?.as_f64()?;
                        (!x.is_nan() && !y.is_nan()).then_some((x, y))
                    })
                    .collect();
                let r = pearson(&pairs);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { columns, values }
    }

    #[cfg(test)]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Every column's correlation with `target` (itself included), strongest
    /// first by absolute value. NaN entries go last.
    pub fn ranked_against(&self, target: &str) -> Option<Vec<(String, f64)>> {
        let t = self.columns.iter().position(|c| c == target)?;
        let mut ranked: Vec<(String, f64)> = self
            .columns
            .iter()
            .zip(&self.values)
            .map(|(name, row)| (name.clone(), row[t]))
            .collect();
        ranked.sort_by(|(_, a), (_, b)| match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => b.abs().total_cmp(&a.abs()),
        });
        Some(ranked)
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

pub fn figure(matrix: &CorrelationMatrix, ranked: &[(String, f64)]) -> Figure {
    Figure {
        title: "Correlation matrix".to_string(),
        charts: vec![
            Chart::Heatmap(HeatmapSpec {
                title: "All numeric variables".to_string(),
                row_labels: matrix.columns.clone(),
                col_labels: matrix.columns.clone(),
                values: matrix.values.clone(),
                range: Some((-1.0, 1.0)),
            }),
            Chart::Heatmap(HeatmapSpec {
                title: format!("Correlation with {QUALITY}"),
                row_labels: ranked.iter().map(|(name, _)| name.clone()).collect(),
                col_labels: vec![QUALITY.to_string()],
                values: ranked.iter().map(|&(_, r)| vec![r]).collect(),
                range: None,
            }),
        ],
        table: Some(SummaryTable {
            headers: vec!["variable".into(), format!("r with {QUALITY}")],
            rows: ranked
                .iter()
                .map(|(name, r)| vec![name.clone(), format_value(*r, 3)])
                .collect(),
        }),
    }
}

/// Correlate all numeric columns and chart the matrix next to the quality
/// ranking.
pub fn run(dataset: &WineDataset) -> Result<()> {
    let matrix = CorrelationMatrix::compute(dataset);
    let ranked = matrix
        .ranked_against(QUALITY)
        .with_context(|| format!("dataset has no numeric '{QUALITY}' column"))?;

    log::info!("Correlated {} numeric columns", matrix.columns.len());
    if let Some((name, r)) = ranked.iter().find(|(name, _)| name != QUALITY) {
        log::info!("Strongest correlate of {QUALITY}: {name} (r = {})", format_value(*r, 3));
    }

    figure::show(figure(&matrix, &ranked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Value, WineRecord};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn table(rows: &[[f64; 4]]) -> WineDataset {
        WineDataset::from_records(
            vec![
                "alcohol".into(),
                "density".into(),
                "quality".into(),
                "chlorides".into(),
                "type".into(),
            ],
            rows.iter()
                .map(|r| WineRecord {
                    cells: vec![
                        Value::Float(r[0]),
                        Value::Float(r[1]),
                        Value::Float(r[2]),
                        Value::Float(r[3]),
                        Value::Text("white".into()),
                    ],
                })
                .collect(),
        )
    }

    #[test]
    fn test_pearson() {
        assert!(approx(pearson(&[(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]), 1.0));
        assert!(approx(pearson(&[(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)]), -1.0));
        assert!(pearson(&[(1.0, 5.0), (2.0, 5.0)]).is_nan());
        assert!(pearson(&[(1.0, 5.0)]).is_nan());
        let r = pearson(&[(1.0, 1.0), (2.0, 3.0), (3.0, 2.0), (4.0, 4.0)]);
        assert!(approx(r, 0.8));
    }

    #[test]
    fn test_matrix_skips_categorical_columns() {
        let ds = table(&[
            [9.0, 1.00, 5.0, 0.05],
            [10.0, 0.99, 6.0, 0.05],
            [11.0, 0.98, 7.0, 0.05],
        ]);
        let m = CorrelationMatrix::compute(&ds);
        assert_eq!(m.columns, vec!["alcohol", "density", "quality", "chlorides"]);
        assert!(approx(m.get("alcohol", "quality").unwrap(), 1.0));
        assert!(approx(m.get("density", "quality").unwrap(), -1.0));
        assert!(m.get("chlorides", "quality").unwrap().is_nan());
        assert!(approx(m.get("alcohol", "alcohol").unwrap(), 1.0));
        assert_eq!(m.get("alcohol", "density"), m.get("density", "alcohol"));
        assert_eq!(m.get("type", "quality"), None);
    }

    #[test]
    fn test_pairs_skip_null_cells() {
        let ds = WineDataset::from_records(
            vec!["a".into(), "b".into()],
            vec![
                WineRecord { cells: vec![Value::Integer(1), Value::Integer(1)] },
                WineRecord { cells: vec![Value::Integer(2), Value::Null] },
                WineRecord { cells: vec![Value::Integer(3), Value::Integer(3)] },
                WineRecord { cells: vec![Value::Integer(4), Value::Integer(4)] },
            ],
        );
        let m = CorrelationMatrix::compute(&ds);
        assert!(approx(m.get("a", "b").unwrap(), 1.0));
    }

    #[test]
    fn test_ranking_by_absolute_value() {
        let ds = table(&[
            [9.0, 0.99, 5.0, 0.05],
            [10.0, 0.98, 6.0, 0.05],
            [12.0, 0.99, 7.0, 0.05],
            [11.0, 0.97, 6.0, 0.05],
        ]);
        let m = CorrelationMatrix::compute(&ds);
        let ranked = m.ranked_against("quality").unwrap();
        let names: Vec<&str> = ranked.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names[0], "quality");
        assert_eq!(names[3], "chlorides");
        assert!(ranked[1].1.abs() >= ranked[2].1.abs());
        assert!(ranked[3].1.is_nan());
        assert!(m.ranked_against("sugar").is_none());
    }

    #[test]
    fn test_figure_layout() {
        let ds = table(&[[9.0, 1.0, 5.0, 0.1], [10.0, 0.9, 6.0, 0.2]]);
        let m = CorrelationMatrix::compute(&ds);
        let ranked = m.ranked_against("quality").unwrap();
        let fig = figure(&m, &ranked);
        assert_eq!(fig.charts.len(), 2);
        let Chart::Heatmap(full) = &fig.charts[0] else {
            panic!("expected a heatmap");
        };
        assert_eq!(full.range, Some((-1.0, 1.0)));
        assert_eq!(full.values.len(), 4);
        let Chart::Heatmap(column) = &fig.charts[1] else {
            panic!("expected a heatmap");
        };
        assert_eq!(column.col_labels, vec!["quality"]);
        assert_eq!(column.values.len(), 4);
        assert_eq!(column.range, None);
    }
}
