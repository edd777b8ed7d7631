use thiserror::Error;

use super::model::{ColumnKind, Value, WineDataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("column '{0}' not found")]
    FieldNotFound(String),
    #[error("column '{0}' is not numeric")]
    NotNumeric(String),
}

// ---------------------------------------------------------------------------
// RowFilter – chained range predicates over a borrowed dataset
// ---------------------------------------------------------------------------

/// Immutable filter step: the backing dataset plus the rows still selected.
///
/// Every predicate returns a new `RowFilter` narrowed from this one, so
/// chaining composes as AND. The dataset itself is never touched.
#[derive(Debug, Clone)]
pub struct RowFilter<'a> {
    dataset: &'a WineDataset,
    selected: Vec<usize>,
}

impl<'a> RowFilter<'a> {
    /// Start with every row selected.
    pub fn new(dataset: &'a WineDataset) -> Self {
        Self {
            dataset,
            selected: (0..dataset.len()).collect(),
        }
    }

    pub fn gt(&self, field: &str, value: f64) -> Result<Self, FilterError> {
        self.narrow(field, |x| x > value)
    }

    pub fn gte(&self, field: &str, value: f64) -> Result<Self, FilterError> {
        self.narrow(field, |x| x >= value)
    }

    pub fn lt(&self, field: &str, value: f64) -> Result<Self, FilterError> {
        self.narrow(field, |x| x < value)
    }

    pub fn lte(&self, field: &str, value: f64) -> Result<Self, FilterError> {
        self.narrow(field, |x| x <= value)
    }

    /// The selected rows as a read-only view.
    pub fn get(&self) -> DatasetView<'a> {
        DatasetView {
            dataset: self.dataset,
            indices: self.selected.clone(),
        }
    }

    /// Rows of the whole dataset this filter did not select, in table order.
    pub fn complement(&self) -> DatasetView<'a> {
        let mut mask = vec![true; self.dataset.len()];
        for &i in &self.selected {
            mask[i] = false;
        }
        let indices = mask
            .into_iter()
            .enumerate()
            .filter_map(|(i, keep)| keep.then_some(i))
            .collect();
        DatasetView {
            dataset: self.dataset,
            indices,
        }
    }

    /// Keep rows whose cell in `field` is numeric and passes `pred`.
    /// Null cells never pass.
    fn narrow(&self, field: &str, pred: impl Fn(f64) -> bool) -> Result<Self, FilterError> {
        let col = numeric_column(self.dataset, field)?;
        let selected = self
            .selected
            .iter()
            .copied()
            .filter(|&row| {
                self.dataset
                    .cell(row, col)
                    .as_f64()
                    .is_some_and(|x| pred(x))
            })
            .collect();

        Ok(Self {
            dataset: self.dataset,
            selected,
        })
    }
}

// ---------------------------------------------------------------------------
// DatasetView – a read-only subset of rows
// ---------------------------------------------------------------------------

/// A subset of a dataset's rows, in table order. Borrowing only.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    dataset: &'a WineDataset,
    indices: Vec<usize>,
}

impl<'a> DatasetView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Row indices into the backing dataset.
    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Cells of one column for the selected rows.
    pub fn column_values(&self, field: &str) -> Result<Vec<&'a Value>, FilterError> {
        let col = self
            .dataset
            .column_index(field)
            .ok_or_else(|| FilterError::FieldNotFound(field.to_string()))?;
        Ok(self
            .indices
            .iter()
            .map(|&row| self.dataset.cell(row, col))
            .collect())
    }

    /// Count of non-null cells in `field`.
    pub fn count_non_null(&self, field: &str) -> Result<usize, FilterError> {
        Ok(self
            .column_values(field)?
            .into_iter()
            .filter(|v| !v.is_null())
            .count())
    }

    /// Mean of the numeric cells in `field`, skipping nulls and NaN.
    /// No numeric cells gives `NaN`.
    pub fn mean(&self, field: &str) -> Result<f64, FilterError> {
        let col = numeric_column(self.dataset, field)?;
        let (sum, n) = self
            .indices
            .iter()
            .filter_map(|&row| self.dataset.cell(row, col).as_f64())
            .filter(|x| !x.is_nan())
            .fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
        Ok(if n == 0 { f64::NAN } else { sum / n as f64 })
    }
}

/// Position of `field`, which must exist and be numeric.
fn numeric_column(dataset: &WineDataset, field: &str) -> Result<usize, FilterError> {
    let col = dataset
        .column_index(field)
        .ok_or_else(|| FilterError::FieldNotFound(field.to_string()))?;
    if dataset.columns[col].kind != ColumnKind::Numeric {
        return Err(FilterError::NotNumeric(field.to_string()));
    }
    Ok(col)
}
