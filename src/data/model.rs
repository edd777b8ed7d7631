use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the wine table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, inferred per cell while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f64),
    Integer(i64),
    Text(String),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{v:.4}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

/// Cell contents read as missing, in addition to the empty cell.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl Value {
    /// Infer the type of a raw cell: empty or an NA marker → `Null`, then
    /// integer, float, text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || NA_MARKERS.contains(&s) {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(s.to_string())
    }

    /// Numeric view of the cell, `None` for text and nulls.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every non-null cell is a number.
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

static NULL: Value = Value::Null;

/// Name of the column appended by the loader to tag each row's origin.
pub const TYPE_COLUMN: &str = "type";

/// Origin of a row: which of the two source tables it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WineType {
    White,
    Red,
}

impl WineType {
    /// Literal written into the `type` column.
    pub fn label(&self) -> &'static str {
        match self {
            WineType::White => "white",
            WineType::Red => "red",
        }
    }
}

impl fmt::Display for WineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// WineRecord – one row of the table
// ---------------------------------------------------------------------------

/// One wine: cells aligned with [`WineDataset::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct WineRecord {
    pub cells: Vec<Value>,
}

// ---------------------------------------------------------------------------
// WineDataset – the unified table
// ---------------------------------------------------------------------------

/// The merged dataset: ordered columns and every row from both sources.
#[derive(Debug, Clone, PartialEq)]
pub struct WineDataset {
    pub columns: Vec<Column>,
    pub records: Vec<WineRecord>,
}

impl WineDataset {
    /// Build a dataset from raw rows, inferring each column's kind.
    ///
    /// Rows shorter than the header are padded with `Null`.
    pub fn from_records(names: Vec<String>, mut records: Vec<WineRecord>) -> Self {
        for rec in &mut records {
            rec.cells.resize(names.len(), Value::Null);
        }
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let numeric = records.iter().all(|r| {
                    let cell = &r.cells[idx];
                    cell.is_null() || cell.as_f64().is_some()
                });
                let kind = if numeric {
                    ColumnKind::Numeric
                } else {
                    ColumnKind::Categorical
                };
                Column { name, kind }
            })
            .collect();
        WineDataset { columns, records }
    }

    /// Number of wines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of all numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Cell at `(row, col)`; out-of-range positions read as `Null`.
    pub fn cell(&self, row: usize, col: usize) -> &Value {
        self.records
            .get(row)
            .and_then(|r| r.cells.get(col))
            .unwrap_or(&NULL)
    }
}
