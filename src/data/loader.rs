use std::collections::{HashMap, HashSet};
use std::io::Read;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;

use super::model::{TYPE_COLUMN, Value, WineDataset, WineRecord, WineType};
use crate::config::{RED_WINE_URL, SOURCE_DELIMITER, WHITE_WINE_URL};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fetch the white and red wine tables and merge them into one dataset.
///
/// Any network or HTTP failure is fatal. Rows with too many fields are
/// dropped and only show up in the log.
pub fn load() -> Result<WineDataset> {
    let client = Client::builder()
        .build()
        .context("building HTTP client")?;

    let white = fetch_source(&client, WHITE_WINE_URL, WineType::White)?;
    let red = fetch_source(&client, RED_WINE_URL, WineType::Red)?;

    let dropped = white.dropped + red.dropped;
    let dataset = concat(vec![white, red]);
    if dataset.is_empty() {
        log::warn!("Both sources parsed to zero rows");
    }
    log::info!(
        "Loaded {} wines with {} columns ({dropped} over-long rows dropped)",
        dataset.len(),
        dataset.columns.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// One source table
// ---------------------------------------------------------------------------

/// Rows parsed from a single source, already tagged with their origin.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub wine_type: WineType,
    /// Header names, including the appended `type` column.
    pub headers: Vec<String>,
    pub records: Vec<WineRecord>,
    /// Rows skipped because they could not be read or had more fields than
    /// the header.
    pub dropped: usize,
}

fn fetch_source(client: &Client, url: &str, wine_type: WineType) -> Result<ParsedSource> {
    log::debug!("Fetching {wine_type} wines from {url}");
    let body = client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .with_context(|| format!("fetching {url}"))?
        .bytes()
        .with_context(|| format!("reading response body of {url}"))?;

    let source = parse_source(body.as_ref(), wine_type)
        .with_context(|| format!("parsing {url}"))?;

    if source.dropped > 0 {
        log::warn!("{url}: dropped {} rows with too many fields", source.dropped);
    }
    log::debug!("{url}: {} {} wines", source.records.len(), source.wine_type);
    Ok(source)
}

/// Parse one `;`-separated table with a header row and tag every row with
/// `wine_type`.
///
/// Short rows are padded with `Null`. Rows with more fields than the header
/// are dropped and counted.
pub fn parse_source<R: Read>(reader: R, wine_type: WineType) -> Result<ParsedSource> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(SOURCE_DELIMITER)
        .flexible(true)
        .from_reader(reader);

    let raw: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if raw.iter().all(|h| h.is_empty()) {
        bail!("source has no header row");
    }
    let mut headers = dedup_headers(raw);
    let width = headers.len();
    // a source that already has a `type` column gets it overwritten
    let type_pos = match headers.iter().position(|h| h == TYPE_COLUMN) {
        Some(pos) => pos,
        None => {
            headers.push(TYPE_COLUMN.to_string());
            width
        }
    };

    let mut records = Vec::new();
    let mut dropped = 0;

    for result in reader.records() {
        match result {
            Ok(row) if row.len() <= width => {
                let mut cells: Vec<Value> = row.iter().map(Value::parse).collect();
                cells.resize(headers.len(), Value::Null);
                cells[type_pos] = Value::Text(wine_type.label().to_string());
                records.push(WineRecord { cells });
            }
            _ => dropped += 1,
        }
    }

    Ok(ParsedSource {
        wine_type,
        headers,
        records,
        dropped,
    })
}

/// Rename repeated header names to `name.1`, `name.2`, … so every column
/// keeps its own slot.
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .into_iter()
        .map(|h| {
            let mut name = h.clone();
            let mut n = 0;
            while seen.contains(&name) {
                n += 1;
                name = format!("{h}.{n}");
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

/// Stack sources on top of each other, in order.
///
/// Columns are the union of all headers in first-seen order; a source
/// without some column gets `Null` there.
pub fn concat(sources: Vec<ParsedSource>) -> WineDataset {
    let mut names: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let positions: Vec<Vec<usize>> = sources
        .iter()
        .map(|source| {
            source
                .headers
                .iter()
                .map(|h| {
                    *index.entry(h.clone()).or_insert_with(|| {
                        names.push(h.clone());
                        names.len() - 1
                    })
                })
                .collect()
        })
        .collect();

    let mut records = Vec::with_capacity(sources.iter().map(|s| s.records.len()).sum());
    for (source, positions) in sources.into_iter().zip(positions) {
        for rec in source.records {
            let mut cells = vec![Value::Null; names.len()];
            for (cell, &pos) in rec.cells.into_iter().zip(&positions) {
                cells[pos] = cell;
            }
            records.push(WineRecord { cells });
        }
    }

    WineDataset::from_records(names, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;

    const WHITE: &str = "\"fixed acidity\";\"residual sugar\";\"alcohol\";\"quality\"\n\
                         7;20.7;8.8;6\n\
                         6.3;1.6;9.5;6\n\
                         8.1;6.9;10.1;6\n";

    const RED: &str = "\"fixed acidity\";\"residual sugar\";\"alcohol\";\"quality\"\n\
                       7.4;1.9;9.4;5\n\
                       7.8;2.6;9.8;5\n";

    #[test]
    fn test_parse_source_tags_rows() {
        let src = parse_source(WHITE.as_bytes(), WineType::White).unwrap();
        assert_eq!(
            src.headers,
            vec!["fixed acidity", "residual sugar", "alcohol", "quality", "type"]
        );
        assert_eq!(src.records.len(), 3);
        assert_eq!(src.dropped, 0);
        assert!(src
            .records
            .iter()
            .all(|r| r.cells.last() == Some(&Value::Text("white".into()))));
        assert_eq!(src.records[0].cells[3], Value::Integer(6));
    }

    #[test]
    fn test_wide_rows_are_dropped_and_counted() {
        let text = "a;b\n1;2\n3;4;5\n6\n7;8\n";
        let src = parse_source(text.as_bytes(), WineType::Red).unwrap();
        assert_eq!(src.records.len(), 3);
        assert_eq!(src.dropped, 1);
        assert_eq!(
            src.records[1].cells,
            vec![Value::Integer(6), Value::Null, Value::Text("red".into())]
        );
    }

    #[test]
    fn test_short_rows_are_padded_with_null() {
        let text = "alcohol;pH;quality\n9;3.1;6\n10;3.2\n";
        let src = parse_source(text.as_bytes(), WineType::Red).unwrap();
        assert_eq!(src.records.len(), 2);
        assert_eq!(src.dropped, 0);
        assert_eq!(src.records[1].cells[2], Value::Null);
        assert_eq!(src.records[1].cells[3], Value::Text("red".into()));

        let ds = concat(vec![src]);
        assert_eq!(ds.column("quality").unwrap().kind, ColumnKind::Numeric);
    }

    #[test]
    fn test_duplicate_headers_keep_their_own_columns() {
        let text = "alcohol;alcohol;pH;alcohol.1\n9;10;3.1;11\n";
        let src = parse_source(text.as_bytes(), WineType::White).unwrap();
        assert_eq!(
            src.headers,
            vec!["alcohol", "alcohol.1", "pH", "alcohol.1.1", "type"]
        );

        let ds = concat(vec![src]);
        assert_eq!(ds.columns.len(), 5);
        assert_eq!(ds.cell(0, 0), &Value::Integer(9));
        assert_eq!(ds.cell(0, 1), &Value::Integer(10));
        assert_eq!(ds.cell(0, 3), &Value::Integer(11));
    }

    #[test]
    fn test_existing_type_column_is_overwritten() {
        let text = "alcohol;type\n9;x\n10\n";
        let src = parse_source(text.as_bytes(), WineType::White).unwrap();
        assert_eq!(src.headers, vec!["alcohol", "type"]);
        assert_eq!(src.records.len(), 2);
        for rec in &src.records {
            assert_eq!(rec.cells.len(), 2);
            assert_eq!(rec.cells[1], Value::Text("white".into()));
        }
    }

    #[test]
    fn test_empty_source_is_an_error() {
        assert!(parse_source("".as_bytes(), WineType::Red).is_err());
    }

    #[test]
    fn test_concat_is_a_union_of_rows() {
        let white = parse_source(WHITE.as_bytes(), WineType::White).unwrap();
        let red = parse_source(RED.as_bytes(), WineType::Red).unwrap();
        let expected = white.records.len() + red.records.len();

        let ds = concat(vec![white, red]);
        assert_eq!(ds.len(), expected);
        assert_eq!(ds.columns.len(), 5);

        let type_col = ds.column_index(TYPE_COLUMN).unwrap();
        let labels: Vec<String> = ds.records.iter().map(|r| r.cells[type_col].to_string()).collect();
        assert_eq!(labels, vec!["white", "white", "white", "red", "red"]);

        assert_eq!(ds.column("type").unwrap().kind, ColumnKind::Categorical);
        assert_eq!(ds.column("alcohol").unwrap().kind, ColumnKind::Numeric);
    }

    #[test]
    fn test_concat_fills_missing_columns_with_null() {
        let white = parse_source("alcohol;pH\n9;3.1\n".as_bytes(), WineType::White).unwrap();
        let red = parse_source("alcohol;density\n10;0.99\n".as_bytes(), WineType::Red).unwrap();
        let ds = concat(vec![white, red]);

        let names: Vec<&str> = ds.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alcohol", "pH", "type", "density"]);
        assert_eq!(ds.cell(0, 3), &Value::Null);
        assert_eq!(ds.cell(1, 1), &Value::Null);
        assert_eq!(ds.cell(1, 2), &Value::Text("red".into()));
    }
}
