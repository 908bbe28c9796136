// src/ingest/mod.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{collections::HashMap, fs::File, io::BufReader, path::Path};
use tracing::debug;

/// One parsed registry file: the header row plus every data row, in file
/// order.
///
/// Rows are kept exactly as read. A row shorter than the header simply has
/// fewer cells; [`Record::get`] reports those columns as absent rather than
/// empty.
#[derive(Debug)]
pub struct RecordTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    /// Assemble a table from already-split cells. Headers double as the
    /// lookup keys; on a duplicate header name the rightmost column wins.
    pub fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            headers,
            index,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the data rows as [`Record`] views, in file order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|row| Record {
            index: &self.index,
            row,
        })
    }
}

/// Borrowed view of a single data row, with field access by header name.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    index: &'a HashMap<String, usize>,
    row: &'a [String],
}

impl<'a> Record<'a> {
    /// Value of `field`, or `None` when the column is unknown or the row is
    /// shorter than the header. An empty cell is `Some("")`, not absent.
    pub fn get(&self, field: &str) -> Option<&'a str> {
        let &i = self.index.get(field)?;
        self.row.get(i).map(String::as_str)
    }
}

/// Read a delimited UTF-8 file into a [`RecordTable`]. The first row is the
/// header; every subsequent row becomes one record.
pub fn read_table<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<RecordTable> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true) // keep this so short rows surface as absent fields
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header row of {}", path.display()))?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    debug!(rows = rows.len(), path = %path.display(), "loaded record table");

    Ok(RecordTable::from_parts(headers, rows))
}
