//! Tabular backend: one comma-separated table per source map and report table.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::output::{Document, Row, Table};

/// Identifies one emitted table: the map it came from and the report table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    pub source: String,
    pub table: Table,
}

impl TableKey {
    /// File name the table is written under.
    pub fn file_name(&self) -> String {
        format!("{}.{}.csv", self.source, self.table.name())
    }
}

/// Quotes a cell if it contains a separator, a quote, or a line break.
pub fn quote_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}

fn push_line<'c>(buffer: &mut String, cells: impl IntoIterator<Item = &'c str>) {
    let line = cells
        .into_iter()
        .map(quote_cell)
        .collect::<Vec<_>>()
        .join(",");
    buffer.push_str(&line);
    buffer.push('\n');
}

/// Accumulated table text, keyed by [`TableKey`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabularReport {
    tables: BTreeMap<TableKey, String>,
}

impl TabularReport {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    /// Collects every row in `doc` into per-table buffers for `source`.
    pub fn from_document(source: &str, doc: &Document) -> Self {
        let mut report = Self::new();
        doc.visit(|item| {
            for row in &item.rows {
                report.push_row(source, row);
            }
        });
        report
    }

    /// Appends a row, writing the table's header line first if the table is new.
    pub fn push_row(&mut self, source: &str, row: &Row) {
        let key = TableKey {
            source: source.to_owned(),
            table: row.table,
        };
        let buffer = self.tables.entry(key).or_insert_with(|| {
            let mut header = String::new();
            push_line(&mut header, row.table.columns().iter().copied());
            header
        });
        push_line(buffer, row.cells.iter().map(String::as_str));
    }

    /// Adds the tables of another report, e.g. one built from a different map file.
    pub fn merge(&mut self, other: TabularReport) {
        for (key, text) in other.tables {
            match self.tables.get_mut(&key) {
                Some(existing) => {
                    // Skip the other table's header line.
                    let body = text.split_once('\n').map_or("", |(_, rest)| rest);
                    existing.push_str(body);
                }
                None => {
                    self.tables.insert(key, text);
                }
            }
        }
    }

    pub fn get(&self, source: &str, table: Table) -> Option<&str> {
        self.tables
            .get(&TableKey {
                source: source.to_owned(),
                table,
            })
            .map(String::as_str)
    }

    pub fn tables(&self) -> impl Iterator<Item = (&TableKey, &str)> {
        self.tables.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Writes each table to `<dir>/<source>.<table>.csv`, returning the written paths.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.tables.len());
        for (key, text) in &self.tables {
            let path = dir.join(key.file_name());
            fs::write(&path, text)?;
            written.push(path);
        }
        info!("Wrote {} tables to {}.", written.len(), dir.display());
        Ok(written)
    }
}
