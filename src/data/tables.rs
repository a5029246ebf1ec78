//! Tabular data merged across content packs.
//! Each pack is a root directory; a CSV present in several packs is merged by key column,
//! later packs replacing earlier rows with the same key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Column holding the pack root a merged row came from.
pub const ROW_SOURCE_COLUMN: &str = "fs_rowSource";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse CSV '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse JSON '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{path}' has no '{column}' column")]
    MissingColumn { path: String, column: String },
    #[error("'{path}': invalid value '{value}' in column '{column}'")]
    InvalidValue {
        path: String,
        column: String,
        value: String,
    },
    #[error("'{path}' not found in any content pack")]
    NotFound { path: String },
}

/// One merged CSV row: cells in header order plus the pack it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub source: String,
    pub cells: Vec<(String, String)>,
}

impl TableRow {
    pub fn new(source: impl Into<String>, cells: Vec<(String, String)>) -> Self {
        Self {
            source: source.into(),
            cells,
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Cell value, or `DataError::MissingColumn` naming the row's source.
    pub fn require(&self, column: &str) -> Result<&str, DataError> {
        self.get(column).ok_or_else(|| DataError::MissingColumn {
            path: self.source.clone(),
            column: column.to_string(),
        })
    }
}

/// Where the loader reads its tables and character definitions from.
pub trait ContentSource {
    /// All rows of the table at `path`, merged across packs by `key_column`.
    fn merged_table(&self, path: &str, key_column: &str) -> Result<Vec<TableRow>, DataError>;

    /// Raw text of a single definition file; the last pack providing it wins.
    fn read_definition(&self, path: &str) -> Result<String, DataError>;
}

/// Filesystem content packs in load order (base data first).
#[derive(Debug, Clone, Default)]
pub struct ContentPacks {
    roots: Vec<PathBuf>,
}

impl ContentPacks {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ContentSource for ContentPacks {
    fn merged_table(&self, path: &str, key_column: &str) -> Result<Vec<TableRow>, DataError> {
        let mut merged: Vec<TableRow> = Vec::new();
        let mut found = false;
        for root in &self.roots {
            let file = root.join(path);
            if !file.exists() {
                continue;
            }
            found = true;
            let rows = read_csv_rows(&file, &root.display().to_string())?;
            merge_rows(&mut merged, rows, key_column, &file)?;
        }
        if !found {
            return Err(DataError::NotFound {
                path: path.to_string(),
            });
        }
        Ok(merged)
    }

    fn read_definition(&self, path: &str) -> Result<String, DataError> {
        let file = self
            .roots
            .iter()
            .rev()
            .map(|root| root.join(path))
            .find(|file| file.exists())
            .ok_or_else(|| DataError::NotFound {
                path: path.to_string(),
            })?;
        fs::read_to_string(&file).map_err(|source| DataError::Io {
            path: file.display().to_string(),
            source,
        })
    }
}

fn read_csv_rows(file: &Path, source: &str) -> Result<Vec<TableRow>, DataError> {
    let csv_error = |err: csv::Error| DataError::Csv {
        path: file.display().to_string(),
        source: err,
    };
    let content = fs::read_to_string(file).map_err(|err| DataError::Io {
        path: file.display().to_string(),
        source: err,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let cells = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(i, name)| (name.to_string(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(TableRow::new(source, cells));
    }
    Ok(rows)
}

/// Merge `incoming` into `merged`: same key replaces in place, new keys append.
/// Rows with a blank key or a `#` comment key are dropped.
fn merge_rows(
    merged: &mut Vec<TableRow>,
    incoming: Vec<TableRow>,
    key_column: &str,
    file: &Path,
) -> Result<(), DataError> {
    for row in incoming {
        let Some(key) = row.get(key_column) else {
            return Err(DataError::MissingColumn {
                path: file.display().to_string(),
                column: key_column.to_string(),
            });
        };
        if key.is_empty() || key.starts_with('#') {
            continue;
        }
        let key = key.to_string();
        match merged.iter_mut().find(|r| r.get(key_column) == Some(key.as_str())) {
            Some(existing) => *existing = row,
            None => merged.push(row),
        }
    }
    Ok(())
}
