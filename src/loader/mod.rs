//! Delimited-file loading.
//!
//! This module reads the input CSV into an in-memory [`RawTable`] with
//! column names preserved and all cells kept as raw strings. Typing is
//! the cleaner's job, not the loader's.

use crate::error::DataSourceError;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// The raw table exactly as parsed: trimmed headers, string cells.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table from headers and rows. Intended for tests and the loader.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the column with this exact (trimmed) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the first column matching this name case-insensitively.
    pub fn column_index_ignore_case(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }

    /// Cell value at (row, col), or `""` when the row is too short.
    ///
    /// Ragged rows are tolerated; a missing cell reads as absent.
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column names, in source order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Load a delimited file into a [`RawTable`].
///
/// Fails with [`DataSourceError`] when the path does not exist or the
/// content is not parseable as delimited tabular data.
pub fn load_table(path: &Path) -> Result<RawTable, DataSourceError> {
    if !path.exists() {
        return Err(DataSourceError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| DataSourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        return Err(DataSourceError::EmptyTable(path.to_path_buf()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| DataSourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(String::from).collect());
    }

    debug!("Columns: {:?}", headers);
    info!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_simple_table() {
        let file = write_csv("title,year\nHeat,1995\nAlien,1979\n");
        let table = load_table(file.path()).unwrap();

        assert_eq!(table.headers(), &["title", "year"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(0, 0), "Heat");
        assert_eq!(table.value(1, 1), "1979");
    }

    #[test]
    fn test_headers_are_trimmed() {
        let file = write_csv(" title , year \nHeat,1995\n");
        let table = load_table(file.path()).unwrap();

        assert_eq!(table.column_index("title"), Some(0));
        assert_eq!(table.column_index("year"), Some(1));
    }

    #[test]
    fn test_column_lookup_ignore_case() {
        let file = write_csv("Runtime,title\n120 min,Heat\n");
        let table = load_table(file.path()).unwrap();

        assert_eq!(table.column_index("runtime"), None);
        assert_eq!(table.column_index_ignore_case("runtime"), Some(0));
    }

    #[test]
    fn test_ragged_row_reads_as_empty() {
        let file = write_csv("title,year,rating\nHeat,1995\n");
        let table = load_table(file.path()).unwrap();

        assert_eq!(table.value(0, 2), "");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_table(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataSourceError::NotFound(_)));
    }

    #[test]
    fn test_out_of_range_cell_is_empty() {
        let table = RawTable::new(
            vec!["title".to_string()],
            vec![vec!["Heat".to_string()]],
        );
        assert_eq!(table.value(5, 0), "");
        assert_eq!(table.value(0, 5), "");
    }
}
