//! Error types for the data-source layer.
//!
//! Per-value parse failures never surface here: cleaning rules convert
//! them to absent values locally. Only file-level problems are errors.

use std::path::PathBuf;
use thiserror::Error;

/// A fatal problem with the input file. Aborts the run.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {} as delimited data: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} contains no header row", .0.display())]
    EmptyTable(PathBuf),
}
