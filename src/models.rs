//! Data models for the movie analysis pipeline.
//!
//! This module contains all the core data structures used throughout
//! the application for representing cleaned rows, statistics, and reports.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single cleaned movie record.
///
/// Every field except `title` and `director` uses `Option` for "no value".
/// `director` deliberately uses the empty string as its absence sentinel:
/// the grouping functions filter on `director != ""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Movie title, trimmed. May be empty.
    pub title: String,
    /// Release year, absent when the source value was not numeric.
    pub year: Option<i32>,
    /// Numeric rating. Always finite when present.
    pub rating: Option<f64>,
    /// Runtime in minutes, extracted from the first digit run.
    pub runtime_min: Option<u32>,
    /// Genre tokens, trimmed and never empty.
    pub genres: Vec<String>,
    /// Director name, or `""` when the source has none.
    pub director: String,
    /// Unique identifier used for deduplication when present.
    pub imdb_id: Option<String>,
    /// Last-updated timestamp from the source, when parseable.
    pub last_updated: Option<NaiveDateTime>,
}

/// Summary statistics over a cleaned table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    /// Number of rows after cleaning.
    pub num_movies: usize,
    /// Earliest year among present values.
    pub year_min: Option<i32>,
    /// Latest year among present values.
    pub year_max: Option<i32>,
    /// Mean rating among present values.
    pub rating_mean: Option<f64>,
    /// Median rating among present values.
    pub rating_median: Option<f64>,
    /// Mean runtime among present values.
    pub runtime_mean: Option<f64>,
    /// Median runtime among present values.
    pub runtime_median: Option<f64>,
}

/// A genre with its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// A director with their movie count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorCount {
    pub director: String,
    pub count: usize,
}

/// A director with their mean rating over rated movies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorRating {
    pub director: String,
    /// Mean over rows with a present rating.
    pub rating_mean: f64,
    /// Number of rows with a present rating.
    pub count: usize,
}

/// The complete analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// Summary statistics.
    pub stats: BasicStats,
    /// Top genres by occurrence count.
    pub top_genres: Vec<GenreCount>,
    /// Top directors by movie count.
    pub top_directors_by_count: Vec<DirectorCount>,
    /// Top directors by mean rating (min-movies threshold applied).
    pub top_directors_by_rating: Vec<DirectorRating>,
    /// Filenames of the chart artifacts actually produced.
    pub artifacts: Vec<String>,
}

/// Metadata about the analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the analyzed input file.
    pub input_path: String,
    /// Date and time of the analysis.
    pub generated_at: DateTime<Utc>,
    /// Number of rows read from the source.
    pub rows_loaded: usize,
    /// Number of rows after cleaning and deduplication.
    pub rows_cleaned: usize,
}

impl Movie {
    /// Creates an empty record with the given title.
    #[cfg(test)]
    pub fn with_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            year: None,
            rating: None,
            runtime_min: None,
            genres: Vec::new(),
            director: String::new(),
            imdb_id: None,
            last_updated: None,
        }
    }
}
