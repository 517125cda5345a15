//! Cleaned-table CSV sample.
//!
//! Writes a capped sample of the cleaned table next to the report so the
//! result of the normalization rules can be inspected directly.

use crate::models::Movie;
use anyhow::{Context, Result};
use std::path::Path;

pub const SAMPLE_FILE: &str = "movies_cleaned_sample.csv";

/// Write up to `limit` cleaned rows as CSV.
///
/// Absent values become empty cells; genres are joined with `", "` so the
/// sample re-cleans to the same genre lists.
pub fn write_sample_csv(movies: &[Movie], path: &Path, limit: usize) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record([
        "title",
        "year",
        "rating",
        "runtime_min",
        "genre",
        "director",
        "imdbID",
        "lastupdated",
    ])?;

    for movie in movies.iter().take(limit) {
        writer.write_record([
            movie.title.clone(),
            movie.year.map(|y| y.to_string()).unwrap_or_default(),
            movie.rating.map(|r| r.to_string()).unwrap_or_default(),
            movie
                .runtime_min
                .map(|r| r.to_string())
                .unwrap_or_default(),
            movie.genres.join(", "),
            movie.director.clone(),
            movie.imdb_id.clone().unwrap_or_default(),
            movie
                .last_updated
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
