//! Per-column normalization of the raw table.
//!
//! Each rule is a total function over "column present or absent": a
//! recognized column that is missing from the source schema degrades to
//! an all-absent (or all-empty) result, never an error. Rules read only
//! raw source columns, so cleaning an already-cleaned table is a no-op.

use crate::loader::RawTable;
use crate::models::Movie;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::info;

/// Rating strings that mean "no numeric rating given".
const RATING_SENTINELS: [&str; 7] = [
    "NOT RATED",
    "UNRATED",
    "N/A",
    "NA",
    "NONE",
    "TBD",
    "NOT RATED/NOT RATED",
];

/// First decimal number in a string: digits with an optional single point.
static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid decimal pattern"));

/// First contiguous digit run in a string.
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// Timestamp formats seen in the source data, tried in order.
const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Clean a raw rating value.
///
/// Direct numeric parse first; then the sentinel set; then the first
/// decimal-number substring. Anything else (including non-finite parses)
/// is absent.
pub fn clean_rating(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<f64>() {
        return v.is_finite().then_some(v);
    }
    let upper = s.to_uppercase();
    if RATING_SENTINELS.contains(&upper.as_str()) {
        return None;
    }
    DECIMAL_RE
        .find(&upper)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Extract runtime minutes as the first contiguous digit run.
pub fn clean_runtime(raw: &str) -> Option<u32> {
    DIGITS_RE
        .find(raw)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Coerce a year value to an integer.
///
/// Accepts integer text and numeric text with a zero fractional part
/// (`"2001.0"`); anything else is absent, never zero.
pub fn clean_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i32),
        _ => None,
    }
}

/// Parse a last-updated timestamp; unparseable text is absent.
pub fn clean_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ts);
        }
    }
    // Bare dates land at midnight.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Split a genre string into trimmed, non-empty tokens.
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split([',', ';', '/', '|'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Clean the raw table into typed movie records.
///
/// Applies every column rule, then deduplicates: first occurrence per
/// non-empty `imdbID` when that column exists, otherwise first occurrence
/// per (`title`, `year`). Original relative order is preserved.
pub fn clean(table: &RawTable) -> Vec<Movie> {
    let title_col = table.column_index("title");
    let year_col = table.column_index("year");
    let rating_col = table.column_index("rating");
    let runtime_col = table.column_index_ignore_case("runtime");
    let genre_col = table.column_index("genre");
    let director_col = table.column_index("director");
    let id_col = table.column_index("imdbID");
    let updated_col = table.column_index("lastupdated");

    let mut movies = Vec::with_capacity(table.row_count());
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_title_years: HashSet<(String, Option<i32>)> = HashSet::new();

    for row in 0..table.row_count() {
        let cell = |col: Option<usize>| col.map(|c| table.value(row, c)).unwrap_or("");

        let movie = Movie {
            title: cell(title_col).trim().to_string(),
            year: clean_year(cell(year_col)),
            rating: clean_rating(cell(rating_col)),
            runtime_min: clean_runtime(cell(runtime_col)),
            genres: split_genres(cell(genre_col)),
            director: cell(director_col).to_string(),
            imdb_id: {
                let id = cell(id_col).trim();
                (!id.is_empty()).then(|| id.to_string())
            },
            last_updated: clean_timestamp(cell(updated_col)),
        };

        if id_col.is_some() {
            // Rows without an id carry no dedup key and are always kept.
            if let Some(ref id) = movie.imdb_id {
                if !seen_ids.insert(id.clone()) {
                    continue;
                }
            }
        } else if !seen_title_years.insert((movie.title.clone(), movie.year)) {
            continue;
        }

        movies.push(movie);
    }

    info!(
        "Cleaned {} rows into {} records",
        table.row_count(),
        movies.len()
    );

    movies
}
