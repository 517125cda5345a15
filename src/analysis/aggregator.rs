//! Summary statistics and ranked frequency tables.
//!
//! All functions here only read the cleaned table. Rankings are stable:
//! ties keep first-encountered order.

use crate::models::{BasicStats, DirectorCount, DirectorRating, GenreCount, Movie};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Mean of a non-empty slice.
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of a non-empty slice.
fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Count occurrences, ranked by count descending with first-seen tie-break.
fn ranked_counts<'a>(items: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for item in items {
        let entry = counts.entry(item).or_insert(0);
        if *entry == 0 {
            order.push(item);
        }
        *entry += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|key| (key.to_string(), counts[key]))
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by_key(|(_, count)| Reverse(*count));
    ranked
}

/// Basic descriptive statistics over the cleaned table.
pub fn basic_stats(movies: &[Movie]) -> BasicStats {
    let years: Vec<i32> = movies.iter().filter_map(|m| m.year).collect();
    let ratings: Vec<f64> = movies.iter().filter_map(|m| m.rating).collect();
    let runtimes: Vec<f64> = movies
        .iter()
        .filter_map(|m| m.runtime_min.map(f64::from))
        .collect();

    BasicStats {
        num_movies: movies.len(),
        year_min: years.iter().min().copied(),
        year_max: years.iter().max().copied(),
        rating_mean: mean(&ratings),
        rating_median: median(&ratings),
        runtime_mean: mean(&runtimes),
        runtime_median: median(&runtimes),
    }
}

/// Top `n` genres by occurrence across all genre lists.
pub fn top_genres(movies: &[Movie], n: usize) -> Vec<GenreCount> {
    let mut ranked = ranked_counts(
        movies
            .iter()
            .flat_map(|m| m.genres.iter().map(String::as_str)),
    );
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(genre, count)| GenreCount { genre, count })
        .collect()
}

/// Top `n` directors by movie count. Empty when no row has a director.
pub fn top_directors_by_count(movies: &[Movie], n: usize) -> Vec<DirectorCount> {
    let mut ranked = ranked_counts(
        movies
            .iter()
            .map(|m| m.director.as_str())
            .filter(|d| !d.is_empty()),
    );
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(director, count)| DirectorCount { director, count })
        .collect()
}

/// Top `n` directors by mean rating over their rated movies.
///
/// Groups with fewer than `min_movies` rated rows are dropped. Empty when
/// no row has a director.
pub fn top_directors_by_rating(movies: &[Movie], n: usize, min_movies: usize) -> Vec<DirectorRating> {
    let mut ratings_by_director: HashMap<&str, Vec<f64>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for movie in movies {
        if movie.director.is_empty() {
            continue;
        }
        let director = movie.director.as_str();
        if !ratings_by_director.contains_key(director) {
            order.push(director);
        }
        let entry = ratings_by_director.entry(director).or_default();
        if let Some(rating) = movie.rating {
            entry.push(rating);
        }
    }

    let mut ranked: Vec<DirectorRating> = order
        .into_iter()
        .filter_map(|director| {
            let ratings = &ratings_by_director[director];
            if ratings.len() < min_movies {
                return None;
            }
            mean(ratings).map(|rating_mean| DirectorRating {
                director: director.to_string(),
                rating_mean,
                count: ratings.len(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.rating_mean
            .partial_cmp(&a.rating_mean)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}
