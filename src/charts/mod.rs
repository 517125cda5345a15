//! Chart artifact rendering.
//!
//! Each function draws one artifact with plotters and returns `Ok(None)`
//! when there is no eligible data for it, so a sparse dataset skips
//! individual charts instead of failing the run.

use crate::config::ChartConfig;
use crate::models::{GenreCount, Movie};
use anyhow::Result;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const RATING_DIST_FILE: &str = "rating_distribution.png";
pub const RUNTIME_DIST_FILE: &str = "runtime_distribution.png";
pub const TOP_GENRES_FILE: &str = "top_genres.png";
pub const RATING_VS_RUNTIME_FILE: &str = "rating_vs_runtime.png";
pub const RATINGS_BY_GENRE_FILE: &str = "boxplot_ratings_by_genre.png";

/// Histogram of ratings over a fixed bin count.
pub fn rating_distribution(
    movies: &[Movie],
    out_dir: &Path,
    config: &ChartConfig,
) -> Result<Option<PathBuf>> {
    let values: Vec<f64> = movies.iter().filter_map(|m| m.rating).collect();
    if values.is_empty() {
        debug!("No rating values; skipping rating distribution");
        return Ok(None);
    }

    let path = out_dir.join(RATING_DIST_FILE);
    draw_histogram(
        &path,
        "Rating Distribution",
        "Rating",
        &values,
        config.rating_bins,
        config,
    )?;
    Ok(Some(path))
}

/// Histogram of runtimes over a fixed bin count.
pub fn runtime_distribution(
    movies: &[Movie],
    out_dir: &Path,
    config: &ChartConfig,
) -> Result<Option<PathBuf>> {
    let values: Vec<f64> = movies
        .iter()
        .filter_map(|m| m.runtime_min.map(f64::from))
        .collect();
    if values.is_empty() {
        debug!("No runtime values; skipping runtime distribution");
        return Ok(None);
    }

    let path = out_dir.join(RUNTIME_DIST_FILE);
    draw_histogram(
        &path,
        "Runtime (minutes) Distribution",
        "Minutes",
        &values,
        config.runtime_bins,
        config,
    )?;
    Ok(Some(path))
}

/// Bar chart of top genre counts.
pub fn top_genres_chart(
    genres: &[GenreCount],
    out_dir: &Path,
    config: &ChartConfig,
) -> Result<Option<PathBuf>> {
    if genres.is_empty() {
        debug!("No genre counts; skipping top-genres chart");
        return Ok(None);
    }

    let path = out_dir.join(TOP_GENRES_FILE);
    let names: Vec<String> = genres.iter().map(|g| g.genre.clone()).collect();
    let y_max = genres.iter().map(|g| g.count).max().unwrap_or(1) as u32 + 1;

    let root = BitMapBackend::new(&path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top {} Genres by Movie Count", genres.len()),
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0i32..names.len() as i32).into_segmented(), 0u32..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) => names
                .get(*i as usize)
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(("sans-serif", 12))
        .y_desc("Count")
        .draw()?;

    chart.draw_series(genres.iter().enumerate().map(|(i, g)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0),
                (SegmentValue::Exact(i as i32 + 1), g.count as u32),
            ],
            BLUE.filled(),
        )
    }))?;

    root.present()?;
    Ok(Some(path.clone()))
}

/// Scatter of runtime vs rating for rows where both are present.
pub fn rating_vs_runtime(
    movies: &[Movie],
    out_dir: &Path,
    config: &ChartConfig,
) -> Result<Option<PathBuf>> {
    let points: Vec<(f64, f64)> = movies
        .iter()
        .filter_map(|m| Some((f64::from(m.runtime_min?), m.rating?)))
        .collect();
    if points.is_empty() {
        debug!("No (runtime, rating) pairs; skipping scatter");
        return Ok(None);
    }

    let path = out_dir.join(RATING_VS_RUNTIME_FILE);
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = value_bounds(points.iter().map(|p| p.1));

    let root = BitMapBackend::new(&path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Rating vs Runtime", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max * 1.05 + 1.0, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Runtime (min)")
        .y_desc("Rating")
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 2, BLUE.mix(0.5).filled())),
    )?;

    root.present()?;
    Ok(Some(path.clone()))
}

/// Box plot of rating per top genre.
///
/// A row contributes to every top genre it belongs to. Genres with no
/// rated rows are dropped; if none remain the artifact is skipped.
pub fn ratings_by_genre_boxplot(
    movies: &[Movie],
    genres: &[GenreCount],
    out_dir: &Path,
    config: &ChartConfig,
) -> Result<Option<PathBuf>> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for genre_count in genres {
        let ratings: Vec<f64> = movies
            .iter()
            .filter(|m| m.genres.iter().any(|g| g == &genre_count.genre))
            .filter_map(|m| m.rating)
            .collect();
        if !ratings.is_empty() {
            groups.push((genre_count.genre.clone(), ratings));
        }
    }
    if groups.is_empty() {
        debug!("No rated rows in any top genre; skipping box plot");
        return Ok(None);
    }

    let path = out_dir.join(RATINGS_BY_GENRE_FILE);
    let names: Vec<String> = groups.iter().map(|(name, _)| name.clone()).collect();
    let quartiles: Vec<Quartiles> = groups
        .iter()
        .map(|(_, ratings)| Quartiles::new(ratings))
        .collect();

    let (y_min, y_max) = value_bounds(
        quartiles
            .iter()
            .flat_map(|q| q.values().into_iter().map(f64::from)),
    );

    let root = BitMapBackend::new(&path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Ratings by Genre (Top Genres)", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (0i32..names.len() as i32).into_segmented(),
            y_min as f32..y_max as f32,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) => names
                .get(*i as usize)
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(("sans-serif", 12))
        .y_desc("Rating")
        .draw()?;

    chart.draw_series(
        quartiles
            .iter()
            .enumerate()
            .map(|(i, q)| Boxplot::new_vertical(SegmentValue::CenterOf(i as i32), q)),
    )?;

    root.present()?;
    Ok(Some(path.clone()))
}

/// Min/max with a small padding so extreme points are not on the border.
fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    let pad = ((max - min) * 0.05).max(0.5);
    (min - pad, max + pad)
}

/// Draw a simple fixed-bin histogram of `values`.
fn draw_histogram(
    path: &Path,
    title: &str,
    x_label: &str,
    values: &[f64],
    bins: usize,
    config: &ChartConfig,
) -> Result<()> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bins = bins.max(1);
    // Degenerate single-value input still gets one visible bar.
    let span = if max > min { max - min } else { 1.0 };
    let bin_width = span / bins as f64;

    let mut counts = vec![0u32; bins];
    for &value in values {
        let idx = (((value - min) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let y_max = counts.iter().max().copied().unwrap_or(1) + 1;

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(min..min + span, 0u32..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Count")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().filter(|(_, &c)| c > 0).map(
        |(i, &count)| {
            let x0 = min + i as f64 * bin_width;
            Rectangle::new([(x0, 0), (x0 + bin_width, count)], BLUE.filled())
        },
    ))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::models::Movie;

    fn rated(rating: Option<f64>, runtime: Option<u32>, genres: &[&str]) -> Movie {
        let mut movie = Movie::with_title("Test");
        movie.rating = rating;
        movie.runtime_min = runtime;
        movie.genres = genres.iter().map(|g| g.to_string()).collect();
        movie
    }

    #[test]
    fn test_charts_skip_when_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartConfig::default();
        let movies = vec![rated(None, None, &[])];

        assert!(rating_distribution(&movies, dir.path(), &config)
            .unwrap()
            .is_none());
        assert!(runtime_distribution(&movies, dir.path(), &config)
            .unwrap()
            .is_none());
        assert!(rating_vs_runtime(&movies, dir.path(), &config)
            .unwrap()
            .is_none());
        assert!(top_genres_chart(&[], dir.path(), &config).unwrap().is_none());
        assert!(
            ratings_by_genre_boxplot(&movies, &[], dir.path(), &config)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_rating_distribution_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartConfig::default();
        let movies = vec![
            rated(Some(6.5), None, &[]),
            rated(Some(7.2), None, &[]),
            rated(Some(8.9), None, &[]),
        ];

        let path = rating_distribution(&movies, dir.path(), &config)
            .unwrap()
            .expect("artifact produced");
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), RATING_DIST_FILE);
    }

    #[test]
    fn test_scatter_requires_both_fields() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartConfig::default();
        // Rating without runtime and runtime without rating: no pairs.
        let movies = vec![rated(Some(7.0), None, &[]), rated(None, Some(120), &[])];

        assert!(rating_vs_runtime(&movies, dir.path(), &config)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_boxplot_with_rated_genres() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartConfig::default();
        let movies = vec![
            rated(Some(7.0), None, &["Drama"]),
            rated(Some(8.0), None, &["Drama", "Crime"]),
            rated(Some(6.0), None, &["Crime"]),
        ];
        let genres = vec![
            GenreCount {
                genre: "Drama".to_string(),
                count: 2,
            },
            GenreCount {
                genre: "Crime".to_string(),
                count: 2,
            },
        ];

        let path = ratings_by_genre_boxplot(&movies, &genres, dir.path(), &config)
            .unwrap()
            .expect("artifact produced");
        assert!(path.exists());
    }
}
