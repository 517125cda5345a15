//! Markdown report generation.
//!
//! This module generates the Markdown summary document from the
//! aggregation results.

use crate::models::{BasicStats, DirectorCount, DirectorRating, GenreCount, Report};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Movie Dataset Analysis Report\n\n");
    output.push_str(&format!(
        "Generated: {} UTC\n\n",
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    output.push_str(&format!(
        "Input: `{}` ({} rows loaded, {} after cleaning)\n\n",
        report.metadata.input_path, report.metadata.rows_loaded, report.metadata.rows_cleaned
    ));

    output.push_str(&generate_stats_section(&report.stats));
    output.push_str(&generate_genres_section(&report.top_genres));
    output.push_str(&generate_directors_section(
        &report.top_directors_by_count,
        &report.top_directors_by_rating,
    ));
    output.push_str(&generate_artifacts_section(&report.artifacts));

    output
}

/// Format an optional numeric value, `n/a` when absent.
fn fmt_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "n/a".to_string(),
    }
}

/// Format an optional real number with two decimals.
fn fmt_opt_f64(value: &Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

/// Generate the basic statistics section.
fn generate_stats_section(stats: &BasicStats) -> String {
    let mut section = String::new();

    section.push_str("## Basic statistics\n\n");
    section.push_str(&format!("- **Movies:** {}\n", stats.num_movies));
    section.push_str(&format!(
        "- **Year range:** {} – {}\n",
        fmt_opt(&stats.year_min),
        fmt_opt(&stats.year_max)
    ));
    section.push_str(&format!(
        "- **Rating mean / median:** {} / {}\n",
        fmt_opt_f64(&stats.rating_mean),
        fmt_opt_f64(&stats.rating_median)
    ));
    section.push_str(&format!(
        "- **Runtime mean / median:** {} / {} min\n",
        fmt_opt_f64(&stats.runtime_mean),
        fmt_opt_f64(&stats.runtime_median)
    ));
    section.push('\n');

    section
}

/// Generate the top genres section.
fn generate_genres_section(genres: &[GenreCount]) -> String {
    let mut section = String::new();

    section.push_str("## Top genres\n\n");
    if genres.is_empty() {
        section.push_str("No genre data in the source.\n");
    }
    for entry in genres {
        section.push_str(&format!("- {}: {}\n", entry.genre, entry.count));
    }
    section.push('\n');

    section
}

/// Generate both director rankings.
fn generate_directors_section(
    by_count: &[DirectorCount],
    by_rating: &[DirectorRating],
) -> String {
    let mut section = String::new();

    section.push_str("## Top directors by movie count\n\n");
    if by_count.is_empty() {
        section.push_str("No director data in the source.\n");
    }
    for entry in by_count {
        section.push_str(&format!("- {}: {}\n", entry.director, entry.count));
    }
    section.push('\n');

    section.push_str("## Top directors by average rating\n\n");
    if by_rating.is_empty() {
        section.push_str("No director group met the minimum-movies threshold.\n\n");
    } else {
        section.push_str("| Director | Mean rating | Rated movies |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for entry in by_rating {
            section.push_str(&format!(
                "| {} | {:.2} | {} |\n",
                entry.director, entry.rating_mean, entry.count
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the produced-artifacts section. Skipped artifacts are omitted.
fn generate_artifacts_section(artifacts: &[String]) -> String {
    let mut section = String::new();

    section.push_str("## Plots\n\n");
    if artifacts.is_empty() {
        section.push_str("No chart artifacts were produced.\n");
    }
    for name in artifacts {
        section.push_str(&format!("- {name}\n"));
    }

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportMetadata;
    use chrono::Utc;

    fn create_test_report() -> Report {
        Report {
            metadata: ReportMetadata {
                input_path: "movies_initial.csv".to_string(),
                generated_at: Utc::now(),
                rows_loaded: 5,
                rows_cleaned: 4,
            },
            stats: BasicStats {
                num_movies: 4,
                year_min: Some(1979),
                year_max: Some(1995),
                rating_mean: Some(7.05),
                rating_median: Some(7.05),
                runtime_mean: Some(132.5),
                runtime_median: Some(132.5),
            },
            top_genres: vec![
                GenreCount {
                    genre: "Drama".to_string(),
                    count: 3,
                },
                GenreCount {
                    genre: "Crime".to_string(),
                    count: 1,
                },
            ],
            top_directors_by_count: vec![DirectorCount {
                director: "Michael Mann".to_string(),
                count: 2,
            }],
            top_directors_by_rating: vec![DirectorRating {
                director: "Michael Mann".to_string(),
                rating_mean: 8.15,
                count: 2,
            }],
            artifacts: vec![
                "rating_distribution.png".to_string(),
                "top_genres.png".to_string(),
            ],
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report());

        assert!(markdown.contains("# Movie Dataset Analysis Report"));
        assert!(markdown.contains("## Basic statistics"));
        assert!(markdown.contains("- **Movies:** 4"));
        assert!(markdown.contains("1979 – 1995"));
        assert!(markdown.contains("- Drama: 3"));
        assert!(markdown.contains("| Michael Mann | 8.15 | 2 |"));
        assert!(markdown.contains("- rating_distribution.png"));
    }

    #[test]
    fn test_absent_stats_render_as_na() {
        let mut report = create_test_report();
        report.stats = BasicStats {
            num_movies: 2,
            ..BasicStats::default()
        };

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("n/a – n/a"));
        assert!(markdown.contains("n/a / n/a"));
    }

    #[test]
    fn test_empty_sections_are_annotated() {
        let mut report = create_test_report();
        report.top_genres.clear();
        report.top_directors_by_count.clear();
        report.top_directors_by_rating.clear();
        report.artifacts.clear();

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("No genre data in the source."));
        assert!(markdown.contains("No director data in the source."));
        assert!(markdown.contains("No director group met the minimum-movies threshold."));
        assert!(markdown.contains("No chart artifacts were produced."));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_report()).unwrap();

        assert!(json.contains("\"input_path\""));
        assert!(json.contains("\"top_genres\""));
        assert!(json.contains("\"artifacts\""));
    }
}
