//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.moviestat.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Chart settings.
    #[serde(default)]
    pub charts: ChartConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Input dataset path.
    #[serde(default = "default_input")]
    pub input: String,

    /// Output directory for artifacts and the report.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output_dir: default_output_dir(),
            verbose: false,
        }
    }
}

fn default_input() -> String {
    "movies_initial.csv".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of genres in ranked outputs.
    #[serde(default = "default_top_genres")]
    pub top_genres: usize,

    /// Number of directors in ranked outputs.
    #[serde(default = "default_top_directors")]
    pub top_directors: usize,

    /// Minimum rated movies for a director to be ranked by rating.
    #[serde(default = "default_min_movies")]
    pub min_movies: usize,

    /// Number of genre groups in the box plot.
    #[serde(default = "default_boxplot_genres")]
    pub boxplot_genres: usize,

    /// Maximum rows written to the cleaned-table sample.
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_genres: default_top_genres(),
            top_directors: default_top_directors(),
            min_movies: default_min_movies(),
            boxplot_genres: default_boxplot_genres(),
            sample_rows: default_sample_rows(),
        }
    }
}

fn default_top_genres() -> usize {
    15
}

fn default_top_directors() -> usize {
    20
}

fn default_min_movies() -> usize {
    3
}

fn default_boxplot_genres() -> usize {
    8
}

fn default_sample_rows() -> usize {
    1000
}

/// Chart rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Bin count for the rating histogram.
    #[serde(default = "default_rating_bins")]
    pub rating_bins: usize,

    /// Bin count for the runtime histogram.
    #[serde(default = "default_runtime_bins")]
    pub runtime_bins: usize,

    /// Artifact width in pixels.
    #[serde(default = "default_chart_width")]
    pub width: u32,

    /// Artifact height in pixels.
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            rating_bins: default_rating_bins(),
            runtime_bins: default_runtime_bins(),
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

fn default_rating_bins() -> usize {
    20
}

fn default_runtime_bins() -> usize {
    30
}

fn default_chart_width() -> u32 {
    800
}

fn default_chart_height() -> u32 {
    500
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".moviestat.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.general.input = input.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output_dir = output.display().to_string();
        }

        if let Some(top_genres) = args.top_genres {
            self.analysis.top_genres = top_genres;
        }
        if let Some(top_directors) = args.top_directors {
            self.analysis.top_directors = top_directors;
        }
        if let Some(min_movies) = args.min_movies {
            self.analysis.min_movies = min_movies;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.input, "movies_initial.csv");
        assert_eq!(config.general.output_dir, "output");
        assert_eq!(config.analysis.top_genres, 15);
        assert_eq!(config.analysis.min_movies, 3);
        assert_eq!(config.charts.rating_bins, 20);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
input = "movies.csv"
verbose = true

[analysis]
top_genres = 5
min_movies = 2

[charts]
rating_bins = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.input, "movies.csv");
        assert!(config.general.verbose);
        assert_eq!(config.analysis.top_genres, 5);
        assert_eq!(config.analysis.min_movies, 2);
        assert_eq!(config.charts.rating_bins, 10);
        // Unset keys fall back to defaults.
        assert_eq!(config.analysis.top_directors, 20);
        assert_eq!(config.charts.runtime_bins, 30);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[analysis]"));
        assert!(toml_str.contains("[charts]"));
    }
}
