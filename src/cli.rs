//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// MovieStat - movie dataset cleaner and report generator
///
/// Clean a tabular movie dataset, compute descriptive statistics, and
/// render chart artifacts plus a Markdown/JSON report. Built in Rust.
///
/// Examples:
///   moviestat
///   moviestat --input movies_initial.csv --output output
///   moviestat --top-genres 10 --min-movies 5
///   moviestat --dry-run
///   moviestat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the input dataset
    ///
    /// A delimited tabular file with any subset of the recognized columns
    /// (title, year, rating, runtime, genre, director, imdbID, lastupdated).
    /// Can also be set via MOVIESTAT_INPUT or .moviestat.toml.
    #[arg(short, long, value_name = "FILE", env = "MOVIESTAT_INPUT")]
    pub input: Option<PathBuf>,

    /// Output directory for charts, report and cleaned sample
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .moviestat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Number of genres in ranked outputs
    #[arg(long, value_name = "COUNT")]
    pub top_genres: Option<usize>,

    /// Number of directors in ranked outputs
    #[arg(long, value_name = "COUNT")]
    pub top_directors: Option<usize>,

    /// Minimum rated movies for a director to be ranked by average rating
    #[arg(long, value_name = "COUNT")]
    pub min_movies: Option<usize>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and clean the dataset, print statistics, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .moviestat.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top_genres == Some(0) {
            return Err("Top genres must be at least 1".to_string());
        }

        if self.top_directors == Some(0) {
            return Err("Top directors must be at least 1".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
