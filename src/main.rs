//! MovieStat - movie dataset cleaner and report generator
//!
//! A CLI tool that ingests a tabular movie dataset, cleans inconsistent
//! fields, computes descriptive statistics, and renders chart artifacts
//! plus a Markdown (or JSON) report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, config or write failure)

mod analysis;
mod charts;
mod cleaner;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use models::{BasicStats, Report, ReportMetadata};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("MovieStat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the pipeline
    match run_analysis(args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .moviestat.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".moviestat.toml");

    if path.exists() {
        eprintln!("⚠️  .moviestat.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .moviestat.toml")?;

    println!("✅ Created .moviestat.toml with default settings.");
    println!("   Edit it to customize input path, ranked-list sizes, and chart bins.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .moviestat.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Run the complete pipeline: load, clean, aggregate, render, persist.
fn run_analysis(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input_path = PathBuf::from(&config.general.input);
    let output_dir = PathBuf::from(&config.general.output_dir);

    // Step 1: Load the raw table
    println!("📥 Loading dataset: {}", input_path.display());
    let table = loader::load_table(&input_path)
        .with_context(|| format!("Failed to load {}", input_path.display()))?;
    println!("   {} rows, {} columns", table.row_count(), table.headers().len());

    // Step 2: Clean it
    println!("🧹 Cleaning {} rows...", table.row_count());
    let movies = cleaner::clean(&table);
    println!("   {} records after cleaning and deduplication", movies.len());

    // Step 3: Aggregate
    let stats = analysis::basic_stats(&movies);
    let top_genres = analysis::top_genres(&movies, config.analysis.top_genres);
    let top_directors_by_count =
        analysis::top_directors_by_count(&movies, config.analysis.top_directors);
    let top_directors_by_rating = analysis::top_directors_by_rating(
        &movies,
        config.analysis.top_directors,
        config.analysis.min_movies,
    );

    // Handle --dry-run: print statistics and exit without writing
    if args.dry_run {
        println!("\n🔍 Dry run: no artifacts written.\n");
        print_stats(&stats);
        return Ok(());
    }

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    // Step 4: Render chart artifacts (each skips itself when it has no data)
    println!("\n📊 Rendering charts...");
    let boxplot_genres = analysis::top_genres(&movies, config.analysis.boxplot_genres);

    let mut artifacts = Vec::new();
    let produced = [
        charts::rating_distribution(&movies, &output_dir, &config.charts)?,
        charts::runtime_distribution(&movies, &output_dir, &config.charts)?,
        charts::top_genres_chart(&top_genres, &output_dir, &config.charts)?,
        charts::rating_vs_runtime(&movies, &output_dir, &config.charts)?,
        charts::ratings_by_genre_boxplot(&movies, &boxplot_genres, &output_dir, &config.charts)?,
    ];
    for path in produced.into_iter().flatten() {
        println!("   Saved {}", path.display());
        if let Some(name) = path.file_name() {
            artifacts.push(name.to_string_lossy().to_string());
        }
    }

    // Step 5: Persist the cleaned sample
    let sample_path = output_dir.join(report::SAMPLE_FILE);
    report::write_sample_csv(&movies, &sample_path, config.analysis.sample_rows)?;
    println!("   Saved {}", sample_path.display());

    // Step 6: Build and save the report
    let report = Report {
        metadata: ReportMetadata {
            input_path: input_path.display().to_string(),
            generated_at: Utc::now(),
            rows_loaded: table.row_count(),
            rows_cleaned: movies.len(),
        },
        stats: stats.clone(),
        top_genres,
        top_directors_by_count,
        top_directors_by_rating,
        artifacts,
    };

    let (report_name, output) = match args.format {
        OutputFormat::Markdown => ("report.md", report::generate_markdown_report(&report)),
        OutputFormat::Json => ("report.json", report::generate_json_report(&report)?),
    };
    let report_path = output_dir.join(report_name);
    std::fs::write(&report_path, &output)
        .with_context(|| format!("Failed to write report to {}", report_path.display()))?;

    // Print summary
    println!("\n📝 Analysis Summary:");
    print_stats(&stats);
    println!(
        "\n✅ Done! Report saved to: {}",
        report_path.display()
    );

    Ok(())
}

/// Print the basic statistics block.
fn print_stats(stats: &BasicStats) {
    println!("   Movies: {}", stats.num_movies);
    println!(
        "   Years: {} - {}",
        fmt_opt(stats.year_min),
        fmt_opt(stats.year_max)
    );
    println!(
        "   Rating mean/median: {} / {}",
        fmt_f64(stats.rating_mean),
        fmt_f64(stats.rating_median)
    );
    println!(
        "   Runtime mean/median: {} / {} min",
        fmt_f64(stats.runtime_mean),
        fmt_f64(stats.runtime_median)
    );
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}

fn fmt_f64(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
imdbID,title,year,rating,runtime,genre,director,lastupdated
tt0000001,Heat,1995,8.1,170 min,\"Crime, Drama\",Michael Mann,2015-08-26 00:03:45
tt0000002,Mystery Film,1998,Not Rated,101 min,Drama/Thriller,Jane Doe,2015-08-26 00:03:45
tt0000003,Indie Short,2003,6/10,88,Drama,Jane Doe,bad-timestamp
";

    fn write_input(dir: &Path) -> PathBuf {
        let path = dir.join("movies_initial.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_end_to_end_cleaning_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());

        let table = loader::load_table(&input).unwrap();
        let movies = cleaner::clean(&table);

        assert_eq!(movies.len(), 3);
        let ratings: Vec<Option<f64>> = movies.iter().map(|m| m.rating).collect();
        assert_eq!(ratings, vec![Some(8.1), None, Some(6.0)]);
        assert_eq!(movies[0].runtime_min, Some(170));
        assert_eq!(movies[2].runtime_min, Some(88));
        assert_eq!(movies[1].genres, vec!["Drama", "Thriller"]);
        assert_eq!(movies[2].last_updated, None);

        let stats = analysis::basic_stats(&movies);
        assert_eq!(stats.num_movies, 3);
        assert_eq!(stats.year_min, Some(1995));
        assert_eq!(stats.year_max, Some(2003));
        let mean = stats.rating_mean.unwrap();
        assert!((mean - 7.05).abs() < 1e-9, "mean was {mean}");
    }

    #[test]
    fn test_full_run_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("output");

        let args = Args {
            input: Some(input),
            output: Some(output.clone()),
            config: None,
            format: OutputFormat::Markdown,
            top_genres: None,
            top_directors: None,
            min_movies: Some(1),
            verbose: false,
            quiet: true,
            dry_run: false,
            init_config: false,
        };

        run_analysis(args).unwrap();

        for artifact in [
            charts::RATING_DIST_FILE,
            charts::RUNTIME_DIST_FILE,
            charts::TOP_GENRES_FILE,
            charts::RATING_VS_RUNTIME_FILE,
            charts::RATINGS_BY_GENRE_FILE,
            report::SAMPLE_FILE,
            "report.md",
        ] {
            assert!(output.join(artifact).exists(), "missing {artifact}");
        }

        let markdown = std::fs::read_to_string(output.join("report.md")).unwrap();
        assert!(markdown.contains("- **Movies:** 3"));
        assert!(markdown.contains("- Drama: 3"));
        assert!(markdown.contains("| Jane Doe |"));
        assert!(markdown.contains("- rating_distribution.png"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("output");

        let args = Args {
            input: Some(input),
            output: Some(output.clone()),
            config: None,
            format: OutputFormat::Markdown,
            top_genres: None,
            top_directors: None,
            min_movies: None,
            verbose: false,
            quiet: true,
            dry_run: true,
            init_config: false,
        };

        run_analysis(args).unwrap();
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_aborts() {
        let dir = tempfile::tempdir().unwrap();

        let args = Args {
            input: Some(dir.path().join("nope.csv")),
            output: Some(dir.path().join("output")),
            config: None,
            format: OutputFormat::Markdown,
            top_genres: None,
            top_directors: None,
            min_movies: None,
            verbose: false,
            quiet: true,
            dry_run: false,
            init_config: false,
        };

        assert!(run_analysis(args).is_err());
    }
}
