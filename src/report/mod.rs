//! Report generation and cleaned-table serialization.

pub mod generator;
pub mod sample;

pub use generator::{generate_json_report, generate_markdown_report};
pub use sample::{write_sample_csv, SAMPLE_FILE};
