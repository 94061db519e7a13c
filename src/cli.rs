use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Validate, correct, and geo-enrich maintenance asset records",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize field names and correct replacement-part violations (material records)
    Clean(StageArgs),
    /// Mark records as predicted and resolve their coordinates (turbine records)
    Geo(StageArgs),
    /// Normalize, correct violations, and resolve coordinates in one pass
    Pipeline(StageArgs),
    /// Report replacement-part discrepancies found before correction
    Audit(AuditArgs),
    /// Resolve the coordinate for a single plant, functional location, or region
    Locate(LocateArgs),
    /// Preview the first few records in a formatted table
    Preview(PreviewArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum RecordFormat {
    Json,
    Csv,
}

#[derive(Debug, Args)]
pub struct StageArgs {
    /// Input records file (JSON array/envelope, CSV, or TSV; '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output records file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Input format (inferred from the extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<RecordFormat>,
    /// Output format (inferred from the extension when omitted)
    #[arg(long = "output-format", value_enum)]
    pub output_format: Option<RecordFormat>,
    /// CSV delimiter character for reading input
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter to use for CSV output (defaults to the extension's delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding of CSV input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML file overriding renames, required fields, and rule values
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Map derived country names back to codes in the functional location fallback
    #[arg(long = "resolve-country-names")]
    pub resolve_country_names: bool,
    /// Exit with an error when normalization rejects the batch
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Input records file (JSON array/envelope, CSV, or TSV; '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Write the corrected records to this file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Write the JSON report to this file (stdout if omitted)
    #[arg(short = 'r', long = "report")]
    pub report: Option<PathBuf>,
    /// Input format (inferred from the extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<RecordFormat>,
    /// Output format (inferred from the extension when omitted)
    #[arg(long = "output-format", value_enum)]
    pub output_format: Option<RecordFormat>,
    /// CSV delimiter character for reading input
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of CSV input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML file overriding renames, required fields, and rule values
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Maintenance plant code; its first two characters are the country code
    #[arg(short = 'p', long = "maint-plant")]
    pub maint_plant: Option<String>,
    /// Functional location; its first two characters map to a country
    #[arg(short = 'f', long = "functional-loc")]
    pub functional_loc: Option<String>,
    /// Region name, matched exactly
    #[arg(short = 'r', long = "region")]
    pub region: Option<String>,
    /// Map derived country names back to codes in the functional location fallback
    #[arg(long = "resolve-country-names")]
    pub resolve_country_names: bool,
    /// YAML file overriding renames, required fields, and rule values
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input records file (JSON array/envelope, CSV, or TSV; '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of records to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Input format (inferred from the extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<RecordFormat>,
    /// CSV delimiter character
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of CSV input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
