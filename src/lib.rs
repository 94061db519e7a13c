pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod geo;
pub mod io_utils;
pub mod locate;
pub mod normalize;
pub mod pipeline;
pub mod preview;
pub mod process;
pub mod record;
pub mod store;
pub mod table;
pub mod violation;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

pub use crate::{
    error::SchemaError,
    geo::resolve_geography,
    normalize::normalize,
    record::{Batch, Record, Value},
    violation::resolve_violations,
};

use crate::{
    cli::{Cli, Commands},
    process::Stage,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("asset_records", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Parsed command line: {:?}", cli.command);
    match cli.command {
        Commands::Clean(args) => process::execute(&args, Stage::Clean),
        Commands::Geo(args) => process::execute(&args, Stage::Geo),
        Commands::Pipeline(args) => process::execute(&args, Stage::Pipeline),
        Commands::Audit(args) => audit::execute(&args),
        Commands::Locate(args) => locate::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
