use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    cli::StageArgs,
    config::PipelineConfig,
    error::SchemaResult,
    export::sanitize_for_export,
    geo::CountryNameFallback,
    io_utils,
    pipeline::Pipeline,
    record::Batch,
    store::{StoreOptions, open_input_store, open_output_store},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clean,
    Geo,
    Pipeline,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Stage::Clean => "clean",
            Stage::Geo => "geo",
            Stage::Pipeline => "pipeline",
        }
    }

    fn apply(self, pipeline: &Pipeline, records: Batch) -> SchemaResult<Batch> {
        match self {
            Stage::Clean => pipeline.clean(records),
            Stage::Geo => Ok(pipeline.enrich(records)),
            Stage::Pipeline => pipeline.run(records),
        }
    }
}

/// Loads a configuration and applies the `--resolve-country-names` override.
pub fn load_config(
    path: Option<&std::path::Path>,
    resolve_country_names: bool,
) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::load_or_default(path)?;
    if resolve_country_names {
        config.geo.country_name_fallback = CountryNameFallback::ByCountryName;
    }
    Ok(config)
}

pub fn execute(args: &StageArgs, stage: Stage) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.resolve_country_names)?;
    let pipeline = Pipeline::new(&config);

    let input = open_input_store(
        &args.input,
        &StoreOptions {
            format: args.format,
            delimiter: args.delimiter,
            encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        },
    );
    let output = open_output_store(
        args.output.as_deref(),
        &StoreOptions {
            format: args.output_format,
            delimiter: args.output_delimiter,
            ..StoreOptions::default()
        },
    );
    info!(
        "Running {} stage: {} -> {}",
        stage.label(),
        input.describe(),
        output.describe()
    );

    let records = input
        .load()
        .with_context(|| format!("Loading records from {:?}", args.input))?;
    info!("Loaded {} record(s)", records.len());

    let processed = match stage.apply(&pipeline, records) {
        Ok(processed) => processed,
        Err(err) if args.strict => {
            return Err(err).with_context(|| format!("Running {} stage", stage.label()));
        }
        Err(err) => {
            warn!("{} stage rejected the batch: {err}; writing no records", stage.label());
            Vec::new()
        }
    };

    let processed = sanitize_for_export(processed);
    output
        .save(&processed)
        .with_context(|| format!("Writing records to {}", output.describe()))?;
    info!("Wrote {} record(s) to {}", processed.len(), output.describe());
    Ok(())
}
