//! Replacement-part discrepancy report.
//!
//! Lists every record that violated the rule before correction, so the
//! upstream owners can see which rows the pipeline rewrote.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::{
    cli::AuditArgs,
    export::sanitize_for_export,
    io_utils,
    pipeline::Pipeline,
    process::load_config,
    record::Record,
    store::{StoreOptions, open_input_store, open_output_store},
};

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub restricted_profiles: Vec<String>,
    pub mandated_part: String,
    pub processed_count: usize,
    pub discrepancy_count: usize,
    pub discrepancies: Vec<Record>,
}

impl AuditReport {
    pub fn build(pipeline: &Pipeline, processed_count: usize, discrepancies: Vec<Record>) -> Self {
        let rule = pipeline.rule();
        Self {
            generated_at: Utc::now(),
            restricted_profiles: rule.profiles().map(str::to_string).collect(),
            mandated_part: rule.mandated_part().to_string(),
            processed_count,
            discrepancy_count: discrepancies.len(),
            discrepancies: sanitize_for_export(discrepancies),
        }
    }
}

pub fn execute(args: &AuditArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), false)?;
    let pipeline = Pipeline::new(&config);
    let input = open_input_store(
        &args.input,
        &StoreOptions {
            format: args.format,
            delimiter: args.delimiter,
            encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        },
    );
    let records = input
        .load()
        .with_context(|| format!("Loading records from {:?}", args.input))?;
    info!("Auditing {} record(s) from {}", records.len(), input.describe());

    let (corrected, discrepancies) = match pipeline.audit(records) {
        Ok(result) => result,
        Err(err) => {
            warn!("Audit rejected the batch: {err}; reporting no records");
            (Vec::new(), Vec::new())
        }
    };
    let report = AuditReport::build(&pipeline, corrected.len(), discrepancies);

    let mut writer = io_utils::open_output(args.report.as_deref())?;
    serde_json::to_writer_pretty(&mut writer, &report).context("Writing audit report")?;
    writeln!(writer).context("Writing audit report")?;
    writer.flush().context("Flushing audit report")?;
    info!(
        "Reported {} discrepancy(ies) across {} record(s) to {}",
        report.discrepancy_count,
        report.processed_count,
        io_utils::describe_path(args.report.as_deref(), io_utils::STDOUT_LABEL)
    );

    if let Some(path) = args.output.as_deref() {
        let output = open_output_store(
            Some(path),
            &StoreOptions {
                format: args.output_format,
                ..StoreOptions::default()
            },
        );
        let corrected = sanitize_for_export(corrected);
        output
            .save(&corrected)
            .with_context(|| format!("Writing records to {}", output.describe()))?;
        info!("Wrote {} corrected record(s) to {}", corrected.len(), output.describe());
    }
    Ok(())
}
