//! File-backed record stores.
//!
//! The pipeline only sees the [`RecordStore`] load/save contract. JSON stores
//! accept either a bare array of records or the `{"data": [...]}` envelope the
//! upstream record service responds with. CSV stores keep every non-empty cell
//! as a string so codes like `0101` survive the round trip.

use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};
use log::debug;
use serde::Deserialize;

use crate::{
    cli::RecordFormat,
    io_utils,
    record::{Batch, Record, Value, batch_columns},
};

pub trait RecordStore {
    fn load(&self) -> Result<Batch>;
    fn save(&self, records: &[Record]) -> Result<()>;
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub format: Option<RecordFormat>,
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

/// Opens a store to load from; `-` reads stdin.
pub fn open_input_store(path: &Path, options: &StoreOptions) -> Box<dyn RecordStore> {
    open_store(Some(path), options, io_utils::STDIN_LABEL)
}

/// Opens a store to save to; `None` and `-` write stdout.
pub fn open_output_store(path: Option<&Path>, options: &StoreOptions) -> Box<dyn RecordStore> {
    open_store(path, options, io_utils::STDOUT_LABEL)
}

fn open_store(
    path: Option<&Path>,
    options: &StoreOptions,
    stdio_label: &'static str,
) -> Box<dyn RecordStore> {
    let path = path.map(Path::to_path_buf);
    match io_utils::resolve_format(path.as_deref(), options.format) {
        RecordFormat::Json => Box::new(JsonStore { path, stdio_label }),
        RecordFormat::Csv => Box::new(CsvStore {
            delimiter: io_utils::resolve_delimiter(path.as_deref(), options.delimiter),
            encoding: options.encoding,
            path,
            stdio_label,
        }),
    }
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: Option<PathBuf>,
    stdio_label: &'static str,
}

impl JsonStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            stdio_label: io_utils::STDOUT_LABEL,
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    data: Vec<Record>,
}

pub fn parse_json_records(raw: &str) -> Result<Batch> {
    let trimmed = raw.trim_start();
    match trimmed.chars().next() {
        None => Ok(Vec::new()),
        Some('[') => serde_json::from_str(trimmed).context("Parsing JSON record array"),
        Some('{') => {
            let envelope: Envelope =
                serde_json::from_str(trimmed).context("Parsing JSON record envelope")?;
            Ok(envelope.data)
        }
        Some(other) => Err(anyhow!(
            "Expected a JSON array or object of records, found '{other}'"
        )),
    }
}

impl RecordStore for JsonStore {
    fn load(&self) -> Result<Batch> {
        let path = self.path.as_deref().unwrap_or(Path::new("-"));
        let mut raw = String::new();
        io_utils::open_input(path)?
            .read_to_string(&mut raw)
            .with_context(|| format!("Reading {path:?}"))?;
        let records = parse_json_records(&raw).with_context(|| format!("Loading {path:?}"))?;
        debug!("Parsed {} JSON record(s) from {path:?}", records.len());
        Ok(records)
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let mut writer = io_utils::open_output(self.path.as_deref())?;
        serde_json::to_writer_pretty(&mut writer, records).context("Writing JSON records")?;
        writeln!(writer).context("Writing JSON records")?;
        writer.flush().context("Flushing JSON output")
    }

    fn describe(&self) -> String {
        format!(
            "{} (json)",
            io_utils::describe_path(self.path.as_deref(), self.stdio_label)
        )
    }
}

#[derive(Debug, Clone)]
pub struct CsvStore {
    path: Option<PathBuf>,
    delimiter: u8,
    encoding: &'static Encoding,
    stdio_label: &'static str,
}

impl CsvStore {
    pub fn new(path: Option<PathBuf>, delimiter: u8, encoding: &'static Encoding) -> Self {
        Self {
            path,
            delimiter,
            encoding,
            stdio_label: io_utils::STDOUT_LABEL,
        }
    }
}

impl RecordStore for CsvStore {
    fn load(&self) -> Result<Batch> {
        let path = self.path.as_deref().unwrap_or(Path::new("-"));
        let mut reader = io_utils::open_csv_reader(path, self.delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, self.encoding)
            .with_context(|| format!("Reading headers from {path:?}"))?;
        let mut records = Vec::new();
        for (idx, row) in reader.byte_records().enumerate() {
            let row = row.with_context(|| format!("Reading row {} in {path:?}", idx + 2))?;
            let cells = io_utils::decode_record(&row, self.encoding)
                .with_context(|| format!("Decoding row {} in {path:?}", idx + 2))?;
            let record = headers
                .iter()
                .zip(cells)
                .map(|(header, cell)| {
                    let value = if cell.is_empty() {
                        Value::Null
                    } else {
                        Value::String(cell)
                    };
                    (header.clone(), value)
                })
                .collect::<Record>();
            records.push(record);
        }
        debug!(
            "Parsed {} CSV record(s) across {} column(s) from {path:?}",
            records.len(),
            headers.len()
        );
        Ok(records)
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let mut writer = io_utils::open_csv_writer(self.path.as_deref(), self.delimiter)?;
        let columns = batch_columns(records);
        if !columns.is_empty() {
            writer
                .write_record(columns.iter())
                .context("Writing output headers")?;
        }
        for (idx, record) in records.iter().enumerate() {
            let row = columns
                .iter()
                .map(|column| record.get(column).map(Value::as_display).unwrap_or_default());
            writer
                .write_record(row)
                .with_context(|| format!("Writing output row {}", idx + 2))?;
        }
        writer.flush().context("Flushing CSV output")
    }

    fn describe(&self) -> String {
        format!(
            "{} (csv, delimiter '{}')",
            io_utils::describe_path(self.path.as_deref(), self.stdio_label),
            crate::printable_delimiter(self.delimiter)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_and_array_payloads_are_accepted() {
        let array = parse_json_records(r#"[{"MaintPlant": "DE01"}]"#).unwrap();
        let envelope =
            parse_json_records(r#"{"success": true, "data": [{"MaintPlant": "DE01"}]}"#).unwrap();
        assert_eq!(array, envelope);
        assert_eq!(array[0].get_str("MaintPlant"), Some("DE01"));
    }

    #[test]
    fn blank_payload_is_an_empty_batch() {
        assert!(parse_json_records("  \n").unwrap().is_empty());
    }

    #[test]
    fn standard_streams_are_labelled_by_direction() {
        let dash = Path::new("-");
        let options = StoreOptions::default();
        assert_eq!(open_input_store(dash, &options).describe(), "stdin (json)");
        assert_eq!(open_output_store(Some(dash), &options).describe(), "stdout (json)");
        assert_eq!(open_output_store(None, &options).describe(), "stdout (json)");
    }

    #[test]
    fn scalar_payload_is_rejected() {
        let err = parse_json_records("42").unwrap_err();
        assert!(err.to_string().contains("Expected a JSON array"));
    }
}
