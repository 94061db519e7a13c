//! Field renaming and schema-level presence checks run before any rule.
//!
//! Inbound systems spell some fields differently (`SerialNoProfile` instead of
//! `Serial_No_Profile`). [`ColumnMapping`] rewrites those keys in place and
//! [`normalize`] then verifies that each required field appears somewhere in
//! the batch. Presence is checked per batch, not per record: a record missing
//! a field that other records carry is still accepted.

use log::debug;

use crate::{
    error::{SchemaError, SchemaResult},
    record::{Batch, Record, batch_has_column, fields},
};

pub const DEFAULT_COLUMN_RENAMES: &[(&str, &str)] = &[
    ("SerialNoProfile", fields::SERIAL_NO_PROFILE),
    ("ReplacementPart", fields::REPLACEMENT_PART),
    ("UsedInSBom", fields::USED_IN_SBOM),
];

pub const DEFAULT_REQUIRED_FIELDS: &[&str] = &[fields::SERIAL_NO_PROFILE, fields::REPLACEMENT_PART];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    renames: Vec<(String, String)>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_RENAMES.iter().copied())
    }
}

impl ColumnMapping {
    pub fn new<I, K, V>(renames: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            renames: renames
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(from, _)| from == name)
            .map(|(_, to)| to.as_str())
            .unwrap_or(name)
    }

    /// Renames the record's original keys in one pass, returning how many
    /// changed. Chained entries (`A → B`, `B → C`) never compound.
    pub fn apply(&self, record: &mut Record) -> usize {
        record.rename_keys(|name| {
            self.renames
                .iter()
                .find(|(from, _)| from == name)
                .map(|(_, to)| to.clone())
        })
    }
}

/// Renames fields with the default mapping and checks `required_fields`.
pub fn normalize<S: AsRef<str>>(records: Vec<Record>, required_fields: &[S]) -> SchemaResult<Batch> {
    normalize_with(records, required_fields, &ColumnMapping::default())
}

pub fn normalize_with<S: AsRef<str>>(
    mut records: Vec<Record>,
    required_fields: &[S],
    mapping: &ColumnMapping,
) -> SchemaResult<Batch> {
    if records.is_empty() {
        return Err(SchemaError::EmptyBatch);
    }

    let renamed: usize = records.iter_mut().map(|record| mapping.apply(record)).sum();
    debug!("Renamed {renamed} field(s) across {} record(s)", records.len());

    let mut missing = Vec::new();
    for field in required_fields {
        let field: &str = field.as_ref();
        if !batch_has_column(&records, field) {
            missing.push(field.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(SchemaError::MissingFields(missing));
    }
    Ok(records)
}
