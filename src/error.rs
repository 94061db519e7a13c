//! Failure values produced by the record stages.
//!
//! Only the normalizer rejects a batch; every other stage degrades to partial
//! output instead of failing, so this is the whole taxonomy the core exposes.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("no input records")]
    EmptyBatch,

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

impl SchemaError {
    pub fn missing_fields(&self) -> &[String] {
        match self {
            SchemaError::EmptyBatch => &[],
            SchemaError::MissingFields(fields) => fields,
        }
    }
}

pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
