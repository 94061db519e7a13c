//! Last-step cleanup applied to every batch before it is written out.

use crate::record::{Record, Value, fields};

pub const EXPORT_RENAMES: &[(&str, &str)] = &[("SerialNoProfile", fields::SERIAL_NO_PROFILE)];

/// Replaces non-finite floats with null and applies [`EXPORT_RENAMES`].
pub fn sanitize_for_export(mut records: Vec<Record>) -> Vec<Record> {
    for record in &mut records {
        for value in record.values_mut() {
            if matches!(value, Value::Float(f) if !f.is_finite()) {
                *value = Value::Null;
            }
        }
        for (from, to) in EXPORT_RENAMES {
            record.rename_key(from, to);
        }
    }
    records
}
