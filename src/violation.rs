//! Replacement-part rule evaluation and correction.
//!
//! Records whose `Serial_No_Profile` belongs to the restricted profile set must
//! carry the mandated `Replacement_Part`. [`ViolationRule::detect`] writes the
//! `Violation` flag, [`ViolationRule::correct`] overwrites the part on every
//! flagged record and stamps the `cleaned(Unprocessed)` marker. Running both in
//! sequence ([`resolve_violations`]) is the only externally exposed mode.

use std::collections::BTreeSet;

use log::debug;

use crate::record::{Batch, Record, Value, fields};

pub const RESTRICTED_PROFILES: &[&str] = &["ZPP2", "ZPP8", "ZCS1"];
pub const MANDATED_REPLACEMENT_PART: &str = "B";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationRule {
    profiles: BTreeSet<String>,
    mandated_part: String,
}

impl Default for ViolationRule {
    fn default() -> Self {
        Self::new(RESTRICTED_PROFILES.iter().copied(), MANDATED_REPLACEMENT_PART)
    }
}

impl ViolationRule {
    pub fn new<I, S>(profiles: I, mandated_part: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
            mandated_part: mandated_part.into(),
        }
    }

    pub fn mandated_part(&self) -> &str {
        &self.mandated_part
    }

    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(String::as_str)
    }

    /// True when the record's profile is restricted. Missing or non-string
    /// profiles never match.
    pub fn applies_to(&self, record: &Record) -> bool {
        record
            .get_str(fields::SERIAL_NO_PROFILE)
            .is_some_and(|profile| self.profiles.contains(profile))
    }

    /// Null, absent, and non-string parts all differ from the mandated value.
    pub fn is_violation(&self, record: &Record) -> bool {
        self.applies_to(record)
            && record.get_str(fields::REPLACEMENT_PART) != Some(self.mandated_part.as_str())
    }

    fn flag(&self, record: &Record) -> bool {
        // A record corrected on an earlier pass keeps its flag.
        self.is_violation(record)
            || (self.applies_to(record) && record.get(fields::VIOLATION).is_some_and(is_flagged))
    }

    pub fn detect(&self, records: Vec<Record>) -> Batch {
        records
            .into_iter()
            .map(|mut record| {
                let flagged = self.flag(&record);
                record.insert(fields::VIOLATION, Value::Integer(i64::from(flagged)));
                record
            })
            .collect()
    }

    pub fn correct(&self, records: Vec<Record>) -> Batch {
        let mut corrected = 0usize;
        let output = records
            .into_iter()
            .map(|mut record| {
                if record.get(fields::VIOLATION).is_some_and(is_flagged) {
                    record.insert(fields::REPLACEMENT_PART, self.mandated_part.as_str());
                    corrected += 1;
                }
                record.insert(fields::CLEANED_MARKER, true);
                record
            })
            .collect::<Vec<_>>();
        debug!(
            "Set {} to '{}' on {corrected} of {} record(s)",
            fields::REPLACEMENT_PART,
            self.mandated_part,
            output.len()
        );
        output
    }

    pub fn resolve(&self, records: Vec<Record>) -> Batch {
        self.correct(self.detect(records))
    }

    /// Detects and corrects, returning the flagged records as they were
    /// before correction alongside the corrected batch.
    pub fn resolve_with_discrepancies(&self, records: Vec<Record>) -> (Batch, Vec<Record>) {
        let detected = self.detect(records);
        let discrepancies = detected
            .iter()
            .filter(|record| self.is_violation(record))
            .cloned()
            .collect();
        (self.correct(detected), discrepancies)
    }
}

pub fn is_flagged(value: &Value) -> bool {
    match value {
        Value::Integer(i) => *i == 1,
        Value::Float(f) => *f == 1.0,
        Value::Boolean(b) => *b,
        Value::String(s) => s.trim() == "1",
        Value::Null => false,
    }
}

pub fn detect(records: Vec<Record>) -> Batch {
    ViolationRule::default().detect(records)
}

pub fn correct(records: Vec<Record>) -> Batch {
    ViolationRule::default().correct(records)
}

pub fn resolve_violations(records: Vec<Record>) -> Batch {
    ViolationRule::default().resolve(records)
}
