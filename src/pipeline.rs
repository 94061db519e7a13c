//! Stage composition for the three record flows.
//!
//! - material: normalize → resolve violations
//! - turbine: mark predicted → resolve geography
//! - full: normalize → resolve violations → resolve geography
//!
//! Each flow consumes the batch and returns a new one in the same order. Only
//! normalization can reject a batch.

use log::{debug, info};

use crate::{
    config::PipelineConfig,
    error::SchemaResult,
    geo::{GeoResolver, GeoSummary},
    normalize::{ColumnMapping, normalize_with},
    record::{Batch, Record, Value, fields},
    violation::ViolationRule,
};

#[derive(Debug, Clone)]
pub struct Pipeline {
    mapping: ColumnMapping,
    required_fields: Vec<String>,
    rule: ViolationRule,
    geo: GeoResolver,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            mapping: config.column_mapping(),
            required_fields: config.required_fields.clone(),
            rule: config.violation_rule(),
            geo: config.geo_resolver(),
        }
    }

    pub fn rule(&self) -> &ViolationRule {
        &self.rule
    }

    pub fn normalize(&self, records: Vec<Record>) -> SchemaResult<Batch> {
        normalize_with(records, &self.required_fields, &self.mapping)
    }

    pub fn resolve_violations(&self, records: Vec<Record>) -> Batch {
        let records = self.rule.resolve(records);
        let flagged = records
            .iter()
            .filter(|record| record.get(fields::VIOLATION) == Some(&Value::Integer(1)))
            .count();
        info!(
            "Violation check: {flagged} of {} record(s) flagged and corrected",
            records.len()
        );
        records
    }

    pub fn resolve_geography(&self, records: Vec<Record>) -> (Batch, GeoSummary) {
        let (records, summary) = self.geo.resolve(records);
        if summary.skipped {
            info!(
                "Geo enrichment skipped: no {} field in batch",
                fields::MAINT_PLANT
            );
        } else {
            info!(
                "Geo enrichment: {} by country code, {} by functional location, {} by region, {} unresolved",
                summary.country_code, summary.functional_location, summary.region, summary.unresolved
            );
        }
        (records, summary)
    }

    /// Material flow.
    pub fn clean(&self, records: Vec<Record>) -> SchemaResult<Batch> {
        let records = self.normalize(records)?;
        Ok(self.resolve_violations(records))
    }

    /// Turbine flow. Never rejects a batch.
    pub fn enrich(&self, records: Vec<Record>) -> Batch {
        let records = mark_predicted(records);
        self.resolve_geography(records).0
    }

    /// Full flow.
    pub fn run(&self, records: Vec<Record>) -> SchemaResult<Batch> {
        let records = self.clean(records)?;
        Ok(self.resolve_geography(records).0)
    }

    /// Normalizes, then returns the corrected batch and the records that were
    /// in violation before correction.
    pub fn audit(&self, records: Vec<Record>) -> SchemaResult<(Batch, Vec<Record>)> {
        let records = self.normalize(records)?;
        Ok(self.rule.resolve_with_discrepancies(records))
    }
}

/// Stamps `predicted = true` on records that do not carry it yet.
pub fn mark_predicted(records: Vec<Record>) -> Batch {
    let mut stamped = 0usize;
    let records = records
        .into_iter()
        .map(|mut record| {
            if record.get(fields::PREDICTED) != Some(&Value::Boolean(true)) {
                record.insert(fields::PREDICTED, true);
                stamped += 1;
            }
            record
        })
        .collect::<Vec<_>>();
    debug!("Marked {stamped} of {} record(s) as predicted", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    fn material(profile: &str, part: &str) -> Record {
        [
            ("SerialNoProfile", Value::from(profile)),
            ("ReplacementPart", Value::from(part)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn clean_renames_then_corrects() {
        let output = Pipeline::default()
            .clean(vec![material("ZPP2", "A")])
            .unwrap();
        assert_eq!(output[0].get_str(fields::REPLACEMENT_PART), Some("B"));
        assert_eq!(output[0].get(fields::VIOLATION), Some(&Value::Integer(1)));
    }

    #[test]
    fn run_rejects_empty_batches() {
        assert_eq!(
            Pipeline::default().run(Vec::new()),
            Err(SchemaError::EmptyBatch)
        );
    }

    #[test]
    fn run_adds_coordinates_after_cleaning() {
        let mut record = material("ZPP8", "B");
        record.insert(fields::MAINT_PLANT, "NL20");
        let output = Pipeline::default().run(vec![record]).unwrap();
        assert_eq!(output[0].get(fields::LATITUDE), Some(&Value::Float(52.1326)));
        assert_eq!(output[0].get(fields::VIOLATION), Some(&Value::Integer(0)));
    }

    #[test]
    fn mark_predicted_keeps_existing_true_flags() {
        let mut already: Record = Record::new();
        already.insert("id", 1i64);
        already.insert(fields::PREDICTED, true);
        let mut stale = Record::new();
        stale.insert(fields::PREDICTED, false);
        let output = mark_predicted(vec![already.clone(), stale, Record::new()]);
        assert_eq!(output[0], already);
        assert_eq!(output[1].get(fields::PREDICTED), Some(&Value::Boolean(true)));
        assert_eq!(output[2].get(fields::PREDICTED), Some(&Value::Boolean(true)));
    }

    #[test]
    fn audit_returns_pre_correction_snapshot() {
        let (corrected, discrepancies) = Pipeline::default()
            .audit(vec![material("ZCS1", "C"), material("X", "C")])
            .unwrap();
        assert_eq!(corrected.len(), 2);
        assert_eq!(discrepancies.len(), 1);
        assert_eq!(discrepancies[0].get_str(fields::REPLACEMENT_PART), Some("C"));
    }
}
