//! Coordinate enrichment through a three-tier fallback.
//!
//! For each record the resolver tries, in order:
//!
//! 1. the first two characters of `MaintPlant` as a country code;
//! 2. the first two characters of `FunctionalLoc`, mapped to a country name,
//!    which is then looked up in the country table;
//! 3. the exact `Region` string against the regional centroids.
//!
//! The first hit wins. When every tier misses, `Latitude`/`Longitude` are null.
//!
//! Tier 2 looks the country *name* up in a table keyed by codes, so under the
//! default [`CountryNameFallback::Verbatim`] it never hits. Consumers depend on
//! that output, so mapping the name back to its code is opt-in
//! ([`CountryNameFallback::ByCountryName`]).
//!
//! A batch with no `MaintPlant` field anywhere is returned untouched.

pub mod tables;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

pub use tables::Coordinate;

use crate::record::{Batch, Record, Value, batch_has_column, fields};

/// Scratch fields some upstream exports still carry; never part of the output.
pub const HELPER_FIELDS: &[&str] = &["CountryCode", "FunctionalLocPrefix", "CountryFromFunctionalLoc"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountryNameFallback {
    /// Look the derived country name up in the code-keyed table as-is.
    #[default]
    Verbatim,
    /// Map the derived country name back to its code before the lookup.
    ByCountryName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    CountryCode,
    FunctionalLocation,
    Region,
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResolutionTier::CountryCode => "country code",
            ResolutionTier::FunctionalLocation => "functional location",
            ResolutionTier::Region => "region",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoSummary {
    /// Set when the batch had no `MaintPlant` column and was left as-is.
    pub skipped: bool,
    pub country_code: usize,
    pub functional_location: usize,
    pub region: usize,
    pub unresolved: usize,
}

impl GeoSummary {
    fn record(&mut self, tier: Option<ResolutionTier>) {
        match tier {
            Some(ResolutionTier::CountryCode) => self.country_code += 1,
            Some(ResolutionTier::FunctionalLocation) => self.functional_location += 1,
            Some(ResolutionTier::Region) => self.region += 1,
            None => self.unresolved += 1,
        }
    }

    pub fn resolved(&self) -> usize {
        self.country_code + self.functional_location + self.region
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoResolver {
    fallback: CountryNameFallback,
}

impl GeoResolver {
    pub fn new(fallback: CountryNameFallback) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> CountryNameFallback {
        self.fallback
    }

    /// Runs the fallback chain for one set of location attributes.
    pub fn locate(
        &self,
        maint_plant: Option<&str>,
        functional_loc: Option<&str>,
        region: Option<&str>,
    ) -> Option<(ResolutionTier, Coordinate)> {
        if let Some(coordinate) = maint_plant
            .map(two_char_prefix)
            .and_then(tables::country_coordinate)
        {
            return Some((ResolutionTier::CountryCode, coordinate));
        }

        if let Some(coordinate) = functional_loc
            .map(two_char_prefix)
            .and_then(tables::location_country)
            .and_then(|country| self.country_by_name(country))
        {
            return Some((ResolutionTier::FunctionalLocation, coordinate));
        }

        region
            .and_then(tables::region_coordinate)
            .map(|coordinate| (ResolutionTier::Region, coordinate))
    }

    fn country_by_name(&self, country: &str) -> Option<Coordinate> {
        match self.fallback {
            CountryNameFallback::Verbatim => tables::country_coordinate(country),
            CountryNameFallback::ByCountryName => {
                tables::country_code_for_name(country).and_then(tables::country_coordinate)
            }
        }
    }

    pub fn resolve(&self, mut records: Vec<Record>) -> (Batch, GeoSummary) {
        let mut summary = GeoSummary::default();
        if !batch_has_column(&records, fields::MAINT_PLANT) {
            debug!(
                "No {} field in batch of {} record(s); leaving coordinates untouched",
                fields::MAINT_PLANT,
                records.len()
            );
            summary.skipped = true;
            return (records, summary);
        }

        let absent = [
            fields::LATITUDE,
            fields::LONGITUDE,
            fields::FUNCTIONAL_LOC,
            fields::REGION,
        ]
        .into_iter()
        .filter(|column| !batch_has_column(&records, column))
        .collect::<Vec<_>>();

        for record in &mut records {
            for column in &absent {
                record.insert(*column, Value::Null);
            }
            let resolution = self.locate(
                record.get_str(fields::MAINT_PLANT),
                record.get_str(fields::FUNCTIONAL_LOC),
                record.get_str(fields::REGION),
            );
            let coordinate = resolution.map(|(_, coordinate)| coordinate);
            record.insert(fields::LATITUDE, coordinate.map(|c| c.latitude));
            record.insert(fields::LONGITUDE, coordinate.map(|c| c.longitude));
            for helper in HELPER_FIELDS {
                record.remove(helper);
            }
            summary.record(resolution.map(|(tier, _)| tier));
        }

        debug!(
            "Resolved {} of {} record(s): {} by country code, {} by functional location, {} by region",
            summary.resolved(),
            records.len(),
            summary.country_code,
            summary.functional_location,
            summary.region
        );
        (records, summary)
    }
}

/// First two characters, or the whole value when it is shorter.
fn two_char_prefix(value: &str) -> &str {
    value
        .char_indices()
        .nth(2)
        .map(|(idx, _)| &value[..idx])
        .unwrap_or(value)
}

pub fn resolve_geography(records: Vec<Record>) -> Batch {
    GeoResolver::default().resolve(records).0
}
