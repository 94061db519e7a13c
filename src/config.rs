//! Pipeline configuration loaded once per invocation.
//!
//! Every key is optional; anything left out falls back to the built-in rule
//! set. Example:
//!
//! ```yaml
//! column_renames:
//!   - from: SerialNoProfile
//!     to: Serial_No_Profile
//! required_fields: [Serial_No_Profile, Replacement_Part]
//! restricted_profiles: [ZPP2, ZPP8, ZCS1]
//! mandated_part: B
//! geo:
//!   country_name_fallback: verbatim
//! ```

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::{
    geo::{CountryNameFallback, GeoResolver},
    normalize::{ColumnMapping, DEFAULT_COLUMN_RENAMES, DEFAULT_REQUIRED_FIELDS},
    violation::{MANDATED_REPLACEMENT_PART, RESTRICTED_PROFILES, ViolationRule},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GeoConfig {
    pub country_name_fallback: CountryNameFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub column_renames: Vec<ColumnRename>,
    pub required_fields: Vec<String>,
    pub restricted_profiles: Vec<String>,
    pub mandated_part: String,
    pub geo: GeoConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            column_renames: DEFAULT_COLUMN_RENAMES
                .iter()
                .map(|(from, to)| ColumnRename {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
            required_fields: DEFAULT_REQUIRED_FIELDS
                .iter()
                .map(|field| field.to_string())
                .collect(),
            restricted_profiles: RESTRICTED_PROFILES
                .iter()
                .map(|profile| profile.to_string())
                .collect(),
            mandated_part: MANDATED_REPLACEMENT_PART.to_string(),
            geo: GeoConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let config: PipelineConfig = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing config file {path:?}"))?;
        config
            .validate()
            .with_context(|| format!("Validating config file {path:?}"))?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.mandated_part.trim().is_empty(),
            "mandated_part cannot be empty"
        );
        for rename in &self.column_renames {
            ensure!(
                !rename.from.trim().is_empty() && !rename.to.trim().is_empty(),
                "column_renames entries need both 'from' and 'to'"
            );
        }
        ensure!(
            self.required_fields.iter().all(|field| !field.trim().is_empty()),
            "required_fields cannot contain empty names"
        );
        Ok(())
    }

    pub fn column_mapping(&self) -> ColumnMapping {
        ColumnMapping::new(
            self.column_renames
                .iter()
                .map(|rename| (rename.from.clone(), rename.to.clone())),
        )
    }

    pub fn violation_rule(&self) -> ViolationRule {
        ViolationRule::new(self.restricted_profiles.iter().cloned(), self.mandated_part.clone())
    }

    pub fn geo_resolver(&self) -> GeoResolver {
        GeoResolver::new(self.geo.country_name_fallback)
    }
}
