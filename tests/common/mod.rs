#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use asset_records::{Record, Value};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path for a file the command under test is expected to create.
    pub fn join(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read output file")
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        serde_json::from_str(&self.read(path)).expect("parse output json")
    }
}

/// Builds a record from `(field, value)` pairs, keeping their order.
pub fn record(pairs: &[(&str, Value)]) -> Record {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

pub fn material(profile: &str, part: &str) -> Record {
    record(&[
        ("Serial_No_Profile", Value::from(profile)),
        ("Replacement_Part", Value::from(part)),
    ])
}

pub fn turbine(maint_plant: &str, functional_loc: Option<&str>, region: Option<&str>) -> Record {
    record(&[
        ("MaintPlant", Value::from(maint_plant)),
        ("FunctionalLoc", Value::from(functional_loc)),
        ("Region", Value::from(region)),
    ])
}
