//! Scalar values and the ordered record container shared by every stage.
//!
//! A [`Record`] is an open field set: any key may appear, keys keep their
//! insertion order, and values are restricted to the scalar [`Value`] variants.
//! Stages only look at the fields they need and carry everything else through
//! untouched.

use std::{collections::HashSet, fmt};

use itertools::Itertools;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};

/// Canonical field names the stages read or write.
pub mod fields {
    pub const SERIAL_NO_PROFILE: &str = "Serial_No_Profile";
    pub const REPLACEMENT_PART: &str = "Replacement_Part";
    pub const USED_IN_SBOM: &str = "Used_In_SBom";
    pub const VIOLATION: &str = "Violation";
    pub const CLEANED_MARKER: &str = "cleaned(Unprocessed)";
    pub const PREDICTED: &str = "predicted";
    pub const MAINT_PLANT: &str = "MaintPlant";
    pub const FUNCTIONAL_LOC: &str = "FunctionalLoc";
    pub const REGION: &str = "Region";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 {
                    format!("{f:.1}")
                } else {
                    f.to_string()
                }
            }
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar value (string, number, boolean, or null)")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Boolean(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(i64::try_from(value)
            .map(Value::Integer)
            .unwrap_or(Value::Float(value as f64)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Ordered field set for a single maintenance/asset entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

pub type Batch = Vec<Record>;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|(name, _)| name == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Returns the field as a string slice, treating non-string values as absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Sets `key` in place when present, otherwise appends it. Returns the
    /// previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.fields[idx].1, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|idx| self.fields.remove(idx).1)
    }

    /// Renames `from` to `to` keeping the field's position. When `to` is
    /// already present the existing value wins and `from` is dropped.
    pub fn rename_key(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        let Some(idx) = self.position(from) else {
            return false;
        };
        if self.contains_key(to) {
            self.fields.remove(idx);
        } else {
            self.fields[idx].0 = to.to_string();
        }
        true
    }

    /// Renames every key at once: `target` sees only the original keys, so
    /// one rename never feeds another. A renamed field whose target names a
    /// key that stays put, or one already produced earlier in the record, is
    /// dropped. Returns how many keys were renamed or dropped.
    pub fn rename_keys<F>(&mut self, mut target: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let targets = self
            .fields
            .iter()
            .map(|(name, _)| target(name).filter(|to| to != name))
            .collect::<Vec<_>>();
        if targets.iter().all(Option::is_none) {
            return 0;
        }
        let staying = self
            .fields
            .iter()
            .zip(&targets)
            .filter(|(_, to)| to.is_none())
            .map(|((name, _), _)| name.clone())
            .collect::<HashSet<_>>();

        let mut changed = 0usize;
        let mut produced = HashSet::new();
        let fields = std::mem::take(&mut self.fields);
        for ((name, value), to) in fields.into_iter().zip(targets) {
            match to {
                None => self.fields.push((name, value)),
                Some(to) => {
                    changed += 1;
                    if !staying.contains(&to) && produced.insert(to.clone()) {
                        self.fields.push((to, value));
                    }
                }
            }
        }
        changed
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.fields.iter_mut().map(|(_, value)| value)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of scalar fields")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Record, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = Record {
            fields: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            record.insert(key, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Column names across the batch in first-seen order.
pub fn batch_columns(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| record.keys())
        .unique()
        .map(str::to_string)
        .collect()
}

pub fn batch_has_column(records: &[Record], name: &str) -> bool {
    records.iter().any(|record| record.contains_key(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        [
            ("MaintPlant", Value::from("DE01")),
            ("Region", Value::from("Europe")),
            ("Latitude", Value::Null),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn rename_keys_applies_all_renames_simultaneously() {
        let mut record: Record = [("A", Value::Integer(1)), ("B", Value::Integer(2))]
            .into_iter()
            .collect();
        let changed = record.rename_keys(|name| match name {
            "A" => Some("B".to_string()),
            "B" => Some("C".to_string()),
            _ => None,
        });
        assert_eq!(changed, 2);
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![("B", &Value::Integer(1)), ("C", &Value::Integer(2))]
        );
    }

    #[test]
    fn rename_keys_keeps_fields_that_stay_put() {
        let mut record = sample();
        let changed = record.rename_keys(|name| (name == "Region").then(|| "MaintPlant".to_string()));
        assert_eq!(changed, 1);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["MaintPlant", "Latitude"]);
        assert_eq!(record.get_str("MaintPlant"), Some("DE01"));
    }

    #[test]
    fn insert_replaces_in_place_and_appends_new_keys() {
        let mut record = sample();
        let previous = record.insert("Region", "Asia");
        assert_eq!(previous, Some(Value::from("Europe")));
        record.insert("Longitude", 1.5);
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["MaintPlant", "Region", "Latitude", "Longitude"]
        );
    }

    #[test]
    fn rename_key_keeps_position() {
        let mut record = sample();
        assert!(record.rename_key("Region", "Area"));
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["MaintPlant", "Area", "Latitude"]
        );
        assert!(!record.rename_key("Missing", "Other"));
    }

    #[test]
    fn rename_key_prefers_existing_canonical_value() {
        let mut record: Record = [
            ("SerialNoProfile", Value::from("ZPP8")),
            ("Serial_No_Profile", Value::from("ZPP2")),
        ]
        .into_iter()
        .collect();
        assert!(record.rename_key("SerialNoProfile", "Serial_No_Profile"));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get_str("Serial_No_Profile"), Some("ZPP2"));
    }

    #[test]
    fn deserialize_preserves_field_order_and_scalar_types() {
        let json = r#"{"b": 1, "a": "x", "c": null, "d": true, "e": 2.5}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a", "c", "d", "e"]);
        assert_eq!(record.get("b"), Some(&Value::Integer(1)));
        assert_eq!(record.get("c"), Some(&Value::Null));
        assert_eq!(record.get("d"), Some(&Value::Boolean(true)));
        assert_eq!(record.get("e"), Some(&Value::Float(2.5)));
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"b":1,"a":"x","c":null,"d":true,"e":2.5}"#);
    }

    #[test]
    fn deserialize_rejects_nested_values() {
        let json = r#"{"_id": {"$oid": "abc"}}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn get_str_ignores_non_string_values() {
        let record: Record = [("MaintPlant", Value::Integer(101))].into_iter().collect();
        assert_eq!(record.get_str("MaintPlant"), None);
    }

    #[test]
    fn batch_columns_are_first_seen_order() {
        let mut second = Record::new();
        second.insert("Region", "Asia");
        second.insert("Extra", 1i64);
        let columns = batch_columns(&[sample(), second]);
        assert_eq!(columns, vec!["MaintPlant", "Region", "Latitude", "Extra"]);
        assert!(batch_has_column(&[sample()], "Latitude"));
        assert!(!batch_has_column(&[sample()], "Extra"));
    }

    #[test]
    fn as_display_renders_null_as_empty() {
        assert_eq!(Value::Null.as_display(), "");
        assert_eq!(Value::Float(50.0).as_display(), "50.0");
        assert_eq!(Value::Float(51.1657).as_display(), "51.1657");
    }
}
