//! Query results
//!
//! A report has two levels: a group key (`__global` or a component identifier), then the
//! global (or plain local) code. Collected validation errors sit under `__errors`.

use crate::config::constants::report::{ERRORS_KEY, GLOBAL_KEY, MAX_COLLECTED_ERRORS};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Full record of one code
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExtendedRecord {
    pub base_code: i64,
    pub component_code: i64,
    pub component_identifier: String,
    pub section: String,
    pub context: String,
    pub message: String,
    pub message_fe: String,
    pub show_fe: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    /// Composed message of the compact format
    Message(String),
    Record(ExtendedRecord),
}

impl ReportValue {
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            Self::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&ExtendedRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Message(_) => None,
        }
    }
}

pub type ReportGroup = IndexMap<i64, ReportValue>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryReport {
    groups: IndexMap<String, ReportGroup>,
    errors: Option<Vec<String>>,
}

impl QueryReport {
    /// Empty report; `__errors` is present whenever errors are collected
    pub fn new(collect_errors: bool) -> Self {
        Self {
            groups: IndexMap::new(),
            errors: collect_errors.then(Vec::new),
        }
    }

    pub(crate) fn insert(&mut self, group: &str, code: i64, value: ReportValue) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(code, value);
    }

    /// Returns `false` once the error limit is reached
    pub(crate) fn push_error(&mut self, message: String) -> bool {
        match self.errors.as_mut() {
            Some(errors) if errors.len() < MAX_COLLECTED_ERRORS => {
                errors.push(message);
                true
            }
            _ => false,
        }
    }

    pub fn group(&self, key: &str) -> Option<&ReportGroup> {
        self.groups.get(key)
    }

    /// Records of components taking part in the global scheme
    pub fn global(&self) -> Option<&ReportGroup> {
        self.group(GLOBAL_KEY)
    }

    pub fn get(&self, group: &str, code: i64) -> Option<&ReportValue> {
        self.groups.get(group).and_then(|records| records.get(&code))
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &ReportGroup)> {
        self.groups.iter().map(|(key, group)| (key.as_str(), group))
    }

    pub fn errors(&self) -> Option<&[String]> {
        self.errors.as_deref()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().map_or(false, |errors| !errors.is_empty())
    }

    pub fn record_count(&self) -> usize {
        self.groups.values().map(IndexMap::len).sum()
    }

    /// No records and no `__errors` entry
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.errors.is_none()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for QueryReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.groups.len() + usize::from(self.errors.is_some());
        let mut map = serializer.serialize_map(Some(len))?;

        for (key, group) in &self.groups {
            map.serialize_entry(key, group)?;
        }
        if let Some(errors) = &self.errors {
            map.serialize_entry(ERRORS_KEY, errors)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_key_presence() {
        assert!(QueryReport::new(false).errors().is_none());
        assert!(QueryReport::new(false).is_empty());

        let report = QueryReport::new(true);
        assert_eq!(report.errors(), Some(&[][..]));
        assert!(!report.has_errors());
        assert_eq!(report.to_json().unwrap(), r#"{"__errors":[]}"#);
    }

    #[test]
    fn test_json_shape() {
        let mut report = QueryReport::new(true);
        report.insert(GLOBAL_KEY, 100_001, ReportValue::Message("stay frosty".into()));
        report.insert("ExampleA", 2, ReportValue::Message("ctx: bish".into()));
        report.push_error("broken".into());

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["__global"]["100001"], "stay frosty");
        assert_eq!(value["ExampleA"]["2"], "ctx: bish");
        assert_eq!(value["__errors"][0], "broken");
        assert_eq!(report.record_count(), 2);
    }

    #[test]
    fn test_push_error_without_collection() {
        let mut report = QueryReport::new(false);
        assert!(!report.push_error("ignored".into()));
        assert!(report.errors().is_none());
    }
}
