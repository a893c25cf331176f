//! Field maps - normalized field name → candidate paths (YAML)
//!
//! ```yaml
//! service: emsc-feltreport
//! fields:
//!   magnitude: [ev_mag_value, "features[0].properties.mag"]
//!   region: ev_region
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ParamwsError;
use crate::record::Record;

/// Handles string OR array for candidate paths
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Candidates {
    Single(String),
    Multiple(Vec<String>),
}

impl Candidates {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Candidates::Single(path) => std::slice::from_ref(path),
            Candidates::Multiple(paths) => paths,
        }
    }
}

/// Per-service table of candidate paths
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FieldMap {
    pub service: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Candidates>,
}

/// EMSC felt-report event fields: (normalized name, flat key, feature property)
const FELT_REPORT_EVENT: &[(&str, &str, &str)] = &[
    ("deltatime", "ev_deltatime", "time"),
    ("longitude", "ev_longitude", "lon"),
    ("latitude", "ev_latitude", "lat"),
    ("event_time", "ev_event_time", "time"),
    ("magnitude", "ev_mag_value", "mag"),
    ("magnitude_type", "ev_mag_type", "magtype"),
    ("depth", "ev_depth", "depth"),
    ("region", "ev_region", "region"),
    ("last_update", "ev_last_update", "last_update"),
    ("nb_testimonies", "ev_nbtestimonies", "feltreportCount"),
    ("unid", "ev_unid", "eventid"),
    ("evid", "ev_evid", "eventid"),
    ("id", "ev_id", "eventid"),
    ("full_count", "full_count", "feltreportCount"),
];

impl FieldMap {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ParamwsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Built-in table for the EMSC felt-report event service
    ///
    /// Each field tries the flat key first, then the first feature's property.
    pub fn felt_report_event() -> Self {
        let mut map = Self::new("emsc-feltreport");
        for (field, flat, property) in FELT_REPORT_EVENT {
            map = map.with_field(
                *field,
                [flat.to_string(), format!("features[0].properties.{property}")],
            );
        }
        map
    }

    /// Builder-style insert
    pub fn with_field<I, S>(mut self, field: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths = candidates.into_iter().map(Into::into).collect();
        self.fields.insert(field.into(), Candidates::Multiple(paths));
        self
    }

    pub fn candidates(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Candidates::as_slice)
    }

    /// Resolve one normalized field
    pub fn lookup<'a>(&self, record: &'a Record, field: &str) -> Result<Option<&'a Value>, ParamwsError> {
        let candidates = self
            .candidates(field)
            .ok_or_else(|| ParamwsError::UnknownField {
                field: field.to_string(),
            })?;
        Ok(record.first_of(candidates))
    }

    /// Resolve every field; unresolved ones become null
    pub fn extract(&self, record: &Record) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(field, candidates)| {
                let value = record.first_of(candidates.as_slice()).cloned();
                if value.is_none() {
                    tracing::debug!(service = %self.service, field = %field, "no candidate path resolved");
                }
                (field.clone(), value.unwrap_or(Value::Null))
            })
            .collect()
    }
}
