//! EMSC felt-report accessors
//!
//! The event service answers either with a flat object (`ev_mag_value`, ...)
//! or with a feature collection (`features[0].properties.mag`, ...). The
//! accessors below try both through the built-in field map.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ParamwsError;
use crate::field_map::FieldMap;
use crate::record::Record;
use crate::resolve::Shape;

static FELT_REPORT_EVENT: Lazy<FieldMap> = Lazy::new(FieldMap::felt_report_event);

/// Decode a response body: UTF-8 first, Latin-1 otherwise
pub fn decode_text(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::debug!("response body is not UTF-8, decoding as Latin-1");
            body.iter().map(|&b| b as char).collect()
        }
    }
}

/// Felt-report event information
#[derive(Debug, Clone, PartialEq)]
pub struct FeltReportEvent {
    record: Record,
}

macro_rules! event_fields {
    ($($(#[$doc:meta])* $method:ident => $field:literal),* $(,)?) => {
        impl FeltReportEvent {
            $(
                $(#[$doc])*
                pub fn $method(&self) -> Option<&Value> {
                    self.field($field)
                }
            )*
        }
    };
}

impl FeltReportEvent {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    /// Parse an event response
    ///
    /// EMSC sometimes returns a list holding a single object, sometimes the
    /// object itself.
    pub fn from_json(text: &str) -> Result<Self, ParamwsError> {
        let parsed: Value = serde_json::from_str(text)?;
        let event = match parsed {
            Value::Array(items) => items.into_iter().next().ok_or(ParamwsError::EmptyResponse)?,
            Value::Object(_) => parsed,
            other => {
                return Err(ParamwsError::UnexpectedShape {
                    expected: "an object or a list",
                    found: Shape::of(&other).describe(),
                })
            }
        };
        Ok(Self::new(Record::new(event)))
    }

    /// Parse a raw response body
    pub fn from_bytes(body: &[u8]) -> Result<Self, ParamwsError> {
        Self::from_json(&decode_text(body))
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Resolve a normalized field through the built-in table
    pub fn field(&self, name: &str) -> Option<&Value> {
        let candidates = FELT_REPORT_EVENT.candidates(name).unwrap_or(&[]);
        self.record.first_of(candidates)
    }

    /// All normalized fields, unresolved ones as null
    pub fn to_normalized(&self) -> Value {
        Value::Object(FELT_REPORT_EVENT.extract(&self.record))
    }
}

event_fields! {
    /// Event delta time
    deltatime => "deltatime",
    longitude => "longitude",
    latitude => "latitude",
    /// Origin time
    event_time => "event_time",
    magnitude => "magnitude",
    magnitude_type => "magnitude_type",
    depth => "depth",
    region => "region",
    last_update => "last_update",
    /// Number of testimonies
    nb_testimonies => "nb_testimonies",
    unid => "unid",
    evid => "evid",
    event_id => "id",
    full_count => "full_count",
}

/// One felt-report intensity sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityPoint {
    pub lon: f64,
    pub lat: f64,
    /// Raw intensity
    pub raw: Option<f64>,
    /// Corrected intensity
    pub corrected: Option<f64>,
}

impl IntensityPoint {
    /// `None` when lon/lat is not finite; NaN/infinite intensities become `None`
    fn sanitized(&self) -> Option<Self> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            tracing::debug!(lon = self.lon, lat = self.lat, "skipping intensity point without location");
            return None;
        }
        Some(Self {
            lon: self.lon,
            lat: self.lat,
            raw: self.raw.filter(|v| v.is_finite()),
            corrected: self.corrected.filter(|v| v.is_finite()),
        })
    }
}

/// Intensity data keyed by event unid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeltReportIntensities {
    record: Record,
}

impl FeltReportIntensities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one event's intensities under its unid
    ///
    /// Points without a finite location are dropped; non-finite intensities
    /// are stored as absent.
    pub fn add_event(&mut self, unid: &str, points: &[IntensityPoint], comments: &str) {
        let points: Vec<IntensityPoint> = points.iter().filter_map(IntensityPoint::sanitized).collect();
        self.record.add_field(
            unid,
            json!({
                "unid": unid,
                "intensities": points,
                "comments": comments,
            }),
        );
    }

    pub fn event(&self, unid: &str) -> Option<FeltReportIntensity<'_>> {
        // unids contain no '.', so this is always a direct key lookup
        self.record
            .data()
            .as_object()
            .and_then(|events| events.get(unid))
            .map(|data| FeltReportIntensity { data })
    }

    pub fn unids(&self) -> Vec<&str> {
        self.record
            .data()
            .as_object()
            .map(|events| events.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// View over one event's intensity entry
#[derive(Debug, Clone, Copy)]
pub struct FeltReportIntensity<'a> {
    data: &'a Value,
}

impl<'a> FeltReportIntensity<'a> {
    pub fn event_id(&self) -> Option<&'a Value> {
        crate::resolve::get(self.data, "unid")
    }

    pub fn intensities(&self) -> Option<&'a Value> {
        crate::resolve::get(self.data, "intensities")
    }

    pub fn comments(&self) -> Option<&'a Value> {
        crate::resolve::get(self.data, "comments")
    }

    /// Typed intensity samples
    pub fn points(&self) -> Result<Vec<IntensityPoint>, ParamwsError> {
        match self.intensities() {
            Some(value) => Ok(Vec::<IntensityPoint>::deserialize(value)?),
            None => Ok(Vec::new()),
        }
    }
}
