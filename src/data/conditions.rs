//! Condition records as delivered by the data providers.
//!
//! Field names follow the JSON produced by the current-conditions fetch, so a
//! feed file can be deserialized directly.

use serde::{Deserialize, Serialize};

/// A single observed value, as reported under `observations`.
///
/// The value is absent when the station did not report it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub value: Option<f64>,
}

impl Measurement {
    /// Create a measurement with a reported value.
    pub fn new(value: f64) -> Self {
        Self { value: Some(value) }
    }

    /// Whether the reported value counts as present: set, non-zero and not NaN.
    pub fn is_reported(&self) -> bool {
        matches!(self.value, Some(v) if v != 0.0 && !v.is_nan())
    }
}

/// Raw observation values used to decide which apparent temperature to show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observations {
    #[serde(default)]
    pub heat_index: Measurement,
    #[serde(default)]
    pub wind_chill: Measurement,
}

/// Station metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(default)]
    pub properties: StationProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationProperties {
    #[serde(default)]
    pub name: String,
}

/// One active hazard (watch, warning, advisory).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HazardEntry {
    #[serde(default)]
    pub properties: HazardProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HazardProperties {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub description: String,
}

impl HazardEntry {
    /// Create a hazard from its event name and description.
    pub fn new(event: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            properties: HazardProperties {
                event: event.into(),
                description: description.into(),
            },
        }
    }
}

/// Merged snapshot handed to the panels for one draw cycle.
///
/// `hazards` is filled in by the rotation right before dispatch; whatever the
/// conditions provider put there is overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConditionRecord {
    pub temperature: f64,
    pub temperature_unit: String,
    pub heat_index: f64,
    pub wind_chill: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub pressure: f64,
    pub pressure_direction: String,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub wind_unit: String,
    pub wind_gust: f64,
    pub visibility: f64,
    pub visibility_unit: String,
    pub ceiling: f64,
    pub ceiling_unit: String,
    #[serde(rename = "observations")]
    pub observations: Observations,
    #[serde(rename = "station")]
    pub station: Station,
    #[serde(rename = "hazards")]
    pub hazards: Vec<HazardEntry>,
}

impl ConditionRecord {
    /// Return the record with `hazards` replaced by the given list.
    pub fn with_hazards(mut self, hazards: Vec<HazardEntry>) -> Self {
        self.hazards = hazards;
        self
    }
}

/// What a feed file or channel carries: either half may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerFeed {
    #[serde(default)]
    pub conditions: Option<ConditionRecord>,
    #[serde(default)]
    pub hazards: Option<Vec<HazardEntry>>,
}

impl TickerFeed {
    /// A feed with both halves present.
    pub fn new(conditions: ConditionRecord, hazards: Vec<HazardEntry>) -> Self {
        Self {
            conditions: Some(conditions),
            hazards: Some(hazards),
        }
    }

    /// A plausible feed for demos and first runs.
    pub fn sample() -> Self {
        let conditions = ConditionRecord {
            temperature: 72.0,
            temperature_unit: "F".to_string(),
            heat_index: 74.0,
            wind_chill: 72.0,
            humidity: 64.0,
            dew_point: 59.0,
            pressure: 30.02,
            pressure_direction: "R".to_string(),
            wind_speed: 10.0,
            wind_direction: "NW".to_string(),
            wind_unit: "MPH".to_string(),
            wind_gust: 18.0,
            visibility: 10.0,
            visibility_unit: "mi.".to_string(),
            ceiling: 0.0,
            ceiling_unit: "ft.".to_string(),
            observations: Observations {
                heat_index: Measurement::new(23.3),
                wind_chill: Measurement::default(),
            },
            station: Station {
                properties: StationProperties {
                    name: "Chicago, Chicago O'Hare International Airport".to_string(),
                },
            },
            hazards: Vec::new(),
        };
        let hazards = vec![HazardEntry::new(
            "Heat Advisory",
            "Heat index values up to 105 expected through Tuesday evening.",
        )];
        Self::new(conditions, hazards)
    }
}
