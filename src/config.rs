//! Ticker configuration.
//!
//! Loaded from an optional TOML file and `WX_TICKER_*` environment variables:
//!
//! ```toml
//! fixed_dwell = "4s"
//! hazard_dwell = "1000ms"
//! progress_view_id = "progress"
//! station_name_width = 20
//! ```

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};

use crate::data::duration::parse_duration;
use crate::error::Result;

/// How long a fixed-text panel stays up.
pub const FIXED_DWELL: Duration = Duration::from_millis(4000);

/// How long the hazard panel waits before resuming rotation.
pub const HAZARD_DWELL: Duration = Duration::from_millis(1000);

/// View id of the host's transitional loading screen.
pub const PROGRESS_VIEW_ID: &str = "progress";

/// Station names are cut to this many characters.
pub const STATION_NAME_WIDTH: usize = 20;

/// Timing and text settings for the rotation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    #[serde(deserialize_with = "deserialize_duration")]
    pub fixed_dwell: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub hazard_dwell: Duration,
    pub progress_view_id: String,
    pub station_name_width: usize,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            fixed_dwell: FIXED_DWELL,
            hazard_dwell: HAZARD_DWELL,
            progress_view_id: PROGRESS_VIEW_ID.to_string(),
            station_name_width: STATION_NAME_WIDTH,
        }
    }
}

impl TickerConfig {
    /// Load configuration, layering environment variables over an optional file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("WX_TICKER"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

/// Accepts "4s"-style strings as well as bare millisecond counts.
fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => Ok(Duration::from_millis(ms)),
        Raw::Text(s) => parse_duration(&s).map_err(serde::de::Error::custom),
    }
}
