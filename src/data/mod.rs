//! Data models for the ticker.
//!
//! ## Submodules
//!
//! - [`conditions`]: the merged [`ConditionRecord`] handed to panels, plus the
//!   [`TickerFeed`] shape read by the sources
//! - [`duration`]: Parsing and formatting of dwell strings (e.g., "4s", "1000ms")
//! - [`text`]: station-name cleanup and other string helpers
//!
//! ## Data Flow
//!
//! ```text
//! ConditionsProvider ──▶ ConditionRecord ─┐
//!                                         ├──▶ with_hazards() ──▶ Panel
//! HazardsProvider ─────▶ Vec<HazardEntry> ┘
//! ```

pub mod conditions;
pub mod duration;
pub mod text;

pub use conditions::{
    ConditionRecord, HazardEntry, HazardProperties, Measurement, Observations, Station,
    StationProperties, TickerFeed,
};
