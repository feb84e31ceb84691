//! # wx-ticker
//!
//! A rotating weather ticker: a fixed-size viewport that cycles through short
//! text panels (hazards, station, temperature, humidity, pressure, wind,
//! visibility). Most panels hold for a fixed dwell; the hazard panel scrolls.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Host (app/ui)                       │
//! │   view switches ──▶ watch<ActivityState> ──┐                 │
//! │                                             ▼                │
//! │  ┌──────────┐   fetch   ┌──────────┐   ┌───────────┐         │
//! │  │  source  │──────────▶│ rotation │──▶│  render   │──▶ view │
//! │  │(providers)           │ (cycles) │   │ (viewport)│         │
//! │  └──────────┘           └────┬─────┘   └───────────┘         │
//! │                              │ panels                        │
//! │                              ▼                               │
//! │                        ┌──────────┐                          │
//! │                        │  panels  │ Skip | Fixed | Scroll    │
//! │                        └──────────┘                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: provider seams ([`ConditionsProvider`], [`HazardsProvider`])
//!   with file, channel and static implementations
//! - **[`panels`]**: the ordered panel registry and each panel's text
//! - **[`rotation`]**: the draw-cycle state machine
//! - **[`render`]**: fixed and scroll regions of the viewport
//! - **[`lifecycle`]**: spawns the rotation and restarts it on request
//! - **[`app`]**, **[`events`]**, **[`ui`]**: the terminal front-end
//!
//! ## Usage
//!
//! ```bash
//! # Rotate through a JSON feed file
//! wx-ticker --file conditions.json
//!
//! # Built-in sample data, printed to stdout
//! wx-ticker --demo --headless
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use tokio::sync::watch;
//! use wx_ticker::{ActivityState, Rotation, SharedViewport, StaticSource, TickerFeed};
//!
//! # tokio_test::block_on(async {
//! let source = Arc::new(StaticSource::new(TickerFeed::default()));
//! let (_tx, activity) = watch::channel(ActivityState::eligible("current-weather"));
//! let viewport = SharedViewport::new();
//!
//! let mut rotation = Rotation::new(
//!     source.clone(),
//!     source,
//!     Box::new(activity),
//!     Box::new(viewport.clone()),
//! );
//!
//! // No conditions yet: the run stalls without drawing anything.
//! let halt = rotation.start().await;
//! assert_eq!(halt, wx_ticker::Halt::Stalled);
//! assert_eq!(viewport.writes(), 0);
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod panels;
pub mod render;
pub mod rotation;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::TickerConfig;
pub use data::{ConditionRecord, HazardEntry, TickerFeed};
pub use error::{Result, TickerError};
pub use lifecycle::TickerHost;
pub use panels::{Panel, PanelOutput, PanelRegistry};
pub use render::{SharedViewport, StdoutViewport, Viewport};
pub use rotation::{ActivityState, Halt, Phase, Rotation, RotationHandle, ViewActivity};
pub use source::{ChannelSource, ConditionsProvider, FileSource, HazardsProvider, StaticSource};
