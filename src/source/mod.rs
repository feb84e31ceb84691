//! Data provider seams for current conditions and hazards.
//!
//! The rotation does not fetch weather itself. It asks a
//! [`ConditionsProvider`] and a [`HazardsProvider`] for their latest data on
//! every draw cycle; either may answer `None` while it is not ready yet.

mod channel;
mod file;
mod fixed;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use fixed::StaticSource;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::data::{ConditionRecord, HazardEntry};

/// Callback a provider invokes while it is still waiting on its data.
pub type StillWaiting<'a> = &'a (dyn Fn() + Send + Sync);

/// Source of the current-conditions record.
///
/// # Example
///
/// ```
/// use wx_ticker::{ConditionsProvider, StaticSource, TickerFeed};
///
/// # tokio_test::block_on(async {
/// let source = StaticSource::new(TickerFeed::sample());
/// let record = source.fetch_current(&|| {}).await;
/// assert!(record.is_some());
/// # });
/// ```
#[async_trait]
pub trait ConditionsProvider: Send + Sync + Debug {
    /// Fetch the latest record, or `None` if none is available yet.
    async fn fetch_current(&self, still_waiting: StillWaiting<'_>) -> Option<ConditionRecord>;

    /// Error from the last fetch attempt, if any.
    fn error(&self) -> Option<String> {
        None
    }
}

/// Source of the active hazard list.
#[async_trait]
pub trait HazardsProvider: Send + Sync + Debug {
    /// Fetch active hazards in display order, or `None` if not available yet.
    async fn fetch_hazards(&self, still_waiting: StillWaiting<'_>) -> Option<Vec<HazardEntry>>;
}
