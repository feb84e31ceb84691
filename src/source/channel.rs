//! Channel-based data source.
//!
//! Receives feeds via a tokio watch channel. Useful when another task (a
//! poller, a subscription) pushes updates rather than the ticker reading a file.

use async_trait::async_trait;
use tokio::sync::watch;

use super::{ConditionsProvider, HazardsProvider, StillWaiting};
use crate::data::{ConditionRecord, HazardEntry, TickerFeed};

/// A data source that serves the latest feed pushed through a channel.
///
/// Until the first feed arrives, both fetches report "not ready" and call
/// the still-waiting probe.
///
/// # Example
///
/// ```
/// use wx_ticker::{ChannelSource, TickerFeed};
///
/// let (tx, source) = ChannelSource::create("poller");
/// tx.send(Some(TickerFeed::sample())).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<TickerFeed>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - Where feeds come from (e.g. "api.weather.gov")
    pub fn new(receiver: watch::Receiver<Option<TickerFeed>>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair; the sender pushes feeds to this source.
    pub fn create(source_description: &str) -> (watch::Sender<Option<TickerFeed>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self::new(rx, source_description))
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[async_trait]
impl ConditionsProvider for ChannelSource {
    async fn fetch_current(&self, still_waiting: StillWaiting<'_>) -> Option<ConditionRecord> {
        let record = self
            .receiver
            .borrow()
            .as_ref()
            .and_then(|feed| feed.conditions.clone());
        if record.is_none() {
            still_waiting();
        }
        record
    }
}

#[async_trait]
impl HazardsProvider for ChannelSource {
    async fn fetch_hazards(&self, still_waiting: StillWaiting<'_>) -> Option<Vec<HazardEntry>> {
        let hazards = self
            .receiver
            .borrow()
            .as_ref()
            .and_then(|feed| feed.hazards.clone());
        if hazards.is_none() {
            still_waiting();
        }
        hazards
    }
}
