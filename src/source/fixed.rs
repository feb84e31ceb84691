//! A source that always returns the same feed.

use async_trait::async_trait;

use super::{ConditionsProvider, HazardsProvider, StillWaiting};
use crate::data::{ConditionRecord, HazardEntry, TickerFeed};

/// A source holding one fixed feed, for demos.
#[derive(Debug, Clone)]
pub struct StaticSource {
    feed: TickerFeed,
}

impl StaticSource {
    pub fn new(feed: TickerFeed) -> Self {
        Self { feed }
    }
}

#[async_trait]
impl ConditionsProvider for StaticSource {
    async fn fetch_current(&self, still_waiting: StillWaiting<'_>) -> Option<ConditionRecord> {
        if self.feed.conditions.is_none() {
            still_waiting();
        }
        self.feed.conditions.clone()
    }
}

#[async_trait]
impl HazardsProvider for StaticSource {
    async fn fetch_hazards(&self, _still_waiting: StillWaiting<'_>) -> Option<Vec<HazardEntry>> {
        self.feed.hazards.clone()
    }
}
