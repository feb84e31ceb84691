//! Host-facing lifecycle: launch the rotation and restart it when asked.
//!
//! [`TickerHost::launch`] spawns a task that calls [`Rotation::start`] once
//! right away (the view is ready), then sleeps until the host wants it again.
//! The task restarts the rotation when:
//!
//! - the host calls [`TickerHost::start`], or
//! - the host view becomes eligible again after a pause.
//!
//! Stopping never cancels the task. [`TickerHost::stop`] only adjusts the
//! index the next cycle will use.

use std::sync::Arc;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::rotation::{ActivityState, Halt, Phase, Rotation, RotationHandle};

/// Running ticker, as seen by the host application.
#[derive(Debug)]
pub struct TickerHost {
    rotation: RotationHandle,
    restart: Arc<Notify>,
    task: JoinHandle<()>,
}

impl TickerHost {
    /// Spawn the rotation task and start the first run.
    ///
    /// `activity` is the host's view-state channel; a transition back to an
    /// eligible view restarts a paused rotation.
    pub fn launch(rotation: Rotation, activity: watch::Receiver<ActivityState>) -> Self {
        let handle = rotation.handle();
        let restart = Arc::new(Notify::new());
        let task = tokio::spawn(run(rotation, activity, restart.clone()));
        info!(index = handle.state().screen_index(), "Ticker launched");
        Self {
            rotation: handle,
            restart,
            task,
        }
    }

    /// Ask for a new run. Ignored while a run is already in progress.
    pub fn start(&self) {
        self.restart.notify_waiters();
    }

    /// Reset the index to the first panel if `reset`; otherwise a no-op.
    pub fn stop(&self, reset: bool) {
        self.rotation.stop(reset);
    }

    pub fn rotation(&self) -> &RotationHandle {
        &self.rotation
    }

    pub fn phase(&self) -> Phase {
        self.rotation.state().phase()
    }

    /// Tear down the rotation task.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

async fn run(
    mut rotation: Rotation,
    mut activity: watch::Receiver<ActivityState>,
    restart: Arc<Notify>,
) {
    loop {
        let halt = rotation.start().await;
        debug!(?halt, index = rotation.screen_index(), "Rotation halted");

        // A pause means the view was ineligible; if it already came back,
        // go again without waiting for another change.
        if matches!(halt, Halt::Paused { .. })
            && activity.borrow_and_update().eligible_to_draw_conditions
        {
            continue;
        }

        loop {
            let notified = restart.notified();
            tokio::select! {
                _ = notified => {
                    info!("Ticker restart requested");
                    break;
                }
                changed = activity.changed() => {
                    if changed.is_err() {
                        debug!("Activity channel closed, ticker task exiting");
                        return;
                    }
                    if activity.borrow_and_update().eligible_to_draw_conditions {
                        info!("Ticker view active again");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::data::TickerFeed;
    use crate::render::SharedViewport;
    use crate::source::ChannelSource;

    struct Fixture {
        host: TickerHost,
        viewport: SharedViewport,
        feed: watch::Sender<Option<TickerFeed>>,
        activity: watch::Sender<ActivityState>,
    }

    fn launch(feed: Option<TickerFeed>) -> Fixture {
        let (feed_tx, source) = ChannelSource::create("test");
        feed_tx.send(feed).unwrap();
        let (activity_tx, activity_rx) = watch::channel(ActivityState::eligible("current-weather"));
        let viewport = SharedViewport::new();
        let source = Arc::new(source);
        let rotation = Rotation::new(
            source.clone(),
            source,
            Box::new(activity_rx.clone()),
            Box::new(viewport.clone()),
        );
        Fixture {
            host: TickerHost::launch(rotation, activity_rx),
            viewport,
            feed: feed_tx,
            activity: activity_tx,
        }
    }

    fn quiet_feed() -> TickerFeed {
        let mut feed = TickerFeed::sample();
        feed.hazards = Some(Vec::new());
        feed
    }

    async fn advance_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_launch_starts_once() {
        let f = launch(Some(quiet_feed()));
        advance_ms(1).await;

        assert_eq!(f.host.phase(), Phase::Running);
        assert_eq!(f.viewport.writes(), 1);
        assert_eq!(f.host.rotation().state().screen_index(), 1);
        f.host.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_rotation_restarts_on_start() {
        let f = launch(None);
        advance_ms(1).await;
        assert_eq!(f.host.phase(), Phase::Stalled);
        assert_eq!(f.viewport.writes(), 0);

        f.feed.send(Some(quiet_feed())).unwrap();
        f.host.start();
        advance_ms(1).await;

        assert_eq!(f.host.phase(), Phase::Running);
        assert_eq!(f.viewport.writes(), 1);
        f.host.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_rotation_resumes_when_view_returns() {
        let f = launch(Some(quiet_feed()));
        advance_ms(1).await;

        f.activity.send(ActivityState::ineligible("radar")).unwrap();
        advance_ms(4_000).await;
        assert_eq!(f.host.phase(), Phase::Paused);
        assert_eq!(f.host.rotation().state().screen_index(), 1);

        f.activity.send(ActivityState::eligible("current-weather")).unwrap();
        advance_ms(1).await;

        // Resumes where it left off: the station panel is drawn again
        assert_eq!(f.host.phase(), Phase::Running);
        assert_eq!(f.host.rotation().state().screen_index(), 1);
        assert_eq!(f.viewport.writes(), 2);
        f.host.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_view_restarts_from_first_panel() {
        let f = launch(Some(quiet_feed()));
        advance_ms(1).await;

        f.activity.send(ActivityState::ineligible("progress")).unwrap();
        advance_ms(4_000).await;
        assert_eq!(f.host.rotation().state().screen_index(), 0);

        f.activity.send(ActivityState::eligible("current-weather")).unwrap();
        advance_ms(1).await;

        // Hazards are empty, so the first drawn panel is the station again
        assert_eq!(f.host.rotation().state().screen_index(), 1);
        assert!(f
            .viewport
            .snapshot()
            .fixed_text
            .starts_with("Conditions at"));
        f.host.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_host_stop_resets_index() {
        let f = launch(Some(quiet_feed()));
        advance_ms(1).await;

        f.host.stop(false);
        assert_eq!(f.host.rotation().state().screen_index(), 1);
        f.host.stop(true);
        assert_eq!(f.host.rotation().state().screen_index(), 0);
        f.host.shutdown();
    }
}
