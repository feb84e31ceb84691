//! Host application state: which view is showing, and the ticker it drives.

use std::sync::Arc;

use tokio::sync::watch;

use crate::lifecycle::TickerHost;
use crate::render::{SharedViewport, ViewportState};
use crate::rotation::{ActivityState, Phase};
use crate::source::ConditionsProvider;
use crate::ui::Theme;

/// The host view currently on screen.
///
/// Only [`View::Conditions`] wants the ticker drawn. [`View::Progress`] is the
/// transitional loading screen; leaving for it sends the ticker back to its
/// first panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Current conditions with the rotating ticker.
    Conditions,
    /// Loading screen.
    Progress,
    /// Some other display that hides the ticker.
    Radar,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Conditions => View::Progress,
            View::Progress => View::Radar,
            View::Radar => View::Conditions,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Conditions => View::Radar,
            View::Progress => View::Conditions,
            View::Radar => View::Progress,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Conditions => "Conditions",
            View::Progress => "Progress",
            View::Radar => "Radar",
        }
    }

    /// Identifier reported to the ticker.
    pub fn id(&self, progress_view_id: &str) -> String {
        match self {
            View::Conditions => "current-weather".to_string(),
            View::Progress => progress_view_id.to_string(),
            View::Radar => "radar".to_string(),
        }
    }

    /// What this view reports to the ticker.
    pub fn activity(&self, progress_view_id: &str) -> ActivityState {
        let id = self.id(progress_view_id);
        match self {
            View::Conditions => ActivityState::eligible(id),
            View::Progress | View::Radar => ActivityState::ineligible(id),
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    host: TickerHost,
    activity: watch::Sender<ActivityState>,
    viewport: SharedViewport,
    panel_names: Vec<&'static str>,
    progress_view_id: String,
    source_description: String,
    error_source: Option<Arc<dyn ConditionsProvider>>,

    // Error from the data source, refreshed on every tick
    pub load_error: Option<String>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create the app around a launched ticker.
    ///
    /// `activity` must be the sender half of the channel the ticker reads.
    pub fn new(
        host: TickerHost,
        activity: watch::Sender<ActivityState>,
        viewport: SharedViewport,
        panel_names: Vec<&'static str>,
        progress_view_id: &str,
        source_description: &str,
    ) -> Self {
        Self::build(
            host,
            activity,
            viewport,
            panel_names,
            progress_view_id,
            source_description,
            Theme::auto_detect(),
        )
    }

    fn build(
        host: TickerHost,
        activity: watch::Sender<ActivityState>,
        viewport: SharedViewport,
        panel_names: Vec<&'static str>,
        progress_view_id: &str,
        source_description: &str,
        theme: Theme,
    ) -> Self {
        let app = Self {
            running: true,
            current_view: View::Conditions,
            show_help: false,
            host,
            activity,
            viewport,
            panel_names,
            progress_view_id: progress_view_id.to_string(),
            source_description: source_description.to_string(),
            error_source: None,
            load_error: None,
            theme,
            status_message: None,
        };
        app.publish_view();
        app
    }

    /// Report errors from `source` in the status bar.
    pub fn with_error_source(mut self, source: Arc<dyn ConditionsProvider>) -> Self {
        self.error_source = Some(source);
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    fn publish_view(&self) {
        self.activity
            .send_replace(self.current_view.activity(&self.progress_view_id));
    }

    /// Switch to a specific view and tell the ticker.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.publish_view();
    }

    /// Switch to the next view (cycles through Conditions → Progress → Radar).
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Ask the ticker for a new run.
    pub fn request_start(&mut self) {
        if self.phase() == Phase::Running {
            self.set_status_message("Ticker already running".to_string());
        } else {
            self.host.start();
            self.set_status_message("Ticker restart requested".to_string());
        }
    }

    /// Periodic housekeeping: refresh the source error and restart a
    /// stalled ticker.
    pub fn tick(&mut self) {
        self.load_error = self.error_source.as_ref().and_then(|source| source.error());
        if self.phase() == Phase::Stalled {
            self.host.start();
        }
    }

    pub fn phase(&self) -> Phase {
        self.host.phase()
    }

    pub fn screen_index(&self) -> usize {
        self.host.rotation().state().screen_index()
    }

    /// Name of the panel at the current index.
    pub fn panel_name(&self) -> &'static str {
        self.panel_names
            .get(self.screen_index())
            .copied()
            .unwrap_or("-")
    }

    pub fn panel_count(&self) -> usize {
        self.panel_names.len()
    }

    pub fn waiting(&self) -> bool {
        self.host.rotation().state().waiting()
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport.snapshot()
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Stop the ticker task.
    pub fn shutdown(self) {
        self.host.shutdown();
    }
}
