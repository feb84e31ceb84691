//! The rotation controller: which panel is up, and when the next one comes.
//!
//! A run is a chain of draw cycles. Each cycle fetches conditions and hazards,
//! merges them, asks the panel at the current index for its output and
//! renders it. Then it waits (fixed dwell, or the scrolling panel's own
//! continuation) and advances. A run ends with a [`Halt`]:
//!
//! - [`Halt::Stalled`]: no record was available; nothing re-polls, the host
//!   must call [`Rotation::start`] again once data exists
//! - [`Halt::Paused`]: the host view stopped being eligible when it was time to
//!   advance; the index is reset only if the host was showing its progress view
//!
//! Because `start` and `advance` take `&mut self`, only one cycle is ever in
//! flight for a controller.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::config::TickerConfig;
use crate::data::ConditionRecord;
use crate::panels::{PanelContext, PanelOutput, PanelRegistry};
use crate::render::{PanelRenderer, Viewport};
use crate::source::{ConditionsProvider, HazardsProvider};

/// What the host reports about the view it is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityState {
    /// Whether the host wants current conditions drawn right now.
    pub eligible_to_draw_conditions: bool,
    /// Identifier of the view the host is showing.
    pub view_id: String,
}

impl ActivityState {
    /// A view that wants the ticker drawn.
    pub fn eligible(view_id: impl Into<String>) -> Self {
        Self {
            eligible_to_draw_conditions: true,
            view_id: view_id.into(),
        }
    }

    /// A view that does not want the ticker drawn.
    pub fn ineligible(view_id: impl Into<String>) -> Self {
        Self {
            eligible_to_draw_conditions: false,
            view_id: view_id.into(),
        }
    }
}

/// Read-only view of the host's display state.
pub trait ViewActivity: Send + Sync + Debug {
    /// The host's current view, or `None` if it is not showing anything.
    fn current(&self) -> Option<ActivityState>;
}

impl ViewActivity for watch::Receiver<ActivityState> {
    fn current(&self) -> Option<ActivityState> {
        Some(self.borrow().clone())
    }
}

impl ViewActivity for watch::Receiver<Option<ActivityState>> {
    fn current(&self) -> Option<ActivityState> {
        self.borrow().clone()
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// No condition record was available for the cycle.
    Stalled,
    /// The view was ineligible at advance time.
    Paused {
        /// Whether the index was reset to the first panel.
        reset: bool,
    },
}

/// Where the rotation currently is, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started yet.
    Idle,
    /// A run is in progress.
    Running,
    /// The last run stalled waiting for data.
    Stalled,
    /// The last run paused on an ineligible view.
    Paused,
}

impl Phase {
    fn as_u8(self) -> u8 {
        match self {
            Phase::Idle => 0,
            Phase::Running => 1,
            Phase::Stalled => 2,
            Phase::Paused => 3,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Phase::Running,
            2 => Phase::Stalled,
            3 => Phase::Paused,
            _ => Phase::Idle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Stalled => "stalled",
            Phase::Paused => "paused",
        }
    }
}

/// Rotation state shared between the controller and its host handles.
#[derive(Debug, Default)]
pub struct RotationState {
    screen_index: AtomicUsize,
    phase: AtomicU8,
    waiting: AtomicBool,
    cycles: AtomicU64,
}

impl RotationState {
    pub fn screen_index(&self) -> usize {
        self.screen_index.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Whether the last fetch reported it was still waiting on a provider.
    pub fn waiting(&self) -> bool {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Number of panel dispatches so far.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    fn set_phase(&self, phase: Phase) {
        self.phase.store(phase.as_u8(), Ordering::SeqCst);
    }

    fn stop(&self, reset: bool) {
        if reset {
            self.screen_index.store(0, Ordering::SeqCst);
        }
    }
}

/// Host-side handle onto a running rotation's state.
///
/// `stop` only affects which panel the next cycle uses; it never cancels a
/// dwell that is already counting down.
#[derive(Debug, Clone)]
pub struct RotationHandle {
    state: Arc<RotationState>,
}

impl RotationHandle {
    pub fn stop(&self, reset: bool) {
        self.state.stop(reset);
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }
}

/// Outcome of a single draw cycle.
enum CycleOutcome {
    /// Time to move on to the next panel.
    Advance,
    /// The run ends here.
    Halted(Halt),
}

/// The rotation controller.
#[derive(Debug)]
pub struct Rotation {
    conditions: Arc<dyn ConditionsProvider>,
    hazards: Arc<dyn HazardsProvider>,
    activity: Box<dyn ViewActivity>,
    renderer: PanelRenderer,
    panels: PanelRegistry,
    context: PanelContext,
    fixed_dwell: Duration,
    progress_view_id: String,
    state: Arc<RotationState>,
}

impl Rotation {
    /// Create a rotation over the standard panel set with default timings.
    pub fn new(
        conditions: Arc<dyn ConditionsProvider>,
        hazards: Arc<dyn HazardsProvider>,
        activity: Box<dyn ViewActivity>,
        viewport: Box<dyn Viewport>,
    ) -> Self {
        let config = TickerConfig::default();
        Self {
            conditions,
            hazards,
            activity,
            renderer: PanelRenderer::new(viewport),
            panels: PanelRegistry::standard(),
            context: PanelContext::from(&config),
            fixed_dwell: config.fixed_dwell,
            progress_view_id: config.progress_view_id,
            state: Arc::new(RotationState::default()),
        }
    }

    /// Apply timing and text settings.
    pub fn with_config(mut self, config: &TickerConfig) -> Self {
        self.context = PanelContext::from(config);
        self.fixed_dwell = config.fixed_dwell;
        self.progress_view_id = config.progress_view_id.clone();
        self
    }

    /// Replace the panel set. The index restarts at the first panel.
    pub fn with_panels(mut self, panels: PanelRegistry) -> Self {
        self.panels = panels;
        self.state.stop(true);
        self
    }

    pub fn handle(&self) -> RotationHandle {
        RotationHandle {
            state: self.state.clone(),
        }
    }

    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    pub fn screen_index(&self) -> usize {
        self.state.screen_index()
    }

    /// Reset the index to the first panel if `reset`; otherwise do nothing.
    pub fn stop(&mut self, reset: bool) {
        self.state.stop(reset);
    }

    /// Run draw cycles from the current index until the rotation halts.
    ///
    /// Does not reset the index.
    pub async fn start(&mut self) -> Halt {
        self.state.set_phase(Phase::Running);
        loop {
            let halt = match self.draw_cycle().await {
                CycleOutcome::Advance => match self.next_screen() {
                    Ok(()) => continue,
                    Err(halt) => halt,
                },
                CycleOutcome::Halted(halt) => halt,
            };
            self.state.set_phase(match halt {
                Halt::Stalled => Phase::Stalled,
                Halt::Paused { .. } => Phase::Paused,
            });
            return halt;
        }
    }

    /// Move to the next panel and keep rotating, unless the view is ineligible.
    pub async fn advance(&mut self) -> Halt {
        if let Err(halt) = self.next_screen() {
            self.state.set_phase(Phase::Paused);
            return halt;
        }
        self.start().await
    }

    /// Eligibility check plus index increment.
    fn next_screen(&mut self) -> Result<(), Halt> {
        let current = self.activity.current();
        let eligible = current
            .as_ref()
            .is_some_and(|d| d.eligible_to_draw_conditions);
        if !eligible {
            let reset = current
                .as_ref()
                .is_some_and(|d| d.view_id == self.progress_view_id);
            self.stop(reset);
            debug!(
                reset,
                view = current.as_ref().map(|d| d.view_id.as_str()),
                "Rotation paused"
            );
            return Err(Halt::Paused { reset });
        }

        let next = (self.screen_index() + 1) % self.panels.len();
        self.state.screen_index.store(next, Ordering::SeqCst);
        Ok(())
    }

    /// Fetch, merge and dispatch to the current panel.
    ///
    /// Skipped panels are handled in-line: the index moves on and the next
    /// panel is dispatched against the same record, without another fetch.
    /// A full lap of skips waits one fixed dwell before the cycle ends.
    async fn draw_cycle(&mut self) -> CycleOutcome {
        let Some(record) = self.fetch().await else {
            debug!(index = self.screen_index(), "Rotation stalled waiting for data");
            return CycleOutcome::Halted(Halt::Stalled);
        };

        let mut skipped = 0;
        loop {
            let index = self.screen_index();
            let Some(panel) = self.panels.get(index) else {
                // Only reachable if a handle raced a registry swap
                self.state.stop(true);
                continue;
            };
            let name = panel.name;
            let output = panel.draw(&record, &self.context);
            self.state.cycles.fetch_add(1, Ordering::SeqCst);
            debug!(
                index,
                panel = name,
                text = output.text().unwrap_or(""),
                "Dispatching panel"
            );

            match output {
                PanelOutput::Skip => {
                    skipped += 1;
                    if skipped >= self.panels.len() {
                        tokio::time::sleep(self.fixed_dwell).await;
                        return CycleOutcome::Advance;
                    }
                    if let Err(halt) = self.next_screen() {
                        return CycleOutcome::Halted(halt);
                    }
                }
                PanelOutput::Fixed(text) => {
                    self.renderer.render_fixed(&text);
                    tokio::time::sleep(self.fixed_dwell).await;
                    return CycleOutcome::Advance;
                }
                PanelOutput::Scroll(request) => {
                    self.renderer.render_scrolling(&request.text);
                    request.resume.wait().await;
                    return CycleOutcome::Advance;
                }
            }
        }
    }

    async fn fetch(&self) -> Option<ConditionRecord> {
        let state = self.state.clone();
        let probe = move || {
            if !state.waiting.swap(true, Ordering::SeqCst) {
                debug!("Still waiting on ticker data");
            }
        };
        self.state.waiting.store(false, Ordering::SeqCst);

        let (record, hazards) = tokio::join!(
            self.conditions.fetch_current(&probe),
            self.hazards.fetch_hazards(&probe),
        );

        Some(record?.with_hazards(hazards.unwrap_or_default()))
    }
}
