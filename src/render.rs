//! Panel rendering onto a two-region viewport.
//!
//! The ticker viewport has a fixed-text region and a scroll region; the
//! scroll region holds a text element that an animation collaborator picks up
//! and scrolls. Rendering a panel means toggling which region is visible and
//! writing the text into the right element.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

/// Maximum number of writes remembered by [`SharedViewport`].
const MAX_RECENT_WRITES: usize = 32;

/// Addressable parts of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Fixed-text region.
    Fixed,
    /// Scroll container.
    Scroll,
    /// Text element inside the scroll container.
    ScrollText,
}

/// Display surface the renderer writes to.
pub trait Viewport: Send + Sync + Debug {
    fn set_visible(&mut self, region: Region, visible: bool);
    fn set_content(&mut self, region: Region, text: &str);
}

/// Display mode chosen for a rendered panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Fixed,
    Scrolling,
}

/// Writes panel output into a [`Viewport`].
#[derive(Debug)]
pub struct PanelRenderer {
    viewport: Box<dyn Viewport>,
}

impl PanelRenderer {
    pub fn new(viewport: Box<dyn Viewport>) -> Self {
        Self { viewport }
    }

    /// Show the fixed region with `text`.
    pub fn render_fixed(&mut self, text: &str) {
        self.viewport.set_visible(Region::Fixed, true);
        self.viewport.set_visible(Region::Scroll, false);
        self.viewport.set_content(Region::Fixed, text);
    }

    /// Show the scroll region with `text` for the animation to consume.
    pub fn render_scrolling(&mut self, text: &str) {
        self.viewport.set_visible(Region::Fixed, false);
        self.viewport.set_visible(Region::Scroll, true);
        self.viewport.set_content(Region::ScrollText, text);
    }
}

/// One recorded content write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWrite {
    pub region: Region,
    pub text: String,
}

/// Current state of an in-memory viewport.
#[derive(Debug, Clone)]
pub struct ViewportState {
    pub fixed_visible: bool,
    pub scroll_visible: bool,
    pub fixed_text: String,
    pub scroll_text: String,
    /// When the scroll text was last written; drives the marquee offset.
    pub scroll_started: Option<Instant>,
    /// Total content writes since creation.
    pub writes: u64,
    /// Most recent writes, oldest first.
    pub recent: VecDeque<ContentWrite>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            fixed_visible: true,
            scroll_visible: false,
            fixed_text: String::new(),
            scroll_text: String::new(),
            scroll_started: None,
            writes: 0,
            recent: VecDeque::new(),
        }
    }
}

impl ViewportState {
    /// The mode implied by region visibility.
    pub fn mode(&self) -> RenderMode {
        if self.scroll_visible && !self.fixed_visible {
            RenderMode::Scrolling
        } else {
            RenderMode::Fixed
        }
    }

    /// The text currently on screen.
    pub fn visible_text(&self) -> &str {
        match self.mode() {
            RenderMode::Fixed => &self.fixed_text,
            RenderMode::Scrolling => &self.scroll_text,
        }
    }
}

/// In-memory viewport that can be cloned and inspected from elsewhere.
///
/// The rotation writes into one clone while the terminal UI (or a test) reads
/// from another.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport {
    state: Arc<Mutex<ViewportState>>,
}

impl SharedViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ViewportState {
        self.state.lock().clone()
    }

    /// Total content writes so far.
    pub fn writes(&self) -> u64 {
        self.state.lock().writes
    }
}

impl Viewport for SharedViewport {
    fn set_visible(&mut self, region: Region, visible: bool) {
        let mut state = self.state.lock();
        match region {
            Region::Fixed => state.fixed_visible = visible,
            Region::Scroll | Region::ScrollText => state.scroll_visible = visible,
        }
    }

    fn set_content(&mut self, region: Region, text: &str) {
        let mut state = self.state.lock();
        match region {
            Region::Fixed => state.fixed_text = text.to_string(),
            Region::Scroll | Region::ScrollText => {
                state.scroll_text = text.to_string();
                state.scroll_started = Some(Instant::now());
            }
        }
        state.writes += 1;
        state.recent.push_back(ContentWrite {
            region,
            text: text.to_string(),
        });
        if state.recent.len() > MAX_RECENT_WRITES {
            state.recent.pop_front();
        }
    }
}

/// Headless viewport: prints each content write as a line on stdout.
#[derive(Debug, Default)]
pub struct StdoutViewport;

impl Viewport for StdoutViewport {
    fn set_visible(&mut self, _region: Region, _visible: bool) {}

    fn set_content(&mut self, region: Region, text: &str) {
        let tag = match region {
            Region::Fixed => "fixed ",
            Region::Scroll | Region::ScrollText => "scroll",
        };
        println!("[{}] {}", tag, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fixed_shows_fixed_region() {
        let viewport = SharedViewport::new();
        let mut renderer = PanelRenderer::new(Box::new(viewport.clone()));

        renderer.render_fixed("Wind: Calm");

        let state = viewport.snapshot();
        assert!(state.fixed_visible);
        assert!(!state.scroll_visible);
        assert_eq!(state.fixed_text, "Wind: Calm");
        assert_eq!(state.mode(), RenderMode::Fixed);
    }

    #[test]
    fn test_render_scrolling_writes_scroll_text() {
        let viewport = SharedViewport::new();
        let mut renderer = PanelRenderer::new(Box::new(viewport.clone()));

        renderer.render_fixed("Temp: 72°F");
        renderer.render_scrolling("Flood Watch Rising water.");

        let state = viewport.snapshot();
        assert!(!state.fixed_visible);
        assert!(state.scroll_visible);
        assert_eq!(state.mode(), RenderMode::Scrolling);
        assert_eq!(state.visible_text(), "Flood Watch Rising water.");
        // Fixed text is left in place, just hidden
        assert_eq!(state.fixed_text, "Temp: 72°F");
        assert!(state.scroll_started.is_some());
        assert_eq!(
            state.recent.back(),
            Some(&ContentWrite {
                region: Region::ScrollText,
                text: "Flood Watch Rising water.".to_string()
            })
        );
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let viewport = SharedViewport::new();
        let mut renderer = PanelRenderer::new(Box::new(viewport.clone()));

        renderer.render_fixed("Humidity: 50%");
        let first = viewport.snapshot();
        renderer.render_fixed("Humidity: 50%");
        let second = viewport.snapshot();

        assert_eq!(first.fixed_text, second.fixed_text);
        assert_eq!(first.mode(), second.mode());
        assert_eq!(second.writes, first.writes + 1);
    }

    #[test]
    fn test_recent_writes_are_bounded() {
        let mut viewport = SharedViewport::new();
        for i in 0..(MAX_RECENT_WRITES + 10) {
            viewport.set_content(Region::Fixed, &format!("line {}", i));
        }
        let state = viewport.snapshot();
        assert_eq!(state.recent.len(), MAX_RECENT_WRITES);
        assert_eq!(state.writes, (MAX_RECENT_WRITES + 10) as u64);
        assert_eq!(state.recent.front().unwrap().text, "line 10");
    }
}
