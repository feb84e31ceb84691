//! Terminal rendering using ratatui.
//!
//! - [`common`]: header, tabs, status bar and help overlay
//! - [`ticker`]: the ticker bar itself and the recent-renders list
//! - [`theme`]: light/dark themes

pub mod common;
pub mod theme;
pub mod ticker;

pub use theme::Theme;
