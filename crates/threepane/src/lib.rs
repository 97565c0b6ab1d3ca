//! Dockable three-pane window layouts, theming, and grid-based layout
//! management.
//!
//! The crate is organized around three pieces:
//!
//! - [`dock`]: the three-pane containers. [`dock::PaneGroup`] is the basic
//!   dockable row; [`dock::ThemedPaneGroup`] adds themed pane chrome, a
//!   drag-to-detach gesture, and a close/restore protocol.
//! - [`theme`]: named theme registry with palettes, typography, spacing,
//!   per-widget style production, and an OS appearance watcher.
//! - [`grid`]: the N×M generalization, resolving per-cell spans from
//!   expansion rules and detached neighbors, with a JSON designer format.
//!
//! Layout runs on [taffy]; the crate owns widget trees and docking state
//! but never talks to a windowing toolkit directly. Detached pane windows
//! go through the [`dock::WindowHost`] trait.

pub mod platform;
pub mod style;
pub mod theme;
pub mod tree;
pub mod widgets;

#[cfg(feature = "docking")]
pub mod dock;
pub mod grid;

pub use style::Style;
pub use tree::{LayoutRect, NodeId, UiTree};
