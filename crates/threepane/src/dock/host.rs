//! The toolkit boundary for detached pane windows.
//!
//! The docking containers never talk to a windowing toolkit directly; they
//! drive a [`WindowHost`], which creates and closes the top-level windows
//! that hold detached panes. Capability differences between toolkit
//! versions (per-pane maximum size in particular) are surfaced as explicit
//! probes instead of swallowed errors.

use threepane_core::geometry::{Pos, Size};

/// Identifier of a host-created top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

/// Options for creating a detached pane window.
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub size: Size<f32>,
    pub position: Option<Pos<f32>>,
}

impl WindowOptions {
    pub fn new(title: impl Into<String>, size: Size<f32>) -> Self {
        Self {
            title: title.into(),
            size,
            position: None,
        }
    }

    pub fn position(mut self, pos: Pos<f32>) -> Self {
        self.position = Some(pos);
        self
    }
}

/// A windowing backend hosting detached panes.
///
/// Implementations own no docking state; the pane group tracks which slot
/// owns which window.
pub trait WindowHost {
    /// Create a top-level window and return its id.
    fn create_window(&mut self, opts: WindowOptions) -> WindowId;

    /// Destroy a window.
    fn close_window(&mut self, id: WindowId);

    /// Route the window's close affordance to the docking layer instead of
    /// destroying the window, so closing a detached pane reattaches it.
    fn set_close_intercept(&mut self, id: WindowId, intercept: bool);

    /// Capability probe: whether panes support a maximum-size constraint.
    ///
    /// When false, fixed-width enforcement falls back to pinning only the
    /// requested width and minimum.
    fn supports_max_size(&self) -> bool {
        true
    }
}
