//! Dockable three-pane containers.
//!
//! Two containers share the same slot model. [`PaneGroup`] is the basic
//! one: three named slots in a resizable row, button-driven detach and
//! reattach, fixed-width enforcement. [`ThemedPaneGroup`] layers themed
//! pane chrome on top: a header with title, icon and window controls, a
//! drag-to-detach gesture, and a close/restore protocol.
//!
//! # Quick start
//!
//! ```no_run
//! use threepane::dock::{PaneGroup, PaneConfig, PaneSide, WindowHost, WindowId, WindowOptions};
//!
//! struct NullHost(u64);
//! impl WindowHost for NullHost {
//!     fn create_window(&mut self, _opts: WindowOptions) -> WindowId {
//!         self.0 += 1;
//!         WindowId(self.0)
//!     }
//!     fn close_window(&mut self, _id: WindowId) {}
//!     fn set_close_intercept(&mut self, _id: WindowId, _intercept: bool) {}
//! }
//!
//! let mut group = PaneGroup::builder(Box::new(NullHost(0)))
//!     .size(1024.0, 768.0)
//!     .pane(PaneSide::Left, PaneConfig::new().title("Files"), |pane| {
//!         pane.label("file list");
//!     })
//!     .build();
//! group.detach(PaneSide::Left);
//! ```

mod drag;
mod host;
mod pane_group;
mod themed;
mod types;

pub use drag::{DETACH_DISTANCE, DRAG_START_THRESHOLD, DetachDragTracker, DragPhase, DragRelease};
pub use host::{WindowHost, WindowId, WindowOptions};
pub use pane_group::{PaneGroup, PaneGroupBuilder};
pub use themed::{ThemedPaneGroup, ThemedPaneGroupBuilder};
pub use types::{
    DockError, PaneBuilder, PaneConfig, PaneDivider, PaneFrame, PaneSide, PanelConstraints,
};
