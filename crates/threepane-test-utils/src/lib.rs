//! Test utilities for threepane.
//!
//! Provides [`HeadlessHost`], a [`WindowHost`] implementation that creates
//! no real windows but records every call, so docking behavior can be
//! asserted without a windowing toolkit.
//!
//! The host is consumed by the pane group it drives; keep a [`HostProbe`]
//! around to inspect what happened:
//!
//! ```
//! use threepane::dock::{PaneGroup, PaneSide};
//! use threepane_test_utils::HeadlessHost;
//!
//! let host = HeadlessHost::new();
//! let probe = host.probe();
//! let mut group = PaneGroup::builder(Box::new(host)).build();
//!
//! group.detach(PaneSide::Left);
//! assert_eq!(probe.open_count(), 1);
//!
//! group.reattach(PaneSide::Left);
//! assert_eq!(probe.open_count(), 0);
//! assert_eq!(probe.closed_count(), 1);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use threepane::dock::{WindowHost, WindowId, WindowOptions};

#[derive(Default)]
struct HostState {
    next_id: u64,
    /// Currently open windows with their creation options.
    open: Vec<(WindowId, WindowOptions)>,
    created: u64,
    closed: Vec<WindowId>,
    intercepted: Vec<WindowId>,
}

/// A recording [`WindowHost`] that creates no real windows.
pub struct HeadlessHost {
    state: Arc<Mutex<HostState>>,
    supports_max_size: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(HostState::default())),
            supports_max_size: true,
        }
    }

    /// A host whose panes cannot carry a maximum-size constraint,
    /// mimicking older toolkit versions.
    pub fn without_max_size() -> Self {
        Self {
            supports_max_size: false,
            ..Self::new()
        }
    }

    /// An inspection handle that stays valid after the host is boxed and
    /// handed to a pane group.
    pub fn probe(&self) -> HostProbe {
        HostProbe {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowHost for HeadlessHost {
    fn create_window(&mut self, opts: WindowOptions) -> WindowId {
        let mut state = self.state.lock();
        state.next_id += 1;
        state.created += 1;
        let id = WindowId(state.next_id);
        state.open.push((id, opts));
        id
    }

    fn close_window(&mut self, id: WindowId) {
        let mut state = self.state.lock();
        state.open.retain(|(open, _)| *open != id);
        state.closed.push(id);
    }

    fn set_close_intercept(&mut self, id: WindowId, intercept: bool) {
        let mut state = self.state.lock();
        if intercept {
            if !state.intercepted.contains(&id) {
                state.intercepted.push(id);
            }
        } else {
            state.intercepted.retain(|i| *i != id);
        }
    }

    fn supports_max_size(&self) -> bool {
        self.supports_max_size
    }
}

/// Read-only view of a [`HeadlessHost`]'s recorded calls.
#[derive(Clone)]
pub struct HostProbe {
    state: Arc<Mutex<HostState>>,
}

impl HostProbe {
    /// Windows currently open.
    pub fn open_count(&self) -> usize {
        self.state.lock().open.len()
    }

    /// Ids of currently open windows, in creation order.
    pub fn open_windows(&self) -> Vec<WindowId> {
        self.state.lock().open.iter().map(|(id, _)| *id).collect()
    }

    /// Total windows ever created.
    pub fn created_count(&self) -> u64 {
        self.state.lock().created
    }

    /// Total windows closed.
    pub fn closed_count(&self) -> usize {
        self.state.lock().closed.len()
    }

    /// Title a window was created with.
    pub fn window_title(&self, id: WindowId) -> Option<String> {
        self.state
            .lock()
            .open
            .iter()
            .find(|(open, _)| *open == id)
            .map(|(_, opts)| opts.title.clone())
    }

    /// Creation options of a window.
    pub fn window_options(&self, id: WindowId) -> Option<WindowOptions> {
        self.state
            .lock()
            .open
            .iter()
            .find(|(open, _)| *open == id)
            .map(|(_, opts)| opts.clone())
    }

    /// Whether the window's close affordance is routed to the docking
    /// layer.
    pub fn is_intercepted(&self, id: WindowId) -> bool {
        self.state.lock().intercepted.contains(&id)
    }
}
