//! Basic three-pane dockable container.
//!
//! Hosts left/center/right slots in one resizable row. The outer slots can
//! be detached into independent top-level windows and reattached at their
//! canonical position (left first, right last). Content is destroyed and
//! rebuilt through the slot's builder on every transition.

use taffy::FlexDirection;
use threepane_core::geometry::Size;
use tracing::{debug, info};

use crate::style::Style;
use crate::tree::{NodeId, UiTree};
use crate::widgets::{Button, Container};

use super::host::{WindowHost, WindowId, WindowOptions};
use super::types::{
    DetachedPane, PaneBuilder, PaneConfig, PaneDivider, PaneFrame, PaneSide, SlotState,
};

/// Default height given to detached pane windows.
pub(crate) const DETACHED_WINDOW_HEIGHT: f32 = 400.0;

/// The frame style for an attached slot, honoring fixed-width enforcement
/// and the host's max-size capability.
pub(crate) fn attached_frame_style(config: &PaneConfig, side: PaneSide, supports_max: bool) -> Style {
    let style = Style::new()
        .flex_direction(FlexDirection::Column)
        .height_full();
    match side {
        PaneSide::Center => style.flex_grow(1.0).flex_shrink(1.0),
        _ => {
            let style = style
                .flex_grow(0.0)
                .flex_shrink(0.0)
                .width(config.initial_width());
            if let Some(fixed) = config.fixed_width {
                let style = style.min_width(fixed);
                if supports_max {
                    style.max_width(fixed)
                } else {
                    style
                }
            } else {
                let style = style.min_width(config.min_width);
                match config.max_width {
                    Some(max) => style.max_width(max),
                    None => style,
                }
            }
        }
    }
}

pub(crate) struct Slot {
    pub side: PaneSide,
    pub config: PaneConfig,
    pub builder: PaneBuilder,
    pub state: SlotState,
    pub builds: usize,
    pub detach_button: Option<NodeId>,
    pub reattach_button: Option<NodeId>,
}

/// The basic dockable three-pane container.
pub struct PaneGroup {
    tree: UiTree,
    host: Box<dyn WindowHost>,
    row: NodeId,
    size: Size<f32>,
    slots: Vec<Slot>,
}

/// Builder for [`PaneGroup`].
pub struct PaneGroupBuilder {
    host: Box<dyn WindowHost>,
    size: Size<f32>,
    configs: [PaneConfig; 3],
    builders: [Option<PaneBuilder>; 3],
}

impl PaneGroupBuilder {
    pub fn new(host: Box<dyn WindowHost>) -> Self {
        Self {
            host,
            size: Size::new(800.0, 600.0),
            configs: [
                PaneConfig::default(),
                PaneConfig::center(),
                PaneConfig::default(),
            ],
            builders: [None, None, None],
        }
    }

    /// Set the shared container's size.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Configure a slot and supply its content builder.
    pub fn pane(
        mut self,
        side: PaneSide,
        config: PaneConfig,
        builder: impl FnMut(&mut PaneFrame<'_>) + 'static,
    ) -> Self {
        self.configs[side.rank()] = config;
        self.builders[side.rank()] = Some(Box::new(builder));
        self
    }

    /// Build the group; every slot starts attached.
    pub fn build(self) -> PaneGroup {
        let mut tree = UiTree::new();
        let row = tree.add_widget(Box::new(Container::with_style(
            Style::new()
                .flex_direction(FlexDirection::Row)
                .width(self.size.width)
                .height(self.size.height),
        )));
        tree.set_root(row);

        let mut slots = Vec::with_capacity(3);
        for (side, (config, builder)) in PaneSide::ALL
            .into_iter()
            .zip(self.configs.into_iter().zip(self.builders))
        {
            slots.push(Slot {
                side,
                config,
                builder: builder.unwrap_or_else(|| Box::new(|_| {})),
                // Placeholder until build_attached runs below.
                state: SlotState::Closed,
                builds: 0,
                detach_button: None,
                reattach_button: None,
            });
        }

        let mut group = PaneGroup {
            tree,
            host: self.host,
            row,
            size: self.size,
            slots,
        };
        for side in PaneSide::ALL {
            group.build_attached(side.rank());
        }
        group.relayout();
        group
    }
}

impl PaneGroup {
    /// Start building a pane group around a window host.
    pub fn builder(host: Box<dyn WindowHost>) -> PaneGroupBuilder {
        PaneGroupBuilder::new(host)
    }

    /// Index in the shared row where a slot belongs right now: the number
    /// of currently attached slots of lower canonical rank.
    fn ordinal_index(&self, side: PaneSide) -> usize {
        self.slots
            .iter()
            .filter(|s| s.side.rank() < side.rank() && s.state.is_attached())
            .count()
    }

    /// Build a slot's frame inside the shared row at its canonical
    /// position and run its content builder.
    fn build_attached(&mut self, idx: usize) {
        let side = self.slots[idx].side;
        let style = attached_frame_style(
            &self.slots[idx].config,
            side,
            self.host.supports_max_size(),
        );
        let index = self.ordinal_index(side);

        let frame = self.tree.add_widget(Box::new(Container::with_style(style)));
        self.tree.insert_child(self.row, index, frame);

        let detach_button = if self.slots[idx].config.detachable {
            let button = self
                .tree
                .add_widget(Box::new(Button::new(format!("Detach {side}"))));
            self.tree.add_child(frame, button);
            Some(button)
        } else {
            None
        };

        let slot = &mut self.slots[idx];
        let mut pane = PaneFrame::new(&mut self.tree, frame);
        (slot.builder)(&mut pane);
        slot.builds += 1;
        slot.state = SlotState::Attached { frame };
        slot.detach_button = detach_button;
        slot.reattach_button = None;
    }

    fn relayout(&mut self) {
        self.tree.compute_layout(self.size);
    }

    /// Resize the shared container.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
        let style = self
            .tree
            .style(self.row)
            .cloned()
            .unwrap_or_default()
            .width(width)
            .height(height);
        self.tree.set_style(self.row, style);
        self.relayout();
    }

    /// Detach a slot into its own top-level window.
    ///
    /// Returns false without side effects when the slot is already
    /// detached, closed, or not detachable. The freed space flows to the
    /// remaining panes; no placeholder is left behind.
    pub fn detach(&mut self, side: PaneSide) -> bool {
        let idx = side.rank();
        let SlotState::Attached { frame } = self.slots[idx].state else {
            debug!(pane = %side, "detach ignored: pane not attached");
            return false;
        };
        if !self.slots[idx].config.detachable {
            debug!(pane = %side, "detach ignored: pane not detachable");
            return false;
        }

        let width = {
            let measured = self.tree.layout(frame).width;
            if measured > 0.0 {
                measured
            } else {
                self.slots[idx].config.initial_width()
            }
        };
        self.tree.remove_subtree(frame);

        let title = if self.slots[idx].config.title.is_empty() {
            side.name().to_string()
        } else {
            self.slots[idx].config.title.clone()
        };
        let size = Size::new(width, DETACHED_WINDOW_HEIGHT);
        let window = self.host.create_window(WindowOptions::new(title, size));
        self.host.set_close_intercept(window, true);

        let mut wtree = UiTree::new();
        let root = wtree.add_widget(Box::new(Container::with_style(
            Style::new()
                .flex_direction(FlexDirection::Column)
                .width(size.width)
                .height(size.height),
        )));
        wtree.set_root(root);
        let reattach_button = wtree.add_widget(Box::new(Button::new(format!("Reattach {side}"))));
        wtree.add_child(root, reattach_button);
        let content = wtree.add_widget(Box::new(Container::with_style(
            Style::new()
                .flex_direction(FlexDirection::Column)
                .flex_grow(1.0)
                .width_full(),
        )));
        wtree.add_child(root, content);

        let slot = &mut self.slots[idx];
        let mut pane = PaneFrame::new(&mut wtree, content);
        (slot.builder)(&mut pane);
        slot.builds += 1;
        wtree.compute_layout(size);

        slot.state = SlotState::Detached(DetachedPane {
            window,
            tree: wtree,
            root,
        });
        slot.detach_button = None;
        slot.reattach_button = Some(reattach_button);

        self.relayout();
        info!(pane = %side, "pane detached");
        true
    }

    /// Return a detached slot to the shared row at its canonical position.
    ///
    /// Returns false when the slot is not detached. The detached window and
    /// its content are destroyed; the slot is rebuilt in place with its
    /// width constraints restored.
    pub fn reattach(&mut self, side: PaneSide) -> bool {
        let idx = side.rank();
        if !self.slots[idx].state.is_detached() {
            debug!(pane = %side, "reattach ignored: pane not detached");
            return false;
        }
        let SlotState::Detached(pane) =
            std::mem::replace(&mut self.slots[idx].state, SlotState::Closed)
        else {
            unreachable!("state checked above");
        };
        self.host.close_window(pane.window);
        drop(pane);

        self.build_attached(idx);
        self.relayout();
        info!(pane = %side, "pane reattached");
        true
    }

    /// Close-protocol path: a detached window's close affordance was
    /// activated. Reattaches the owning slot instead of destroying it.
    pub fn handle_window_close(&mut self, window: WindowId) -> bool {
        let side = self.slots.iter().find_map(|slot| match &slot.state {
            SlotState::Detached(pane) if pane.window == window => Some(slot.side),
            _ => None,
        });
        match side {
            Some(side) => self.reattach(side),
            None => false,
        }
    }

    /// Activate a clicked affordance in the shared container.
    pub fn on_click(&mut self, node: NodeId) -> bool {
        let side = self
            .slots
            .iter()
            .find(|slot| slot.detach_button == Some(node) && slot.state.is_attached())
            .map(|slot| slot.side);
        match side {
            Some(side) => self.detach(side),
            None => false,
        }
    }

    /// Activate a clicked affordance inside a detached window.
    pub fn on_window_click(&mut self, window: WindowId, node: NodeId) -> bool {
        let side = self.slots.iter().find_map(|slot| match &slot.state {
            SlotState::Detached(pane)
                if pane.window == window && slot.reattach_button == Some(node) =>
            {
                Some(slot.side)
            }
            _ => None,
        });
        match side {
            Some(side) => self.reattach(side),
            None => false,
        }
    }

    /// Simulate dragging a divider by `delta` pixels (positive = right).
    ///
    /// Fixed and non-resizable panes reject the drag; resizable panes clamp
    /// the resulting width to their constraints.
    pub fn drag_divider(&mut self, divider: PaneDivider, delta: f32) -> bool {
        let side = divider.pane();
        let idx = side.rank();
        let SlotState::Attached { frame } = self.slots[idx].state else {
            return false;
        };
        if self.slots[idx].config.is_fixed() {
            debug!(pane = %side, "divider drag ignored: pane width is pinned");
            return false;
        }

        // Moving the left divider right grows the left pane; moving the
        // right divider right shrinks the right pane.
        let direction = match divider {
            PaneDivider::Left => 1.0,
            PaneDivider::Right => -1.0,
        };
        let current = self.tree.layout(frame).width;
        let constraints = self.slots[idx].config.constraints();
        let new_width = constraints.clamp(current + delta * direction);
        if (new_width - current).abs() < f32::EPSILON {
            return false;
        }

        let style = self
            .tree
            .style(frame)
            .cloned()
            .unwrap_or_default()
            .width(new_width);
        self.tree.set_style(frame, style);
        self.relayout();
        true
    }

    /// Whether a slot is currently attached.
    pub fn is_attached(&self, side: PaneSide) -> bool {
        self.slots[side.rank()].state.is_attached()
    }

    /// Whether a slot is currently detached into its own window.
    pub fn is_detached(&self, side: PaneSide) -> bool {
        self.slots[side.rank()].state.is_detached()
    }

    /// Whether the left pane's width is pinned.
    pub fn is_left_fixed(&self) -> bool {
        self.slots[PaneSide::Left.rank()].config.is_fixed()
    }

    /// Whether the right pane's width is pinned.
    pub fn is_right_fixed(&self) -> bool {
        self.slots[PaneSide::Right.rank()].config.is_fixed()
    }

    /// Number of panes currently in the shared row.
    pub fn attached_count(&self) -> usize {
        self.slots.iter().filter(|s| s.state.is_attached()).count()
    }

    /// The attached panes in row order.
    pub fn attached_order(&self) -> Vec<PaneSide> {
        self.tree
            .children(self.row)
            .iter()
            .filter_map(|frame| {
                self.slots.iter().find_map(|slot| match slot.state {
                    SlotState::Attached { frame: f } if f == *frame => Some(slot.side),
                    _ => None,
                })
            })
            .collect()
    }

    /// Rendered width of an attached pane.
    pub fn pane_width(&self, side: PaneSide) -> Option<f32> {
        match self.slots[side.rank()].state {
            SlotState::Attached { frame } => Some(self.tree.layout(frame).width),
            _ => None,
        }
    }

    /// The minimum width constraint applied to an attached pane.
    pub fn pane_min_width(&self, side: PaneSide) -> Option<f32> {
        let SlotState::Attached { frame } = self.slots[side.rank()].state else {
            return None;
        };
        match self.tree.style(frame)?.layout.min_size.width {
            taffy::Dimension::Length(w) => Some(w),
            _ => None,
        }
    }

    /// The maximum width constraint applied to an attached pane, when the
    /// host supports one.
    pub fn pane_max_width(&self, side: PaneSide) -> Option<f32> {
        let SlotState::Attached { frame } = self.slots[side.rank()].state else {
            return None;
        };
        match self.tree.style(frame)?.layout.max_size.width {
            taffy::Dimension::Length(w) => Some(w),
            _ => None,
        }
    }

    /// The host window owning a detached slot.
    pub fn detached_window(&self, side: PaneSide) -> Option<WindowId> {
        match &self.slots[side.rank()].state {
            SlotState::Detached(pane) => Some(pane.window),
            _ => None,
        }
    }

    /// How many times a slot's builder has run.
    pub fn build_count(&self, side: PaneSide) -> usize {
        self.slots[side.rank()].builds
    }

    /// The per-slot detach affordance, when attached and detachable.
    pub fn detach_button(&self, side: PaneSide) -> Option<NodeId> {
        self.slots[side.rank()].detach_button
    }

    /// The reattach affordance inside a detached window.
    pub fn reattach_button(&self, side: PaneSide) -> Option<NodeId> {
        self.slots[side.rank()].reattach_button
    }

    /// The shared widget tree (read access for embedding/rendering).
    pub fn tree(&self) -> &UiTree {
        &self.tree
    }
}
