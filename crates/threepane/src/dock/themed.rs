//! Themed dockable container with pane chrome.
//!
//! [`ThemedPaneGroup`] keeps the slot model of the basic group and adds a
//! themed header to every pane: icon, title, and window controls drawn
//! from the active theme. Detach is gesture-driven (drag the header past
//! the detach distance) in addition to the header buttons, and closable
//! panes get a close/restore protocol with `Closed` as an explicit third
//! slot state.

use std::path::Path;

use indexmap::IndexMap;
use taffy::FlexDirection;
use threepane_core::geometry::{Pos, Size};
use threepane_core::math::Vec2;
use tracing::{debug, info, warn};

use crate::style::Style;
use crate::theme::{ThemeError, ThemeManager, WidgetKind, WidgetState};
use crate::tree::{NodeId, UiTree};
use crate::widgets::{Button, Container, Label};

use super::drag::{DetachDragTracker, DragPhase};
use super::host::{WindowHost, WindowId, WindowOptions};
use super::pane_group::{DETACHED_WINDOW_HEIGHT, attached_frame_style};
use super::types::{
    DetachedPane, DockError, PaneBuilder, PaneConfig, PaneDivider, PaneFrame, PaneSide, SlotState,
};

/// Node ids of a pane's header chrome, valid while the pane is attached.
#[derive(Debug, Clone, Copy)]
struct PaneChrome {
    header: NodeId,
    title: NodeId,
    icon: Option<NodeId>,
    detach: Option<NodeId>,
    close: Option<NodeId>,
}

struct ThemedSlot {
    side: PaneSide,
    config: PaneConfig,
    builder: PaneBuilder,
    state: SlotState,
    builds: usize,
    chrome: Option<PaneChrome>,
    /// Reattach affordance inside the detached window's header.
    window_reattach: Option<NodeId>,
}

/// Copy themed paint properties onto an existing layout style.
fn paint_onto(mut base: Style, themed: &Style) -> Style {
    base.background_color = themed.background_color;
    base.border_color = themed.border_color;
    base.border_width = themed.border_width;
    base.border_radius = themed.border_radius;
    base.text_color = themed.text_color;
    base
}

/// Restyle a node's paint in place, keeping its layout untouched.
fn apply_paint(tree: &mut UiTree, node: NodeId, themed: &Style) {
    if let Some(current) = tree.style(node) {
        let restyled = paint_onto(current.clone(), themed);
        tree.set_style(node, restyled);
    }
}

/// Dockable three-pane container with themed pane chrome.
pub struct ThemedPaneGroup {
    tree: UiTree,
    host: Box<dyn WindowHost>,
    themes: ThemeManager,
    row: NodeId,
    size: Size<f32>,
    slots: Vec<ThemedSlot>,
    /// Slot position in the shared row, the authority for ordinal restore.
    positions: IndexMap<PaneSide, usize>,
    drag: DetachDragTracker,
    hovered: Option<NodeId>,
}

/// Builder for [`ThemedPaneGroup`].
pub struct ThemedPaneGroupBuilder {
    host: Box<dyn WindowHost>,
    themes: ThemeManager,
    size: Size<f32>,
    configs: [PaneConfig; 3],
    builders: [Option<PaneBuilder>; 3],
}

impl ThemedPaneGroupBuilder {
    pub fn new(host: Box<dyn WindowHost>) -> Self {
        Self {
            host,
            themes: ThemeManager::new(),
            size: Size::new(800.0, 600.0),
            configs: [
                PaneConfig::default(),
                PaneConfig::center(),
                PaneConfig::default(),
            ],
            builders: [None, None, None],
        }
    }

    /// Supply a pre-populated theme registry.
    pub fn themes(mut self, themes: ThemeManager) -> Self {
        self.themes = themes;
        self
    }

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

    pub fn build(self) -> ThemedPaneGroup {
        let mut tree = UiTree::new();
        let row_style = Style::new()
            .flex_direction(FlexDirection::Row)
            .width(self.size.width)
            .height(self.size.height)
            .background_color(
                self.themes
                    .current()
                    .color(crate::theme::ColorRole::Background),
            );
        let row = tree.add_widget(Box::new(Container::with_style(row_style)));
        tree.set_root(row);

        let mut slots = Vec::with_capacity(3);
        let mut positions = IndexMap::new();
        for (side, (config, builder)) in PaneSide::ALL
            .into_iter()
            .zip(self.configs.into_iter().zip(self.builders))
        {
            positions.insert(side, side.rank());
            slots.push(ThemedSlot {
                side,
                config,
                builder: builder.unwrap_or_else(|| Box::new(|_| {})),
                state: SlotState::Closed,
                builds: 0,
                chrome: None,
                window_reattach: None,
            });
        }

        let mut group = ThemedPaneGroup {
            tree,
            host: self.host,
            themes: self.themes,
            row,
            size: self.size,
            slots,
            positions,
            drag: DetachDragTracker::new(),
            hovered: None,
        };
        for side in PaneSide::ALL {
            group.build_attached(side.rank());
        }
        group.relayout();
        group
    }
}

impl ThemedPaneGroup {
    pub fn builder(host: Box<dyn WindowHost>) -> ThemedPaneGroupBuilder {
        ThemedPaneGroupBuilder::new(host)
    }

    /// Row index for (re)inserting a slot: the number of attached slots
    /// whose position precedes this one.
    fn restore_index(&self, side: PaneSide) -> usize {
        let position = self.positions[&side];
        self.slots
            .iter()
            .filter(|s| s.state.is_attached() && self.positions[&s.side] < position)
            .count()
    }

    fn title_for(&self, idx: usize) -> String {
        let slot = &self.slots[idx];
        if slot.config.title.is_empty() {
            slot.side.name().to_string()
        } else {
            slot.config.title.clone()
        }
    }

    /// Build a slot's frame, chrome, and content at its row position.
    fn build_attached(&mut self, idx: usize) {
        let side = self.slots[idx].side;
        let frame_style = paint_onto(
            attached_frame_style(
                &self.slots[idx].config,
                side,
                self.host.supports_max_size(),
            ),
            &self
                .themes
                .widget_style(WidgetKind::Panel, WidgetState::Normal),
        );
        let frame = self
            .tree
            .add_widget(Box::new(Container::with_style(frame_style)));
        let index = self.restore_index(side);
        self.tree.insert_child(self.row, index, frame);

        // Slots without window controls only get a header when a title is
        // configured, so an untitled center pane stays all content.
        let wants_header = self.slots[idx].config.detachable
            || self.slots[idx].config.closable
            || !self.slots[idx].config.title.is_empty();
        let chrome = if wants_header {
            let header = self.tree.add_widget(Box::new(Container::with_style(
                self.themes
                    .widget_style(WidgetKind::PaneHeader, WidgetState::Normal),
            )));
            self.tree.add_child(frame, header);

            let icon = match self.slots[idx].config.icon.clone() {
                Some(path) if Path::new(&path).exists() => {
                    let node = self.tree.add_widget(Box::new(Container::with_style(
                        Style::new().width(16.0).height(16.0),
                    )));
                    self.tree.add_child(header, node);
                    Some(node)
                }
                Some(path) => {
                    warn!(pane = %side, path = %path, "pane icon file not found, skipping icon");
                    None
                }
                None => None,
            };

            let title = self.tree.add_widget(Box::new(Label::with_style(
                self.title_for(idx),
                self.themes
                    .widget_style(WidgetKind::Label, WidgetState::Normal),
            )));
            self.tree.add_child(header, title);

            let detach = if self.slots[idx].config.detachable {
                let button = self.tree.add_widget(Box::new(Button::with_style(
                    "⇱",
                    self.themes
                        .widget_style(WidgetKind::HeaderButton, WidgetState::Normal),
                )));
                self.tree.add_child(header, button);
                Some(button)
            } else {
                None
            };
            let close = if self.slots[idx].config.closable {
                let button = self.tree.add_widget(Box::new(Button::with_style(
                    "✕",
                    self.themes
                        .widget_style(WidgetKind::HeaderButton, WidgetState::Normal),
                )));
                self.tree.add_child(header, button);
                Some(button)
            } else {
                None
            };
            Some(PaneChrome {
                header,
                title,
                icon,
                detach,
                close,
            })
        } else {
            None
        };

        let content = self.tree.add_widget(Box::new(Container::with_style(
            Style::new()
                .flex_direction(FlexDirection::Column)
                .flex_grow(1.0)
                .width_full(),
        )));
        self.tree.add_child(frame, content);

        let slot = &mut self.slots[idx];
        let mut pane = PaneFrame::new(&mut self.tree, content);
        (slot.builder)(&mut pane);
        slot.builds += 1;
        slot.state = SlotState::Attached { frame };
        slot.chrome = chrome;
        slot.window_reattach = None;
    }

    fn relayout(&mut self) {
        self.tree.compute_layout(self.size);
    }

    /// Resize the shared container.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
        if let Some(style) = self.tree.style(self.row) {
            let style = style.clone().width(width).height(height);
            self.tree.set_style(self.row, style);
        }
        self.relayout();
    }

    /// Detach a slot into its own themed top-level window.
    ///
    /// `Ok(false)` when the slot is already detached or not detachable;
    /// [`DockError::Closed`] when it was closed and must be restored first.
    pub fn detach(&mut self, side: PaneSide) -> Result<bool, DockError> {
        self.detach_at(side, None)
    }

    fn detach_at(&mut self, side: PaneSide, at: Option<Pos<f32>>) -> Result<bool, DockError> {
        let idx = side.rank();
        let frame = match &self.slots[idx].state {
            SlotState::Closed => return Err(DockError::Closed(side)),
            SlotState::Detached(_) => {
                debug!(pane = %side, "detach ignored: pane already detached");
                return Ok(false);
            }
            SlotState::Attached { frame } => *frame,
        };
        if !self.slots[idx].config.detachable {
            debug!(pane = %side, "detach ignored: pane not detachable");
            return Ok(false);
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
        self.slots[idx].chrome = None;

        let size = Size::new(width, DETACHED_WINDOW_HEIGHT);
        let mut opts = WindowOptions::new(self.title_for(idx), size);
        if let Some(pos) = at {
            opts = opts.position(pos);
        }
        let window = self.host.create_window(opts);
        self.host.set_close_intercept(window, true);

        let mut wtree = UiTree::new();
        let root = wtree.add_widget(Box::new(Container::with_style(paint_onto(
            Style::new()
                .flex_direction(FlexDirection::Column)
                .width(size.width)
                .height(size.height),
            &self
                .themes
                .widget_style(WidgetKind::DetachedWindow, WidgetState::Normal),
        ))));
        wtree.set_root(root);

        let header = wtree.add_widget(Box::new(Container::with_style(
            self.themes
                .widget_style(WidgetKind::PaneHeader, WidgetState::Normal),
        )));
        wtree.add_child(root, header);
        let title = wtree.add_widget(Box::new(Label::with_style(
            self.title_for(idx),
            self.themes
                .widget_style(WidgetKind::Label, WidgetState::Normal),
        )));
        wtree.add_child(header, title);
        let reattach = wtree.add_widget(Box::new(Button::with_style(
            "⇲",
            self.themes
                .widget_style(WidgetKind::HeaderButton, WidgetState::Normal),
        )));
        wtree.add_child(header, reattach);

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
        slot.window_reattach = Some(reattach);

        self.relayout();
        info!(pane = %side, "pane detached");
        Ok(true)
    }

    /// Return a detached slot to the shared row at its mapped position.
    ///
    /// `Ok(false)` when the slot is already attached; [`DockError::Closed`]
    /// when it was closed.
    pub fn reattach(&mut self, side: PaneSide) -> Result<bool, DockError> {
        let idx = side.rank();
        match &self.slots[idx].state {
            SlotState::Closed => return Err(DockError::Closed(side)),
            SlotState::Attached { .. } => {
                debug!(pane = %side, "reattach ignored: pane already attached");
                return Ok(false);
            }
            SlotState::Detached(_) => {}
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
        Ok(true)
    }

    /// Close a closable slot, removing it from the row (or destroying its
    /// detached window) until [`ThemedPaneGroup::restore`].
    pub fn close(&mut self, side: PaneSide) -> bool {
        let idx = side.rank();
        if !self.slots[idx].config.closable {
            debug!(pane = %side, "close ignored: pane not closable");
            return false;
        }
        match std::mem::replace(&mut self.slots[idx].state, SlotState::Closed) {
            SlotState::Closed => false,
            SlotState::Attached { frame } => {
                self.tree.remove_subtree(frame);
                self.slots[idx].chrome = None;
                self.relayout();
                info!(pane = %side, "pane closed");
                true
            }
            SlotState::Detached(pane) => {
                self.host.close_window(pane.window);
                self.slots[idx].window_reattach = None;
                self.relayout();
                info!(pane = %side, "pane closed from detached window");
                true
            }
        }
    }

    /// Bring a closed slot back, attached at its mapped position.
    pub fn restore(&mut self, side: PaneSide) -> bool {
        let idx = side.rank();
        if !matches!(self.slots[idx].state, SlotState::Closed) {
            debug!(pane = %side, "restore ignored: pane not closed");
            return false;
        }
        self.build_attached(idx);
        self.relayout();
        info!(pane = %side, "pane restored");
        true
    }

    /// Close-protocol path for detached windows: reattach instead of
    /// destroying the pane.
    pub fn handle_window_close(&mut self, window: WindowId) -> bool {
        let side = self.slots.iter().find_map(|slot| match &slot.state {
            SlotState::Detached(pane) if pane.window == window => Some(slot.side),
            _ => None,
        });
        match side {
            Some(side) => self.reattach(side).unwrap_or(false),
            None => false,
        }
    }

    /// Activate a clicked chrome affordance in the shared container.
    pub fn on_click(&mut self, node: NodeId) -> bool {
        for slot in &self.slots {
            let Some(chrome) = slot.chrome else { continue };
            if chrome.detach == Some(node) {
                let side = slot.side;
                return self.detach(side).unwrap_or(false);
            }
            if chrome.close == Some(node) {
                let side = slot.side;
                return self.close(side);
            }
        }
        false
    }

    /// Activate a clicked affordance inside a detached window.
    pub fn on_window_click(&mut self, window: WindowId, node: NodeId) -> bool {
        let side = self.slots.iter().find_map(|slot| match &slot.state {
            SlotState::Detached(pane)
                if pane.window == window && slot.window_reattach == Some(node) =>
            {
                Some(slot.side)
            }
            _ => None,
        });
        match side {
            Some(side) => self.reattach(side).unwrap_or(false),
            None => false,
        }
    }

    /// The pane whose header (not its buttons) owns a node.
    fn header_owner(&self, node: NodeId) -> Option<PaneSide> {
        self.slots.iter().find_map(|slot| {
            let chrome = slot.chrome?;
            let on_header = node == chrome.header
                || node == chrome.title
                || chrome.icon == Some(node);
            (on_header && slot.state.is_attached()).then_some(slot.side)
        })
    }

    /// The header button (detach or close) at a node, if any.
    fn button_at(&self, node: NodeId) -> Option<NodeId> {
        self.slots.iter().find_map(|slot| {
            let chrome = slot.chrome?;
            (chrome.detach == Some(node) || chrome.close == Some(node)).then_some(node)
        })
    }

    /// Begin a pointer interaction; pressing a detachable pane's header
    /// arms the drag-to-detach gesture.
    pub fn pointer_pressed(&mut self, pos: Vec2) {
        let Some(node) = self.tree.hit_test(pos) else {
            return;
        };
        if let Some(side) = self.header_owner(node)
            && self.slots[side.rank()].config.detachable
        {
            self.drag.press(side, pos);
        }
        if let Some(button) = self.button_at(node) {
            let active = self
                .themes
                .widget_style(WidgetKind::HeaderButton, WidgetState::Active);
            apply_paint(&mut self.tree, button, &active);
            self.hovered = Some(button);
        }
    }

    /// Track pointer motion: advances the detach gesture and updates
    /// header button hover styling.
    pub fn pointer_moved(&mut self, pos: Vec2) -> DragPhase {
        let hit = self.tree.hit_test(pos).and_then(|n| self.button_at(n));
        if hit != self.hovered {
            if let Some(old) = self.hovered {
                let normal = self
                    .themes
                    .widget_style(WidgetKind::HeaderButton, WidgetState::Normal);
                apply_paint(&mut self.tree, old, &normal);
            }
            if let Some(new) = hit {
                let hovered = self
                    .themes
                    .widget_style(WidgetKind::HeaderButton, WidgetState::Hovered);
                apply_paint(&mut self.tree, new, &hovered);
            }
            self.hovered = hit;
        }
        self.drag.motion(pos)
    }

    /// End a pointer interaction. When the gesture crossed the detach
    /// distance the pane detaches into a window at the release position.
    pub fn pointer_released(&mut self, pos: Vec2) -> Option<PaneSide> {
        let release = self.drag.release()?;
        if !release.should_detach {
            return None;
        }
        match self.detach_at(release.side, Some(Pos::new(pos.x, pos.y))) {
            Ok(true) => Some(release.side),
            _ => None,
        }
    }

    /// Simulate dragging a divider by `delta` pixels (positive = right).
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

        if let Some(style) = self.tree.style(frame) {
            let style = style.clone().width(new_width);
            self.tree.set_style(frame, style);
        }
        self.relayout();
        true
    }

    /// Switch the active theme and restyle all attached chrome. Detached
    /// windows keep their paint until their next rebuild.
    pub fn set_theme(&mut self, name: &str) -> Result<(), ThemeError> {
        self.themes.set_theme(name)?;

        let background = self
            .themes
            .current()
            .color(crate::theme::ColorRole::Background);
        if let Some(style) = self.tree.style(self.row) {
            let style = style.clone().background_color(background);
            self.tree.set_style(self.row, style);
        }

        let panel = self
            .themes
            .widget_style(WidgetKind::Panel, WidgetState::Normal);
        let header = self
            .themes
            .widget_style(WidgetKind::PaneHeader, WidgetState::Normal);
        let label = self
            .themes
            .widget_style(WidgetKind::Label, WidgetState::Normal);
        let button = self
            .themes
            .widget_style(WidgetKind::HeaderButton, WidgetState::Normal);

        for idx in 0..self.slots.len() {
            let SlotState::Attached { frame } = self.slots[idx].state else {
                continue;
            };
            apply_paint(&mut self.tree, frame, &panel);
            let Some(chrome) = self.slots[idx].chrome else {
                continue;
            };
            apply_paint(&mut self.tree, chrome.header, &header);
            apply_paint(&mut self.tree, chrome.title, &label);
            for affordance in [chrome.detach, chrome.close].into_iter().flatten() {
                apply_paint(&mut self.tree, affordance, &button);
            }
        }
        self.hovered = None;
        Ok(())
    }

    pub fn is_attached(&self, side: PaneSide) -> bool {
        self.slots[side.rank()].state.is_attached()
    }

    pub fn is_detached(&self, side: PaneSide) -> bool {
        self.slots[side.rank()].state.is_detached()
    }

    pub fn is_closed(&self, side: PaneSide) -> bool {
        matches!(self.slots[side.rank()].state, SlotState::Closed)
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

    /// How many times a slot's builder has run.
    pub fn build_count(&self, side: PaneSide) -> usize {
        self.slots[side.rank()].builds
    }

    /// The host window owning a detached slot.
    pub fn detached_window(&self, side: PaneSide) -> Option<WindowId> {
        match &self.slots[side.rank()].state {
            SlotState::Detached(pane) => Some(pane.window),
            _ => None,
        }
    }

    /// A slot's position in the restore order map.
    pub fn position_of(&self, side: PaneSide) -> usize {
        self.positions[&side]
    }

    /// The header node of an attached pane (gesture target).
    pub fn header_node(&self, side: PaneSide) -> Option<NodeId> {
        self.slots[side.rank()].chrome.map(|c| c.header)
    }

    /// The detach affordance of an attached pane.
    pub fn detach_button(&self, side: PaneSide) -> Option<NodeId> {
        self.slots[side.rank()].chrome.and_then(|c| c.detach)
    }

    /// The close affordance of an attached closable pane.
    pub fn close_button(&self, side: PaneSide) -> Option<NodeId> {
        self.slots[side.rank()].chrome.and_then(|c| c.close)
    }

    /// The reattach affordance inside a detached window.
    pub fn reattach_button(&self, side: PaneSide) -> Option<NodeId> {
        self.slots[side.rank()].window_reattach
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn themes(&self) -> &ThemeManager {
        &self.themes
    }

    pub fn themes_mut(&mut self) -> &mut ThemeManager {
        &mut self.themes
    }

    /// The shared widget tree (read access for embedding/rendering).
    pub fn tree(&self) -> &UiTree {
        &self.tree
    }
}
