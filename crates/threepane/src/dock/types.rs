//! Shared types for the docking system.

use crate::style::Style;
use crate::tree::{NodeId, UiTree};
use crate::widgets::{Button, Container, Label, Separator, Widget};

use super::host::WindowId;

/// The three named slots of a pane group, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneSide {
    Left,
    Center,
    Right,
}

impl PaneSide {
    /// All sides in canonical order (left first, right last).
    pub const ALL: [PaneSide; 3] = [PaneSide::Left, PaneSide::Center, PaneSide::Right];

    /// Canonical rank: left 0, center 1, right 2.
    pub fn rank(&self) -> usize {
        match self {
            PaneSide::Left => 0,
            PaneSide::Center => 1,
            PaneSide::Right => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaneSide::Left => "left",
            PaneSide::Center => "center",
            PaneSide::Right => "right",
        }
    }
}

impl std::fmt::Display for PaneSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The two draggable dividers of a three-pane row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneDivider {
    /// Between the left and center panes.
    Left,
    /// Between the center and right panes.
    Right,
}

impl PaneDivider {
    /// The outer pane this divider resizes.
    pub fn pane(&self) -> PaneSide {
        match self {
            PaneDivider::Left => PaneSide::Left,
            PaneDivider::Right => PaneSide::Right,
        }
    }
}

/// Size constraints for a pane.
#[derive(Debug, Clone, Copy)]
pub struct PanelConstraints {
    /// Minimum size in pixels.
    pub min_size: f32,
    /// Maximum size in pixels (None = unlimited).
    pub max_size: Option<f32>,
}

impl Default for PanelConstraints {
    fn default() -> Self {
        Self {
            min_size: 50.0,
            max_size: None,
        }
    }
}

impl PanelConstraints {
    /// Create constraints with a minimum size.
    pub fn min(min_size: f32) -> Self {
        Self {
            min_size,
            max_size: None,
        }
    }

    /// Create constraints with both min and max size.
    pub fn min_max(min_size: f32, max_size: f32) -> Self {
        Self {
            min_size,
            max_size: Some(max_size),
        }
    }

    /// Clamp a size value to the constraints.
    pub fn clamp(&self, size: f32) -> f32 {
        let mut result = size.max(self.min_size);
        if let Some(max) = self.max_size {
            result = result.min(max);
        }
        result
    }
}

/// Per-slot configuration.
///
/// `fixed_width`, when set, overrides `resizable` and pins the pane's
/// minimum (and, where the host supports it, maximum) width so divider
/// drags have no effect.
#[derive(Debug, Clone)]
pub struct PaneConfig {
    pub title: String,
    /// Path to an icon file shown in the pane header.
    pub icon: Option<String>,
    pub min_width: f32,
    pub max_width: Option<f32>,
    pub default_width: f32,
    pub resizable: bool,
    pub detachable: bool,
    pub closable: bool,
    pub fixed_width: Option<f32>,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            icon: None,
            min_width: 50.0,
            max_width: None,
            default_width: 200.0,
            resizable: true,
            detachable: true,
            closable: false,
            fixed_width: None,
        }
    }
}

impl PaneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration for the center slot: resizable, not
    /// detachable, absorbs freed space.
    pub fn center() -> Self {
        Self {
            detachable: false,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn default_width(mut self, width: f32) -> Self {
        self.default_width = width;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn detachable(mut self, detachable: bool) -> Self {
        self.detachable = detachable;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn fixed_width(mut self, width: f32) -> Self {
        self.fixed_width = Some(width);
        self
    }

    /// Effective width constraints, with `fixed_width` taking precedence.
    pub fn constraints(&self) -> PanelConstraints {
        match self.fixed_width {
            Some(fixed) => PanelConstraints::min_max(fixed, fixed),
            None => PanelConstraints {
                min_size: self.min_width,
                max_size: self.max_width,
            },
        }
    }

    /// Whether divider drags must leave this pane's width unchanged.
    pub fn is_fixed(&self) -> bool {
        self.fixed_width.is_some() || !self.resizable
    }

    /// The width the pane is created with.
    pub fn initial_width(&self) -> f32 {
        self.fixed_width.unwrap_or(self.default_width)
    }
}

/// Builder callback populating a slot's content frame.
///
/// Invoked once per content creation: at initial attach, when rebuilding
/// inside a detached window, and again on reattach. Content is torn down
/// and rebuilt on every transition, never reparented.
pub type PaneBuilder = Box<dyn FnMut(&mut PaneFrame<'_>)>;

/// Error type for docking operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DockError {
    /// The slot was closed via its close control and must be restored
    /// before it can attach or detach again.
    #[error("pane {0} is closed")]
    Closed(PaneSide),
}

/// Build context handed to pane builders: the content frame being filled.
pub struct PaneFrame<'a> {
    tree: &'a mut UiTree,
    root: NodeId,
}

impl<'a> PaneFrame<'a> {
    pub(crate) fn new(tree: &'a mut UiTree, root: NodeId) -> Self {
        Self { tree, root }
    }

    /// The frame's root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add an arbitrary widget as a child of the frame.
    pub fn add(&mut self, widget: Box<dyn Widget>) -> NodeId {
        let node = self.tree.add_widget(widget);
        self.tree.add_child(self.root, node);
        node
    }

    /// Add a text label.
    pub fn label(&mut self, text: impl Into<String>) -> NodeId {
        self.add(Box::new(Label::new(text)))
    }

    /// Add a button.
    pub fn button(&mut self, label: impl Into<String>) -> NodeId {
        self.add(Box::new(Button::new(label)))
    }

    /// Add a styled container.
    pub fn container(&mut self, style: Style) -> NodeId {
        self.add(Box::new(Container::with_style(style)))
    }

    /// Add a horizontal rule between sections of the frame.
    pub fn separator(&mut self) -> NodeId {
        self.add(Box::new(Separator::new(
            Style::new().width_full().height(1.0),
        )))
    }

    /// Access the underlying tree for nested construction.
    pub fn tree(&mut self) -> &mut UiTree {
        self.tree
    }
}

/// A slot is in exactly one of these states once initialized. `Closed` is
/// reachable only through the themed container's close control.
pub(crate) enum SlotState {
    Attached { frame: NodeId },
    Detached(DetachedPane),
    Closed,
}

impl SlotState {
    pub(crate) fn is_attached(&self) -> bool {
        matches!(self, SlotState::Attached { .. })
    }

    pub(crate) fn is_detached(&self) -> bool {
        matches!(self, SlotState::Detached(_))
    }
}

/// A detached slot's top-level window and its widget tree.
///
/// Owned by the slot record and destroyed exactly once, on reattach or
/// group teardown.
pub(crate) struct DetachedPane {
    pub window: WindowId,
    pub tree: UiTree,
    pub root: NodeId,
}
