//! Widget system for UI components.

use crate::style::Style;
use crate::tree::NodeId;
use std::any::Any;
use threepane_core::math::Vec2;

/// Base trait for all UI widgets.
pub trait Widget: Any {
    /// Get widget type as Any for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Get mutable widget type as Any for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Get the style for this widget.
    fn style(&self) -> &Style;

    /// Get mutable style for this widget.
    fn style_mut(&mut self) -> &mut Style;

    /// Get child widgets.
    fn children(&self) -> &[NodeId] {
        &[]
    }

    /// Measure content size for layout (for intrinsic sizing).
    fn measure(&self, _available_space: Vec2) -> Vec2 {
        Vec2::ZERO
    }

    /// Clone the widget into a box.
    fn clone_box(&self) -> Box<dyn Widget>;
}

impl Clone for Box<dyn Widget> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Generic container widget holding children.
#[derive(Clone, Default)]
pub struct Container {
    pub style: Style,
    pub children: Vec<NodeId>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: Style) -> Self {
        Self {
            style,
            children: Vec::new(),
        }
    }
}

impl Widget for Container {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn clone_box(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }
}

/// Static text widget.
#[derive(Clone)]
pub struct Label {
    pub style: Style,
    pub text: String,
    pub font_size: f32,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            style: Style::new(),
            text: text.into(),
            font_size: 14.0,
        }
    }

    pub fn with_style(text: impl Into<String>, style: Style) -> Self {
        Self {
            style,
            text: text.into(),
            font_size: 14.0,
        }
    }
}

impl Widget for Label {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn measure(&self, _available_space: Vec2) -> Vec2 {
        // Monospace-ish estimate; the host toolkit owns real text metrics.
        let advance = self.font_size * 0.55;
        Vec2::new(self.text.chars().count() as f32 * advance, self.font_size * 1.4)
    }

    fn clone_box(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }
}

/// Interaction state a button can be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Normal,
    Hovered,
    Pressed,
    Disabled,
}

/// Push button widget.
#[derive(Clone)]
pub struct Button {
    pub style: Style,
    pub label: String,
    pub state: InteractionState,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            style: Style::new(),
            label: label.into(),
            state: InteractionState::Normal,
        }
    }

    pub fn with_style(label: impl Into<String>, style: Style) -> Self {
        Self {
            style,
            label: label.into(),
            state: InteractionState::Normal,
        }
    }
}

impl Widget for Button {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn measure(&self, _available_space: Vec2) -> Vec2 {
        Vec2::new(self.label.chars().count() as f32 * 8.0 + 16.0, 24.0)
    }

    fn clone_box(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }
}

/// Thin divider widget between panes.
#[derive(Clone, Default)]
pub struct Separator {
    pub style: Style,
    pub hovered: bool,
}

impl Separator {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            hovered: false,
        }
    }
}

impl Widget for Separator {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn clone_box(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }
}
