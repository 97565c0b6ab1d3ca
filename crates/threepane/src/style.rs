//! Style system for UI widgets.

use taffy::{
    AlignItems, Dimension, Display, FlexDirection, JustifyContent,
    LengthPercentage as TaffyLengthPercentage, LengthPercentageAuto as TaffyLengthPercentageAuto,
    Position, Rect, Size, style::Style as TaffyStyle,
    style_helpers::{TaffyGridLine, TaffyGridSpan, fr},
};
use threepane_core::Color;

/// UI style for widgets.
///
/// Wraps a Taffy layout style plus the paint properties the toolkit renders
/// from (background, border, text color). All dimensions are in pixels.
#[derive(Debug, Clone)]
pub struct Style {
    /// Taffy layout style
    pub layout: TaffyStyle,

    /// Background color
    pub background_color: Option<Color>,

    /// Border color
    pub border_color: Option<Color>,

    /// Border width
    pub border_width: f32,

    /// Border radius
    pub border_radius: f32,

    /// Text color (labels, buttons)
    pub text_color: Option<Color>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            layout: TaffyStyle::default(),
            background_color: None,
            border_color: None,
            border_width: 0.0,
            border_radius: 0.0,
            text_color: None,
        }
    }
}

impl Style {
    /// Create a new default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display mode.
    pub fn display(mut self, display: Display) -> Self {
        self.layout.display = display;
        self
    }

    /// Set width in pixels.
    pub fn width(mut self, width: f32) -> Self {
        self.layout.size.width = Dimension::Length(width);
        self
    }

    /// Set height in pixels.
    pub fn height(mut self, height: f32) -> Self {
        self.layout.size.height = Dimension::Length(height);
        self
    }

    /// Set width to fill the parent.
    pub fn width_full(mut self) -> Self {
        self.layout.size.width = Dimension::Percent(1.0);
        self
    }

    /// Set height to fill the parent.
    pub fn height_full(mut self) -> Self {
        self.layout.size.height = Dimension::Percent(1.0);
        self
    }

    /// Set minimum width in pixels.
    pub fn min_width(mut self, width: f32) -> Self {
        self.layout.min_size.width = Dimension::Length(width);
        self
    }

    /// Set maximum width in pixels.
    pub fn max_width(mut self, width: f32) -> Self {
        self.layout.max_size.width = Dimension::Length(width);
        self
    }

    /// Clear any maximum width constraint.
    pub fn clear_max_width(mut self) -> Self {
        self.layout.max_size.width = Dimension::Auto;
        self
    }

    /// Set minimum height in pixels.
    pub fn min_height(mut self, height: f32) -> Self {
        self.layout.min_size.height = Dimension::Length(height);
        self
    }

    /// Set padding for all sides in pixels.
    pub fn padding(mut self, padding: f32) -> Self {
        let p = TaffyLengthPercentage::Length(padding);
        self.layout.padding = Rect {
            left: p,
            top: p,
            right: p,
            bottom: p,
        };
        self
    }

    /// Set margin for all sides in pixels.
    pub fn margin(mut self, margin: f32) -> Self {
        let m = TaffyLengthPercentageAuto::Length(margin);
        self.layout.margin = Rect {
            left: m,
            top: m,
            right: m,
            bottom: m,
        };
        self
    }

    /// Set flex direction.
    pub fn flex_direction(mut self, direction: FlexDirection) -> Self {
        self.layout.flex_direction = direction;
        self
    }

    /// Set flex grow factor.
    pub fn flex_grow(mut self, grow: f32) -> Self {
        self.layout.flex_grow = grow;
        self
    }

    /// Set flex shrink factor.
    pub fn flex_shrink(mut self, shrink: f32) -> Self {
        self.layout.flex_shrink = shrink;
        self
    }

    /// Set justify content.
    pub fn justify_content(mut self, justify: JustifyContent) -> Self {
        self.layout.justify_content = Some(justify);
        self
    }

    /// Set align items.
    pub fn align_items(mut self, align: AlignItems) -> Self {
        self.layout.align_items = Some(align);
        self
    }

    /// Set gap between items in pixels.
    pub fn gap(mut self, gap: f32) -> Self {
        let g = TaffyLengthPercentage::Length(gap);
        self.layout.gap = Size {
            width: g,
            height: g,
        };
        self
    }

    /// Set position type.
    pub fn position(mut self, position: Position) -> Self {
        self.layout.position = position;
        self
    }

    /// Configure an N×M grid with equal fractional tracks.
    pub fn grid_template(mut self, rows: usize, cols: usize) -> Self {
        self.layout.display = Display::Grid;
        self.layout.grid_template_rows = (0..rows).map(|_| fr(1.0)).collect();
        self.layout.grid_template_columns = (0..cols).map(|_| fr(1.0)).collect();
        self
    }

    /// Place this widget in a grid: 1-based start line plus span.
    pub fn grid_area(mut self, row: i16, row_span: u16, col: i16, col_span: u16) -> Self {
        self.layout.grid_row = taffy::geometry::Line {
            start: TaffyGridLine::from_line_index(row),
            end: TaffyGridSpan::from_span(row_span),
        };
        self.layout.grid_column = taffy::geometry::Line {
            start: TaffyGridLine::from_line_index(col),
            end: TaffyGridSpan::from_span(col_span),
        };
        self
    }

    /// Set background color.
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set border color.
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    /// Set border width.
    pub fn border_width(mut self, width: f32) -> Self {
        self.border_width = width;
        self
    }

    /// Set border radius.
    pub fn border_radius(mut self, radius: f32) -> Self {
        self.border_radius = radius;
        self
    }

    /// Set text color.
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_sets_dimension() {
        let style = Style::new().width(200.0);
        assert_eq!(style.layout.size.width, Dimension::Length(200.0));
    }

    #[test]
    fn test_clear_max_width() {
        let style = Style::new().max_width(300.0).clear_max_width();
        assert_eq!(style.layout.max_size.width, Dimension::Auto);
    }

    #[test]
    fn test_grid_template_track_counts() {
        let style = Style::new().grid_template(3, 4);
        assert_eq!(style.layout.display, Display::Grid);
        assert_eq!(style.layout.grid_template_rows.len(), 3);
        assert_eq!(style.layout.grid_template_columns.len(), 4);
    }
}
