//! Theme system for consistent UI styling.
//!
//! Provides centralized color palettes, typography, and spacing definitions,
//! plus a name-keyed registry ([`ThemeManager`]) with one active theme at a
//! time. The manager is an explicit handle passed to the containers that
//! need it; there is no process-wide global.
//!
//! # Example
//!
//! ```
//! use threepane::theme::{ColorRole, Theme, ThemeManager};
//!
//! let mut themes = ThemeManager::new();
//! themes.set_theme("dark").unwrap();
//!
//! let bg = themes.current().color(ColorRole::Background);
//! assert_eq!(Some(bg.to_hex_string()), themes.get_color("primary_bg"));
//! ```

use indexmap::IndexMap;
use taffy::{AlignItems, FlexDirection, JustifyContent};
use threepane_core::Color;

use crate::platform::PlatformHandler;
use crate::style::Style;

/// Error type for theme registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// The requested theme name is not registered.
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}

/// Color role for semantic color assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Primary brand/accent color
    Primary,
    /// Secondary brand color
    Secondary,
    /// Window background color
    Background,
    /// Surface color (panes, headers)
    Surface,
    /// Error/danger color
    Error,
    /// Warning color
    Warning,
    /// Success color
    Success,
    /// Info color
    Info,
    /// Primary text color
    TextPrimary,
    /// Secondary/muted text color
    TextSecondary,
    /// Disabled text color
    TextDisabled,
    /// Border color
    Border,
    /// Divider color
    Divider,
}

impl ColorRole {
    /// Resolve a flat snake_case name, as used by the exported config
    /// surface, into a role.
    pub fn from_name(name: &str) -> Option<ColorRole> {
        match name {
            "primary" | "accent" => Some(ColorRole::Primary),
            "secondary" => Some(ColorRole::Secondary),
            "primary_bg" | "background" => Some(ColorRole::Background),
            "surface" | "secondary_bg" => Some(ColorRole::Surface),
            "error" => Some(ColorRole::Error),
            "warning" => Some(ColorRole::Warning),
            "success" => Some(ColorRole::Success),
            "info" => Some(ColorRole::Info),
            "text" | "text_primary" => Some(ColorRole::TextPrimary),
            "text_secondary" => Some(ColorRole::TextSecondary),
            "text_disabled" => Some(ColorRole::TextDisabled),
            "border" => Some(ColorRole::Border),
            "divider" => Some(ColorRole::Divider),
            _ => None,
        }
    }
}

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub info: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,
    pub border: Color,
    pub divider: Color,
    /// Hover overlay color (applied on top of elements)
    pub hover_overlay: Color,
    /// Active/pressed overlay color
    pub active_overlay: Color,
}

impl ColorPalette {
    /// Get a color by its role.
    pub fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Background => self.background,
            ColorRole::Surface => self.surface,
            ColorRole::Error => self.error,
            ColorRole::Warning => self.warning,
            ColorRole::Success => self.success,
            ColorRole::Info => self.info,
            ColorRole::TextPrimary => self.text_primary,
            ColorRole::TextSecondary => self.text_secondary,
            ColorRole::TextDisabled => self.text_disabled,
            ColorRole::Border => self.border,
            ColorRole::Divider => self.divider,
        }
    }

    /// Create a dark color palette.
    pub fn dark() -> Self {
        Self {
            primary: Color::from_rgb_u8(60, 120, 200),
            secondary: Color::from_rgb_u8(100, 180, 100),
            background: Color::from_rgb_u8(30, 30, 30),
            surface: Color::from_rgb_u8(45, 45, 48),
            error: Color::from_rgb_u8(220, 60, 60),
            warning: Color::from_rgb_u8(255, 180, 60),
            success: Color::from_rgb_u8(80, 200, 120),
            info: Color::from_rgb_u8(100, 180, 255),
            text_primary: Color::from_rgb_u8(255, 255, 255),
            text_secondary: Color::from_rgb_u8(180, 180, 180),
            text_disabled: Color::from_rgb_u8(100, 100, 100),
            border: Color::from_rgb_u8(60, 60, 60),
            divider: Color::from_rgb_u8(70, 70, 75),
            hover_overlay: Color::from_rgba_u8(255, 255, 255, 20),
            active_overlay: Color::from_rgba_u8(255, 255, 255, 40),
        }
    }

    /// Create a light color palette.
    pub fn light() -> Self {
        Self {
            primary: Color::from_rgb_u8(50, 100, 200),
            secondary: Color::from_rgb_u8(80, 160, 80),
            background: Color::from_rgb_u8(250, 250, 250),
            surface: Color::from_rgb_u8(240, 240, 240),
            error: Color::from_rgb_u8(200, 50, 50),
            warning: Color::from_rgb_u8(220, 150, 50),
            success: Color::from_rgb_u8(60, 180, 100),
            info: Color::from_rgb_u8(80, 150, 220),
            text_primary: Color::from_rgb_u8(0, 0, 0),
            text_secondary: Color::from_rgb_u8(100, 100, 100),
            text_disabled: Color::from_rgb_u8(180, 180, 180),
            border: Color::from_rgb_u8(200, 200, 200),
            divider: Color::from_rgb_u8(220, 220, 220),
            hover_overlay: Color::from_rgba_u8(0, 0, 0, 15),
            active_overlay: Color::from_rgba_u8(0, 0, 0, 30),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Typography settings for a theme.
#[derive(Debug, Clone)]
pub struct Typography {
    /// Default font family (empty = system default)
    pub font_family: String,
    /// Heading font sizes (h1-h6)
    pub heading_sizes: [f32; 6],
    /// Body text size
    pub body_size: f32,
    /// Small text size (pane headers, labels)
    pub small_size: f32,
    /// Line height multiplier
    pub line_height: f32,
}

impl Typography {
    pub fn new() -> Self {
        Self {
            font_family: String::new(),
            heading_sizes: [32.0, 26.0, 22.0, 18.0, 16.0, 14.0],
            body_size: 14.0,
            small_size: 12.0,
            line_height: 1.5,
        }
    }

    /// Get a heading size by level (1-6).
    pub fn heading_size(&self, level: usize) -> f32 {
        if level == 0 || level > 6 {
            self.body_size
        } else {
            self.heading_sizes[level - 1]
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self::new()
    }
}

/// Spacing scale for consistent layout.
#[derive(Debug, Clone, Copy)]
pub struct Spacing {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
    pub xxl: f32,
}

impl Spacing {
    pub fn new() -> Self {
        Self {
            xs: 2.0,
            sm: 4.0,
            md: 8.0,
            lg: 16.0,
            xl: 24.0,
            xxl: 32.0,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete theme definition.
///
/// Immutable snapshot selected by name from the [`ThemeManager`] registry.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Registry key ("dark", "light", ...)
    pub name: String,
    /// Human-readable name shown in UI
    pub display_name: String,
    /// Whether this theme counts as dark for appearance matching
    pub is_dark: bool,
    pub colors: ColorPalette,
    pub typography: Typography,
    pub spacing: Spacing,
}

impl Theme {
    /// Create the built-in dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            display_name: "Dark".into(),
            is_dark: true,
            colors: ColorPalette::dark(),
            typography: Typography::new(),
            spacing: Spacing::new(),
        }
    }

    /// Create the built-in light theme.
    pub fn light() -> Self {
        Self {
            name: "light".into(),
            display_name: "Light".into(),
            is_dark: false,
            colors: ColorPalette::light(),
            typography: Typography::new(),
            spacing: Spacing::new(),
        }
    }

    /// Create a theme builder.
    pub fn builder(name: impl Into<String>) -> ThemeBuilder {
        ThemeBuilder::new(name)
    }

    /// Get a color by role.
    pub fn color(&self, role: ColorRole) -> Color {
        self.colors.get(role)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Builder for creating custom themes.
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            theme: Theme {
                display_name: name.clone(),
                name,
                ..Theme::dark()
            },
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.theme.display_name = display_name.into();
        self
    }

    pub fn dark(mut self, is_dark: bool) -> Self {
        self.theme.is_dark = is_dark;
        self
    }

    pub fn primary(mut self, color: Color) -> Self {
        self.theme.colors.primary = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.theme.colors.background = color;
        self
    }

    pub fn surface(mut self, color: Color) -> Self {
        self.theme.colors.surface = color;
        self
    }

    pub fn colors(mut self, colors: ColorPalette) -> Self {
        self.theme.colors = colors;
        self
    }

    pub fn typography(mut self, typography: Typography) -> Self {
        self.theme.typography = typography;
        self
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.theme.spacing = spacing;
        self
    }

    pub fn build(self) -> Theme {
        self.theme
    }
}

/// Widget kinds the theme produces styles for.
///
/// A closed set: per-kind styling is an enum-keyed match, not string
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A pane's content surface.
    Panel,
    /// The header bar of a dockable pane.
    PaneHeader,
    /// Small buttons living in a pane header (detach, close, reattach).
    HeaderButton,
    /// Plain text.
    Label,
    /// The divider between panes.
    Separator,
    /// The content root of a detached top-level window.
    DetachedWindow,
}

/// Visual state a widget is styled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetState {
    #[default]
    Normal,
    Hovered,
    Active,
    Disabled,
}

/// Registry of named themes with one current theme.
pub struct ThemeManager {
    themes: IndexMap<String, Theme>,
    current: String,
}

impl ThemeManager {
    /// Create a manager seeded with the built-in dark and light themes,
    /// dark current.
    pub fn new() -> Self {
        let mut themes = IndexMap::new();
        for theme in [Theme::dark(), Theme::light()] {
            themes.insert(theme.name.clone(), theme);
        }
        Self {
            themes,
            current: "dark".into(),
        }
    }

    /// Register a theme, replacing any previous theme of the same name.
    pub fn register(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    /// Switch the current theme.
    ///
    /// Only affects widgets created (or rebuilt) after the switch; already
    /// built detached windows keep their chrome until their next rebuild.
    pub fn set_theme(&mut self, name: &str) -> Result<(), ThemeError> {
        if !self.themes.contains_key(name) {
            return Err(ThemeError::UnknownTheme(name.to_string()));
        }
        if self.current != name {
            tracing::debug!(theme = name, "switching theme");
            self.current = name.to_string();
        }
        Ok(())
    }

    /// The currently active theme.
    pub fn current(&self) -> &Theme {
        // The current key always refers to a registered theme; set_theme
        // validates and built-ins are seeded at construction.
        &self.themes[&self.current]
    }

    /// Registered theme names in registration order.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Look up a registered theme by name.
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Get a color from the current theme by role.
    pub fn color(&self, role: ColorRole) -> Color {
        self.current().color(role)
    }

    /// Get a color from the current theme by flat name, as a hex string.
    pub fn get_color(&self, name: &str) -> Option<String> {
        ColorRole::from_name(name).map(|role| self.color(role).to_hex_string())
    }

    /// Produce the style for a widget kind in a given state from the
    /// current theme.
    pub fn widget_style(&self, kind: WidgetKind, state: WidgetState) -> Style {
        let theme = self.current();
        let colors = &theme.colors;
        let spacing = &theme.spacing;

        let overlay = |base: Color| match state {
            WidgetState::Normal | WidgetState::Disabled => base,
            WidgetState::Hovered => base.overlay(colors.hover_overlay),
            WidgetState::Active => base.overlay(colors.active_overlay),
        };
        let text = match state {
            WidgetState::Disabled => colors.text_disabled,
            _ => colors.text_primary,
        };

        match kind {
            WidgetKind::Panel => Style::new()
                .background_color(overlay(colors.surface))
                .border_color(colors.border)
                .border_width(1.0)
                .text_color(text)
                .padding(spacing.md),
            WidgetKind::PaneHeader => Style::new()
                .flex_direction(FlexDirection::Row)
                .align_items(AlignItems::Center)
                .justify_content(JustifyContent::SpaceBetween)
                .height(28.0)
                .width_full()
                .gap(spacing.sm)
                .padding(spacing.sm)
                .background_color(overlay(colors.surface))
                .border_color(colors.divider)
                .border_width(1.0)
                .text_color(text),
            WidgetKind::HeaderButton => Style::new()
                .width(20.0)
                .height(20.0)
                .background_color(overlay(Color::TRANSPARENT))
                .border_radius(3.0)
                .text_color(match state {
                    WidgetState::Disabled => colors.text_disabled,
                    _ => colors.text_secondary,
                }),
            WidgetKind::Label => Style::new().text_color(text),
            WidgetKind::Separator => Style::new().background_color(match state {
                WidgetState::Hovered | WidgetState::Active => colors.primary,
                _ => colors.divider,
            }),
            WidgetKind::DetachedWindow => Style::new()
                .background_color(colors.background)
                .border_color(colors.border)
                .border_width(1.0)
                .text_color(text)
                .padding(spacing.md),
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic OS appearance poll.
///
/// The host event loop calls [`ThemeWatcher::update`] with elapsed seconds;
/// every `interval` the watcher re-checks the platform dark-mode preference
/// and reports the theme name to switch to, if any.
pub struct ThemeWatcher {
    interval: f32,
    elapsed: f32,
}

impl ThemeWatcher {
    /// Default poll interval in seconds.
    pub const DEFAULT_INTERVAL: f32 = 3.0;

    pub fn new() -> Self {
        Self::with_interval(Self::DEFAULT_INTERVAL)
    }

    pub fn with_interval(interval: f32) -> Self {
        Self {
            interval: interval.max(0.1),
            elapsed: 0.0,
        }
    }

    /// Advance the poll timer; returns the theme to switch to when the OS
    /// appearance no longer matches the current theme.
    pub fn update(
        &mut self,
        dt: f32,
        platform: &PlatformHandler,
        themes: &ThemeManager,
    ) -> Option<&'static str> {
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed = 0.0;

        let wants_dark = platform.prefers_dark();
        if themes.current().is_dark != wants_dark {
            Some(if wants_dark { "dark" } else { "light" })
        } else {
            None
        }
    }
}

impl Default for ThemeWatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::TargetOs;

    #[test]
    fn test_dark_theme() {
        let theme = Theme::dark();
        assert_eq!(theme.colors.primary, Color::from_rgb_u8(60, 120, 200));
        assert_eq!(theme.typography.body_size, 14.0);
        assert!(theme.is_dark);
    }

    #[test]
    fn test_light_theme() {
        let theme = Theme::light();
        assert_eq!(theme.colors.background, Color::from_rgb_u8(250, 250, 250));
        assert!(!theme.is_dark);
    }

    #[test]
    fn test_theme_builder() {
        let theme = Theme::builder("midnight")
            .display_name("Midnight")
            .primary(Color::RED)
            .build();

        assert_eq!(theme.name, "midnight");
        assert_eq!(theme.display_name, "Midnight");
        assert_eq!(theme.colors.primary, Color::RED);
    }

    #[test]
    fn test_set_theme_switches_current() {
        let mut themes = ThemeManager::new();
        themes.set_theme("light").unwrap();
        assert_eq!(themes.current().display_name, "Light");

        themes.set_theme("dark").unwrap();
        assert_eq!(themes.current().display_name, "Dark");
        assert_eq!(
            themes.get_color("primary_bg").as_deref(),
            Some(Theme::dark().colors.background.to_hex_string().as_str()),
        );
    }

    #[test]
    fn test_set_theme_unknown_name() {
        let mut themes = ThemeManager::new();
        let err = themes.set_theme("solarized").unwrap_err();
        assert_eq!(err, ThemeError::UnknownTheme("solarized".into()));
        // Current theme unchanged.
        assert_eq!(themes.current().name, "dark");
    }

    #[test]
    fn test_register_custom_theme() {
        let mut themes = ThemeManager::new();
        themes.register(Theme::builder("midnight").dark(true).build());
        themes.set_theme("midnight").unwrap();
        assert_eq!(themes.current().name, "midnight");
        assert_eq!(
            themes.theme_names().collect::<Vec<_>>(),
            vec!["dark", "light", "midnight"],
        );
    }

    #[test]
    fn test_get_color_unknown_name() {
        let themes = ThemeManager::new();
        assert_eq!(themes.get_color("definitely_not_a_color"), None);
    }

    #[test]
    fn test_widget_style_header_hover_differs() {
        let themes = ThemeManager::new();
        let normal = themes.widget_style(WidgetKind::PaneHeader, WidgetState::Normal);
        let hovered = themes.widget_style(WidgetKind::PaneHeader, WidgetState::Hovered);
        assert_ne!(normal.background_color, hovered.background_color);
    }

    #[test]
    fn test_theme_watcher_honors_interval() {
        let mut watcher = ThemeWatcher::with_interval(3.0);
        let platform = PlatformHandler::for_os(TargetOs::Linux).dark_override(Some(false));
        let themes = ThemeManager::new(); // current: dark

        assert_eq!(watcher.update(1.0, &platform, &themes), None);
        assert_eq!(watcher.update(1.0, &platform, &themes), None);
        // Third second crosses the interval and the mismatch is reported.
        assert_eq!(watcher.update(1.0, &platform, &themes), Some("light"));
    }

    #[test]
    fn test_theme_watcher_quiet_when_matching() {
        let mut watcher = ThemeWatcher::with_interval(1.0);
        let platform = PlatformHandler::for_os(TargetOs::Linux).dark_override(Some(true));
        let themes = ThemeManager::new();
        assert_eq!(watcher.update(2.0, &platform, &themes), None);
    }
}
