//! Per-OS appearance data.
//!
//! Pure lookup tables keyed by the target OS: chrome colors, accent color,
//! UI font, and preferred icon format. No toolkit calls happen here; the
//! values feed the theme engine and the pane header chrome.

use threepane_core::Color;

/// Operating systems with distinct appearance defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Linux,
    MacOs,
    Windows,
}

impl TargetOs {
    /// Detect the OS this build targets.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            TargetOs::MacOs
        } else if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else {
            TargetOs::Linux
        }
    }
}

/// Preferred icon file format per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    Png,
    Ico,
    Icns,
    Svg,
}

impl IconFormat {
    /// The file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            IconFormat::Png => "png",
            IconFormat::Ico => "ico",
            IconFormat::Icns => "icns",
            IconFormat::Svg => "svg",
        }
    }
}

/// OS-specific color/font/icon lookups.
#[derive(Debug, Clone)]
pub struct PlatformHandler {
    os: TargetOs,
    dark_override: Option<bool>,
}

impl PlatformHandler {
    /// Create a handler for the detected OS.
    pub fn new() -> Self {
        Self::for_os(TargetOs::detect())
    }

    /// Create a handler for a specific OS (tests, previews).
    pub fn for_os(os: TargetOs) -> Self {
        Self {
            os,
            dark_override: None,
        }
    }

    /// Force the dark-mode answer, bypassing environment detection.
    pub fn dark_override(mut self, value: Option<bool>) -> Self {
        self.dark_override = value;
        self
    }

    /// The OS this handler describes.
    pub fn os(&self) -> TargetOs {
        self.os
    }

    /// Preferred icon file format.
    pub fn icon_format(&self) -> IconFormat {
        match self.os {
            TargetOs::Linux => IconFormat::Png,
            TargetOs::MacOs => IconFormat::Icns,
            TargetOs::Windows => IconFormat::Ico,
        }
    }

    /// Default UI font family and size.
    pub fn ui_font(&self) -> (&'static str, f32) {
        match self.os {
            TargetOs::Linux => ("Cantarell", 11.0),
            TargetOs::MacOs => ("SF Pro Text", 13.0),
            TargetOs::Windows => ("Segoe UI", 12.0),
        }
    }

    /// System accent color.
    pub fn accent_color(&self) -> Color {
        match self.os {
            TargetOs::Linux => Color::from_hex(0x3584E4),
            TargetOs::MacOs => Color::from_hex(0x007AFF),
            TargetOs::Windows => Color::from_hex(0x0078D4),
        }
    }

    /// Window chrome color for the given appearance.
    pub fn window_chrome(&self, dark: bool) -> Color {
        match (self.os, dark) {
            (TargetOs::Linux, true) => Color::from_hex(0x303030),
            (TargetOs::Linux, false) => Color::from_hex(0xEBEBEB),
            (TargetOs::MacOs, true) => Color::from_hex(0x282828),
            (TargetOs::MacOs, false) => Color::from_hex(0xECECEC),
            (TargetOs::Windows, true) => Color::from_hex(0x1F1F1F),
            (TargetOs::Windows, false) => Color::from_hex(0xF3F3F3),
        }
    }

    /// Whether the OS currently prefers a dark appearance.
    ///
    /// Honors the override first, then the `THREEPANE_APPEARANCE`
    /// environment variable ("dark"/"light"). Without either signal the
    /// answer is light; real dark-mode queries belong to the host toolkit.
    pub fn prefers_dark(&self) -> bool {
        if let Some(forced) = self.dark_override {
            return forced;
        }
        match std::env::var("THREEPANE_APPEARANCE") {
            Ok(value) => value.eq_ignore_ascii_case("dark"),
            Err(_) => false,
        }
    }
}

impl Default for PlatformHandler {
    fn default() -> Self {
        Self::new()
    }
}
