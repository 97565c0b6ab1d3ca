/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// Colors can be constructed from floats, `u8` values, or hex codes:
///
/// ```
/// use threepane_core::Color;
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let semi_transparent = Color::rgba(1.0, 1.0, 1.0, 0.5);
/// let from_hex = Color::from_hex(0xFF8800);
/// let from_str: Color = "#1e1e1e".parse().unwrap();
/// assert_eq!(from_str.to_hex_string(), "#1e1e1e");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Error returned when parsing a hex color string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity (alpha = 1.0).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from 8-bit RGB values with full opacity.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb_u8(r, g, b)
    }

    /// Convert to 8-bit RGB components, discarding alpha.
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }

    /// Format as a lowercase `#rrggbb` hex string.
    pub fn to_hex_string(self) -> String {
        let (r, g, b) = self.to_rgb_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to an `[r, g, b, a]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Blend `other` over this color using `other`'s alpha.
    ///
    /// Used for hover/active overlays from the theme palette.
    pub fn overlay(self, other: Color) -> Color {
        let a = other.a;
        Color {
            r: self.r * (1.0 - a) + other.r * a,
            g: self.g * (1.0 - a) + other.g * a,
            b: self.b * (1.0 - a) + other.b * a,
            a: self.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::str::FromStr for Color {
    type Err = ParseColorError;

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let err = || ParseColorError(s.to_string());
        let byte = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|p| u8::from_str_radix(p, 16).ok())
                .ok_or_else(err)
        };
        match hex.len() {
            6 => Ok(Self::from_rgb_u8(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::from_rgba_u8(
                byte(0..2)?,
                byte(2..4)?,
                byte(4..6)?,
                byte(6..8)?,
            )),
            _ => Err(err()),
        }
    }
}

impl From<[f32; 4]> for Color {
    fn from(arr: [f32; 4]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: arr[3],
        }
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}
