//! Color Derivation - gradient stops and shadows from a single base color
//!
//! Malformed input (anything other than `#RRGGBB` or `#RGB`, `#` optional) is
//! passed through unchanged so the document still renders.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn parse(hex: &str) -> Option<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            6 => {
                let value = u32::from_str_radix(digits, 16).ok()?;
                Some(Self {
                    r: (value >> 16) as u8,
                    g: (value >> 8) as u8,
                    b: value as u8,
                })
            }
            3 => {
                let value = u16::from_str_radix(digits, 16).ok()?;
                let expand = |nibble: u16| (nibble & 0xf) as u8 * 17;
                Some(Self {
                    r: expand(value >> 8),
                    g: expand(value >> 4),
                    b: expand(value),
                })
            }
            _ => None,
        }
    }

    /// Add `amount` to every channel, saturating at 0 and 255.
    pub fn offset(self, amount: i32) -> Self {
        let shift = |channel: u8| (i32::from(channel) + amount).clamp(0, 255) as u8;
        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Lighten (positive `amount`) or darken (negative) a hex color.
pub fn adjust(hex: &str, amount: i32) -> String {
    match Rgb::parse(hex) {
        Some(rgb) => rgb.offset(amount).to_string(),
        None => {
            tracing::warn!(color = hex, "malformed hex color, passing through unchanged");
            hex.trim().to_string()
        }
    }
}

/// CSS `rgba()` literal for a hex color at the given opacity.
pub fn to_rgba(hex: &str, alpha: f32) -> String {
    match Rgb::parse(hex) {
        Some(Rgb { r, g, b }) => format!("rgba({r}, {g}, {b}, {alpha})"),
        None => {
            tracing::warn!(color = hex, "malformed hex color, passing through unchanged");
            hex.trim().to_string()
        }
    }
}
