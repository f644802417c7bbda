//! Palette-input validation and the color-conversion stub.

use crate::style::{Palette, DEFAULT_BG, DEFAULT_FG};

/// Foreground fallback when a supplied color fails validation.
pub const FALLBACK_FG: &str = "red";
/// Background fallback when a supplied color fails validation.
pub const FALLBACK_BG: &str = "yellow";

/// Whether `value` looks like a usable color: a `#`-prefixed 3-6 digit hex
/// code, a bare alphabetic name, or an `rgb()`/`rgba()`/`hsl()`/`hsla()`
/// functional form. No color-space checking beyond the shape.
pub fn is_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return (3..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    for prefix in ["rgba(", "rgb(", "hsla(", "hsl("] {
        if let Some(rest) = value.strip_prefix(prefix) {
            return match rest.strip_suffix(')') {
                Some(inner) => !inner.is_empty() && !inner.contains(')'),
                None => false,
            };
        }
    }
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}

/// Build the run palette from user-supplied colors.
///
/// An absent value takes the palette default; a supplied value that fails
/// validation is replaced by the fixed fallback with a warning, so a typo'd
/// color is visible in the output rather than silently normalized. The
/// engine itself never re-validates.
pub fn validate_colors(fg: Option<&str>, bg: Option<&str>) -> Palette {
    Palette::new(
        checked(fg, DEFAULT_FG, FALLBACK_FG, "foreground"),
        checked(bg, DEFAULT_BG, FALLBACK_BG, "background"),
    )
}

fn checked(value: Option<&str>, default: &str, fallback: &str, role: &str) -> String {
    match value {
        Some(color) if is_color(color) => color.to_owned(),
        Some(color) => {
            log::warn!("invalid {role} color {color:?}, using {fallback}");
            fallback.to_owned()
        }
        None => default.to_owned(),
    }
}

/// Convert a color to `rgba()` form.
///
/// Currently returns the input unchanged.
// TODO: resolve named colors and hex codes to rgba() components.
pub fn to_rgba(color: &str) -> String {
    color.to_owned()
}
