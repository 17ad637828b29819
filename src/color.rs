//! Theme-aware color adjustment.
//!
//! The light theme renders avatars slightly muted by mixing every channel 30%
//! toward white. Dark theme, and callers that opt out of theme awareness, get
//! the configured colors unchanged.

use palette::Srgb;
use serde::{Deserialize, Serialize};

/// Share of the remaining distance to white added to each channel, in tenths.
const LIGHT_MIX_TENTHS: u16 = 3;

/// Host color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Everything the color transform needs to know about the render target.
///
/// Passed explicitly into every render call; rules never read global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorContext {
    pub theme: Theme,
    pub theme_aware: bool,
}

impl Default for ColorContext {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            theme_aware: true,
        }
    }
}

impl ColorContext {
    pub fn new(theme: Theme, theme_aware: bool) -> Self {
        Self { theme, theme_aware }
    }

    /// Returns true if colors will be modified under this context.
    pub fn mutes_colors(&self) -> bool {
        self.theme_aware && self.theme == Theme::Light
    }
}

/// Adjusts a color for the given context.
///
/// Only `#rrggbb` values are transformed; named colors, shorthand hex and
/// anything unparsable pass through untouched.
///
/// ```
/// use balloon_avatar::{adjust_color, ColorContext, Theme};
///
/// let light = ColorContext::new(Theme::Light, true);
/// assert_eq!(adjust_color("#000000", &light), "#4c4c4c");
/// assert_eq!(adjust_color("red", &light), "red");
/// ```
pub fn adjust_color(color: &str, ctx: &ColorContext) -> String {
    if !ctx.mutes_colors() {
        return color.to_string();
    }

    match parse_hex(color) {
        Some(rgb) => to_hex(mute(rgb)),
        None => color.to_string(),
    }
}

/// Parses a strict `#rrggbb` color.
pub fn parse_hex(color: &str) -> Option<Srgb<u8>> {
    let digits = color.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Formats a color as lowercase `#rrggbb`.
pub fn to_hex(rgb: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// Mixes each channel toward white, rounding down.
fn mute(rgb: Srgb<u8>) -> Srgb<u8> {
    let channel = |c: u8| {
        let c = c as u16;
        (c + (255 - c) * LIGHT_MIX_TENTHS / 10) as u8
    };
    Srgb::new(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

/// The two user colors after theme adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemedColors {
    /// Shape fill.
    pub primary: String,
    /// Pattern, string and initials.
    pub detail: String,
}

impl ThemedColors {
    pub fn new(primary: &str, detail: &str, ctx: &ColorContext) -> Self {
        Self {
            primary: adjust_color(primary, ctx),
            detail: adjust_color(detail, ctx),
        }
    }
}
