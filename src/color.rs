//! CSS color parsing for configuration values
//!
//! Configuration colors arrive as CSS strings (`#rgb`, `#rrggbb`, `#rrggbbaa`,
//! `rgb(..)`, `rgba(..)`). They are parsed once per composition into a small
//! RGBA value that converts into the raster backend's color type with an
//! optional opacity multiplier.

use crate::{Error, Result};

/// An 8-bit straight-alpha RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    /// Convert into a raster color with an extra opacity multiplier applied to
    /// the alpha channel (`globalAlpha` semantics).
    pub fn to_skia(self, opacity: f32) -> tiny_skia::Color {
        let a = (self.a as f32 / 255.0) * opacity.clamp(0.0, 1.0);
        tiny_skia::Color::from_rgba(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            a,
        )
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
    }
}

/// Parse a CSS color string.
///
/// Supported forms: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
/// `rgba(r, g, b, a)` with a fractional alpha. Anything else is a
/// configuration error.
pub fn parse_css_color(input: &str) -> Result<Rgba> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex, input);
    }
    if let Some(body) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_components(body, input);
    }
    Err(Error::ConfigError(format!("unsupported color: {}", input)))
}

fn parse_hex(hex: &str, original: &str) -> Result<Rgba> {
    // Reject non-ASCII input before slicing into digit pairs
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::ConfigError(format!(
            "invalid hex color: {}",
            original
        )));
    }
    let byte = |range: &str| -> Result<u8> {
        u8::from_str_radix(range, 16)
            .map_err(|_| Error::ConfigError(format!("invalid hex color: {}", original)))
    };
    match hex.len() {
        // #rgb expands each nibble: f -> ff
        3 => {
            let nibble = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 16 + v);
            Ok(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, 255))
        }
        6 => Ok(Rgba::new(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            255,
        )),
        8 => Ok(Rgba::new(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => Err(Error::ConfigError(format!(
            "invalid hex color: {}",
            original
        ))),
    }
}

fn parse_components(body: &str, original: &str) -> Result<Rgba> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(Error::ConfigError(format!(
            "invalid rgb()/rgba() color: {}",
            original
        )));
    }
    let channel = |p: &str| -> Result<u8> {
        p.parse::<f32>()
            .map(|v| v.clamp(0.0, 255.0).round() as u8)
            .map_err(|_| Error::ConfigError(format!("invalid color channel in: {}", original)))
    };
    let alpha = if parts.len() == 4 {
        parts[3]
            .parse::<f32>()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .map_err(|_| Error::ConfigError(format!("invalid alpha in: {}", original)))?
    } else {
        255
    };
    Ok(Rgba::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}
