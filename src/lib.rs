//! Liquid backdrop engine API
//!
//! A hero-backdrop pipeline for Rust: a typed text/gradient composition is
//! rasterized into a still image at runtime, then fed as the texture of an
//! external real-time liquid-surface engine bound to a full-viewport canvas.
//!
//! # Features
//!
//! - **Deterministic composition**: configuration + viewport in, encoded PNG
//!   (and `data:` URL) out, with the layout exposed for testing
//! - **Adapter-based engine boundary**: any backend satisfying the
//!   [`LiquidEngine`] trait can run the effect; a no-op backend ships for
//!   tests and headless use
//! - **Strict lifecycle**: one live engine handle per canvas, disposal
//!   sequenced before re-creation, stale async loads neutralized
//!
//! # Example
//!
//! ```no_run
//! use liquidfx::{BackdropConfig, LiquidBackdrop, Viewport};
//! use liquidfx::engine::LinkedLoader;
//! use std::sync::Arc;
//!
//! let config = BackdropConfig {
//!     heading_lines: vec!["Liquid".to_string(), "Effect".to_string()],
//!     sub_label: Some("Interactive UI Component".to_string()),
//!     ..Default::default()
//! };
//!
//! let loader = Arc::new(LinkedLoader::with_noop());
//! let mut backdrop = LiquidBackdrop::new(config, loader);
//! backdrop.mount(Viewport { width: 1280, height: 800, dpr: 1.0 });
//! // ... host runs; the engine animates on its own ...
//! backdrop.unmount();
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod canvas;
pub mod color;
pub mod component;
pub mod compose;
pub mod engine;

pub use canvas::{Canvas, DEFAULT_CANVAS_ID};
pub use component::{LiquidBackdrop, Phase};
pub use compose::{ComposedImage, Composer, TextLayout};
pub use engine::{EffectController, EngineModule, LiquidEngine, Material};

/// Configuration for the backdrop composition
///
/// All fields are plain values; two configurations compare equal exactly when
/// every field matches, and the component uses that identity to decide whether
/// an update needs a re-composition. The defaults produce a near-white plate
/// with dark text and no copy.
///
/// # Examples
///
/// ```
/// let cfg = liquidfx::BackdropConfig::default();
/// assert!(cfg.heading_lines.is_empty());
/// assert_eq!(cfg.background_color, "#fafafa");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Heading lines, rendered top to bottom as one centered block
    pub heading_lines: Vec<String>,
    /// Small upper-cased label above the heading
    pub sub_label: Option<String>,
    /// Muted line below the divider
    pub tagline: Option<String>,
    /// CSS color for the base plate
    pub background_color: String,
    /// CSS color for heading, labels and divider
    pub text_color: String,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            heading_lines: Vec::new(),
            sub_label: None,
            tagline: None,
            background_color: "#fafafa".to_string(),
            text_color: "#1d1d1f".to_string(),
        }
    }
}

/// Viewport dimensions in CSS pixels plus the device pixel ratio
///
/// Captured once when the component mounts; the physical raster size is
/// `round(width * dpr)` by `round(height * dpr)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub dpr: f32,
}

impl Viewport {
    /// Physical pixel dimensions of the raster surface.
    pub fn physical(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.dpr).round() as u32,
            (self.height as f32 * self.dpr).round() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            dpr: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackdropConfig::default();
        assert!(config.heading_lines.is_empty());
        assert!(config.sub_label.is_none());
        assert_eq!(config.background_color, "#fafafa");
        assert_eq!(config.text_color, "#1d1d1f");
    }

    #[test]
    fn test_config_identity() {
        let a = BackdropConfig {
            heading_lines: vec!["Liquid".to_string()],
            ..Default::default()
        };
        let b = a.clone();
        assert_eq!(a, b);
        let c = BackdropConfig {
            text_color: "#000000".to_string(),
            ..a.clone()
        };
        assert_ne!(a, c);
    }

    #[test]
    fn test_viewport_physical() {
        let vp = Viewport {
            width: 1280,
            height: 800,
            dpr: 1.0,
        };
        assert_eq!(vp.physical(), (1280, 800));

        let retina = Viewport {
            width: 1280,
            height: 800,
            dpr: 2.0,
        };
        assert_eq!(retina.physical(), (2560, 1600));

        let fractional = Viewport {
            width: 1000,
            height: 500,
            dpr: 1.5,
        };
        assert_eq!(fractional.physical(), (1500, 750));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let cfg = BackdropConfig {
            heading_lines: vec!["Liquid".to_string(), "Effect".to_string()],
            sub_label: Some("demo".to_string()),
            tagline: Some("built".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: BackdropConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
