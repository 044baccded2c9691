//! Rendered surface descriptor
//!
//! The backdrop draws into one full-viewport canvas that the host shell keeps
//! mounted behind its content. Engine backends bind to the canvas by its
//! stable identifier, so the descriptor carries identity and geometry only;
//! the actual drawing target lives on the engine side.

use crate::Viewport;

/// Stable element id engine backends look up when binding.
pub const DEFAULT_CANVAS_ID: &str = "liquid-canvas";

/// A full-viewport rendering surface.
///
/// The surface never scrolls and does not accept touch gestures; the effect
/// behind the page must not steal input from the content above it.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    /// Element id used by engine backends to locate the surface
    pub id: String,
    /// CSS-pixel geometry captured at mount time
    pub viewport: Viewport,
}

impl Canvas {
    /// Create the standard full-viewport surface for a mount.
    pub fn full_viewport(viewport: Viewport) -> Self {
        Canvas {
            id: DEFAULT_CANVAS_ID.to_string(),
            viewport,
        }
    }

    /// Create a surface with a caller-chosen id (multiple backdrops per page).
    pub fn with_id(id: impl Into<String>, viewport: Viewport) -> Self {
        Canvas {
            id: id.into(),
            viewport,
        }
    }
}
