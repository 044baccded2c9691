//! Placement math for the backdrop composition
//!
//! Everything here is plain geometry in CSS pixels, derived from the viewport
//! and the configuration only. Keeping it separate from painting lets tests
//! assert placement without rasterizing a single glyph.

use crate::{BackdropConfig, Viewport};

/// Divider bar width in CSS pixels
pub const DIVIDER_WIDTH: f32 = 60.0;
/// Divider bar height in CSS pixels (sub-pixel, drawn anti-aliased)
pub const DIVIDER_HEIGHT: f32 = 0.5;

/// Heading line height as a multiple of the heading font size
pub const HEADING_LINE_HEIGHT: f32 = 1.08;

/// A rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A vertical extent in CSS pixels, used to bound where a layer may paint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub top: f32,
    pub bottom: f32,
}

impl Band {
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom
    }
}

/// Anchor for one of the small labels (font size plus its anchor line)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSlot {
    pub font_size: f32,
    /// Baseline y for the eyebrow label, vertical middle for the tagline
    pub y: f32,
}

/// Computed placement for every layer of the composition
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub width: f32,
    pub height: f32,
    pub eyebrow: Option<LabelSlot>,
    pub heading_font_size: f32,
    pub line_height: f32,
    pub block_top: f32,
    pub block_bottom: f32,
    /// Vertical middle of each heading line, top to bottom
    pub line_middles: Vec<f32>,
    pub divider: Rect,
    pub tagline: Option<LabelSlot>,
}

/// Compute the full layout for a configuration at a viewport.
///
/// The heading block is centered on the vertical midpoint: with `n` lines of
/// height `line_height` the block spans `mid - total/2 .. mid + total/2`, and
/// the divider hangs `0.018 * width` below the block. An empty heading
/// collapses the block to the midpoint, so the divider sits just below it.
pub fn compute(config: &BackdropConfig, viewport: Viewport) -> TextLayout {
    let w = viewport.width as f32;
    let h = viewport.height as f32;
    let mid = h / 2.0;

    let heading_font_size = (0.13 * w).min(0.19 * h);
    let line_height = heading_font_size * HEADING_LINE_HEIGHT;
    let total = config.heading_lines.len() as f32 * line_height;
    let block_top = mid - total / 2.0;
    let block_bottom = mid + total / 2.0;

    let line_middles = (0..config.heading_lines.len())
        .map(|i| block_top + line_height / 2.0 + i as f32 * line_height)
        .collect();

    let eyebrow = config.sub_label.as_ref().map(|_| LabelSlot {
        font_size: (0.009 * w).max(11.0),
        y: mid - 0.095 * w,
    });

    let divider_y = block_bottom + 0.018 * w;
    let divider = Rect {
        x: w / 2.0 - DIVIDER_WIDTH / 2.0,
        y: divider_y,
        width: DIVIDER_WIDTH,
        height: DIVIDER_HEIGHT,
    };

    let tagline = config.tagline.as_ref().map(|_| LabelSlot {
        font_size: (0.01 * w).max(11.0),
        y: divider_y + 0.025 * w,
    });

    TextLayout {
        width: w,
        height: h,
        eyebrow,
        heading_font_size,
        line_height,
        block_top,
        block_bottom,
        line_middles,
        divider,
        tagline,
    }
}

impl TextLayout {
    /// Vertical bands that bound every painted text/divider layer.
    ///
    /// Bands are deliberately generous (glyph ascenders and descenders stay
    /// well inside one line height of their anchor), so any pixel affected by
    /// the text color falls inside some band.
    pub fn vertical_bands(&self) -> Vec<Band> {
        let mut bands = Vec::new();
        if let Some(eyebrow) = &self.eyebrow {
            bands.push(Band {
                top: eyebrow.y - 1.5 * eyebrow.font_size,
                bottom: eyebrow.y + 0.75 * eyebrow.font_size,
            });
        }
        for &middle in &self.line_middles {
            bands.push(Band {
                top: middle - self.line_height,
                bottom: middle + self.line_height,
            });
        }
        bands.push(Band {
            top: self.divider.y - 1.5,
            bottom: self.divider.y + self.divider.height + 1.5,
        });
        if let Some(tagline) = &self.tagline {
            bands.push(Band {
                top: tagline.y - 1.5 * tagline.font_size,
                bottom: tagline.y + 1.5 * tagline.font_size,
            });
        }
        bands
    }
}
