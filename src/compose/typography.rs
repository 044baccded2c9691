//! Glyph shaping and rasterization for the composition
//!
//! Single-line strings are shaped with `cosmic-text`, rasterized through the
//! swash cache at device resolution, and blitted into the pixmap by hand so
//! that per-glyph letter tracking and layer opacity behave like the 2D canvas
//! text the composition models. Wrapping is never wanted here; callers
//! pre-segment their copy into lines.

use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent, Weight, Wrap,
};
use tiny_skia::Pixmap;

use crate::color::Rgba;

/// Middle-anchored text places the em-box midpoint on the anchor line; the
/// baseline sits this fraction of the font size below that midpoint.
const MIDDLE_BASELINE_SHIFT: f32 = 0.35;

/// How a drawn line attaches to its anchor y coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Anchor is the alphabetic baseline
    Baseline,
    /// Anchor is the vertical middle of the em box
    Middle,
}

/// Style for one drawn line
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Font size in CSS pixels
    pub font_size: f32,
    pub weight: Weight,
    /// Extra advance between consecutive glyphs, CSS pixels (may be negative)
    pub tracking: f32,
    /// Layer opacity multiplier on top of the color's own alpha
    pub opacity: f32,
}

/// Owns the font database and glyph cache across compositions.
///
/// Building a `FontSystem` scans system fonts and is by far the most
/// expensive part of composing, so the painter is created once and reused.
pub struct GlyphPainter {
    font_system: FontSystem,
    cache: SwashCache,
}

impl GlyphPainter {
    pub fn new() -> Self {
        GlyphPainter {
            font_system: FontSystem::new(),
            cache: SwashCache::new(),
        }
    }

    /// Draw one line of text horizontally centered on `center_x`.
    ///
    /// Coordinates are CSS pixels; rasterization happens at `dpr` scale.
    /// Tracking is applied between consecutive glyphs and the centering uses
    /// the tracked width, so wide tracking stays visually centered. With no
    /// usable fonts the line shapes to nothing and the call is a no-op.
    pub fn draw_centered(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        style: &TextStyle,
        color: Rgba,
        center_x: f32,
        anchor_y: f32,
        anchor: Anchor,
        dpr: f32,
    ) {
        if text.is_empty() || style.opacity <= 0.0 {
            return;
        }

        let metrics = Metrics::new(style.font_size, style.font_size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_wrap(&mut self.font_system, Wrap::None);
        buffer.set_size(&mut self.font_system, Some(1_000_000.0), Some(1_000_000.0));
        buffer.set_text(
            &mut self.font_system,
            text,
            Attrs::new().family(Family::SansSerif).weight(style.weight),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let run = match buffer.layout_runs().next() {
            Some(run) => run,
            None => return,
        };

        let natural_width = run
            .glyphs
            .last()
            .map(|g| g.x + g.w)
            .unwrap_or(0.0);
        let gaps = run.glyphs.len().saturating_sub(1) as f32;
        let tracked_width = natural_width + style.tracking * gaps;
        let start_x = center_x - tracked_width / 2.0;

        let baseline = match anchor {
            Anchor::Baseline => anchor_y,
            Anchor::Middle => anchor_y + MIDDLE_BASELINE_SHIFT * style.font_size,
        };
        let baseline_dev = (baseline * dpr).round() as i32;

        for (i, glyph) in run.glyphs.iter().enumerate() {
            let physical = glyph.physical((start_x + style.tracking * i as f32, 0.0), dpr);
            let image = match self
                .cache
                .get_image_uncached(&mut self.font_system, physical.cache_key)
            {
                Some(image) => image,
                None => continue,
            };
            let origin_x = physical.x + image.placement.left;
            let origin_y = baseline_dev + physical.y - image.placement.top;
            blit_glyph(pixmap, &image, origin_x, origin_y, color, style.opacity);
        }
    }
}

impl Default for GlyphPainter {
    fn default() -> Self {
        Self::new()
    }
}

fn blit_glyph(
    pixmap: &mut Pixmap,
    image: &cosmic_text::SwashImage,
    origin_x: i32,
    origin_y: i32,
    color: Rgba,
    opacity: f32,
) {
    let width = image.placement.width as i32;
    let height = image.placement.height as i32;
    let base_alpha = (color.a as f32 / 255.0) * opacity;
    let (r, g, b) = (
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
    );

    match image.content {
        SwashContent::Mask => {
            for row in 0..height {
                for col in 0..width {
                    let coverage = image.data[(row * width + col) as usize];
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = (coverage as f32 / 255.0) * base_alpha;
                    blend_pixel(pixmap, origin_x + col, origin_y + row, r, g, b, alpha);
                }
            }
        }
        SwashContent::Color => {
            for row in 0..height {
                for col in 0..width {
                    let idx = ((row * width + col) * 4) as usize;
                    let alpha = (image.data[idx + 3] as f32 / 255.0) * opacity;
                    if alpha <= 0.0 {
                        continue;
                    }
                    blend_pixel(
                        pixmap,
                        origin_x + col,
                        origin_y + row,
                        image.data[idx] as f32 / 255.0,
                        image.data[idx + 1] as f32 / 255.0,
                        image.data[idx + 2] as f32 / 255.0,
                        alpha,
                    );
                }
            }
        }
        // Subpixel masks are never requested by this pipeline
        SwashContent::SubpixelMask => {}
    }
}

/// Source-over blend of one straight-alpha pixel into the premultiplied pixmap.
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, r: f32, g: f32, b: f32, alpha: f32) {
    if x < 0 || y < 0 || x >= pixmap.width() as i32 || y >= pixmap.height() as i32 {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let idx = (y as u32 * pixmap.width() + x as u32) as usize;
    let pixels = pixmap.pixels_mut();
    let dst = pixels[idx];

    let inv = 1.0 - alpha;
    let out_r = r * alpha + (dst.red() as f32 / 255.0) * inv;
    let out_g = g * alpha + (dst.green() as f32 / 255.0) * inv;
    let out_b = b * alpha + (dst.blue() as f32 / 255.0) * inv;
    let out_a = alpha + (dst.alpha() as f32 / 255.0) * inv;

    let a8 = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    let r8 = ((out_r * 255.0).round().clamp(0.0, 255.0) as u8).min(a8);
    let g8 = ((out_g * 255.0).round().clamp(0.0, 255.0) as u8).min(a8);
    let b8 = ((out_b * 255.0).round().clamp(0.0, 255.0) as u8).min(a8);
    if let Some(px) = tiny_skia::PremultipliedColorU8::from_rgba(r8, g8, b8, a8) {
        pixels[idx] = px;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_pixmap() -> Pixmap {
        let mut pixmap = Pixmap::new(16, 16).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        pixmap
    }

    #[test]
    fn blend_full_alpha_replaces_pixel() {
        let mut pixmap = white_pixmap();
        blend_pixel(&mut pixmap, 4, 4, 0.0, 0.0, 0.0, 1.0);
        let px = pixmap.pixels()[4 * 16 + 4];
        assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (0, 0, 0, 255));
    }

    #[test]
    fn blend_half_alpha_mixes_with_destination() {
        let mut pixmap = white_pixmap();
        blend_pixel(&mut pixmap, 0, 0, 0.0, 0.0, 0.0, 0.5);
        let px = pixmap.pixels()[0];
        // 50% black over white lands mid-gray
        assert!((px.red() as i32 - 128).abs() <= 1);
        assert_eq!(px.alpha(), 255);
    }

    #[test]
    fn blend_out_of_bounds_is_ignored() {
        let mut pixmap = white_pixmap();
        blend_pixel(&mut pixmap, -1, 0, 0.0, 0.0, 0.0, 1.0);
        blend_pixel(&mut pixmap, 0, 99, 0.0, 0.0, 0.0, 1.0);
        assert!(pixmap.pixels().iter().all(|p| p.red() == 255));
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut painter = GlyphPainter::new();
        let mut pixmap = white_pixmap();
        let style = TextStyle {
            font_size: 12.0,
            weight: Weight::NORMAL,
            tracking: 0.0,
            opacity: 1.0,
        };
        painter.draw_centered(
            &mut pixmap,
            "",
            &style,
            Rgba::opaque(0, 0, 0),
            8.0,
            8.0,
            Anchor::Middle,
            1.0,
        );
        assert!(pixmap.pixels().iter().all(|p| p.red() == 255));
    }
}
