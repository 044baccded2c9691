//! Backdrop image composition
//!
//! Deterministic pipeline from configuration + viewport to an encoded still
//! image. All drawing happens in CSS-pixel coordinates under a device-scale
//! transform, so the physical raster is `round(width * dpr)` by
//! `round(height * dpr)` while the layout math stays resolution independent.
//!
//! Layer order is part of the contract: base plate, two multiply-blended
//! radial washes, then the text layers and divider in normal compositing.

pub mod layout;
pub mod typography;

pub use layout::{Band, LabelSlot, Rect, TextLayout};
pub use typography::{Anchor, GlyphPainter, TextStyle};

use base64::Engine as Base64Engine;
use cosmic_text::Weight;
use tiny_skia::{
    BlendMode, GradientStop, Paint, Pixmap, Point, RadialGradient, SpreadMode, Transform,
};

use crate::color::{parse_css_color, Rgba};
use crate::{BackdropConfig, Error, Result, Viewport};

// Wash constants are independent of configuration: a cool tint falling from
// the top and a warm tint rising from the bottom, both multiplied onto the
// base plate and fading to near-white.
const COOL_WASH_INNER: Rgba = Rgba::new(220, 225, 240, 153);
const WARM_WASH_INNER: Rgba = Rgba::new(240, 230, 220, 102);
const WASH_OUTER: Rgba = Rgba::opaque(250, 250, 250);

const EYEBROW_WEIGHT: Weight = Weight(600);
const HEADING_WEIGHT: Weight = Weight::BOLD;
const TAGLINE_WEIGHT: Weight = Weight::NORMAL;

const EYEBROW_OPACITY: f32 = 0.35;
const DIVIDER_OPACITY: f32 = 0.12;
const TAGLINE_OPACITY: f32 = 0.3;

// Letter tracking in em units, converted to pixels at each layer's font size
const EYEBROW_TRACKING_EM: f32 = 0.25;
const HEADING_TRACKING_EM: f32 = -0.04;
const TAGLINE_TRACKING_EM: f32 = 0.02;

/// An encoded backdrop image
///
/// Carries the physical pixel size and the PNG bytes; the image has no
/// identity beyond its content, so equality is byte equality and updates
/// replace the value wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ComposedImage {
    /// The `data:` URL form engine backends load as their texture source.
    pub fn data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Composes backdrop images.
///
/// Owns the glyph painter (font database + rasterization cache), which is
/// expensive to build, so one composer should be reused across compositions.
pub struct Composer {
    painter: GlyphPainter,
}

impl Composer {
    pub fn new() -> Self {
        Composer {
            painter: GlyphPainter::new(),
        }
    }

    /// Compose the configuration into an encoded PNG.
    pub fn compose(&mut self, config: &BackdropConfig, viewport: Viewport) -> Result<ComposedImage> {
        let pixmap = self.render(config, viewport)?;
        let png = pixmap
            .encode_png()
            .map_err(|e| Error::ComposeError(format!("png encoding failed: {}", e)))?;
        Ok(ComposedImage {
            width: pixmap.width(),
            height: pixmap.height(),
            png,
        })
    }

    /// Render the composition into a raw pixmap.
    ///
    /// Used by [`Self::compose`], by the CLI when writing PNG files directly,
    /// and by pixel-level tests.
    pub fn render(&mut self, config: &BackdropConfig, viewport: Viewport) -> Result<Pixmap> {
        let background = parse_css_color(&config.background_color)?;
        let text_color = parse_css_color(&config.text_color)?;

        let (pw, ph) = viewport.physical();
        let mut pixmap = Pixmap::new(pw, ph).ok_or_else(|| {
            Error::ComposeError(format!("raster surface unavailable for {}x{}", pw, ph))
        })?;

        let l = layout::compute(config, viewport);
        let dpr = viewport.dpr;
        let scale = Transform::from_scale(dpr, dpr);

        // 1. Base plate
        pixmap.fill(background.to_skia(1.0));

        // 2. Soft washes, multiplied onto the plate
        fill_wash(
            &mut pixmap,
            scale,
            Point::from_xy(l.width * 0.5, l.height * 0.1),
            l.width * 0.6,
            COOL_WASH_INNER,
            l.width,
            l.height,
        )?;
        fill_wash(
            &mut pixmap,
            scale,
            Point::from_xy(l.width * 0.5, l.height * 0.95),
            l.width * 0.5,
            WARM_WASH_INNER,
            l.width,
            l.height,
        )?;

        // 3. Eyebrow label, upper-cased with wide tracking
        if let (Some(text), Some(slot)) = (&config.sub_label, &l.eyebrow) {
            let style = TextStyle {
                font_size: slot.font_size,
                weight: EYEBROW_WEIGHT,
                tracking: EYEBROW_TRACKING_EM * slot.font_size,
                opacity: EYEBROW_OPACITY,
            };
            self.painter.draw_centered(
                &mut pixmap,
                &text.to_uppercase(),
                &style,
                text_color,
                l.width / 2.0,
                slot.y,
                Anchor::Baseline,
                dpr,
            );
        }

        // 4. Heading block, centered on the vertical midpoint
        let heading_style = TextStyle {
            font_size: l.heading_font_size,
            weight: HEADING_WEIGHT,
            tracking: HEADING_TRACKING_EM * l.heading_font_size,
            opacity: 1.0,
        };
        for (line, &middle) in config.heading_lines.iter().zip(&l.line_middles) {
            self.painter.draw_centered(
                &mut pixmap,
                line,
                &heading_style,
                text_color,
                l.width / 2.0,
                middle,
                Anchor::Middle,
                dpr,
            );
        }

        // 5. Divider bar below the heading block
        if let Some(rect) =
            tiny_skia::Rect::from_xywh(l.divider.x, l.divider.y, l.divider.width, l.divider.height)
        {
            let mut paint = Paint::default();
            paint.set_color(text_color.to_skia(DIVIDER_OPACITY));
            paint.anti_alias = true;
            pixmap.fill_rect(rect, &paint, scale, None);
        }

        // 6. Tagline below the divider
        if let (Some(text), Some(slot)) = (&config.tagline, &l.tagline) {
            let style = TextStyle {
                font_size: slot.font_size,
                weight: TAGLINE_WEIGHT,
                tracking: TAGLINE_TRACKING_EM * slot.font_size,
                opacity: TAGLINE_OPACITY,
            };
            self.painter.draw_centered(
                &mut pixmap,
                text,
                &style,
                text_color,
                l.width / 2.0,
                slot.y,
                Anchor::Middle,
                dpr,
            );
        }

        Ok(pixmap)
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_wash(
    pixmap: &mut Pixmap,
    scale: Transform,
    center: Point,
    radius: f32,
    inner: Rgba,
    width: f32,
    height: f32,
) -> Result<()> {
    let shader = RadialGradient::new(
        center,
        center,
        radius,
        vec![
            GradientStop::new(0.0, inner.to_skia(1.0)),
            GradientStop::new(1.0, WASH_OUTER.to_skia(1.0)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| Error::ComposeError("degenerate wash gradient".to_string()))?;

    let mut paint = Paint::default();
    paint.shader = shader;
    paint.blend_mode = BlendMode::Multiply;
    paint.anti_alias = false;

    let full = tiny_skia::Rect::from_xywh(0.0, 0.0, width, height)
        .ok_or_else(|| Error::ComposeError("empty wash area".to_string()))?;
    pixmap.fill_rect(full, &paint, scale, None);
    Ok(())
}
