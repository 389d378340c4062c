//! Card rendering using image + tiny-skia
//!
//! The same code path draws the on-screen preview and the exported file.
//! Editing affordances (selection outline, remove handles) are only drawn in
//! preview mode.

use std::path::PathBuf;

use anyhow::{Context, Result};
use image::{RgbaImage, imageops::FilterType};
use rust_embed::RustEmbed;
use tiny_skia::{LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{self, remove_handle, text_box};
use super::text::TextRenderer;
use crate::domain::{CARD_HEIGHT, CARD_WIDTH, Rect, TextBoxId};
use crate::session::state::CardComposition;

/// Which flavor of the card to draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderMode {
    /// On-screen editing view
    Preview {
        selection: Option<TextBoxId>,
        /// In-flight drag position overriding a box's stored position
        drag: Option<(TextBoxId, f32, f32)>,
    },
    /// Final image without editing affordances
    Export,
}

/// Background images shipped inside the binary, used when no asset directory exists
#[derive(RustEmbed)]
#[folder = "data/images/"]
#[prefix = "images/"]
struct BundledBackgrounds;

/// Background image decoded and scaled to a given card size
#[derive(Clone, Debug)]
struct ScaledBackground {
    reference: String,
    size: (u32, u32),
    image: Option<RgbaImage>,
}

/// Draws card compositions. Keeps the scaled background between frames.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    /// Directory holding the background images; bundled copies are used when unset
    asset_dir: Option<PathBuf>,
    fonts: Option<TextRenderer>,
    background: Option<ScaledBackground>,
}

impl CardRenderer {
    pub fn new(asset_dir: Option<PathBuf>, fonts: Option<TextRenderer>) -> Self {
        Self {
            asset_dir,
            fonts,
            background: None,
        }
    }

    pub fn fonts(&self) -> Option<&TextRenderer> {
        self.fonts.as_ref()
    }

    /// Render the card at `scale` pixels per logical pixel
    pub fn render(&mut self, card: &CardComposition, mode: RenderMode, scale: f32) -> RgbaImage {
        let width = ((CARD_WIDTH as f32) * scale).round().max(1.0) as u32;
        let height = ((CARD_HEIGHT as f32) * scale).round().max(1.0) as u32;

        let mut img = match card.background.as_deref() {
            Some(reference) => self
                .background(reference, width, height)
                .unwrap_or_else(|| blank(width, height)),
            None => blank(width, height),
        };

        let drag = match mode {
            RenderMode::Preview { drag, .. } => drag,
            RenderMode::Export => None,
        };

        for tb in &card.text_boxes {
            let (x, y) = position_of(tb.id, tb.x, tb.y, drag);
            if let Some(fonts) = &self.fonts {
                fonts.draw(
                    &mut img,
                    &tb.text,
                    (x + text_box::PADDING) * scale,
                    (y + text_box::PADDING) * scale,
                    tb.font_size * scale,
                    tb.color,
                );
            }
        }

        if let RenderMode::Preview { selection, drag } = mode {
            self.draw_affordances(&mut img, card, selection, drag, scale);
        }

        img
    }

    /// Scaled background, reusing the previous frame's when unchanged
    fn background(&mut self, reference: &str, width: u32, height: u32) -> Option<RgbaImage> {
        let cached = self
            .background
            .as_ref()
            .is_some_and(|bg| bg.reference == reference && bg.size == (width, height));

        if !cached {
            let image = match self.load_background(reference) {
                Ok(source) => {
                    let mut image = cover(&source, width, height);
                    flatten_onto_white(&mut image);
                    Some(image)
                }
                Err(err) => {
                    log::warn!("Failed to load background: {err:#}");
                    None
                }
            };
            self.background = Some(ScaledBackground {
                reference: reference.to_string(),
                size: (width, height),
                image,
            });
        }

        self.background.as_ref().and_then(|bg| bg.image.clone())
    }

    /// Decode a background from the asset directory, or from the bundled copies
    fn load_background(&self, reference: &str) -> Result<RgbaImage> {
        let image = match &self.asset_dir {
            Some(dir) => {
                let path = dir.join(reference);
                image::open(&path).with_context(|| format!("failed to open {}", path.display()))?
            }
            None => {
                let file = BundledBackgrounds::get(reference)
                    .with_context(|| format!("no bundled background {reference}"))?;
                image::load_from_memory(&file.data)
                    .with_context(|| format!("failed to decode bundled {reference}"))?
            }
        };
        Ok(image.into_rgba8())
    }

    fn draw_affordances(
        &self,
        img: &mut RgbaImage,
        card: &CardComposition,
        selection: Option<TextBoxId>,
        drag: Option<(TextBoxId, f32, f32)>,
        scale: f32,
    ) {
        if card.text_boxes.is_empty() {
            return;
        }

        with_pixmap(img, |pixmap| {
            for tb in &card.text_boxes {
                let (x, y) = position_of(tb.id, tb.x, tb.y, drag);

                if selection == Some(tb.id) {
                    let bounds = geometry::caption_bounds(tb, x, y, self.fonts.as_ref());
                    draw_outline(pixmap, &bounds, scale);
                }

                draw_remove_handle(pixmap, &geometry::remove_handle_bounds(x, y), scale);
            }
        });
    }
}

fn position_of(id: TextBoxId, x: f32, y: f32, drag: Option<(TextBoxId, f32, f32)>) -> (f32, f32) {
    match drag {
        Some((drag_id, dx, dy)) if drag_id == id => (dx, dy),
        _ => (x, y),
    }
}

fn blank(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]))
}

/// Scale preserving aspect ratio so the result fills the target, then center-crop
pub fn cover(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_w, src_h) = (source.width().max(1) as f64, source.height().max(1) as f64);
    let factor = (width as f64 / src_w).max(height as f64 / src_h);
    let scaled_w = ((src_w * factor).ceil() as u32).max(width);
    let scaled_h = ((src_h * factor).ceil() as u32).max(height);

    let scaled = image::imageops::resize(source, scaled_w, scaled_h, FilterType::Triangle);
    let x = (scaled_w - width) / 2;
    let y = (scaled_h - height) / 2;
    image::imageops::crop_imm(&scaled, x, y, width, height).to_image()
}

/// Composite translucent pixels over white, the card's base color.
/// Leaves every pixel opaque, so straight and premultiplied alpha agree.
fn flatten_onto_white(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let alpha = pixel.0[3] as u32;
        if alpha == 255 {
            continue;
        }
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        }
        pixel.0[3] = 255;
    }
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

fn draw_outline(pixmap: &mut Pixmap, bounds: &Rect, scale: f32) {
    let Some(rect) = tiny_skia::Rect::from_ltrb(
        bounds.left * scale,
        bounds.top * scale,
        bounds.right * scale,
        bounds.bottom * scale,
    ) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(53, 132, 228, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: (text_box::OUTLINE * scale).max(1.0),
        dash: tiny_skia::StrokeDash::new(vec![6.0 * scale, 4.0 * scale], 0.0),
        ..Default::default()
    };
    let path = PathBuilder::from_rect(rect);
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

fn draw_remove_handle(pixmap: &mut Pixmap, bounds: &Rect, scale: f32) {
    let cx = (bounds.left + bounds.right) * 0.5 * scale;
    let cy = (bounds.top + bounds.bottom) * 0.5 * scale;
    let radius = bounds.width() * 0.5 * scale;

    let mut paint = Paint::default();
    paint.anti_alias = true;

    if let Some(circle) = PathBuilder::from_circle(cx, cy, radius) {
        paint.set_color_rgba8(192, 28, 40, 230);
        pixmap.fill_path(
            &circle,
            &paint,
            tiny_skia::FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    // Cross inside the circle
    let arm = radius * 0.45;
    let mut pb = PathBuilder::new();
    pb.move_to(cx - arm, cy - arm);
    pb.line_to(cx + arm, cy + arm);
    pb.move_to(cx + arm, cy - arm);
    pb.line_to(cx - arm, cy + arm);
    let Some(cross) = pb.finish() else {
        return;
    };

    paint.set_color_rgba8(255, 255, 255, 255);
    let stroke = Stroke {
        width: (remove_handle::CROSS_THICKNESS * scale).max(1.0),
        line_cap: LineCap::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&cross, &paint, &stroke, Transform::identity(), None);
}
