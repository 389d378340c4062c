//! Caption rasterization with ab_glyph
//!
//! Font sizes are em sizes in logical pixels, matching how captions are
//! sized in the editor.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use anyhow::{Context, Result, anyhow};
use image::RgbaImage;

use crate::domain::TextColor;

/// Fonts probed when no font is configured
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Width of one glyph relative to the em size when no font is available
const FALLBACK_ADVANCE: f32 = 0.6;
/// Line height relative to the em size when no font is available
const FALLBACK_LINE_HEIGHT: f32 = 1.2;

/// Rasterizes captions onto RGBA images. Cheap to clone.
#[derive(Clone)]
pub struct TextRenderer {
    font: Arc<FontVec>,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer").finish_non_exhaustive()
    }
}

impl TextRenderer {
    /// Create a renderer from font file data
    pub fn new(font_data: Vec<u8>) -> Result<Self> {
        let font =
            FontVec::try_from_vec(font_data).map_err(|e| anyhow!("failed to parse font data: {e}"))?;
        Ok(Self {
            font: Arc::new(font),
        })
    }

    /// Load a font from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read font {}", path.display()))?;
        Self::new(data).with_context(|| format!("failed to load font {}", path.display()))
    }

    /// Load the configured font, or the first usable system font
    pub fn discover(configured: Option<&Path>) -> Option<Self> {
        let candidates = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(renderer) => {
                    log::debug!("Using caption font {}", path.display());
                    return Some(renderer);
                }
                Err(err) => log::warn!("{err:#}"),
            }
        }
        log::warn!("No usable font found, captions will not be drawn");
        None
    }

    /// Convert an em size into the scale ab_glyph expects (ascent to descent)
    fn px_scale(&self, em_size: f32) -> PxScale {
        let units_per_em = self.font.units_per_em().unwrap_or(1000.0);
        PxScale::from(em_size * self.font.height_unscaled() / units_per_em)
    }

    fn line_height(&self, em_size: f32) -> f32 {
        let scaled = self.font.as_scaled(self.px_scale(em_size));
        scaled.height() + scaled.line_gap()
    }

    fn line_width(&self, line: &str, em_size: f32) -> f32 {
        let scaled = self.font.as_scaled(self.px_scale(em_size));
        let mut width = 0.0f32;
        let mut prev_glyph_id = None;
        for ch in line.chars() {
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = prev_glyph_id {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev_glyph_id = Some(glyph_id);
        }
        width
    }

    /// Size of a multi-line caption in pixels
    pub fn measure(&self, text: &str, em_size: f32) -> (f32, f32) {
        let line_height = self.line_height(em_size);
        let mut width = 0.0f32;
        let mut lines = 0;
        for line in text.split('\n') {
            width = width.max(self.line_width(line, em_size));
            lines += 1;
        }
        (width, line_height * lines as f32)
    }

    /// Draw a multi-line caption with its top-left corner at (x, y)
    pub fn draw(
        &self,
        img: &mut RgbaImage,
        text: &str,
        x: f32,
        y: f32,
        em_size: f32,
        color: TextColor,
    ) {
        let scale = self.px_scale(em_size);
        let scaled = self.font.as_scaled(scale);
        let line_height = scaled.height() + scaled.line_gap();
        let [r, g, b, _] = color.to_rgba_u8();
        let (img_width, img_height) = (img.width() as i32, img.height() as i32);

        for (row, line) in text.split('\n').enumerate() {
            let baseline = y + scaled.ascent() + line_height * row as f32;
            let mut cursor_x = x;
            let mut prev_glyph_id = None;

            for ch in line.chars() {
                let glyph_id = scaled.glyph_id(ch);
                if let Some(prev) = prev_glyph_id {
                    cursor_x += scaled.kern(prev, glyph_id);
                }

                let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline));
                // Off-image glyphs are skipped before ab_glyph allocates their coverage
                let outlined = self
                    .font
                    .outline_glyph(glyph)
                    .filter(|o| overlaps_image(&o.px_bounds(), img_width, img_height));
                if let Some(outlined) = outlined {
                    let bounds = outlined.px_bounds();
                    outlined.draw(|gx, gy, coverage| {
                        let px = bounds.min.x as i32 + gx as i32;
                        let py = bounds.min.y as i32 + gy as i32;
                        if px < 0 || py < 0 || px >= img_width || py >= img_height {
                            return;
                        }
                        let pixel = img.get_pixel_mut(px as u32, py as u32);
                        blend_over(&mut pixel.0, [r, g, b], coverage.clamp(0.0, 1.0));
                    });
                }

                cursor_x += scaled.h_advance(glyph_id);
                prev_glyph_id = Some(glyph_id);
            }
        }
    }
}

/// Whether glyph pixel bounds touch the image at all
fn overlaps_image(bounds: &ab_glyph::Rect, width: i32, height: i32) -> bool {
    bounds.max.x > 0.0
        && bounds.max.y > 0.0
        && bounds.min.x < width as f32
        && bounds.min.y < height as f32
}

/// Size estimate used for layout when no font could be loaded
pub fn estimate_size(text: &str, em_size: f32) -> (f32, f32) {
    let mut width = 0usize;
    let mut lines = 0;
    for line in text.split('\n') {
        width = width.max(line.chars().count());
        lines += 1;
    }
    (
        width as f32 * em_size * FALLBACK_ADVANCE,
        lines as f32 * em_size * FALLBACK_LINE_HEIGHT,
    )
}

/// Source-over blend of an opaque color with partial coverage onto a straight-alpha pixel
fn blend_over(dst: &mut [u8; 4], src: [u8; 3], coverage: f32) {
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = coverage + dst_a * (1.0 - coverage);
    if out_a <= 0.0 {
        return;
    }
    for i in 0..3 {
        let s = src[i] as f32;
        let d = dst[i] as f32;
        dst[i] = ((s * coverage + d * dst_a * (1.0 - coverage)) / out_a).round() as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_full_coverage_replaces_pixel() {
        let mut px = [255, 255, 255, 255];
        blend_over(&mut px, [10, 20, 30], 1.0);
        assert_eq!(px, [10, 20, 30, 255]);
    }

    #[test]
    fn blend_half_coverage_mixes() {
        let mut px = [255, 255, 255, 255];
        blend_over(&mut px, [0, 0, 0], 0.5);
        assert_eq!(px, [128, 128, 128, 255]);
    }

    #[test]
    fn blend_onto_transparent_keeps_color() {
        let mut px = [0, 0, 0, 0];
        blend_over(&mut px, [200, 100, 50], 0.5);
        assert_eq!(px, [200, 100, 50, 128]);
    }

    #[test]
    fn estimate_grows_with_lines_and_width() {
        let (w1, h1) = estimate_size("abc", 20.0);
        let (w2, h2) = estimate_size("abcdef\nx", 20.0);
        assert!(w2 > w1);
        assert!(h2 > h1);
        assert_eq!(estimate_size("", 20.0).0, 0.0);
    }

    #[test]
    fn glyphs_outside_the_image_are_culled() {
        let rect = |x0: f32, y0: f32, x1: f32, y1: f32| ab_glyph::Rect {
            min: point(x0, y0),
            max: point(x1, y1),
        };
        assert!(overlaps_image(&rect(10.0, 10.0, 20.0, 20.0), 500, 700));
        assert!(overlaps_image(&rect(-5000.0, -5000.0, 1.0, 1.0), 500, 700));
        assert!(!overlaps_image(&rect(500.0, 0.0, 90000.0, 90000.0), 500, 700));
        assert!(!overlaps_image(&rect(0.0, 700.0, 40.0, 80000.0), 500, 700));
        assert!(!overlaps_image(&rect(-40.0, -40.0, 0.0, 0.0), 500, 700));
    }

    #[test]
    fn huge_caption_far_off_the_image_draws_nothing() {
        let Some(fonts) = TextRenderer::discover(None) else {
            return;
        };
        let mut img = RgbaImage::from_pixel(50, 50, image::Rgba([255, 255, 255, 255]));
        fonts.draw(&mut img, "Enter text", 5000.0, 5000.0, 400.0, TextColor::BLACK);
        assert!(img.pixels().all(|px| px.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn unparsable_font_is_an_error() {
        assert!(TextRenderer::new(b"not a font".to_vec()).is_err());
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TextRenderer::from_path(&dir.path().join("missing.ttf")).is_err());
    }
}
