//! Editor session: card state plus everything the window needs to show it

use image::RgbaImage;

use crate::config::CardPeaConfig;
use crate::render::image::{CardRenderer, RenderMode};
use crate::render::text::TextRenderer;

use super::drag::DragTracker;
use super::state::CardState;

/// State behind the editor window, free of toolkit types
#[derive(Debug)]
pub struct Editor {
    pub card: CardState,
    pub drag: DragTracker,
    pub renderer: CardRenderer,
    pub config: CardPeaConfig,
    /// Font-size field contents; may hold text that does not parse yet
    pub font_size_input: String,
    /// Color field contents; may hold text that does not parse yet
    pub color_input: String,
    /// Last export outcome shown under the toolbar
    pub status: Option<String>,
    pub exports_in_flight: usize,
    /// Rendered card with editing affordances
    pub preview: RgbaImage,
    /// Bumped on every re-render so the window knows when to re-upload
    pub preview_generation: u64,
}

impl Editor {
    pub fn new(config: CardPeaConfig) -> Self {
        let fonts = TextRenderer::discover(config.font_path().as_deref());
        let renderer = CardRenderer::new(config.asset_dir(), fonts);
        Self::with_renderer(config, renderer)
    }

    pub fn with_renderer(config: CardPeaConfig, renderer: CardRenderer) -> Self {
        let mut editor = Self {
            card: CardState::default(),
            drag: DragTracker::default(),
            renderer,
            config,
            font_size_input: String::new(),
            color_input: String::new(),
            status: None,
            exports_in_flight: 0,
            preview: RgbaImage::new(1, 1),
            preview_generation: 0,
        };
        editor.sync_style_inputs();
        editor.refresh_preview();
        editor
    }

    /// Show the active box's style, or the defaults, in the style fields
    pub fn sync_style_inputs(&mut self) {
        self.font_size_input = format_font_size(self.card.displayed_font_size());
        self.color_input = self.card.displayed_color().to_string();
    }

    pub fn refresh_preview(&mut self) {
        let mode = RenderMode::Preview {
            selection: self.card.selection,
            drag: self.drag.preview(),
        };
        self.preview = self.renderer.render(&self.card.composition, mode, 1.0);
        self.preview_generation += 1;
    }
}

/// Whole sizes without a fraction, others with one decimal
pub fn format_font_size(size: f32) -> String {
    if size.fract() == 0.0 {
        format!("{size:.0}")
    } else {
        format!("{size:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_formatting() {
        assert_eq!(format_font_size(20.0), "20");
        assert_eq!(format_font_size(12.5), "12.5");
    }
}
