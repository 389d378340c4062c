//! Writing the finished card to disk
//!
//! Export renders an owned snapshot of the composition, so edits made while
//! an export is running do not leak into the file.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::render::image::{CardRenderer, RenderMode};
use crate::session::state::CardComposition;

/// Name given to exported cards
pub const EXPORT_FILE_NAME: &str = "card.png";

/// Everything an export needs, detached from the UI state
#[derive(Clone, Debug)]
pub struct ExportJob {
    pub card: CardComposition,
    pub renderer: CardRenderer,
    pub dir: PathBuf,
    pub scale: f32,
}

/// Render and save the card, returning the written path
pub fn export_card(job: ExportJob) -> anyhow::Result<PathBuf> {
    let ExportJob {
        card,
        mut renderer,
        dir,
        scale,
    } = job;

    let image = renderer.render(&card, RenderMode::Export, scale);

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let mut file = tempfile::Builder::new()
        .prefix(".card-")
        .suffix(".png")
        .tempfile_in(&dir)?;
    write_png(&mut file, &image)?;

    // Claim the final name without clobbering a file created in the meantime
    let mut attempt = 0;
    loop {
        let path = unique_path(&dir, attempt);
        match file.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                file = err.file;
                attempt += 1;
            }
            Err(err) => {
                return Err(err.error).with_context(|| format!("failed to write {}", path.display()));
            }
        }
    }
}

/// First free `card.png`, `card (1).png`, ... starting after `skip` candidates
fn unique_path(dir: &Path, skip: usize) -> PathBuf {
    let (stem, ext) = EXPORT_FILE_NAME
        .rsplit_once('.')
        .unwrap_or((EXPORT_FILE_NAME, ""));
    (0..)
        .map(|n: usize| match n {
            0 => dir.join(EXPORT_FILE_NAME),
            n => dir.join(format!("{stem} ({n}).{ext}")),
        })
        .filter(|path| !path.exists())
        .nth(skip)
        .unwrap_or_else(|| dir.join(EXPORT_FILE_NAME))
}

pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CARD_HEIGHT, CARD_WIDTH};
    use crate::session::state::CardState;

    fn job(dir: &Path, card: CardComposition) -> ExportJob {
        ExportJob {
            card,
            renderer: CardRenderer::new(Some(dir.join("assets")), None),
            dir: dir.join("out"),
            scale: 1.0,
        }
    }

    #[test]
    fn exports_card_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_card(job(dir.path(), CardComposition::default())).unwrap();

        assert_eq!(path, dir.path().join("out").join("card.png"));
        let decoded = image::open(&path).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (CARD_WIDTH, CARD_HEIGHT));
    }

    #[test]
    fn export_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = export_card(job(dir.path(), CardComposition::default())).unwrap();
        let second = export_card(job(dir.path(), CardComposition::default())).unwrap();
        let third = export_card(job(dir.path(), CardComposition::default())).unwrap();

        assert_eq!(first.file_name().unwrap(), "card.png");
        assert_eq!(second.file_name().unwrap(), "card (1).png");
        assert_eq!(third.file_name().unwrap(), "card (2).png");
        let leftovers = std::fs::read_dir(dir.path().join("out"))
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".card-"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn export_omits_editing_affordances() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = CardState::default();
        let id = state.add();
        state.update_text(id, String::new());
        state.update_position(id, 100.0, 100.0);
        state.set_selection(id);

        let path = export_card(job(dir.path(), state.snapshot())).unwrap();
        let decoded = image::open(&path).unwrap().into_rgba8();
        assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn unique_path_skips_taken_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("card.png"), b"").unwrap();
        assert_eq!(unique_path(dir.path(), 0), dir.path().join("card (1).png"));
        assert_eq!(unique_path(dir.path(), 1), dir.path().join("card (2).png"));
    }
}
