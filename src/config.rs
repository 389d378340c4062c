//! Configuration persistence for cardpea settings

use std::path::PathBuf;

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

use crate::fl;

/// Folder that exported cards are written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportLocation {
    #[default]
    Downloads,
    Pictures,
    Documents,
}

impl ExportLocation {
    pub const ALL: [ExportLocation; 3] = [
        ExportLocation::Downloads,
        ExportLocation::Pictures,
        ExportLocation::Documents,
    ];

    /// Resolve to a directory, falling back to a folder in the home directory
    pub fn dir(self) -> Option<PathBuf> {
        match self {
            ExportLocation::Downloads => {
                dirs::download_dir().or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
            }
            ExportLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            ExportLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
        }
    }

    /// Label shown in the settings dropdown
    pub fn label(self) -> String {
        match self {
            ExportLocation::Downloads => fl!("export-location-downloads"),
            ExportLocation::Pictures => fl!("export-location-pictures"),
            ExportLocation::Documents => fl!("export-location-documents"),
        }
    }

    pub fn index(self) -> usize {
        match self {
            ExportLocation::Downloads => 0,
            ExportLocation::Pictures => 1,
            ExportLocation::Documents => 2,
        }
    }
}

/// Smallest and largest accepted export pixel ratio
pub const EXPORT_SCALE_RANGE: (f32, f32) = (1.0, 4.0);

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, CosmicConfigEntry)]
#[version = 1]
pub struct CardPeaConfig {
    /// Where exported cards are written
    pub export_location: ExportLocation,
    /// Output pixels per card pixel (1.0-4.0)
    #[serde(default = "default_export_scale")]
    pub export_scale: f32,
    /// Caption font; system fonts are probed when unset
    #[serde(default)]
    pub font_path: Option<String>,
    /// Directory holding the background images
    #[serde(default)]
    pub asset_dir: Option<String>,
}

fn default_export_scale() -> f32 {
    1.0
}

impl CardPeaConfig {
    /// Configuration ID for cosmic-config
    pub const ID: &'static str = "io.github.cardpea.CardPea";

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => match Self::get_entry(&config) {
                Ok(entry) => entry,
                Err((errs, entry)) => {
                    log::warn!("Error loading config, using defaults: {:?}", errs);
                    entry
                }
            },
            Err(err) => {
                log::warn!("Could not create config handler: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => {
                if let Err(err) = self.write_entry(&config) {
                    log::error!("Failed to save config: {:?}", err);
                }
            }
            Err(err) => {
                log::error!("Could not create config handler for saving: {:?}", err);
            }
        }
    }

    /// Export scale limited to the supported range
    pub fn clamped_export_scale(&self) -> f32 {
        if self.export_scale.is_finite() {
            self.export_scale
                .clamp(EXPORT_SCALE_RANGE.0, EXPORT_SCALE_RANGE.1)
        } else {
            default_export_scale()
        }
    }

    /// Directory the background catalog paths are relative to: the configured one,
    /// else an installed one. `None` selects the images bundled into the binary.
    pub fn asset_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.asset_dir {
            return Some(PathBuf::from(dir));
        }
        dirs::data_dir()
            .map(|d| d.join("cardpea"))
            .into_iter()
            .chain(std::iter::once(PathBuf::from("/usr/share/cardpea")))
            .find(|dir| dir.join("images").is_dir())
    }

    pub fn font_path(&self) -> Option<PathBuf> {
        self.font_path.as_ref().map(PathBuf::from)
    }
}

impl Default for CardPeaConfig {
    fn default() -> Self {
        Self {
            // Exports land where a browser would put a download
            export_location: ExportLocation::Downloads,
            export_scale: default_export_scale(),
            font_path: None,
            asset_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_scale_is_clamped() {
        let mut config = CardPeaConfig::default();
        assert_eq!(config.clamped_export_scale(), 1.0);
        config.export_scale = 0.25;
        assert_eq!(config.clamped_export_scale(), 1.0);
        config.export_scale = 9.0;
        assert_eq!(config.clamped_export_scale(), 4.0);
        config.export_scale = f32::NAN;
        assert_eq!(config.clamped_export_scale(), 1.0);
    }

    #[test]
    fn configured_asset_dir_wins() {
        let config = CardPeaConfig {
            asset_dir: Some("/tmp/cards".into()),
            ..Default::default()
        };
        assert_eq!(config.asset_dir(), Some(PathBuf::from("/tmp/cards")));
    }

    #[test]
    fn location_indices_match_order() {
        for (i, location) in ExportLocation::ALL.iter().enumerate() {
            assert_eq!(location.index(), i);
        }
    }
}
