use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// logical pixels
    pub window_size: (f32, f32),
    /// close the window as soon as the last label is placed
    pub close_on_complete: bool,
    pub overlay: OverlaySettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            window_size: (1000.0, 1000.0),
            close_on_complete: false,
            overlay: OverlaySettings::default(),
        }
    }
}

/// Colours are `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    pub marker_color: String,
    pub marker_radius: f32,
    pub text_color: String,
    pub text_background: String,
    pub text_size: f32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        OverlaySettings {
            marker_color: "#FF0000".to_string(),
            marker_radius: 4.0,
            text_color: "#000000".to_string(),
            text_background: "#FFFFFF55".to_string(),
            text_size: 14.0,
        }
    }
}

impl AppSettings {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = toml::to_string_pretty(self).context("Failed to serialize AppSettings to TOML")?;
        std::fs::write(&path, s)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings: AppSettings =
            toml::from_str(&s).with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("read settings from {}", path.display());
        Ok(settings)
    }

    /// Like [`AppSettings::read_from_file`], but a missing file gives the defaults.
    pub fn read_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::read_from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = AppSettings::default();
        settings.close_on_complete = true;
        settings.overlay.marker_color = "#00FF00".to_string();
        settings.save_to_file(&path).unwrap();

        let read = AppSettings::read_from_file(&path).unwrap();
        assert_eq!(read, settings);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let settings: AppSettings = toml::from_str(
            r#"
            close_on_complete = true

            [overlay]
            marker_radius = 7.5
            "#,
        )
        .unwrap();

        assert!(settings.close_on_complete);
        assert_eq!(settings.overlay.marker_radius, 7.5);
        assert_eq!(settings.overlay.marker_color, "#FF0000");
        assert_eq!(settings.window_size, (1000.0, 1000.0));
    }

    #[test]
    fn written_keys_are_the_ones_that_take_effect() {
        let s = toml::to_string_pretty(&AppSettings::default()).unwrap();
        let table: toml::Table = toml::from_str(&s).unwrap();
        let mut keys: Vec<_> = table.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["close_on_complete", "overlay", "window_size"]);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::read_or_default(dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "window_size = \"big\"").unwrap();

        let err = AppSettings::read_or_default(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }
}
