//! Display configuration consulted while rendering messages.
//!
//! The settings are loaded once by the embedding application and passed
//! explicitly to render calls; the model never reaches for a process-wide
//! singleton.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Read-only display configuration for message rendering.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplaySettings {
    #[serde(default = "default_true")]
    pub show_icons: bool,
    #[serde(default = "default_true")]
    pub show_timestamp: bool,
    #[serde(default = "default_true")]
    pub use_24h_format: bool,
    #[serde(default = "default_true")]
    pub show_colors: bool,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_icons: true,
            show_timestamp: true,
            use_24h_format: true,
            show_colors: true,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("com", "ircmodel", "irc-model") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            warn!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("display.json"));
    }
    None
}

pub fn load_settings() -> Option<DisplaySettings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_settings(settings: &DisplaySettings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}
