//! Configuration loader plus strongly typed settings structures.
//!
//! A single TOML file under the data directory controls spin timing, the
//! no-repeat default, and the wheel's segment palette. The shipped default
//! is embedded at compile time and written out on first run so users have
//! something to edit.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

// Embedded default configuration, written to disk on first run.
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default = "default_true")]
    pub no_repeat: bool,
    #[serde(default = "default_true")]
    pub show_drawn: bool,
    #[serde(default)]
    pub colors: Vec<SegmentColor>,
}

/// One light/dark pair from the segment palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentColor {
    pub light: String,
    pub dark: String,
}

fn default_duration_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
        }
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            no_repeat: true,
            show_drawn: true,
            colors: Vec::new(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from `<data_dir>/config.toml`. On
    /// first run the embedded default is parsed and a copy is written out;
    /// a failed write only logs a warning.
    pub fn load(data_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {:?}", path))?;
            return toml::from_str(&content)
                .with_context(|| format!("failed to parse config {:?}", path));
        }

        let path = data_dir.join("config.toml");
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {:?}", path))?;
            return toml::from_str(&content)
                .with_context(|| format!("failed to parse config {:?}", path));
        }

        let config: Config =
            toml::from_str(DEFAULT_CONFIG).context("embedded default config is invalid")?;
        if let Err(e) =
            fs::create_dir_all(data_dir).and_then(|_| fs::write(&path, DEFAULT_CONFIG))
        {
            tracing::warn!(path = ?path, error = %e, "could not write default config");
        } else {
            tracing::info!(path = ?path, "wrote default config");
        }
        Ok(config)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin.duration_ms)
    }

    /// Color of segment `index`, cycling through the palette. Falls back to
    /// a fixed pair when the palette is empty or a hex value is malformed.
    pub fn segment_color(&self, index: usize, dark: bool) -> Color {
        let fallback = if dark {
            Color::Rgb(0x4a, 0x6e, 0x88)
        } else {
            Color::Rgb(0x5b, 0x7c, 0x99)
        };
        if self.wheel.colors.is_empty() {
            return fallback;
        }
        let pair = &self.wheel.colors[index % self.wheel.colors.len()];
        let hex = if dark { &pair.dark } else { &pair.light };
        hex_to_color(hex).unwrap_or(fallback)
    }
}

/// Resolve the data directory: `NAMEWHEEL_DIR` wins, otherwise
/// `~/.namewheel`.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(custom) = env::var("NAMEWHEEL_DIR") {
        return Ok(PathBuf::from(custom));
    }
    let home = dirs::home_dir().context("could not find home directory")?;
    Ok(home.join(".namewheel"))
}

/// Convert a "#rrggbb" hex string to a terminal color.
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}
