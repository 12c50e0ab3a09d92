use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Result, SortVizError};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sort: SortConfig,
    pub canvas: CanvasConfig,
    pub palette: Palette,
    pub audio: AudioConfig,
}

impl AppConfig {
    /// Parses a configuration document. Missing sections fall back to their
    /// defaults.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas.bar_width == 0 {
            return Err(SortVizError::Config("canvas.bar_width must be positive".into()));
        }
        if self.canvas.height == 0 {
            return Err(SortVizError::Config("canvas.height must be positive".into()));
        }
        if self.audio.sample_rate == 0 {
            return Err(SortVizError::Config("audio.sample_rate must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.audio.gain) {
            return Err(SortVizError::Config(format!(
                "audio.gain must lie in [0, 1], got {}",
                self.audio.gain
            )));
        }
        Ok(())
    }
}

/// Settings shared by every algorithm run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Registry name of the algorithm to run.
    pub method: String,
    /// Pause after every rendered step, in milliseconds.
    pub delay_ms: u64,
    /// Seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Upper bound on bogo sort shuffles. `None` keeps shuffling until sorted.
    pub bogo_max_attempts: Option<u64>,
}

impl SortConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            method: "bubble".to_string(),
            delay_ms: 10,
            seed: None,
            bogo_max_attempts: None,
        }
    }
}

/// Drawing surface dimensions, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    /// Tallest possible bar; also the reference for tone pitch.
    pub height: u32,
    pub bar_width: u32,
}

impl CanvasConfig {
    /// Number of bars that fit across the canvas.
    pub fn bar_count(&self) -> usize {
        if self.bar_width == 0 {
            return 0;
        }
        (self.width / self.bar_width) as usize
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            bar_width: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub unsorted: String,
    pub selected: String,
    pub sorted: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".to_string(),
            unsorted: "#cdd6f4".to_string(),
            selected: "#f38ba8".to_string(),
            sorted: "#a6e3a1".to_string(),
        }
    }
}

/// Configuration specific to the audio subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub sample_rate: u32,
    /// Pitch of the tone at a playback rate of 1.0.
    pub base_frequency_hz: f32,
    pub tone_ms: u32,
    pub gain: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_rate: 48_000,
            base_frequency_hz: 440.0,
            tone_ms: 80,
            gain: 0.01,
        }
    }
}
