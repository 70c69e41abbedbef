//! Controller and session configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. Out-of-range values are clamped rather than rejected.
//!
//! ```json
//! {
//!   "controller": { "drop_interval_ms": 700, "move_repeat_ms": 120 },
//!   "sound": { "effects_volume": 0.6 },
//!   "seed": 7
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    DEFAULT_DOWN_REPEAT_MS, DEFAULT_DROP_INTERVAL_MS, DEFAULT_MOVE_REPEAT_MS,
    DEFAULT_ROTATE_REPEAT_MS, DOWN_REPEAT_RANGE_MS, DROP_INTERVAL_CEIL_MS, DROP_INTERVAL_FLOOR_MS,
    DROP_INTERVAL_RANGE_MS, MOVE_REPEAT_RANGE_MS, ROTATE_REPEAT_RANGE_MS,
};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "TUI_BLOCKS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is invalid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Base drop interval and the three repeat rates, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub drop_interval_ms: u32,
    pub move_repeat_ms: u32,
    pub down_repeat_ms: u32,
    pub rotate_repeat_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            move_repeat_ms: DEFAULT_MOVE_REPEAT_MS,
            down_repeat_ms: DEFAULT_DOWN_REPEAT_MS,
            rotate_repeat_ms: DEFAULT_ROTATE_REPEAT_MS,
        }
    }
}

impl ControllerConfig {
    /// Clamp every interval into its accepted range
    pub fn clamped(self) -> Self {
        let clamp = |v: u32, (lo, hi): (u32, u32)| v.clamp(lo, hi);
        Self {
            drop_interval_ms: clamp(self.drop_interval_ms, DROP_INTERVAL_RANGE_MS),
            move_repeat_ms: clamp(self.move_repeat_ms, MOVE_REPEAT_RANGE_MS),
            down_repeat_ms: clamp(self.down_repeat_ms, DOWN_REPEAT_RANGE_MS),
            rotate_repeat_ms: clamp(self.rotate_repeat_ms, ROTATE_REPEAT_RANGE_MS),
        }
    }
}

/// Drop interval for `level`, shrinking by `step_ms` per level
///
/// # Examples
///
/// ```
/// use tui_blocks_engine::config::effective_drop_interval_ms;
///
/// assert_eq!(effective_drop_interval_ms(900, 0, 100), 900);
/// assert_eq!(effective_drop_interval_ms(900, 3, 100), 600);
/// assert_eq!(effective_drop_interval_ms(900, 20, 100), 50);
/// ```
pub fn effective_drop_interval_ms(base_ms: u32, level: u32, step_ms: u32) -> u32 {
    base_ms
        .saturating_sub(level.saturating_mul(step_ms))
        .clamp(DROP_INTERVAL_FLOOR_MS, DROP_INTERVAL_CEIL_MS)
}

/// Audio preferences shared with the sound player
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    pub effects_enabled: bool,
    pub effects_volume: f32,
    pub music_enabled: bool,
    pub music_volume: f32,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            effects_enabled: true,
            effects_volume: 1.0,
            music_enabled: true,
            music_volume: 0.5,
        }
    }
}

impl SoundSettings {
    pub fn clamped(self) -> Self {
        Self {
            effects_volume: clamp_unit(self.effects_volume),
            music_volume: clamp_unit(self.music_volume),
            ..self
        }
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 1.0)
}

/// Everything needed to start a session
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub controller: ControllerConfig,
    pub sound: SoundSettings,
    /// Seed of the first session; restarts step it forward
    pub seed: u32,
    /// Play a random vocal cue when several rows clear at once
    pub multi_row_vocals: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            sound: SoundSettings::default(),
            seed: 1,
            multi_row_vocals: false,
        }
    }
}

impl GameConfig {
    pub fn clamped(self) -> Self {
        Self {
            controller: self.controller.clamped(),
            sound: self.sound.clamped(),
            ..self
        }
    }

    /// Parse JSON config text; `origin` only labels errors
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        Ok(config.clamped())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}
