//! Seams between the controller and the collaborators it drives.
//!
//! The controller only talks to these traits. `tui-blocks-core` types
//! implement them for real play; tests plug in scripted doubles.

use crate::config::SoundSettings;
use crate::core::{Board, ScoreManager, Shape, Spawner};
use crate::types::SoundClip;

/// Grid storage with collision and row clearing
pub trait Playfield {
    fn is_valid_position(&self, shape: &Shape) -> bool;
    fn is_over_limit(&self, shape: &Shape) -> bool;
    fn store_shape_in_grid(&mut self, shape: &Shape);
    /// Remove full rows; returns how many went
    fn clear_all_rows(&mut self) -> u32;
    /// Rows removed by the most recent `clear_all_rows`
    fn completed_rows(&self) -> u32;
}

pub trait ShapeSpawner {
    fn spawn_shape(&mut self) -> Shape;
}

pub trait ScoreTracker {
    fn score_lines(&mut self, lines: u32);
    fn level(&self) -> u32;
    /// Whether the most recent `score_lines` advanced the level
    fn did_level_up(&self) -> bool;
}

/// Effects playback plus the background music channel's volume
pub trait SoundPlayer {
    fn effects_enabled(&self) -> bool;
    fn set_effects_enabled(&mut self, enabled: bool);
    fn effects_volume(&self) -> f32;
    /// Configured music volume
    fn music_volume(&self) -> f32;
    /// Volume the music source is actually playing at
    fn set_music_source_volume(&mut self, volume: f32);
    /// Play a clip at an already clamped volume
    fn play(&mut self, clip: SoundClip, volume: f32);
}

impl Playfield for Board {
    fn is_valid_position(&self, shape: &Shape) -> bool {
        Board::is_valid_position(self, shape)
    }

    fn is_over_limit(&self, shape: &Shape) -> bool {
        Board::is_over_limit(self, shape)
    }

    fn store_shape_in_grid(&mut self, shape: &Shape) {
        Board::store_shape_in_grid(self, shape)
    }

    fn clear_all_rows(&mut self) -> u32 {
        Board::clear_all_rows(self)
    }

    fn completed_rows(&self) -> u32 {
        Board::completed_rows(self)
    }
}

impl ShapeSpawner for Spawner {
    fn spawn_shape(&mut self) -> Shape {
        Spawner::spawn_shape(self)
    }
}

impl ScoreTracker for ScoreManager {
    fn score_lines(&mut self, lines: u32) {
        ScoreManager::score_lines(self, lines)
    }

    fn level(&self) -> u32 {
        ScoreManager::level(self)
    }

    fn did_level_up(&self) -> bool {
        ScoreManager::did_level_up(self)
    }
}

/// Sound player that keeps every request in memory
///
/// Used for headless sessions and benchmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSoundPlayer {
    settings: SoundSettings,
    music_source_volume: f32,
    played: Vec<(SoundClip, f32)>,
}

impl RecordingSoundPlayer {
    pub fn new(settings: SoundSettings) -> Self {
        Self {
            settings,
            music_source_volume: settings.music_volume,
            played: Vec::new(),
        }
    }

    pub fn played(&self) -> &[(SoundClip, f32)] {
        &self.played
    }

    pub fn clips(&self) -> Vec<SoundClip> {
        self.played.iter().map(|(clip, _)| *clip).collect()
    }

    pub fn music_source_volume(&self) -> f32 {
        self.music_source_volume
    }

    pub fn clear(&mut self) {
        self.played.clear();
    }
}

impl Default for RecordingSoundPlayer {
    fn default() -> Self {
        Self::new(SoundSettings::default())
    }
}

impl SoundPlayer for RecordingSoundPlayer {
    fn effects_enabled(&self) -> bool {
        self.settings.effects_enabled
    }

    fn set_effects_enabled(&mut self, enabled: bool) {
        self.settings.effects_enabled = enabled;
    }

    fn effects_volume(&self) -> f32 {
        self.settings.effects_volume
    }

    fn music_volume(&self) -> f32 {
        self.settings.music_volume
    }

    fn set_music_source_volume(&mut self, volume: f32) {
        self.music_source_volume = volume;
    }

    fn play(&mut self, clip: SoundClip, volume: f32) {
        self.played.push((clip, volume));
    }
}
