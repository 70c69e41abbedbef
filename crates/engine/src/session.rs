//! A playable session: the controller wired to the standard collaborators.
//!
//! Restarting rebuilds board, spawner and score from scratch (a new episode
//! with the next seed) and keeps the sound player.

use tracing::info;

use crate::collab::SoundPlayer;
use crate::config::GameConfig;
use crate::controller::{ControllerBuilder, GameLoopController, TickEvents};
use crate::core::{Board, GameSnapshot, ScoreManager, Spawner};
use crate::types::InputFrame;

pub type StandardController<P> = GameLoopController<Board, Spawner, ScoreManager, P>;

pub struct Session<P: SoundPlayer> {
    config: GameConfig,
    controller: StandardController<P>,
    episode: u32,
}

impl<P: SoundPlayer> Session<P> {
    pub fn new(config: GameConfig, sound: P, wall_now: u64) -> Self {
        let config = config.clamped();
        let controller = Self::build(&config, 0, sound, wall_now);
        Self {
            config,
            controller,
            episode: 0,
        }
    }

    fn build(config: &GameConfig, episode: u32, sound: P, wall_now: u64) -> StandardController<P> {
        let seed = config.seed.wrapping_add(episode);
        ControllerBuilder::new(config.controller)
            .board(Board::new())
            .spawner(Spawner::new(seed))
            .score(ScoreManager::new())
            .sound(sound)
            .multi_row_vocals(config.multi_row_vocals, seed)
            .build(wall_now)
    }

    pub fn tick(&mut self, wall_now: u64, input: &InputFrame) -> TickEvents {
        self.controller.tick(wall_now, input)
    }

    /// Throw the current game away and start a fresh one at normal time scale
    ///
    /// Returns false when the sound player was already gone, in which case
    /// the session is left as it was.
    pub fn restart(&mut self, wall_now: u64) -> bool {
        let Some(sound) = self.controller.take_sound() else {
            return false;
        };
        self.episode = self.episode.wrapping_add(1);
        self.controller = Self::build(&self.config, self.episode, sound, wall_now);
        info!(episode = self.episode, "session restarted");
        true
    }

    /// Flip the sound effects switch; returns the new state
    pub fn toggle_effects(&mut self) -> bool {
        match self.controller.sound_mut() {
            Some(sound) => {
                let enabled = !sound.effects_enabled();
                sound.set_effects_enabled(enabled);
                enabled
            }
            None => false,
        }
    }

    pub fn controller(&self) -> &StandardController<P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut StandardController<P> {
        &mut self.controller
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let c = &self.controller;
        match c.board() {
            Some(board) => out.write_board(board),
            None => out.clear(),
        }
        out.active = c.active().copied().map(Into::into);
        out.next = c.spawner().map(|s| s.peek_next());
        if let Some(score) = c.score() {
            out.score = score.score();
            out.level = score.level();
            out.lines = score.lines();
        }
        let panels = c.panels();
        out.paused = panels.pause;
        out.game_over = panels.game_over;
        out.effects_enabled = c.sound().is_some_and(|s| s.effects_enabled());
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
