//! Game-loop controller - the per-frame state machine
//!
//! Every tick the controller reads one [`InputFrame`] and runs at most one
//! action, in this priority order:
//!
//! 1. move right - held and the move timer is armed, or just pressed
//! 2. move left - same rule, only when (1) did not fire
//! 3. rotate - just pressed and the rotate timer is armed
//! 4. fall - down held and the down timer is armed, or gravity is due
//! 5. pause - just pressed
//!
//! A rejected move or rotation is undone in the same tick. A fall that ends in
//! an invalid position either lands the piece or, when the piece is still in
//! the header, ends the game.
//!
//! While paused only the pause input is read and game time is frozen. After
//! game over nothing is read at all.
//!
//! # Example
//!
//! ```
//! use tui_blocks_engine::core::{Board, ScoreManager, Spawner};
//! use tui_blocks_engine::{
//!     ControllerBuilder, ControllerConfig, ControllerEvent, InputFrame, RecordingSoundPlayer,
//! };
//! use tui_blocks_engine::types::InputAction;
//!
//! let mut controller = ControllerBuilder::new(ControllerConfig::default())
//!     .board(Board::new())
//!     .spawner(Spawner::new(1))
//!     .score(ScoreManager::new())
//!     .sound(RecordingSoundPlayer::default())
//!     .build(0);
//!
//! let events = controller.tick(16, &InputFrame::new().pressed(InputAction::Pause));
//! assert_eq!(events.as_slice(), &[ControllerEvent::Paused]);
//! assert!(controller.is_paused());
//! ```

use arrayvec::ArrayVec;
use tracing::{debug, info, warn};

use crate::clock::PausableClock;
use crate::collab::{Playfield, ScoreTracker, ShapeSpawner, SoundPlayer};
use crate::config::{effective_drop_interval_ms, ControllerConfig};
use crate::core::{Shape, SimpleRng};
use crate::timers::{ActionKind, Deadlines};
use crate::types::{
    InputAction, InputFrame, SoundClip, EFFECT_VOLUME_RANGE, LEVEL_UP_STEP_MS,
    PAUSED_MUSIC_FACTOR, START_LEVEL_STEP_MS, VOCAL_CLIP_COUNT,
};

const MOVE_VOLUME: f32 = 0.5;
const LANDING_VOLUME: f32 = 0.75;
const GAME_OVER_VOLUME: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn apply(self, shape: &mut Shape) {
        match self {
            Direction::Left => shape.move_left(),
            Direction::Right => shape.move_right(),
        }
    }

    fn undo(self, shape: &mut Shape) {
        match self {
            Direction::Left => shape.move_right(),
            Direction::Right => shape.move_left(),
        }
    }
}

/// What a tick did, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    Moved(Direction),
    MoveRejected(Direction),
    Rotated,
    RotateRejected,
    /// The piece fell one cell
    Fell,
    /// The piece locked and a new one spawned
    Landed { rows_cleared: u32 },
    LevelUp { level: u32 },
    GameOver,
    Paused,
    Resumed,
}

/// Events of a single tick
///
/// One action resolves per tick, so a landing plus its level-up is the most a
/// tick produces; the capacity is larger than that.
pub type TickEvents = ArrayVec<ControllerEvent, 4>;

/// Visibility of the two UI panels the controller owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panels {
    pub game_over: bool,
    pub pause: bool,
}

/// Collects collaborators before the controller starts
///
/// Each collaborator is optional so a missing one can be reported instead of
/// failing to compile a partially wired game; see [`GameLoopController::is_enabled`].
pub struct ControllerBuilder<B, S, M, P> {
    config: ControllerConfig,
    board: Option<B>,
    spawner: Option<S>,
    score: Option<M>,
    sound: Option<P>,
    multi_row_vocals: bool,
    vocal_seed: u32,
}

impl<B, S, M, P> ControllerBuilder<B, S, M, P>
where
    B: Playfield,
    S: ShapeSpawner,
    M: ScoreTracker,
    P: SoundPlayer,
{
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config: config.clamped(),
            board: None,
            spawner: None,
            score: None,
            sound: None,
            multi_row_vocals: false,
            vocal_seed: 1,
        }
    }

    pub fn board(mut self, board: B) -> Self {
        self.board = Some(board);
        self
    }

    pub fn spawner(mut self, spawner: S) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn score(mut self, score: M) -> Self {
        self.score = Some(score);
        self
    }

    pub fn sound(mut self, sound: P) -> Self {
        self.sound = Some(sound);
        self
    }

    /// Random vocal cue on multi-row clears (off by default)
    pub fn multi_row_vocals(mut self, enabled: bool, seed: u32) -> Self {
        self.multi_row_vocals = enabled;
        self.vocal_seed = seed;
        self
    }

    /// Start the controller at game time `now`
    pub fn build(self, now: u64) -> GameLoopController<B, S, M, P> {
        let Self {
            config,
            board,
            mut spawner,
            score,
            mut sound,
            multi_row_vocals,
            vocal_seed,
        } = self;

        if board.is_none() {
            warn!("no board defined; controller disabled");
        }
        if sound.is_none() {
            warn!("no sound player defined; controller disabled");
        }
        if score.is_none() {
            warn!("no score tracker defined; controller disabled");
        }
        let active = match spawner.as_mut() {
            Some(spawner) => Some(spawner.spawn_shape()),
            None => {
                warn!("no spawner defined; controller disabled");
                None
            }
        };

        if let Some(sound) = sound.as_mut() {
            let volume = sound.music_volume();
            sound.set_music_source_volume(volume);
        }

        let level = score.as_ref().map_or(0, |s| s.level());
        let effective_drop_ms =
            effective_drop_interval_ms(config.drop_interval_ms, level, START_LEVEL_STEP_MS);

        let mut deadlines = Deadlines::new(now);
        deadlines.schedule(ActionKind::Move, now, config.move_repeat_ms);
        deadlines.schedule(ActionKind::Down, now, config.down_repeat_ms);
        deadlines.schedule(ActionKind::Rotate, now, config.rotate_repeat_ms);
        deadlines.schedule(ActionKind::Drop, now, effective_drop_ms);

        info!(
            level,
            drop_interval_ms = config.drop_interval_ms,
            effective_drop_ms,
            "controller started"
        );

        GameLoopController {
            config,
            board,
            spawner,
            score,
            sound,
            active,
            effective_drop_ms,
            deadlines,
            clock: PausableClock::new(),
            game_over: false,
            paused: false,
            panels: Panels::default(),
            multi_row_vocals,
            vocal_rng: SimpleRng::new(vocal_seed),
        }
    }
}

pub struct GameLoopController<B, S, M, P> {
    config: ControllerConfig,
    board: Option<B>,
    spawner: Option<S>,
    score: Option<M>,
    sound: Option<P>,
    active: Option<Shape>,
    effective_drop_ms: u32,
    deadlines: Deadlines,
    clock: PausableClock,
    game_over: bool,
    paused: bool,
    panels: Panels,
    multi_row_vocals: bool,
    vocal_rng: SimpleRng,
}

impl<B, S, M, P> GameLoopController<B, S, M, P>
where
    B: Playfield,
    S: ShapeSpawner,
    M: ScoreTracker,
    P: SoundPlayer,
{
    /// All collaborators are present and a piece is in play
    pub fn is_enabled(&self) -> bool {
        self.board.is_some()
            && self.spawner.is_some()
            && self.score.is_some()
            && self.sound.is_some()
            && self.active.is_some()
    }

    /// Advance one frame at wall time `wall_now` (ms, monotonic)
    pub fn tick(&mut self, wall_now: u64, input: &InputFrame) -> TickEvents {
        let mut events = TickEvents::new();
        if !self.is_enabled() || self.game_over {
            return events;
        }

        if self.paused {
            if input.just_pressed(InputAction::Pause) {
                self.toggle_pause_into(wall_now, &mut events);
            }
            return events;
        }

        let now = self.clock.game_time(wall_now);

        if self.horizontal_fires(InputAction::MoveRight, input, now) {
            self.shift(Direction::Right, now, &mut events);
        } else if self.horizontal_fires(InputAction::MoveLeft, input, now) {
            self.shift(Direction::Left, now, &mut events);
        } else if input.just_pressed(InputAction::Rotate)
            && self.deadlines.is_armed(ActionKind::Rotate, now)
        {
            self.rotate(now, &mut events);
        } else if (input.is_held(InputAction::MoveDown)
            && self.deadlines.is_armed(ActionKind::Down, now))
            || self.deadlines.is_armed(ActionKind::Drop, now)
        {
            self.fall(now, &mut events);
        } else if input.just_pressed(InputAction::Pause) {
            self.toggle_pause_into(wall_now, &mut events);
        }

        events
    }

    /// Flip pause; returns the event, or `None` after game over
    pub fn toggle_pause(&mut self, wall_now: u64) -> Option<ControllerEvent> {
        let mut events = TickEvents::new();
        self.toggle_pause_into(wall_now, &mut events);
        events.first().copied()
    }

    fn horizontal_fires(&self, action: InputAction, input: &InputFrame, now: u64) -> bool {
        (input.is_held(action) && self.deadlines.is_armed(ActionKind::Move, now))
            || input.just_pressed(action)
    }

    fn shift(&mut self, direction: Direction, now: u64, events: &mut TickEvents) {
        let (Some(board), Some(active)) = (self.board.as_ref(), self.active.as_mut()) else {
            return;
        };

        direction.apply(active);
        self.deadlines
            .schedule(ActionKind::Move, now, self.config.move_repeat_ms);

        let clip = if board.is_valid_position(active) {
            let _ = events.try_push(ControllerEvent::Moved(direction));
            SoundClip::Move
        } else {
            direction.undo(active);
            let _ = events.try_push(ControllerEvent::MoveRejected(direction));
            SoundClip::Error
        };
        self.play(clip, MOVE_VOLUME);
    }

    fn rotate(&mut self, now: u64, events: &mut TickEvents) {
        let (Some(board), Some(active)) = (self.board.as_ref(), self.active.as_mut()) else {
            return;
        };

        active.rotate_right();
        self.deadlines
            .schedule(ActionKind::Rotate, now, self.config.rotate_repeat_ms);

        if board.is_valid_position(active) {
            let _ = events.try_push(ControllerEvent::Rotated);
        } else {
            active.rotate_left();
            let _ = events.try_push(ControllerEvent::RotateRejected);
        }
    }

    fn fall(&mut self, now: u64, events: &mut TickEvents) {
        self.deadlines
            .schedule(ActionKind::Drop, now, self.effective_drop_ms);
        self.deadlines
            .schedule(ActionKind::Down, now, self.config.down_repeat_ms);

        let (Some(board), Some(active)) = (self.board.as_ref(), self.active.as_mut()) else {
            return;
        };
        active.move_down();

        if board.is_valid_position(active) {
            let _ = events.try_push(ControllerEvent::Fell);
        } else if board.is_over_limit(active) {
            self.end_game(events);
        } else {
            self.land(now, events);
        }
    }

    fn land(&mut self, now: u64, events: &mut TickEvents) {
        let (Some(board), Some(spawner), Some(score)) = (
            self.board.as_mut(),
            self.spawner.as_mut(),
            self.score.as_mut(),
        ) else {
            return;
        };
        let Some(mut landed) = self.active.take() else {
            return;
        };

        landed.move_up();
        board.store_shape_in_grid(&landed);
        self.active = Some(spawner.spawn_shape());
        self.deadlines.reset_all(now);

        board.clear_all_rows();
        let rows = board.completed_rows();
        let level_up = if rows > 0 {
            score.score_lines(rows);
            score.did_level_up().then(|| score.level())
        } else {
            None
        };

        debug!(kind = ?landed.kind, x = landed.x, y = landed.y, rows, "shape landed");
        let _ = events.try_push(ControllerEvent::Landed { rows_cleared: rows });
        self.play(SoundClip::Drop, LANDING_VOLUME);

        if rows == 0 {
            return;
        }
        match level_up {
            Some(level) => {
                let previous = self.effective_drop_ms;
                self.effective_drop_ms = effective_drop_interval_ms(
                    self.config.drop_interval_ms,
                    level,
                    LEVEL_UP_STEP_MS,
                );
                info!(
                    level,
                    previous_drop_ms = previous,
                    effective_drop_ms = self.effective_drop_ms,
                    "level up"
                );
                let _ = events.try_push(ControllerEvent::LevelUp { level });
                self.play(SoundClip::LevelUpVocal, LANDING_VOLUME);
            }
            None => {
                if rows > 1 && self.multi_row_vocals {
                    let pick = self.vocal_rng.next_range(VOCAL_CLIP_COUNT as u32) as u8;
                    self.play(SoundClip::Vocal(pick), LANDING_VOLUME);
                }
                self.play(SoundClip::ClearRow, LANDING_VOLUME);
            }
        }
    }

    fn end_game(&mut self, events: &mut TickEvents) {
        if let Some(active) = self.active.as_mut() {
            active.move_up();
        }
        self.game_over = true;
        self.panels.game_over = true;

        info!("game over");
        let _ = events.try_push(ControllerEvent::GameOver);
        self.play(SoundClip::GameOver, GAME_OVER_VOLUME);
        self.play(SoundClip::GameOverVocal, GAME_OVER_VOLUME);
    }

    fn toggle_pause_into(&mut self, wall_now: u64, events: &mut TickEvents) {
        if self.game_over {
            return;
        }

        self.paused = !self.paused;
        self.panels.pause = self.paused;

        if let Some(sound) = self.sound.as_mut() {
            let configured = sound.music_volume();
            let volume = if self.paused {
                configured * PAUSED_MUSIC_FACTOR
            } else {
                configured
            };
            sound.set_music_source_volume(volume);
        }

        if self.paused {
            self.clock.freeze(wall_now);
            info!("paused");
            let _ = events.try_push(ControllerEvent::Paused);
        } else {
            self.clock.resume(wall_now);
            info!("resumed");
            let _ = events.try_push(ControllerEvent::Resumed);
        }
    }

    fn play(&mut self, clip: SoundClip, multiplier: f32) {
        let Some(sound) = self.sound.as_mut() else {
            return;
        };
        if !sound.effects_enabled() {
            return;
        }
        let (lo, hi) = EFFECT_VOLUME_RANGE;
        let volume = (sound.effects_volume() * multiplier).clamp(lo, hi);
        sound.play(clip, volume);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    /// The piece under player control (frozen in place after game over)
    pub fn active(&self) -> Option<&Shape> {
        self.active.as_ref()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn effective_drop_interval_ms(&self) -> u32 {
        self.effective_drop_ms
    }

    pub fn deadline(&self, kind: ActionKind) -> u64 {
        self.deadlines.get(kind)
    }

    /// 0 while paused, 1 otherwise
    pub fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    pub fn game_time(&self, wall_now: u64) -> u64 {
        self.clock.game_time(wall_now)
    }

    pub fn board(&self) -> Option<&B> {
        self.board.as_ref()
    }

    pub fn spawner(&self) -> Option<&S> {
        self.spawner.as_ref()
    }

    pub fn score(&self) -> Option<&M> {
        self.score.as_ref()
    }

    pub fn sound(&self) -> Option<&P> {
        self.sound.as_ref()
    }

    pub fn sound_mut(&mut self) -> Option<&mut P> {
        self.sound.as_mut()
    }

    /// Hand the sound player back (used when a session is rebuilt)
    pub fn take_sound(&mut self) -> Option<P> {
        self.sound.take()
    }
}
