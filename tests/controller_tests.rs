//! Controller behavior against scripted collaborators.

use std::collections::VecDeque;

use tui_blocks::core::Shape;
use tui_blocks::engine::{
    ActionKind, ControllerBuilder, ControllerConfig, ControllerEvent, Direction, GameLoopController,
    Playfield, RecordingSoundPlayer, ScoreTracker, ShapeSpawner, SoundPlayer, SoundSettings,
};
use tui_blocks::types::{InputAction, InputFrame, PieceKind, SoundClip};

/// Validity checks the piece origin against `min_x..=max_x` and `y <= floor_y`,
/// plus every cell against `blocked`
struct ScriptedField {
    min_x: i8,
    max_x: i8,
    floor_y: i8,
    /// Origins with `y` below this are over the limit
    limit_y: i8,
    /// Replaces `floor_y` once a piece has been stored
    floor_after_store: Option<i8>,
    blocked: Vec<(i8, i8)>,
    stored: Vec<Shape>,
    rows_to_clear: VecDeque<u32>,
    completed: u32,
}

impl ScriptedField {
    fn open() -> Self {
        Self {
            min_x: -10,
            max_x: 20,
            floor_y: 20,
            limit_y: -10,
            floor_after_store: None,
            blocked: Vec::new(),
            stored: Vec::new(),
            rows_to_clear: VecDeque::new(),
            completed: 0,
        }
    }
}

impl Playfield for ScriptedField {
    fn is_valid_position(&self, shape: &Shape) -> bool {
        (self.min_x..=self.max_x).contains(&shape.x)
            && shape.y <= self.floor_y
            && shape.cells().iter().all(|cell| !self.blocked.contains(cell))
    }

    fn is_over_limit(&self, shape: &Shape) -> bool {
        shape.y < self.limit_y
    }

    fn store_shape_in_grid(&mut self, shape: &Shape) {
        self.stored.push(*shape);
        if let Some(floor) = self.floor_after_store.take() {
            self.floor_y = floor;
        }
    }

    fn clear_all_rows(&mut self) -> u32 {
        self.completed = self.rows_to_clear.pop_front().unwrap_or(0);
        self.completed
    }

    fn completed_rows(&self) -> u32 {
        self.completed
    }
}

struct ScriptedSpawner {
    kinds: VecDeque<PieceKind>,
    spawned: u32,
}

impl ScriptedSpawner {
    fn new(kinds: &[PieceKind]) -> Self {
        Self {
            kinds: kinds.iter().copied().collect(),
            spawned: 0,
        }
    }
}

impl ShapeSpawner for ScriptedSpawner {
    fn spawn_shape(&mut self) -> Shape {
        self.spawned += 1;
        Shape::new(self.kinds.pop_front().unwrap_or(PieceKind::O))
    }
}

/// Levels up whenever the running line total reaches `level_up_at`
#[derive(Default)]
struct ScriptedScore {
    lines: u32,
    level: u32,
    level_up_at: Option<u32>,
    leveled: bool,
    calls: Vec<u32>,
}

impl ScoreTracker for ScriptedScore {
    fn score_lines(&mut self, lines: u32) {
        self.calls.push(lines);
        self.lines += lines;
        self.leveled = self.level_up_at.is_some_and(|at| self.lines >= at && self.level == 0);
        if self.leveled {
            self.level += 1;
        }
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn did_level_up(&self) -> bool {
        self.leveled
    }
}

type Scripted = GameLoopController<ScriptedField, ScriptedSpawner, ScriptedScore, RecordingSoundPlayer>;

fn controller(field: ScriptedField, score: ScriptedScore, now: u64) -> Scripted {
    ControllerBuilder::new(ControllerConfig::default())
        .board(field)
        .spawner(ScriptedSpawner::new(&[PieceKind::T, PieceKind::I, PieceKind::L]))
        .score(score)
        .sound(RecordingSoundPlayer::default())
        .build(now)
}

fn idle() -> InputFrame {
    InputFrame::new()
}

fn clips(c: &Scripted) -> Vec<SoundClip> {
    c.sound().unwrap().clips()
}

#[test]
fn held_move_repeats_exactly_at_the_repeat_rate() {
    let mut c = controller(ScriptedField::open(), ScriptedScore::default(), 0);
    let x0 = c.active().unwrap().x;

    let first = InputFrame::new().pressed(InputAction::MoveRight);
    let held = InputFrame::new().held(InputAction::MoveRight);

    assert_eq!(c.tick(0, &first).as_slice(), &[ControllerEvent::Moved(Direction::Right)]);
    assert_eq!(c.deadline(ActionKind::Move), 250);

    assert!(c.tick(100, &held).is_empty());
    assert!(c.tick(249, &held).is_empty());
    assert_eq!(c.tick(250, &held).as_slice(), &[ControllerEvent::Moved(Direction::Right)]);
    assert!(c.tick(499, &held).is_empty());
    assert_eq!(c.tick(500, &held).len(), 1);

    assert_eq!(c.active().unwrap().x, x0 + 3);
    assert!(c.sound().unwrap().played().iter().all(|&(clip, v)| clip == SoundClip::Move && v == 0.5));
}

#[test]
fn single_press_fires_once() {
    let mut c = controller(ScriptedField::open(), ScriptedScore::default(), 0);
    let x0 = c.active().unwrap().x;

    c.tick(10, &InputFrame::new().pressed(InputAction::MoveLeft));
    for t in (26..800).step_by(16) {
        assert!(c.tick(t, &idle()).is_empty());
    }
    assert_eq!(c.active().unwrap().x, x0 - 1);
}

#[test]
fn fresh_press_ignores_the_repeat_timer() {
    let mut c = controller(ScriptedField::open(), ScriptedScore::default(), 0);
    let x0 = c.active().unwrap().x;

    c.tick(0, &InputFrame::new().pressed(InputAction::MoveLeft));
    c.tick(16, &idle());
    c.tick(32, &InputFrame::new().pressed(InputAction::MoveLeft));
    assert_eq!(c.active().unwrap().x, x0 - 2);
}

#[test]
fn right_wins_over_left() {
    let mut c = controller(ScriptedField::open(), ScriptedScore::default(), 0);
    let x0 = c.active().unwrap().x;
    let both = InputFrame::new()
        .pressed(InputAction::MoveRight)
        .pressed(InputAction::MoveLeft);

    assert_eq!(c.tick(0, &both).as_slice(), &[ControllerEvent::Moved(Direction::Right)]);
    assert_eq!(c.active().unwrap().x, x0 + 1);
}

#[test]
fn invalid_move_is_undone_with_an_error_sound() {
    let mut field = ScriptedField::open();
    field.max_x = 3;
    let mut c = controller(field, ScriptedScore::default(), 0);
    let before = *c.active().unwrap();

    let events = c.tick(0, &InputFrame::new().pressed(InputAction::MoveRight));
    assert_eq!(events.as_slice(), &[ControllerEvent::MoveRejected(Direction::Right)]);
    assert_eq!(*c.active().unwrap(), before);
    assert_eq!(c.sound().unwrap().played(), &[(SoundClip::Error, 0.5)]);
}

#[test]
fn invalid_left_move_is_undone_at_the_wall() {
    let mut field = ScriptedField::open();
    field.min_x = 3;
    let mut c = controller(field, ScriptedScore::default(), 0);
    let before = *c.active().unwrap();

    let events = c.tick(40, &InputFrame::new().pressed(InputAction::MoveLeft));
    assert_eq!(events.as_slice(), &[ControllerEvent::MoveRejected(Direction::Left)]);
    assert_eq!(*c.active().unwrap(), before);
    assert_eq!(c.deadline(ActionKind::Move), 290);
    assert_eq!(c.sound().unwrap().played(), &[(SoundClip::Error, 0.5)]);
}

#[test]
fn blocked_rotation_is_turned_back() {
    let start = Shape::new(PieceKind::T);
    let mut turned = start;
    turned.rotate_right();
    let newly_covered = turned
        .cells()
        .into_iter()
        .find(|cell| !start.cells().contains(cell))
        .unwrap();

    let mut field = ScriptedField::open();
    field.blocked.push(newly_covered);
    let mut c = controller(field, ScriptedScore::default(), 0);
    assert_eq!(*c.active().unwrap(), start);

    let rotate = InputFrame::new().pressed(InputAction::Rotate);
    assert_eq!(c.tick(250, &rotate).as_slice(), &[ControllerEvent::RotateRejected]);
    let after = *c.active().unwrap();
    assert_eq!(after, start);
    assert_eq!(after.rotation, start.rotation);
    assert_eq!((after.x, after.y), (start.x, start.y));
    assert_eq!(c.deadline(ActionKind::Rotate), 500);
    assert!(clips(&c).is_empty());

    // Still blocked on the next armed tick, and the timer gates retries.
    assert!(c.tick(400, &rotate).is_empty());
    assert_eq!(c.tick(500, &rotate).as_slice(), &[ControllerEvent::RotateRejected]);
    assert_eq!(*c.active().unwrap(), start);
}

#[test]
fn rotation_needs_an_armed_timer() {
    let mut c = controller(ScriptedField::open(), ScriptedScore::default(), 0);
    let rotate = InputFrame::new().pressed(InputAction::Rotate);

    assert!(c.tick(100, &rotate).is_empty());
    assert_eq!(c.tick(250, &rotate).as_slice(), &[ControllerEvent::Rotated]);
    assert!(c.tick(300, &rotate).is_empty());
    assert_eq!(c.tick(500, &rotate).as_slice(), &[ControllerEvent::Rotated]);
    // Rotation is silent.
    assert!(clips(&c).is_empty());
}

#[test]
fn held_down_falls_at_the_down_rate() {
    let mut c = controller(ScriptedField::open(), ScriptedScore::default(), 0);
    let down = InputFrame::new().held(InputAction::MoveDown);
    let y0 = c.active().unwrap().y;

    assert!(c.tick(10, &down).is_empty());
    assert_eq!(c.tick(20, &down).as_slice(), &[ControllerEvent::Fell]);
    assert_eq!(c.tick(40, &down).as_slice(), &[ControllerEvent::Fell]);
    assert_eq!(c.active().unwrap().y, y0 + 2);
    // Falling also pushes gravity back.
    assert_eq!(c.deadline(ActionKind::Drop), 940);
}

#[test]
fn landing_spawns_a_new_piece_and_resets_every_timer() {
    let mut field = ScriptedField::open();
    field.floor_y = 1;
    let mut c = controller(field, ScriptedScore::default(), 0);
    assert_eq!(c.active().unwrap().kind, PieceKind::T);

    assert_eq!(c.tick(900, &idle()).as_slice(), &[ControllerEvent::Fell]);
    assert_eq!(
        c.tick(1_800, &idle()).as_slice(),
        &[ControllerEvent::Landed { rows_cleared: 0 }]
    );

    let board = c.board().unwrap();
    assert_eq!(board.stored.len(), 1);
    assert_eq!(board.stored[0].y, 1);
    assert_eq!(c.active().unwrap().kind, PieceKind::I);
    assert_eq!(c.spawner().unwrap().spawned, 2);

    for kind in ActionKind::ALL {
        assert_eq!(c.deadline(kind), 1_800);
    }
    assert!(c.score().unwrap().calls.is_empty());
    assert_eq!(c.sound().unwrap().played(), &[(SoundClip::Drop, 0.75)]);
}

#[test]
fn cleared_rows_are_scored_with_a_clear_sound() {
    let mut field = ScriptedField::open();
    field.floor_y = 0;
    field.rows_to_clear.push_back(2);
    let mut c = controller(field, ScriptedScore::default(), 0);

    assert_eq!(
        c.tick(900, &idle()).as_slice(),
        &[ControllerEvent::Landed { rows_cleared: 2 }]
    );
    assert_eq!(c.score().unwrap().calls, vec![2]);
    assert_eq!(clips(&c), vec![SoundClip::Drop, SoundClip::ClearRow]);
    assert_eq!(c.effective_drop_interval_ms(), 900);
}

#[test]
fn multi_row_clear_can_add_a_vocal_cue() {
    let mut field = ScriptedField::open();
    field.floor_y = 0;
    field.rows_to_clear.push_back(3);
    let mut c: Scripted = ControllerBuilder::new(ControllerConfig::default())
        .board(field)
        .spawner(ScriptedSpawner::new(&[]))
        .score(ScriptedScore::default())
        .sound(RecordingSoundPlayer::default())
        .multi_row_vocals(true, 9)
        .build(0);

    c.tick(900, &idle());
    let played = clips(&c);
    assert_eq!(played.len(), 3);
    assert_eq!(played[0], SoundClip::Drop);
    assert!(matches!(played[1], SoundClip::Vocal(n) if n < 4));
    assert_eq!(played[2], SoundClip::ClearRow);
}

#[test]
fn level_up_speeds_gravity_and_replaces_the_clear_sound() {
    let mut field = ScriptedField::open();
    field.floor_y = 0;
    field.floor_after_store = Some(20);
    field.rows_to_clear.push_back(4);
    let score = ScriptedScore {
        level_up_at: Some(4),
        ..ScriptedScore::default()
    };
    let mut c = controller(field, score, 0);

    let events = c.tick(900, &idle());
    assert_eq!(
        events.as_slice(),
        &[
            ControllerEvent::Landed { rows_cleared: 4 },
            ControllerEvent::LevelUp { level: 1 }
        ]
    );
    assert_eq!(c.effective_drop_interval_ms(), 850);
    assert_eq!(clips(&c), vec![SoundClip::Drop, SoundClip::LevelUpVocal]);

    // Landing left gravity armed; the step after that uses the shorter interval.
    assert_eq!(c.deadline(ActionKind::Drop), 900);
    assert_eq!(c.tick(916, &idle()).as_slice(), &[ControllerEvent::Fell]);
    assert!(c.tick(916 + 849, &idle()).is_empty());
    assert_eq!(c.tick(916 + 850, &idle()).as_slice(), &[ControllerEvent::Fell]);
}

#[test]
fn game_over_only_when_over_the_limit_and_is_permanent() {
    let mut field = ScriptedField::open();
    field.floor_y = 0;
    field.limit_y = 2;
    let mut c = controller(field, ScriptedScore::default(), 0);
    let start = *c.active().unwrap();

    assert_eq!(c.tick(900, &idle()).as_slice(), &[ControllerEvent::GameOver]);
    assert!(c.is_game_over());
    assert!(c.panels().game_over);
    assert_eq!(*c.active().unwrap(), start);
    assert_eq!(
        c.sound().unwrap().played(),
        &[(SoundClip::GameOver, 1.0), (SoundClip::GameOverVocal, 1.0)]
    );
    assert!(c.board().unwrap().stored.is_empty());

    let everything = InputFrame::new()
        .pressed(InputAction::MoveRight)
        .pressed(InputAction::Rotate)
        .pressed(InputAction::Pause)
        .held(InputAction::MoveDown);
    for t in [1_000, 5_000, 60_000] {
        assert!(c.tick(t, &everything).is_empty());
    }
    assert_eq!(c.toggle_pause(70_000), None);
    assert!(c.is_game_over());
    assert!(!c.is_paused());
    assert_eq!(*c.active().unwrap(), start);
}

#[test]
fn pause_freezes_play_and_lowers_music() {
    let mut c = controller(ScriptedField::open(), ScriptedScore::default(), 0);
    let pause = InputFrame::new().pressed(InputAction::Pause);
    let start = *c.active().unwrap();
    let stored = c.board().unwrap().stored.len();
    let spawned = c.spawner().unwrap().spawned;

    assert_eq!(c.tick(100, &pause).as_slice(), &[ControllerEvent::Paused]);
    assert!(c.is_paused());
    assert!(c.panels().pause);
    assert_eq!(c.time_scale(), 0.0);
    let sound = c.sound().unwrap();
    assert_eq!(sound.music_source_volume(), sound.music_volume() * 0.25);

    // Nothing but pause is read while paused, and gravity does not run.
    let busy = InputFrame::new()
        .pressed(InputAction::MoveRight)
        .held(InputAction::MoveDown);
    for t in (200..5_000).step_by(100) {
        assert!(c.tick(t, &busy).is_empty());
    }
    assert_eq!(*c.active().unwrap(), start);
    assert_eq!(c.board().unwrap().stored.len(), stored);
    assert_eq!(c.spawner().unwrap().spawned, spawned);
    assert!(c.score().unwrap().calls.is_empty());

    assert_eq!(c.tick(5_100, &pause).as_slice(), &[ControllerEvent::Resumed]);
    assert!(!c.panels().pause);
    assert_eq!(c.time_scale(), 1.0);
    let sound = c.sound().unwrap();
    assert_eq!(sound.music_source_volume(), sound.music_volume());

    // 5 s spent paused do not count toward gravity.
    assert_eq!(c.game_time(5_100), 100);
    assert!(c.tick(5_899, &idle()).is_empty());
    assert_eq!(c.tick(5_900, &idle()).as_slice(), &[ControllerEvent::Fell]);
}

#[test]
fn pause_has_lowest_priority() {
    let mut c = controller(ScriptedField::open(), ScriptedScore::default(), 0);
    let frame = InputFrame::new()
        .pressed(InputAction::MoveLeft)
        .pressed(InputAction::Pause);

    assert_eq!(c.tick(0, &frame).as_slice(), &[ControllerEvent::Moved(Direction::Left)]);
    assert!(!c.is_paused());
}

#[test]
fn effect_volume_follows_settings_and_never_drops_to_silence() {
    let settings = SoundSettings {
        effects_volume: 0.02,
        ..SoundSettings::default()
    };
    let mut c: Scripted = ControllerBuilder::new(ControllerConfig::default())
        .board(ScriptedField::open())
        .spawner(ScriptedSpawner::new(&[]))
        .score(ScriptedScore::default())
        .sound(RecordingSoundPlayer::new(settings))
        .build(0);

    c.tick(0, &InputFrame::new().pressed(InputAction::MoveLeft));
    assert_eq!(c.sound().unwrap().played(), &[(SoundClip::Move, 0.05)]);

    c.sound_mut().unwrap().set_effects_enabled(false);
    c.tick(16, &InputFrame::new().pressed(InputAction::MoveLeft));
    assert_eq!(c.sound().unwrap().played().len(), 1);
}

#[test]
fn controller_without_a_spawner_stays_idle() {
    let mut c: Scripted = ControllerBuilder::new(ControllerConfig::default())
        .board(ScriptedField::open())
        .score(ScriptedScore::default())
        .sound(RecordingSoundPlayer::default())
        .build(0);

    assert!(!c.is_enabled());
    assert!(c.active().is_none());
    for t in [0, 900, 10_000] {
        assert!(c
            .tick(t, &InputFrame::new().pressed(InputAction::Pause))
            .is_empty());
    }
    assert!(!c.is_paused());
}

#[test]
fn out_of_range_config_is_clamped_on_build() {
    let config = ControllerConfig {
        drop_interval_ms: 0,
        move_repeat_ms: 0,
        down_repeat_ms: 0,
        rotate_repeat_ms: 60_000,
    };
    let c: Scripted = ControllerBuilder::new(config)
        .board(ScriptedField::open())
        .spawner(ScriptedSpawner::new(&[]))
        .score(ScriptedScore::default())
        .sound(RecordingSoundPlayer::default())
        .build(0);

    assert_eq!(c.config().move_repeat_ms, 20);
    assert_eq!(c.config().down_repeat_ms, 10);
    assert_eq!(c.config().rotate_repeat_ms, 1_000);
    // 20 ms base is below the gravity floor.
    assert_eq!(c.effective_drop_interval_ms(), 50);
    assert_eq!(c.deadline(ActionKind::Drop), 50);
}
