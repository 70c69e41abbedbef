//! Key events to controller frames, the way the runner wires them.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_blocks::input::{handle_key_event, KeyCommand, KeyTracker};
use tui_blocks::types::InputAction;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn feed(tracker: &mut KeyTracker, code: KeyCode, at: Instant) -> Option<KeyCommand> {
    let cmd = handle_key_event(key(code));
    if let Some(KeyCommand::Game(action)) = cmd {
        tracker.press(action, at);
    }
    cmd
}

#[test]
fn auto_repeat_keeps_a_key_held_until_it_stops() {
    let t0 = Instant::now();
    let ms = Duration::from_millis;
    let mut tracker = KeyTracker::new();

    feed(&mut tracker, KeyCode::Left, t0);
    let f = tracker.take_frame(t0 + ms(16));
    assert!(f.just_pressed(InputAction::MoveLeft));

    // Terminal auto-repeat every 33 ms.
    for i in 1..10u64 {
        feed(&mut tracker, KeyCode::Left, t0 + ms(33 * i));
        let f = tracker.take_frame(t0 + ms(33 * i + 5));
        assert!(f.is_held(InputAction::MoveLeft));
        assert!(!f.just_pressed(InputAction::MoveLeft));
    }

    let f = tracker.take_frame(t0 + ms(33 * 9 + 200));
    assert!(f.is_idle());
}

#[test]
fn app_commands_never_reach_the_tracker() {
    let t0 = Instant::now();
    let mut tracker = KeyTracker::new();

    assert_eq!(feed(&mut tracker, KeyCode::Char('r'), t0), Some(KeyCommand::Restart));
    assert_eq!(feed(&mut tracker, KeyCode::Char('m'), t0), Some(KeyCommand::ToggleEffects));
    assert_eq!(feed(&mut tracker, KeyCode::Char('q'), t0), Some(KeyCommand::Quit));
    assert!(tracker.take_frame(t0).is_idle());
}

#[test]
fn pause_key_is_a_single_edge() {
    let t0 = Instant::now();
    let mut tracker = KeyTracker::new().with_release_events(true);

    assert_eq!(
        feed(&mut tracker, KeyCode::Char('p'), t0),
        Some(KeyCommand::Game(InputAction::Pause))
    );
    assert!(tracker.take_frame(t0).just_pressed(InputAction::Pause));
    assert!(!tracker.take_frame(t0).just_pressed(InputAction::Pause));
}
