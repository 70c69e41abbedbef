//! Held/just-pressed key tracking for terminal environments.
//!
//! Turns press and release events into one [`InputFrame`] per tick. Repeat
//! timing is not done here: the controller's own deadlines decide how often a
//! held key acts.
//!
//! Many terminals never report key releases. For those, a key counts as
//! released once no press (or OS auto-repeat press) has been seen for the
//! release timeout.
//!
//! Without release events, taps closer together than the release timeout
//! look like one held key: only the first yields a just-pressed edge, and
//! the later taps act only when the controller's repeat deadline is armed.
//! Terminals with release events (see [`KeyTracker::with_release_events`])
//! report every tap.

use std::time::{Duration, Instant};

use crate::types::{InputAction, InputFrame};

// Long enough to bridge the gap between OS auto-repeat presses.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: [bool; InputAction::COUNT],
    pressed: [bool; InputAction::COUNT],
    last_seen: [Option<Instant>; InputAction::COUNT],
    key_release_timeout_ms: u32,
    /// Terminal reports releases, so never time a key out
    release_events: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: [false; InputAction::COUNT],
            pressed: [false; InputAction::COUNT],
            last_seen: [None; InputAction::COUNT],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn with_release_events(mut self, supported: bool) -> Self {
        self.release_events = supported;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// A press (or auto-repeat press) arrived
    ///
    /// Only the first press of a held key counts as just pressed.
    pub fn press(&mut self, action: InputAction, at: Instant) {
        let i = action.index();
        if !self.held[i] {
            self.held[i] = true;
            self.pressed[i] = true;
        }
        self.last_seen[i] = Some(at);
    }

    pub fn release(&mut self, action: InputAction) {
        let i = action.index();
        self.held[i] = false;
        self.last_seen[i] = None;
    }

    /// Build this tick's frame and consume the just-pressed edges
    pub fn take_frame(&mut self, now: Instant) -> InputFrame {
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        let mut frame = InputFrame::new();

        for action in InputAction::ALL {
            let i = action.index();
            if self.pressed[i] {
                frame.set_pressed(action);
                self.pressed[i] = false;
            } else if self.held[i] {
                frame.set_held(action, true);
            }

            if !self.release_events && self.held[i] {
                let stale = self.last_seen[i]
                    .map_or(true, |seen| now.saturating_duration_since(seen) > timeout);
                if stale {
                    self.release(action);
                    frame.set_held(action, false);
                }
            }
        }

        frame
    }

    pub fn reset(&mut self) {
        self.held = [false; InputAction::COUNT];
        self.pressed = [false; InputAction::COUNT];
        self.last_seen = [None; InputAction::COUNT];
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
