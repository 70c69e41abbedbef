//! Repeat-rate deadlines for the four action classes.
//!
//! An action class is armed once game time reaches its deadline. Firing
//! pushes the deadline to `now + interval`; landing pulls every deadline back
//! to the landing instant so the next piece reacts immediately.

/// Action classes gated by their own deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Horizontal move (shared by left and right)
    Move,
    /// Player soft drop
    Down,
    Rotate,
    /// Gravity
    Drop,
}

impl ActionKind {
    pub const COUNT: usize = 4;

    pub const ALL: [ActionKind; Self::COUNT] = [
        ActionKind::Move,
        ActionKind::Down,
        ActionKind::Rotate,
        ActionKind::Drop,
    ];

    const fn index(self) -> usize {
        match self {
            ActionKind::Move => 0,
            ActionKind::Down => 1,
            ActionKind::Rotate => 2,
            ActionKind::Drop => 3,
        }
    }
}

/// Deadline (game time, ms) per action class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadlines {
    at: [u64; ActionKind::COUNT],
}

impl Deadlines {
    /// All classes armed at `now`
    pub fn new(now: u64) -> Self {
        Self {
            at: [now; ActionKind::COUNT],
        }
    }

    pub fn get(&self, kind: ActionKind) -> u64 {
        self.at[kind.index()]
    }

    pub fn is_armed(&self, kind: ActionKind, now: u64) -> bool {
        now >= self.at[kind.index()]
    }

    /// Next allowed time becomes `now + interval_ms`
    pub fn schedule(&mut self, kind: ActionKind, now: u64, interval_ms: u32) {
        self.at[kind.index()] = now.saturating_add(interval_ms as u64);
    }

    pub fn reset_all(&mut self, now: u64) {
        self.at = [now; ActionKind::COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_at_and_after_deadline() {
        let mut d = Deadlines::new(0);
        d.schedule(ActionKind::Move, 100, 250);
        assert!(!d.is_armed(ActionKind::Move, 349));
        assert!(d.is_armed(ActionKind::Move, 350));
        assert!(d.is_armed(ActionKind::Move, 351));
    }

    #[test]
    fn classes_are_independent() {
        let mut d = Deadlines::new(0);
        d.schedule(ActionKind::Rotate, 0, 250);
        assert!(d.is_armed(ActionKind::Move, 0));
        assert!(d.is_armed(ActionKind::Down, 0));
        assert!(d.is_armed(ActionKind::Drop, 0));
        assert!(!d.is_armed(ActionKind::Rotate, 0));
    }

    #[test]
    fn reset_all_pulls_every_deadline_to_now() {
        let mut d = Deadlines::new(0);
        for kind in ActionKind::ALL {
            d.schedule(kind, 10, 900);
        }
        d.reset_all(500);
        for kind in ActionKind::ALL {
            assert_eq!(d.get(kind), 500);
        }
    }
}
