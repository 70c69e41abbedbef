//! Pausable game clock.
//!
//! Callers pass monotonic wall time; the controller reads game time, which
//! stands still while frozen. Time scale is therefore either 0 or 1.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PausableClock {
    /// Total wall time spent frozen before the current freeze
    frozen_total_ms: u64,
    /// Wall time at which the current freeze began
    frozen_at: Option<u64>,
}

impl PausableClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Game time for the given wall time
    pub fn game_time(&self, wall_ms: u64) -> u64 {
        let wall = match self.frozen_at {
            Some(at) => at.min(wall_ms),
            None => wall_ms,
        };
        wall.saturating_sub(self.frozen_total_ms)
    }

    pub fn freeze(&mut self, wall_ms: u64) {
        if self.frozen_at.is_none() {
            self.frozen_at = Some(wall_ms);
        }
    }

    pub fn resume(&mut self, wall_ms: u64) {
        if let Some(at) = self.frozen_at.take() {
            self.frozen_total_ms = self
                .frozen_total_ms
                .saturating_add(wall_ms.saturating_sub(at));
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    pub fn time_scale(&self) -> f32 {
        if self.is_frozen() {
            0.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_with_wall_time_until_frozen() {
        let mut clock = PausableClock::new();
        assert_eq!(clock.game_time(1_000), 1_000);
        assert_eq!(clock.time_scale(), 1.0);

        clock.freeze(1_000);
        assert_eq!(clock.game_time(5_000), 1_000);
        assert_eq!(clock.time_scale(), 0.0);

        clock.resume(5_000);
        assert_eq!(clock.game_time(5_000), 1_000);
        assert_eq!(clock.game_time(5_250), 1_250);
    }

    #[test]
    fn repeated_freeze_keeps_first_instant() {
        let mut clock = PausableClock::new();
        clock.freeze(100);
        clock.freeze(300);
        clock.resume(400);
        assert_eq!(clock.game_time(400), 100);

        // Resume without freeze is a no-op.
        clock.resume(900);
        assert_eq!(clock.game_time(900), 600);
    }
}
