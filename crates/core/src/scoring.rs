//! Scoring module - classic line scores and level progression
//!
//! - Clearing N lines awards `LINE_SCORES[N] * (level + 1)` points.
//! - Every `LINES_PER_LEVEL` lines advances one level.
//! - `did_level_up` describes only the most recent `score_lines` call.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    if lines == 0 || lines as usize >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines as usize].saturating_mul(level.saturating_add(1))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreManager {
    score: u32,
    lines: u32,
    level: u32,
    did_level_up: bool,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award points for `lines` cleared rows and advance the level when due
    pub fn score_lines(&mut self, lines: u32) {
        self.did_level_up = false;
        if lines == 0 {
            return;
        }

        self.score = self
            .score
            .saturating_add(calculate_line_score(lines, self.level));
        self.lines = self.lines.saturating_add(lines);

        let reached = self.lines / LINES_PER_LEVEL;
        if reached > self.level {
            self.level = reached;
            self.did_level_up = true;
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn did_level_up(&self) -> bool {
        self.did_level_up
    }
}
