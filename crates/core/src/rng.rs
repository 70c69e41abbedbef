//! Seeded randomness for piece order and vocal cue picks.
//!
//! Piece order uses a 7-bag: every run of seven draws holds each kind once.
//! The same seed always replays the same order.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

/// 32-bit linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Uniform-ish value in `0..max`; 0 when `max` is 0
    pub fn next_range(&mut self, max: u32) -> u32 {
        match max {
            0 => 0,
            _ => self.next_u32() % max,
        }
    }

    /// Fisher-Yates
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for hi in (1..items.len()).rev() {
            let pick = self.next_range(hi as u32 + 1) as usize;
            items.swap(hi, pick);
        }
    }
}

type Bag = ArrayVec<PieceKind, 7>;

/// 7-bag piece order
///
/// The bag is stored reversed so drawing is a `pop`.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: Bag,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let bag = Self::fresh_bag(&mut rng);
        Self { bag, rng }
    }

    fn fresh_bag(rng: &mut SimpleRng) -> Bag {
        let mut kinds = PieceKind::ALL;
        rng.shuffle(&mut kinds);
        kinds.into_iter().rev().collect()
    }

    /// Kind the next [`PieceQueue::draw`] returns
    pub fn peek(&self) -> PieceKind {
        match self.bag.last() {
            Some(&kind) => kind,
            // Shuffle the upcoming bag on a copy so the real draw agrees.
            None => Self::fresh_bag(&mut self.rng.clone())
                .last()
                .copied()
                .unwrap_or(PieceKind::I),
        }
    }

    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.bag = Self::fresh_bag(&mut self.rng);
        }
        self.bag.pop().unwrap_or(PieceKind::I)
    }

    #[cfg(test)]
    fn remaining(&self) -> usize {
        self.bag.len()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
