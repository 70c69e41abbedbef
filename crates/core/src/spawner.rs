//! Spawner - hands out new active shapes from the 7-bag queue.

use crate::rng::PieceQueue;
use crate::shape::Shape;
use crate::types::PieceKind;

#[derive(Debug, Clone)]
pub struct Spawner {
    queue: PieceQueue,
    seed: u32,
    spawned: u32,
}

impl Spawner {
    pub fn new(seed: u32) -> Self {
        Self {
            queue: PieceQueue::new(seed),
            seed,
            spawned: 0,
        }
    }

    /// Draw the next piece and place it at the spawn position
    pub fn spawn_shape(&mut self) -> Shape {
        self.spawned = self.spawned.wrapping_add(1);
        Shape::new(self.queue.draw())
    }

    /// Kind of the shape the next `spawn_shape` will return
    pub fn peek_next(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Shapes handed out so far
    pub fn spawned(&self) -> u32 {
        self.spawned
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SPAWN_POSITION;

    #[test]
    fn spawned_shapes_start_at_spawn_and_follow_preview() {
        let mut spawner = Spawner::new(42);
        for _ in 0..10 {
            let next = spawner.peek_next();
            let shape = spawner.spawn_shape();
            assert_eq!(shape.kind, next);
            assert_eq!((shape.x, shape.y), SPAWN_POSITION);
        }
        assert_eq!(spawner.spawned(), 10);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Spawner::new(9);
        let mut b = Spawner::new(9);
        for _ in 0..14 {
            assert_eq!(a.spawn_shape(), b.spawn_shape());
        }
    }
}
