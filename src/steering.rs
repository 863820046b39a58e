use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use rand::Rng;

use crate::direction::{Direction, CARDINALS};

/// Memoryless random walk for the wanderer. The source of randomness is
/// injected so runs can be replayed from a seed.
#[derive(Debug, Clone)]
pub struct RandomWalk<R> {
    rng: R,
}

impl<R: Rng> RandomWalk<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_direction(&mut self) -> Direction {
        CARDINALS[self.rng.gen_range(0..CARDINALS.len())]
    }
}

/// Latest direction requested by the player's input device. Cheap to clone
/// and safe to write from the input thread while the tick thread reads it.
#[derive(Debug, Clone, Default)]
pub struct Intent {
    latest: Arc<AtomicU8>,
}

impl Intent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, dir: Direction) {
        self.latest.store(dir.to_u8(), Ordering::Release);
    }

    pub fn get(&self) -> Direction {
        Direction::from_u8(self.latest.load(Ordering::Acquire))
    }
}
