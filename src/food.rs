use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// The single piece of food on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food on a uniformly random cell not covered by the snake.
    ///
    /// Returns `None` when the snake covers every cell.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Samples random cells until one is free of the snake.
///
/// Each draw is uniform over the whole grid, so the accepted cell is uniform
/// over the free cells. The loop ends with probability 1 as long as one free
/// cell exists; a full board is reported as `None` up front.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };

        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}
