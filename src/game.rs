use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GridSize, INITIAL_DIRECTION, START_CELL, TIME_LIMIT_SECS};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Coarse game mode.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Running,
    Paused,
    Over,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OverReason {
    Wall,
    SelfCollision,
    TimeUp,
    /// The snake covers every cell, leaving nowhere to put food.
    BoardFull,
}

/// Complete mutable game state for one process.
///
/// Only the command methods mutate it; renderers go through the accessors.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Option<Food>,
    score: u32,
    highest_score: u32,
    time_left: u32,
    phase: Phase,
    over_reason: Option<OverReason>,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a running game with entropy-seeded food placement.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, rng: StdRng) -> Self {
        debug_assert!(START_CELL.is_within_bounds(bounds));

        let mut state = Self {
            snake: Snake::new(START_CELL, INITIAL_DIRECTION),
            food: None,
            score: 0,
            highest_score: 0,
            time_left: TIME_LIMIT_SECS,
            phase: Phase::Running,
            over_reason: None,
            bounds,
            rng,
        };
        state.place_food();
        state
    }

    /// Advances the simulation by one step. No-op unless running.
    ///
    /// Collision checks run against the pre-move body, so death wins over
    /// eating when both would happen on the same step.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        let next = self.snake.next_head_position();

        if self.snake.body_contains(next) {
            self.end(OverReason::SelfCollision);
            return;
        }

        if !next.is_within_bounds(self.bounds) {
            self.end(OverReason::Wall);
            return;
        }

        let ate = self.food.is_some_and(|food| food.position == next);
        self.snake.advance(next, ate);

        if ate {
            self.score += 1;
            self.highest_score = self.highest_score.max(self.score);
            self.place_food();
        }
    }

    /// Counts one second off the clock. No-op unless running.
    pub fn countdown_tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end(OverReason::TimeUp);
        }
    }

    /// Steers the snake from the next tick on. Direct reversals are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.snake.set_direction(direction) {
            debug!("ignored reversal to {direction:?}");
        }
    }

    /// Switches between running and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Over => Phase::Over,
        };
    }

    /// Starts a fresh round. The highest score carries over.
    pub fn restart(&mut self) {
        self.snake = Snake::new(START_CELL, INITIAL_DIRECTION);
        self.score = 0;
        self.time_left = TIME_LIMIT_SECS;
        self.phase = Phase::Running;
        self.over_reason = None;
        self.place_food();
    }

    fn place_food(&mut self) {
        self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake);

        match self.food {
            Some(food) => debug!("food placed at ({}, {})", food.position.x, food.position.y),
            None => self.end(OverReason::BoardFull),
        }
    }

    fn end(&mut self, reason: OverReason) {
        debug!("game over: {reason:?} with score {}", self.score);
        self.phase = Phase::Over;
        self.over_reason = Some(reason);
    }

    /// Current head cell.
    #[must_use]
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    /// Body segments from just behind the head to the tail.
    pub fn body(&self) -> impl ExactSizeIterator<Item = &Position> {
        self.snake.body()
    }

    /// Full snake geometry, head included.
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell; `None` only after the board filled up.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food.map(|food| food.position)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Set while the phase is `Over`.
    #[must_use]
    pub fn over_reason(&self) -> Option<OverReason> {
        self.over_reason
    }

    /// Food eaten this round.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score since the process started.
    #[must_use]
    pub fn highest_score(&self) -> u32 {
        self.highest_score
    }

    /// Seconds remaining on the clock.
    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Direction the next tick moves in.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Grid dimensions in cells.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Replaces the snake, for setting up scenarios in tests.
    #[doc(hidden)]
    pub fn debug_set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    /// Moves the food, for setting up scenarios in tests.
    #[doc(hidden)]
    pub fn debug_set_food(&mut self, position: Position) {
        self.food = Some(Food::new(position));
    }
}
