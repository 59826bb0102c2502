use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (vx, vy) = direction.velocity();
        Self {
            x: self.x + vx,
            y: self.y + vy,
        }
    }
}

/// Snake geometry: a distinguished head plus the trailing body segments.
///
/// Body index 0 is the segment directly behind the head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Creates a head-only snake at `start` travelling in `direction`.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self {
            head: start,
            body: VecDeque::new(),
            direction,
        }
    }

    /// Creates a snake from an explicit head and body (body front is next to the head).
    #[must_use]
    pub fn from_parts(head: Position, body: Vec<Position>, direction: Direction) -> Self {
        Self {
            head,
            body: VecDeque::from(body),
            direction,
        }
    }

    /// Changes direction unless it would reverse straight into the body.
    ///
    /// Returns whether the change was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.direction = direction;
        true
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head.step(self.direction)
    }

    /// Moves the head to `new_head`; the body follows one cell behind.
    ///
    /// With `grow` the tail segment stays in place, adding one segment.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(self.head);
        if !grow {
            let _ = self.body.pop_back();
        }
        self.head = new_head;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Iterates over body segments from just behind the head to the tail.
    pub fn body(&self) -> impl ExactSizeIterator<Item = &Position> {
        self.body.iter()
    }

    /// Returns true if a body segment (not the head) occupies `position`.
    #[must_use]
    pub fn body_contains(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head or any body segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.body_contains(position)
    }

    /// Returns the number of cells covered, head included.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 8,
    };

    #[test]
    fn bounds_are_half_open() {
        assert!(Position { x: 0, y: 0 }.is_within_bounds(BOUNDS));
        assert!(Position { x: 9, y: 7 }.is_within_bounds(BOUNDS));
        assert!(!Position { x: -1, y: 3 }.is_within_bounds(BOUNDS));
        assert!(!Position { x: 10, y: 3 }.is_within_bounds(BOUNDS));
        assert!(!Position { x: 4, y: -1 }.is_within_bounds(BOUNDS));
        assert!(!Position { x: 4, y: 8 }.is_within_bounds(BOUNDS));
    }

    #[test]
    fn snake_moves_one_cell_per_advance() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        let next = snake.next_head_position();
        snake.advance(next, false);

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_from_head_only_leaves_segment_at_old_head() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.advance(Position { x: 6, y: 5 }, true);

        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.body().copied().collect::<Vec<_>>(),
            vec![Position { x: 5, y: 5 }]
        );
    }

    #[test]
    fn growth_keeps_previous_tail() {
        let mut snake = Snake::from_parts(
            Position { x: 3, y: 1 },
            vec![Position { x: 2, y: 1 }, Position { x: 1, y: 1 }],
            Direction::Right,
        );

        snake.advance(Position { x: 4, y: 1 }, true);

        assert_eq!(
            snake.body().copied().collect::<Vec<_>>(),
            vec![
                Position { x: 3, y: 1 },
                Position { x: 2, y: 1 },
                Position { x: 1, y: 1 },
            ]
        );
    }

    #[test]
    fn body_follows_head_with_one_step_lag() {
        let mut snake = Snake::from_parts(
            Position { x: 3, y: 1 },
            vec![Position { x: 2, y: 1 }, Position { x: 1, y: 1 }],
            Direction::Right,
        );

        snake.advance(Position { x: 4, y: 1 }, false);

        assert_eq!(snake.head(), Position { x: 4, y: 1 });
        assert_eq!(
            snake.body().copied().collect::<Vec<_>>(),
            vec![Position { x: 3, y: 1 }, Position { x: 2, y: 1 }]
        );
    }

    #[test]
    fn set_direction_rejects_reverse() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Up);

        assert!(!snake.set_direction(Direction::Down));
        assert_eq!(snake.direction(), Direction::Up);

        assert!(snake.set_direction(Direction::Left));
        assert_eq!(snake.next_head_position(), Position { x: 4, y: 5 });
    }

    #[test]
    fn occupies_includes_head_but_body_contains_does_not() {
        let snake = Snake::from_parts(
            Position { x: 3, y: 1 },
            vec![Position { x: 2, y: 1 }],
            Direction::Right,
        );

        assert!(snake.occupies(Position { x: 3, y: 1 }));
        assert!(!snake.body_contains(Position { x: 3, y: 1 }));
        assert!(snake.body_contains(Position { x: 2, y: 1 }));
        assert!(!snake.occupies(Position { x: 1, y: 1 }));
    }
}
