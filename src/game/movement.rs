//! Directions and single-step movement.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::game::{Board, Coord, Snake};

/// One of the four moves a snake can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All directions, in token order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Input token for this direction.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Pick a direction uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// The neighbouring coordinate in this direction, or `None` at the edge
    /// of a `width`×`height` board.
    #[must_use]
    pub const fn step_from(self, from: Coord, width: u16, height: u16) -> Option<Coord> {
        match self {
            Direction::Up if from.y > 0 => Some(Coord::new(from.x, from.y - 1)),
            Direction::Down if from.y + 1 < height => Some(Coord::new(from.x, from.y + 1)),
            Direction::Left if from.x > 0 => Some(Coord::new(from.x - 1, from.y)),
            Direction::Right if from.x + 1 < width => Some(Coord::new(from.x + 1, from.y)),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error for a token that is not one of `UP`, `DOWN`, `LEFT`, `RIGHT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    /// The rejected input.
    pub token: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid direction {:?} (expected UP, DOWN, LEFT or RIGHT)",
            self.token
        )
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.token() == s.trim())
            .ok_or_else(|| ParseDirectionError {
                token: s.to_string(),
            })
    }
}

/// Move a snake one tile.
///
/// At the board edge, or when the destination already holds two snakes,
/// nothing changes and `false` is returned. Otherwise the snake leaves its
/// old tile, joins the new one and its coordinates are updated.
pub fn move_snake(board: &mut Board, snake: &mut Snake, direction: Direction) -> bool {
    let Some(to) = direction.step_from(snake.pos, board.width(), board.height()) else {
        return false;
    };
    if board.tile_at(to).is_none_or(|tile| tile.snake_count() >= 2) {
        return false;
    }

    if let Some(from_tile) = board.tile_at_mut(snake.pos) {
        from_tile.remove_snake();
    }
    if let Some(to_tile) = board.tile_at_mut(to) {
        to_tile.add_snake(snake.id);
    }
    snake.place(to);
    true
}
