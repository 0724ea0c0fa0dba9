//! Game state: the board plus the arena of snakes it refers to.

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::{EngineError, EngineResult};
use crate::game::{Board, Coord, Food, Snake, SnakeId};

/// Largest number of snakes one game can hold (ids are `u8`).
pub const MAX_SNAKES: usize = 256;

/// Complete board state.
///
/// Tiles refer to snakes by [`SnakeId`], which is the snake's index in
/// `snakes`. Snakes are never removed from the arena; eliminated ones stay
/// with `alive == false`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The board.
    pub board: Board,
    /// Every snake registered for this game, indexed by id.
    pub snakes: Vec<Snake>,
}

impl GameState {
    /// Create a state with an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] if either side is zero.
    pub fn new(width: u16, height: u16) -> EngineResult<Self> {
        let board =
            Board::new(width, height).ok_or(EngineError::InvalidDimensions { width, height })?;
        Ok(Self {
            board,
            snakes: Vec::new(),
        })
    }

    /// Add a snake to the arena, assigning its id. The snake is not placed
    /// on the board yet.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TooManySnakes`] if the arena already holds
    /// [`MAX_SNAKES`] snakes.
    pub fn register(&mut self, mut snake: Snake) -> EngineResult<SnakeId> {
        let id = SnakeId::try_from(self.snakes.len()).map_err(|_| EngineError::TooManySnakes {
            got: self.snakes.len() + 1,
            max: MAX_SNAKES,
        })?;
        snake.id = id;
        self.snakes.push(snake);
        Ok(id)
    }

    /// Get a snake by id.
    #[must_use]
    pub fn snake(&self, id: SnakeId) -> Option<&Snake> {
        self.snakes.get(usize::from(id))
    }

    /// Get a mutable reference to a snake by id.
    #[must_use]
    pub fn snake_mut(&mut self, id: SnakeId) -> Option<&mut Snake> {
        self.snakes.get_mut(usize::from(id))
    }

    /// Put a registered snake on a random tile free of snakes.
    ///
    /// Unknown ids are ignored and reported as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BoardFull`] if no free tile was found.
    pub fn spawn_snake<R: Rng>(&mut self, id: SnakeId, rng: &mut R) -> EngineResult<Option<Coord>> {
        let Some(snake) = self.snakes.get_mut(usize::from(id)) else {
            return Ok(None);
        };
        self.board.spawn_snake(snake, rng).map(Some)
    }

    /// Spawn food with random masses until the board holds `count` items.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BoardFull`] if `count` exceeds the number of
    /// tiles or placement keeps failing.
    pub fn fill_food<R: Rng>(
        &mut self,
        count: usize,
        mass_range: &RangeInclusive<u64>,
        rng: &mut R,
    ) -> EngineResult<()> {
        let tiles = self.board.tiles().len();
        if count > tiles {
            return Err(EngineError::BoardFull { attempts: 0 });
        }
        while self.board.count_food() < count {
            let mass = Food::random_mass(rng, mass_range);
            self.board.spawn_food(mass, rng)?;
        }
        Ok(())
    }

    /// Snakes still in the game.
    pub fn live_snakes(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|snake| snake.alive)
    }

    /// Number of snakes still on the board.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.board.count_snakes()
    }

    /// Textual grid dump with snake names.
    #[must_use]
    pub fn render(&self) -> String {
        self.board.render(&self.snakes)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_invalid_dimensions() {
        let err = GameState::new(0, 5).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidDimensions {
                width: 0,
                height: 5,
            }
        );
    }

    #[test]
    fn test_register_assigns_ids() {
        let mut state = GameState::new(10, 10).unwrap();
        assert_eq!(state.register(Snake::new(9, "a")).unwrap(), 0);
        assert_eq!(state.register(Snake::new(9, "b")).unwrap(), 1);
        assert_eq!(state.snake(1).unwrap().id, 1);
        assert_eq!(state.live_count(), 0);
    }

    #[test]
    fn test_register_stops_at_capacity() {
        let mut state = GameState::new(2, 2).unwrap();
        for i in 0..MAX_SNAKES {
            state.register(Snake::new(0, &format!("s{i}"))).unwrap();
        }
        let err = state.register(Snake::new(0, "extra")).unwrap_err();
        assert_eq!(err, EngineError::TooManySnakes { got: 257, max: 256 });
        assert_eq!(state.snakes.len(), MAX_SNAKES);
    }

    #[test]
    fn test_spawn_unknown_snake() {
        let mut state = GameState::new(10, 10).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(state.spawn_snake(4, &mut rng).unwrap(), None);
    }

    #[test]
    fn test_fill_food() {
        let mut state = GameState::new(10, 10).unwrap();
        let mut rng = SmallRng::seed_from_u64(21);
        state.fill_food(5, &(1..=999_999), &mut rng).unwrap();
        assert_eq!(state.board.count_food(), 5);
        // Already full enough: no-op.
        state.fill_food(3, &(1..=999_999), &mut rng).unwrap();
        assert_eq!(state.board.count_food(), 5);
    }

    #[test]
    fn test_fill_food_more_than_tiles() {
        let mut state = GameState::new(2, 2).unwrap();
        let mut rng = SmallRng::seed_from_u64(21);
        assert!(state.fill_food(5, &(1..=10), &mut rng).is_err());
    }

    #[test]
    fn test_display_matches_render() {
        let mut state = GameState::new(3, 2).unwrap();
        let mut rng = SmallRng::seed_from_u64(2);
        let id = state.register(Snake::new(0, "solo")).unwrap();
        state.spawn_snake(id, &mut rng).unwrap();
        let text = state.to_string();
        assert_eq!(text, state.render());
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("SOLO"));
    }
}
