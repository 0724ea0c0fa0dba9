//! Board geometry, random placement and the textual grid dump.

use rand::Rng;

use crate::error::{EngineError, EngineResult};
use crate::game::{Food, Snake, SnakeId, Tile};

/// Default board width of the classic game.
pub const DEFAULT_WIDTH: u16 = 10;

/// Default board height of the classic game.
pub const DEFAULT_HEIGHT: u16 = 10;

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row), 0 is the top row.
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// The game board: a fixed grid of tiles stored row-major.
#[derive(Debug, Clone)]
pub struct Board {
    /// Width of the board in tiles.
    width: u16,
    /// Height of the board in tiles.
    height: u16,
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        Some(Self {
            width,
            height,
            tiles: vec![Tile::new(); size],
        })
    }

    /// Get the width of the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Raw tiles in row-major order.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Check if a coordinate is within the board bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Get the tile at the given coordinate, `None` when out of bounds.
    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> Option<&Tile> {
        self.coord_to_index(coord).map(|idx| &self.tiles[idx])
    }

    /// Mutable access to the tile at the given coordinate.
    #[must_use]
    pub fn tile_at_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.coord_to_index(coord).map(|idx| &mut self.tiles[idx])
    }

    /// Iterate over all coordinates and tiles, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        let width = usize::from(self.width);
        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx % width) as u16, (idx / width) as u16);
            (coord, tile)
        })
    }

    /// Number of snakes registered on any tile.
    #[must_use]
    pub fn count_snakes(&self) -> usize {
        self.tiles.iter().map(Tile::snake_count).sum()
    }

    /// Number of tiles holding food.
    #[must_use]
    pub fn count_food(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.has_food()).count()
    }

    /// How many random draws a spawn may make before reporting a full board.
    #[must_use]
    pub fn spawn_attempt_limit(&self) -> usize {
        self.tiles.len().saturating_mul(64).max(1024)
    }

    fn random_coord<R: Rng>(&self, rng: &mut R) -> Coord {
        Coord::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Draw random coordinates until `accept` likes the tile there.
    fn draw_tile<R, F>(&self, rng: &mut R, accept: F) -> EngineResult<Coord>
    where
        R: Rng,
        F: Fn(&Tile) -> bool,
    {
        let limit = self.spawn_attempt_limit();
        for _ in 0..limit {
            let coord = self.random_coord(rng);
            if self.tile_at(coord).is_some_and(&accept) {
                return Ok(coord);
            }
        }
        Err(EngineError::BoardFull { attempts: limit })
    }

    /// Place a snake on a uniformly random tile that holds no snake and
    /// record the chosen coordinates on the snake.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BoardFull`] if no such tile turned up within
    /// [`Board::spawn_attempt_limit`] draws.
    pub fn spawn_snake<R: Rng>(&mut self, snake: &mut Snake, rng: &mut R) -> EngineResult<Coord> {
        let coord = self.draw_tile(rng, |tile| !tile.has_snakes())?;
        if let Some(tile) = self.tile_at_mut(coord) {
            tile.add_snake(snake.id);
        }
        snake.place(coord);
        Ok(coord)
    }

    /// Place a new food item of the given mass on a random tile without food.
    ///
    /// Snakes may already stand on the chosen tile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BoardFull`] if every draw hit a tile with food.
    pub fn spawn_food<R: Rng>(&mut self, mass: u64, rng: &mut R) -> EngineResult<Coord> {
        let coord = self.draw_tile(rng, |tile| !tile.has_food())?;
        if let Some(tile) = self.tile_at_mut(coord) {
            tile.add_food(Food::new(mass, coord));
        }
        Ok(coord)
    }

    /// Labels of everything on one tile: snake names in slot order, then
    /// `FOOD`, or a single `NONE` for an empty tile.
    #[must_use]
    pub fn occupant_labels<'a>(&self, coord: Coord, snakes: &'a [Snake]) -> Vec<&'a str> {
        let Some(tile) = self.tile_at(coord) else {
            return Vec::new();
        };

        let mut labels: Vec<&'a str> = tile
            .snake_ids()
            .map(|id| snake_label(snakes, id))
            .collect();
        if tile.has_food() {
            labels.push(Food::LABEL);
        }
        if labels.is_empty() {
            labels.push("NONE");
        }
        labels
    }

    /// Textual grid dump, one line per row, cells separated by `|`.
    #[must_use]
    pub fn render(&self, snakes: &[Snake]) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            out.push('|');
            for x in 0..self.width {
                out.push(' ');
                out.push_str(&self.occupant_labels(Coord::new(x, y), snakes).join(", "));
                out.push_str(" |");
            }
            out.push('\n');
        }
        out
    }
}

fn snake_label(snakes: &[Snake], id: SnakeId) -> &str {
    snakes.get(usize::from(id)).map_or("?", |snake| snake.name.as_str())
}
