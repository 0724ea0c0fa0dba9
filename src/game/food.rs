//! Food items.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::game::Coord;

/// Smallest food mass spawned by default.
pub const MIN_FOOD_MASS: u64 = 1;

/// Largest food mass spawned by default.
pub const MAX_FOOD_MASS: u64 = 999_999;

/// A static collectible lying on one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Mass gained by whoever eats it.
    pub mass: u64,
    /// Tile this food was placed on.
    pub pos: Coord,
}

impl Food {
    /// Label used in the grid dump.
    pub const LABEL: &'static str = "FOOD";

    /// Create a food item at a position.
    #[must_use]
    pub const fn new(mass: u64, pos: Coord) -> Self {
        Self { mass, pos }
    }

    /// Draw a fresh food mass from an inclusive range.
    ///
    /// An empty range falls back to [`MIN_FOOD_MASS`].
    pub fn random_mass<R: Rng>(rng: &mut R, range: &RangeInclusive<u64>) -> u64 {
        if range.is_empty() {
            return MIN_FOOD_MASS;
        }
        rng.gen_range(range.clone())
    }
}
