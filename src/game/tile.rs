//! Tile occupancy: two snake slots and one food slot.

use crate::game::{Food, SnakeId};

/// Who is standing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupants {
    /// No snake.
    Empty,
    /// Exactly one snake.
    One(SnakeId),
    /// Two snakes in slot order: a head-on collision waiting to be resolved.
    Two(SnakeId, SnakeId),
}

/// A single board cell.
///
/// Holds at most two snakes and at most one food item. Only the add/remove
/// operations below mutate it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    first: Option<SnakeId>,
    second: Option<SnakeId>,
    food: Option<Food>,
}

impl Tile {
    /// Create an empty tile.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            first: None,
            second: None,
            food: None,
        }
    }

    /// Current snake occupancy.
    #[must_use]
    pub const fn occupants(&self) -> Occupants {
        match (self.first, self.second) {
            (None, None) => Occupants::Empty,
            (Some(id), None) | (None, Some(id)) => Occupants::One(id),
            (Some(a), Some(b)) => Occupants::Two(a, b),
        }
    }

    /// Raw slot contents, first slot then second.
    #[must_use]
    pub const fn slots(&self) -> (Option<SnakeId>, Option<SnakeId>) {
        (self.first, self.second)
    }

    /// Snake ids in slot order.
    pub fn snake_ids(&self) -> impl Iterator<Item = SnakeId> {
        self.first.into_iter().chain(self.second)
    }

    /// Number of snakes on this tile (0..=2).
    #[must_use]
    pub fn snake_count(&self) -> usize {
        usize::from(self.first.is_some()) + usize::from(self.second.is_some())
    }

    /// Whether any snake stands here.
    #[must_use]
    pub const fn has_snakes(&self) -> bool {
        self.first.is_some() || self.second.is_some()
    }

    /// Whether the given snake is registered on this tile.
    #[must_use]
    pub fn contains(&self, id: SnakeId) -> bool {
        self.first == Some(id) || self.second == Some(id)
    }

    /// Put a snake into the first free slot.
    ///
    /// Returns `false` without touching the tile if both slots are taken.
    pub fn add_snake(&mut self, id: SnakeId) -> bool {
        if self.first.is_none() {
            self.first = Some(id);
            true
        } else if self.second.is_none() {
            self.second = Some(id);
            true
        } else {
            false
        }
    }

    /// Remove one snake: the second slot if occupied, otherwise the first.
    ///
    /// There is no way to ask for a particular snake. Callers that must keep
    /// a specific occupant re-assert it afterwards with [`Tile::keep_only`].
    pub fn remove_snake(&mut self) -> Option<SnakeId> {
        if self.second.is_some() {
            self.second.take()
        } else {
            self.first.take()
        }
    }

    /// Make `id` the sole occupant, in the first slot.
    pub fn keep_only(&mut self, id: SnakeId) {
        self.first = Some(id);
        self.second = None;
    }

    /// The food lying here, if any.
    #[must_use]
    pub const fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    /// Whether food lies here.
    #[must_use]
    pub const fn has_food(&self) -> bool {
        self.food.is_some()
    }

    /// Drop food on this tile. Returns `false` if food is already here.
    pub fn add_food(&mut self, food: Food) -> bool {
        if self.food.is_some() {
            return false;
        }
        self.food = Some(food);
        true
    }

    /// Take the food off this tile.
    pub fn remove_food(&mut self) -> Option<Food> {
        self.food.take()
    }
}
