//! Snake state: mass, position, elimination and move budget.

use crate::game::{Coord, Food};

/// Unique identifier for a snake; also its index in the game's snake arena.
pub type SnakeId = u8;

/// Number of steps a snake of the given mass takes per turn.
///
/// | mass            | steps |
/// |-----------------|-------|
/// | < 100           | 5     |
/// | 100 – 999       | 4     |
/// | 1 000 – 9 999   | 3     |
/// | 10 000 – 99 999 | 2     |
/// | ≥ 100 000       | 1     |
#[must_use]
pub const fn moves_for_mass(mass: u64) -> u8 {
    match mass {
        0..=99 => 5,
        100..=999 => 4,
        1_000..=9_999 => 3,
        10_000..=99_999 => 2,
        _ => 1,
    }
}

/// A mobile, mass-bearing actor on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Arena index of this snake.
    pub id: SnakeId,
    /// Upper-cased display name, also used as the grid label.
    pub name: String,
    /// Current mass; score and combat strength.
    pub mass: u64,
    /// Tile the snake stands on. Only meaningful once spawned.
    pub pos: Coord,
    /// Cleared exactly once, when a rival absorbs this snake.
    pub alive: bool,
    placed: bool,
    owner: Option<String>,
}

impl Snake {
    /// Create a snake with mass 1 and an upper-cased name.
    #[must_use]
    pub fn new(id: SnakeId, name: &str) -> Self {
        Self {
            id,
            name: name.to_uppercase(),
            mass: 1,
            pos: Coord::default(),
            alive: true,
            placed: false,
            owner: None,
        }
    }

    /// Start from a persisted mass instead of 1. Zero is clamped to 1.
    #[must_use]
    pub fn with_mass(mut self, mass: u64) -> Self {
        self.mass = mass.max(1);
        self
    }

    /// Steps this snake may take in its next turn.
    #[must_use]
    pub const fn moves_per_turn(&self) -> u8 {
        moves_for_mass(self.mass)
    }

    /// Record the tile the snake now stands on.
    pub fn place(&mut self, pos: Coord) {
        self.pos = pos;
        self.placed = true;
    }

    /// Whether the snake has ever been put on a board.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.placed
    }

    /// Add mass, saturating.
    pub fn gain(&mut self, mass: u64) {
        self.mass = self.mass.saturating_add(mass);
    }

    /// Eat a food item.
    pub fn eat_food(&mut self, food: &Food) {
        self.gain(food.mass);
    }

    /// Fight a rival sharing this snake's tile.
    ///
    /// `self` wins when its mass is at least the rival's. The winner gains
    /// the loser's mass; the loser keeps its mass field and is eliminated.
    /// Returns `true` if `self` won.
    pub fn eat_snake(&mut self, rival: &mut Snake) -> bool {
        if self.mass >= rival.mass {
            self.gain(rival.mass);
            rival.eliminate();
            true
        } else {
            rival.gain(self.mass);
            self.eliminate();
            false
        }
    }

    /// Mark this snake as absorbed.
    pub fn eliminate(&mut self) {
        self.alive = false;
    }

    /// Reset mass to 1 for the next match.
    pub fn restore(&mut self) {
        self.mass = 1;
    }

    /// Link this snake to the profile that plays it. Only the first call
    /// succeeds.
    pub fn attach_owner(&mut self, owner: &str) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(owner.to_string());
        true
    }

    /// Identifier of the owning profile, if linked.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}
