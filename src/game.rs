//! Board simulation layer.
//!
//! Implements the rules of a single step:
//! - Board of tiles, each holding up to two snakes and one food item
//! - Snakes with mass-tiered move budgets
//! - Movement with edge checks
//! - Food pickup and snake-on-snake absorption
//! - Invariant checks tying coordinates to occupancy

mod board;
mod combat;
mod food;
mod invariants;
mod movement;
mod snake;
mod state;
mod tile;

pub use board::{Board, Coord, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use combat::{CombatResult, FoodPickup, consume_food, resolve_combat};
pub use food::{Food, MAX_FOOD_MASS, MIN_FOOD_MASS};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use movement::{Direction, ParseDirectionError, move_snake};
pub use snake::{Snake, SnakeId, moves_for_mass};
pub use state::{GameState, MAX_SNAKES};
pub use tile::{Occupants, Tile};
