//! Tile resolution after a step: food pickup and snake-on-snake combat.
//!
//! The mover wins ties: it absorbs a rival whose mass is not larger than its
//! own. At most one fight happens per step because a tile never holds more
//! than two snakes.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use crate::error::EngineResult;
use crate::game::{Board, Coord, Food, Occupants, Snake, SnakeId};

/// Result of a fight on one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatResult {
    /// Snake that absorbed the other.
    pub winner: SnakeId,
    /// Snake that was absorbed.
    pub loser: SnakeId,
    /// Whether the snake that stepped onto the tile won.
    pub mover_won: bool,
    /// Where the fight happened.
    pub tile: Coord,
}

/// Food eaten during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodPickup {
    /// Mass of the eaten item.
    pub mass: u64,
    /// Where the replacement item was spawned.
    pub respawned_at: Coord,
}

/// Borrow two distinct snakes mutably.
fn pair_mut(snakes: &mut [Snake], a: SnakeId, b: SnakeId) -> Option<(&mut Snake, &mut Snake)> {
    let (a, b) = (usize::from(a), usize::from(b));
    if a == b || a >= snakes.len() || b >= snakes.len() {
        return None;
    }
    if a < b {
        let (left, right) = snakes.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = snakes.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}

/// Resolve a fight on the mover's tile if it now holds two snakes.
///
/// The loser is flagged eliminated and evicted; the winner stays as the
/// tile's sole occupant. Returns `None` when there was nobody to fight.
pub fn resolve_combat(
    board: &mut Board,
    snakes: &mut [Snake],
    mover: SnakeId,
) -> Option<CombatResult> {
    let tile_pos = snakes.get(usize::from(mover))?.pos;
    let Occupants::Two(first, second) = board.tile_at(tile_pos)?.occupants() else {
        return None;
    };
    let rival = if first == mover {
        second
    } else if second == mover {
        first
    } else {
        return None;
    };

    let (mover_snake, rival_snake) = pair_mut(snakes, mover, rival)?;
    let mover_won = mover_snake.eat_snake(rival_snake);
    let (winner, loser) = if mover_won { (mover, rival) } else { (rival, mover) };

    // remove_snake always drops slot two, which may be the winner; re-assert
    // the winner as the only occupant afterwards.
    let tile = board.tile_at_mut(tile_pos)?;
    tile.remove_snake();
    tile.keep_only(winner);

    debug!(
        winner,
        loser,
        mover_won,
        x = tile_pos.x,
        y = tile_pos.y,
        winner_mass = snakes[usize::from(winner)].mass,
        "snake absorbed"
    );

    Some(CombatResult {
        winner,
        loser,
        mover_won,
        tile: tile_pos,
    })
}

/// Let the mover eat food lying on its tile, then spawn a replacement with a
/// fresh random mass drawn from `mass_range`.
///
/// Returns `Ok(None)` when the tile had no food.
///
/// # Errors
///
/// Propagates [`crate::EngineError::BoardFull`] if the replacement cannot be
/// placed.
pub fn consume_food<R: Rng>(
    board: &mut Board,
    snakes: &mut [Snake],
    mover: SnakeId,
    mass_range: &RangeInclusive<u64>,
    rng: &mut R,
) -> EngineResult<Option<FoodPickup>> {
    let Some(snake) = snakes.get_mut(usize::from(mover)) else {
        return Ok(None);
    };
    let Some(food) = board.tile_at_mut(snake.pos).and_then(|tile| tile.remove_food()) else {
        return Ok(None);
    };

    snake.eat_food(&food);
    debug!(snake = mover, food_mass = food.mass, mass = snake.mass, "food eaten");

    let replacement = Food::random_mass(rng, mass_range);
    let respawned_at = board.spawn_food(replacement, rng)?;
    Ok(Some(FoodPickup {
        mass: food.mass,
        respawned_at,
    }))
}
