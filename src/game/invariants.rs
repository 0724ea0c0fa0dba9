//! Board invariants - consistency checks that detect engine bugs.
//!
//! These should never trigger. A violation means coordinates and occupancy
//! disagree somewhere, which the turn engine is built to prevent.

use std::collections::HashMap;

use crate::game::{GameState, SnakeId};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut registrations: HashMap<SnakeId, usize> = HashMap::new();

    for (coord, tile) in state.board.iter() {
        if let Some(food) = tile.food()
            && food.pos != coord
        {
            violations.push(InvariantViolation {
                message: format!("Food on tile {coord:?} records position {:?}", food.pos),
            });
        }

        for id in tile.snake_ids() {
            *registrations.entry(id).or_default() += 1;

            let Some(snake) = state.snakes.get(usize::from(id)) else {
                violations.push(InvariantViolation {
                    message: format!("Tile {coord:?} holds unknown snake {id}"),
                });
                continue;
            };
            if !snake.alive {
                violations.push(InvariantViolation {
                    message: format!("Eliminated snake {} still on tile {coord:?}", snake.name),
                });
            }
            if snake.pos != coord {
                violations.push(InvariantViolation {
                    message: format!(
                        "Snake {} registered on {coord:?} but records {:?}",
                        snake.name, snake.pos
                    ),
                });
            }
        }
    }

    for (id, count) in &registrations {
        if *count > 1 {
            violations.push(InvariantViolation {
                message: format!("Snake {id} registered on {count} tiles"),
            });
        }
    }

    for snake in state.snakes.iter().filter(|s| s.alive && s.is_placed()) {
        let registered = state
            .board
            .tile_at(snake.pos)
            .is_some_and(|tile| tile.contains(snake.id));
        if !registered {
            violations.push(InvariantViolation {
                message: format!(
                    "Live snake {} records {:?} but that tile does not hold it",
                    snake.name, snake.pos
                ),
            });
        }
    }

    violations
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
