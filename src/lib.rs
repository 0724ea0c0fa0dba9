// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Gridsnake: a turn-based grid engine for an agar.io style snake game.
//!
//! Snakes move around a rectangular board, eat food to gain mass and absorb
//! one another when they share a tile. Heavier snakes move fewer steps per
//! turn. The last snake standing wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (single / multi / simulate)   │
//! ├─────────────────────────────────────┤
//! │   Match loop + profiles             │
//! ├─────────────────────────────────────┤
//! │   Turn engine (move, eat, fight)    │
//! ├─────────────────────────────────────┤
//! │   Board / tiles / snake arena       │
//! └─────────────────────────────────────┘
//! ```
//!
//! All randomness is drawn from a caller-supplied [`rand::Rng`], so a seeded
//! generator reproduces a CPU-only match exactly.

pub mod engine;
pub mod error;
pub mod game;
pub mod profile;

pub use engine::{
    Control, DirectionSource, Match, MatchConfig, MatchMode, MatchOutcome, MatchResult,
    ParticipantResult, RoundSummary, ScriptedDirections,
};
pub use error::{EngineError, EngineResult};
pub use game::{Board, Coord, Direction, Food, GameState, Occupants, Snake, SnakeId, Tile};
pub use profile::{Profile, ProfileError, ProfileStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_debug() {
        let err = EngineError::InvalidDimensions {
            width: 0,
            height: 3,
        };
        let debug = format!("{err:?}");
        assert!(debug.contains("InvalidDimensions"));
        assert!(debug.contains('3'));
    }
}
