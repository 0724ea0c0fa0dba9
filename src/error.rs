//! Error types for the board engine.

use std::fmt;

/// Errors raised while setting up or driving a match.
///
/// Movement at the board edge and full tiles are not errors; those are
/// reported as boolean results by the operations themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Board dimensions must both be non-zero.
    InvalidDimensions {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// Food masses must be positive and `min <= max`.
    InvalidFoodMass {
        /// Configured minimum.
        min: u64,
        /// Configured maximum.
        max: u64,
    },
    /// Random placement gave up after exhausting its retry bound.
    BoardFull {
        /// Number of candidate tiles drawn before giving up.
        attempts: usize,
    },
    /// Multiplayer needs more human players.
    TooFewHumans {
        /// Humans supplied.
        got: usize,
        /// Minimum accepted.
        min: usize,
    },
    /// More human players than the table has seats for.
    TooManyHumans {
        /// Humans supplied.
        got: usize,
        /// Maximum accepted.
        max: usize,
    },
    /// More snakes than one game can hold.
    TooManySnakes {
        /// Snakes requested.
        got: usize,
        /// Maximum accepted.
        max: usize,
    },
    /// A match was requested with nobody to play it.
    NoParticipants,
    /// A human player's direction input ended mid-match.
    InputClosed,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {width}x{height} (must be > 0)")
            }
            EngineError::InvalidFoodMass { min, max } => {
                write!(f, "invalid food mass range {min}..={max} (need 1 <= min <= max)")
            }
            EngineError::BoardFull { attempts } => {
                write!(f, "no free tile found after {attempts} random draws")
            }
            EngineError::TooFewHumans { got, min } => {
                write!(f, "too few human players: {got} (minimum {min})")
            }
            EngineError::TooManyHumans { got, max } => {
                write!(f, "too many human players: {got} (maximum {max})")
            }
            EngineError::TooManySnakes { got, max } => {
                write!(f, "too many snakes: {got} (maximum {max})")
            }
            EngineError::NoParticipants => write!(f, "match has no participants"),
            EngineError::InputClosed => write!(f, "direction input closed mid-match"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
