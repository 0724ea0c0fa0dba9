//! Match configuration.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::game::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_FOOD_MASS, MIN_FOOD_MASS};

/// Fewest humans a multiplayer match accepts.
pub const MIN_MULTIPLAYER_HUMANS: usize = 2;

/// Seats at a default multiplayer table, humans and CPUs together.
pub const DEFAULT_TABLE_SIZE: usize = 5;

/// Configuration for a match.
///
/// Missing fields fall back to the classic 10x10 game's values when loaded
/// from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Board width in tiles.
    pub board_width: u16,
    /// Board height in tiles.
    pub board_height: u16,
    /// Food items kept on the board at setup.
    pub food_count: usize,
    /// Smallest mass of a spawned food item.
    pub min_food_mass: u64,
    /// Largest mass of a spawned food item.
    pub max_food_mass: u64,
    /// CPU opponents in single-player mode.
    pub cpu_opponents: usize,
    /// Total seats in multiplayer mode; CPUs fill what humans leave.
    pub table_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_WIDTH,
            board_height: DEFAULT_HEIGHT,
            food_count: 5,
            min_food_mass: MIN_FOOD_MASS,
            max_food_mass: MAX_FOOD_MASS,
            cpu_opponents: DEFAULT_TABLE_SIZE - 1,
            table_size: DEFAULT_TABLE_SIZE,
        }
    }
}

impl MatchConfig {
    /// Inclusive range food masses are drawn from.
    #[must_use]
    pub const fn food_mass_range(&self) -> RangeInclusive<u64> {
        self.min_food_mass..=self.max_food_mass
    }

    /// Check the values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFoodMass`] unless
    /// `1 <= min_food_mass <= max_food_mass`.
    pub const fn validate(&self) -> EngineResult<()> {
        if self.min_food_mass == 0 || self.min_food_mass > self.max_food_mass {
            return Err(EngineError::InvalidFoodMass {
                min: self.min_food_mass,
                max: self.max_food_mass,
            });
        }
        Ok(())
    }

    /// Parse a configuration from JSON, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed JSON or mistyped fields.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_game() {
        let config = MatchConfig::default();
        assert_eq!((config.board_width, config.board_height), (10, 10));
        assert_eq!(config.food_count, 5);
        assert_eq!(config.food_mass_range(), 1..=999_999);
        assert_eq!(config.cpu_opponents, 4);
        assert_eq!(config.table_size, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MatchConfig::from_json(r#"{ "board_width": 16, "food_count": 8 }"#).unwrap();
        assert_eq!(config.board_width, 16);
        assert_eq!(config.board_height, 10);
        assert_eq!(config.food_count, 8);
        assert_eq!(config.max_food_mass, 999_999);
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(MatchConfig::from_json(r#"{ "board_width": "wide" }"#).is_err());
    }

    #[test]
    fn test_food_mass_range_validated() {
        assert!(MatchConfig::default().validate().is_ok());

        let zero = MatchConfig::from_json(r#"{ "min_food_mass": 0 }"#).unwrap();
        assert_eq!(
            zero.validate(),
            Err(EngineError::InvalidFoodMass {
                min: 0,
                max: 999_999,
            })
        );

        let reversed = MatchConfig {
            min_food_mass: 10,
            max_food_mass: 1,
            ..MatchConfig::default()
        };
        assert!(reversed.validate().is_err());
    }
}
