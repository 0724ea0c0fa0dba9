//! Player profiles: experience and level bookkeeping across matches.
//!
//! A profile belongs to a human player. After each match the player's final
//! mass is folded into experience and the level is recomputed. Profiles are
//! persisted by [`ProfileStore`] as one JSON document each.

mod store;

pub use store::{ProfileError, ProfileStore};

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::game::Snake;

/// Experience needed to leave level 1.
pub const STARTING_REQUIRED_EXP: u64 = 1_000_000;

/// Persistent record for a human player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Random 64-bit identifier, hex encoded.
    pub id: String,
    /// Display name as typed by the player.
    pub name: String,
    /// Current level, starting at 1.
    pub level: u32,
    /// Accumulated experience.
    pub exp: u64,
    /// Experience at which the next level is reached.
    pub required_exp: u64,
}

impl Profile {
    /// Fresh level-1 profile with a random id.
    #[must_use]
    pub fn new<R: RngCore>(name: &str, rng: &mut R) -> Self {
        Self {
            id: format!("{:016x}", rng.next_u64()),
            name: name.to_string(),
            level: 1,
            exp: 0,
            required_exp: STARTING_REQUIRED_EXP,
        }
    }

    /// Lookup key used by the store: the upper-cased name.
    #[must_use]
    pub fn key(&self) -> String {
        profile_key(&self.name)
    }

    /// A new snake for this player, linked to the profile.
    #[must_use]
    pub fn snake(&self) -> Snake {
        let mut snake = Snake::new(0, &self.name);
        snake.attach_owner(&self.id);
        snake
    }

    /// Fold a match's final mass into experience and level up.
    ///
    /// Returns the number of levels gained.
    pub fn record_match(&mut self, final_mass: u64) -> u32 {
        self.exp = self.exp.saturating_add(final_mass);
        self.level_up()
    }

    /// Raise the level while experience covers the requirement. Each new
    /// level multiplies the requirement by `10^level`.
    ///
    /// Returns the number of levels gained.
    pub fn level_up(&mut self) -> u32 {
        let start = self.level;
        while self.exp >= self.required_exp {
            self.level = self.level.saturating_add(1);
            let factor = 10u64.checked_pow(self.level).unwrap_or(u64::MAX);
            let next = self.required_exp.saturating_mul(factor);
            if next == self.required_exp {
                // Saturated: no further level can be reached.
                break;
            }
            self.required_exp = next;
        }
        self.level - start
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Level: {}", self.level)?;
        writeln!(f, "EXP: {}", self.exp)?;
        write!(f, "Required EXP to reach next level: {}", self.required_exp)
    }
}

/// Normalise a player name into a store key.
#[must_use]
pub fn profile_key(name: &str) -> String {
    name.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn fresh(name: &str) -> Profile {
        Profile::new(name, &mut SmallRng::seed_from_u64(5))
    }

    #[test]
    fn test_new_profile_defaults() {
        let profile = fresh("ann");
        assert_eq!(profile.level, 1);
        assert_eq!(profile.exp, 0);
        assert_eq!(profile.required_exp, 1_000_000);
        assert_eq!(profile.id.len(), 16);
        assert_eq!(profile.key(), "ANN");
    }

    #[test]
    fn test_below_requirement_no_level() {
        let mut profile = fresh("ann");
        assert_eq!(profile.record_match(999_999), 0);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.exp, 999_999);
    }

    #[test]
    fn test_level_up_multiplies_requirement() {
        let mut profile = fresh("ann");
        assert_eq!(profile.record_match(1_000_000), 1);
        assert_eq!(profile.level, 2);
        assert_eq!(profile.required_exp, 100_000_000);

        // 1e8 -> level 3, requirement 1e8 * 1e3 = 1e11.
        assert_eq!(profile.record_match(99_000_000), 1);
        assert_eq!(profile.level, 3);
        assert_eq!(profile.required_exp, 100_000_000_000);
    }

    #[test]
    fn test_level_up_saturates() {
        let mut profile = fresh("max");
        profile.record_match(u64::MAX);
        profile.record_match(u64::MAX);
        assert_eq!(profile.exp, u64::MAX);
        assert!(profile.level > 1);
    }

    #[test]
    fn test_snake_is_linked() {
        let profile = fresh("bob");
        let snake = profile.snake();
        assert_eq!(snake.name, "BOB");
        assert_eq!(snake.owner(), Some(profile.id.as_str()));
        assert_eq!(snake.mass, 1);
    }

    #[test]
    fn test_display_lists_fields() {
        let text = fresh("cy").to_string();
        assert!(text.contains("Name: cy"));
        assert!(text.contains("Level: 1"));
        assert!(text.contains("1000000"));
    }
}
