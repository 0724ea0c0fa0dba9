//! Match setup: seating, food and spawning.

use rand::Rng;
use tracing::info;

use crate::engine::config::{MIN_MULTIPLAYER_HUMANS, MatchConfig};
use crate::engine::{Control, Match, MatchMode, Participant};
use crate::error::{EngineError, EngineResult};
use crate::game::{GameState, MAX_SNAKES, Snake};

/// Shortest generated CPU name.
const MIN_NAME_LEN: usize = 6;

/// Longest generated CPU name.
const MAX_NAME_LEN: usize = 20;

/// Random CPU display name: 6 to 20 lowercase letters, first capitalised.
pub fn random_name<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(MIN_NAME_LEN..=MAX_NAME_LEN);
    let mut name: String = (0..len)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();
    name[..1].make_ascii_uppercase();
    name
}

impl<R: Rng> Match<R> {
    /// One human against `config.cpu_opponents` CPU snakes.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid board dimensions or if placement fails.
    pub fn single_player(config: &MatchConfig, player: Snake, rng: R) -> EngineResult<Self> {
        Self::build(
            config,
            MatchMode::SinglePlayer,
            vec![player],
            config.cpu_opponents,
            rng,
        )
    }

    /// Several humans; CPU snakes fill the remaining seats of the table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TooFewHumans`] or [`EngineError::TooManyHumans`]
    /// when the human count does not fit the table, and placement errors.
    pub fn multiplayer(config: &MatchConfig, humans: Vec<Snake>, rng: R) -> EngineResult<Self> {
        if humans.len() < MIN_MULTIPLAYER_HUMANS {
            return Err(EngineError::TooFewHumans {
                got: humans.len(),
                min: MIN_MULTIPLAYER_HUMANS,
            });
        }
        if humans.len() > config.table_size {
            return Err(EngineError::TooManyHumans {
                got: humans.len(),
                max: config.table_size,
            });
        }
        let cpus = config.table_size - humans.len();
        Self::build(config, MatchMode::Multiplayer, humans, cpus, rng)
    }

    /// A last-snake-standing match between CPU snakes only.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoParticipants`] for zero CPUs, and placement
    /// errors.
    pub fn cpu_only(config: &MatchConfig, cpus: usize, rng: R) -> EngineResult<Self> {
        if cpus == 0 {
            return Err(EngineError::NoParticipants);
        }
        Self::build(config, MatchMode::Multiplayer, Vec::new(), cpus, rng)
    }

    fn build(
        config: &MatchConfig,
        mode: MatchMode,
        humans: Vec<Snake>,
        cpus: usize,
        mut rng: R,
    ) -> EngineResult<Self> {
        config.validate()?;
        let total = humans.len() + cpus;
        if total > MAX_SNAKES {
            return Err(EngineError::TooManySnakes {
                got: total,
                max: MAX_SNAKES,
            });
        }
        let mut state = GameState::new(config.board_width, config.board_height)?;
        let food_mass = config.food_mass_range();
        state.fill_food(config.food_count, &food_mass, &mut rng)?;

        let mut participants = Vec::with_capacity(total);
        for snake in humans {
            let snake = state.register(snake)?;
            participants.push(Participant {
                snake,
                control: Control::Human,
            });
        }
        for _ in 0..cpus {
            let name = random_name(&mut rng);
            let snake = state.register(Snake::new(0, &name))?;
            participants.push(Participant {
                snake,
                control: Control::Cpu,
            });
        }
        for participant in &participants {
            state.spawn_snake(participant.snake, &mut rng)?;
        }

        info!(
            ?mode,
            participants = participants.len(),
            width = config.board_width,
            height = config.board_height,
            "match set up"
        );

        Ok(Self::from_parts(state, participants, mode, food_mass, rng))
    }
}
