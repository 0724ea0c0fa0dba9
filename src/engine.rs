//! Turn engine and match loop.
//!
//! A [`Match`] owns the game state, the seating order and the random
//! source. Each round every live participant spends its move budget one
//! step at a time, humans first and then CPUs, each group in registration
//! order. Every effect of a step lands before the next step starts.
//!
//! Termination:
//! - Single-player: every CPU snake is gone (player wins) or the player
//!   snake is gone (player loses). Checked after each full round.
//! - Multiplayer: at most one snake remains on the board.

mod config;
mod setup;
mod turn;

pub use config::{DEFAULT_TABLE_SIZE, MIN_MULTIPLAYER_HUMANS, MatchConfig};
pub use setup::random_name;
pub use turn::{DirectionSource, ScriptedDirections, StepReport, apply_step};

use std::ops::RangeInclusive;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::game::{Direction, GameState, Snake, SnakeId, assert_invariants};

/// Who picks a participant's directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    /// Directions come from a [`DirectionSource`].
    Human,
    /// Directions are drawn uniformly at random.
    Cpu,
}

/// A seat in the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    /// The snake this seat moves.
    pub snake: SnakeId,
    /// How its directions are chosen.
    pub control: Control,
}

/// Rules for when a match ends and who wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// One human player against CPU snakes.
    SinglePlayer,
    /// Last snake standing.
    Multiplayer,
}

/// What happened during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Attempted steps across all participants.
    pub steps: u32,
    /// Food items eaten.
    pub food_eaten: u32,
    /// Snakes absorbed this round, in order.
    pub eliminated: Vec<SnakeId>,
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Single-player result.
    SinglePlayer {
        /// The human player's snake.
        player: SnakeId,
        /// Whether the player outlived every CPU.
        player_won: bool,
        /// Player's final mass.
        score: u64,
    },
    /// Multiplayer result.
    Multiplayer {
        /// First surviving snake, humans scanned before CPUs.
        winner: SnakeId,
        /// Winner's final mass.
        score: u64,
    },
}

impl MatchOutcome {
    /// Final mass reported as the score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        match self {
            MatchOutcome::SinglePlayer { score, .. } | MatchOutcome::Multiplayer { score, .. } => {
                *score
            }
        }
    }
}

/// Final standing of one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantResult {
    /// Snake id.
    pub snake: SnakeId,
    /// Display name.
    pub name: String,
    /// Human or CPU.
    pub control: Control,
    /// Mass at the end of the match, before it was restored to 1.
    pub final_mass: u64,
    /// Whether the snake survived.
    pub alive: bool,
    /// Linked profile, if any.
    pub owner: Option<String>,
}

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// How it ended.
    pub outcome: MatchOutcome,
    /// Rounds played.
    pub rounds: u32,
    /// Per-participant standings in seating order.
    pub participants: Vec<ParticipantResult>,
    /// Grid dump of the final board.
    pub final_board: String,
}

impl MatchResult {
    /// Standings of human participants only.
    pub fn humans(&self) -> impl Iterator<Item = &ParticipantResult> {
        self.participants
            .iter()
            .filter(|p| p.control == Control::Human)
    }

    /// Name of the winning snake, if the outcome names one.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        let id = match self.outcome {
            MatchOutcome::SinglePlayer {
                player, player_won, ..
            } => player_won.then_some(player)?,
            MatchOutcome::Multiplayer { winner, .. } => winner,
        };
        self.participants
            .iter()
            .find(|p| p.snake == id)
            .map(|p| p.name.as_str())
    }
}

/// A match in progress.
#[derive(Debug)]
pub struct Match<R> {
    state: GameState,
    participants: Vec<Participant>,
    mode: MatchMode,
    food_mass: RangeInclusive<u64>,
    rng: R,
    rounds: u32,
}

impl<R: Rng> Match<R> {
    /// Assemble a match from an already populated state.
    ///
    /// Participants are re-ordered so humans come first; the relative order
    /// inside each group is kept.
    #[must_use]
    pub fn from_parts(
        state: GameState,
        mut participants: Vec<Participant>,
        mode: MatchMode,
        food_mass: RangeInclusive<u64>,
        rng: R,
    ) -> Self {
        participants.sort_by_key(|p| p.control == Control::Cpu);
        Self {
            state,
            participants,
            mode,
            food_mass,
            rng,
            rounds: 0,
        }
    }

    /// Current game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Seats in processing order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Match mode.
    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Rounds completed so far.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The human player's snake in single-player mode.
    #[must_use]
    pub fn player(&self) -> Option<SnakeId> {
        if self.mode != MatchMode::SinglePlayer {
            return None;
        }
        self.participants
            .iter()
            .find(|p| p.control == Control::Human)
            .map(|p| p.snake)
    }

    fn is_alive(&self, id: SnakeId) -> bool {
        self.state.snake(id).is_some_and(|snake| snake.alive)
    }

    /// Whether the match has reached a termination condition.
    #[must_use]
    pub fn is_over(&self) -> bool {
        match self.mode {
            MatchMode::SinglePlayer => {
                let player_down = self.player().is_none_or(|id| !self.is_alive(id));
                let cpus_down = self
                    .participants
                    .iter()
                    .filter(|p| p.control == Control::Cpu)
                    .all(|p| !self.is_alive(p.snake));
                player_down || cpus_down
            }
            MatchMode::Multiplayer => self.state.live_count() <= 1,
        }
    }

    /// Play one round: every live participant spends its move budget.
    ///
    /// A participant's turn ends early once its own snake is absorbed. In
    /// single-player mode the round still runs to the end after the player
    /// is absorbed; [`Match::is_over`] reports it afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InputClosed`] if a human's input runs dry and
    /// [`EngineError::BoardFull`] if replacement food cannot be placed.
    pub fn play_round<D>(&mut self, input: &mut D) -> EngineResult<RoundSummary>
    where
        D: DirectionSource + ?Sized,
    {
        let mut summary = RoundSummary::default();

        for seat in 0..self.participants.len() {
            let Participant { snake, control } = self.participants[seat];
            let Some(budget) = self
                .state
                .snake(snake)
                .filter(|s| s.alive)
                .map(Snake::moves_per_turn)
            else {
                continue;
            };

            for _ in 0..budget {
                let direction = match control {
                    Control::Human => input
                        .next_direction(&self.state, snake)
                        .ok_or(EngineError::InputClosed)?,
                    Control::Cpu => Direction::random(&mut self.rng),
                };
                let report =
                    apply_step(&mut self.state, snake, direction, &self.food_mass, &mut self.rng)?;

                summary.steps += 1;
                if report.food.is_some() {
                    summary.food_eaten += 1;
                }
                if let Some(combat) = report.combat {
                    summary.eliminated.push(combat.loser);
                }
                if report.mover_eliminated() {
                    break;
                }
            }
        }

        self.rounds += 1;
        assert_invariants(&self.state);
        debug!(
            round = self.rounds,
            steps = summary.steps,
            eliminated = summary.eliminated.len(),
            remaining = self.state.live_count(),
            "round complete"
        );
        Ok(summary)
    }

    /// Play rounds until the match is over.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Match::play_round`].
    pub fn run<D>(&mut self, input: &mut D) -> EngineResult<()>
    where
        D: DirectionSource + ?Sized,
    {
        while !self.is_over() {
            self.play_round(input)?;
        }
        Ok(())
    }

    /// Run to completion and finish.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Match::play_round`].
    pub fn play<D>(mut self, input: &mut D) -> EngineResult<MatchResult>
    where
        D: DirectionSource + ?Sized,
    {
        self.run(input)?;
        Ok(self.finish())
    }

    /// Compute the outcome, record final masses and restore every snake's
    /// mass to 1.
    ///
    /// # Panics
    ///
    /// Panics if no snake survived (or a single-player match has no human),
    /// which the combat rules make unreachable.
    #[must_use]
    pub fn finish(mut self) -> MatchResult {
        let outcome = self.outcome();
        let final_board = self.state.render();

        let participants = self
            .participants
            .iter()
            .filter_map(|p| {
                let snake = self.state.snake(p.snake)?;
                Some(ParticipantResult {
                    snake: p.snake,
                    name: snake.name.clone(),
                    control: p.control,
                    final_mass: snake.mass,
                    alive: snake.alive,
                    owner: snake.owner().map(str::to_string),
                })
            })
            .collect();

        for snake in &mut self.state.snakes {
            snake.restore();
        }

        info!(?outcome, rounds = self.rounds, "match finished");

        MatchResult {
            outcome,
            rounds: self.rounds,
            participants,
            final_board,
        }
    }

    fn outcome(&self) -> MatchOutcome {
        match self.mode {
            MatchMode::SinglePlayer => {
                let player = self
                    .player()
                    .unwrap_or_else(|| panic!("single-player match without a human player"));
                let snake = self
                    .state
                    .snake(player)
                    .unwrap_or_else(|| panic!("player snake {player} missing from the arena"));
                MatchOutcome::SinglePlayer {
                    player,
                    player_won: snake.alive,
                    score: snake.mass,
                }
            }
            MatchMode::Multiplayer => {
                let winner = self
                    .participants
                    .iter()
                    .filter_map(|p| self.state.snake(p.snake))
                    .find(|snake| snake.alive)
                    .unwrap_or_else(|| panic!("no surviving snake: board invariants were broken"));
                MatchOutcome::Multiplayer {
                    winner: winner.id,
                    score: winner.mass,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coord, Snake};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;

    fn seat(state: &mut GameState, name: &str, mass: u64, at: Coord) -> SnakeId {
        let id = state.register(Snake::new(0, name).with_mass(mass)).unwrap();
        state.board.tile_at_mut(at).unwrap().add_snake(id);
        state.snakes[usize::from(id)].place(at);
        id
    }

    #[test]
    fn test_from_parts_puts_humans_first() {
        let state = GameState::new(5, 5).unwrap();
        let participants = vec![
            Participant {
                snake: 0,
                control: Control::Cpu,
            },
            Participant {
                snake: 1,
                control: Control::Human,
            },
            Participant {
                snake: 2,
                control: Control::Cpu,
            },
            Participant {
                snake: 3,
                control: Control::Human,
            },
        ];
        let game = Match::from_parts(
            state,
            participants,
            MatchMode::Multiplayer,
            1..=10,
            SmallRng::seed_from_u64(0),
        );
        let order: Vec<_> = game.participants().iter().map(|p| p.snake).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_human_budget_follows_mass_tier() {
        let mut state = GameState::new(10, 10).unwrap();
        let hero = seat(&mut state, "hero", 150, Coord::new(0, 0));
        seat(&mut state, "cpu", 1, Coord::new(9, 9));
        let mut game = Match::from_parts(
            state,
            vec![
                Participant {
                    snake: hero,
                    control: Control::Human,
                },
                Participant {
                    snake: 1,
                    control: Control::Cpu,
                },
            ],
            MatchMode::SinglePlayer,
            1..=1,
            SmallRng::seed_from_u64(1),
        );

        let mut asked = 0;
        let mut input = |_: &GameState, _: SnakeId| {
            asked += 1;
            Some(Direction::Up)
        };
        game.play_round(&mut input).unwrap();
        assert_eq!(asked, 4);
        assert_eq!(game.rounds(), 1);
    }

    #[test]
    fn test_player_loss_ends_single_player() {
        // The player walks into a much heavier CPU and is absorbed.
        let mut state = GameState::new(10, 10).unwrap();
        let hero = seat(&mut state, "hero", 1, Coord::new(0, 0));
        let brute = seat(&mut state, "brute", 500, Coord::new(1, 0));
        let mut game = Match::from_parts(
            state,
            vec![
                Participant {
                    snake: hero,
                    control: Control::Human,
                },
                Participant {
                    snake: brute,
                    control: Control::Cpu,
                },
            ],
            MatchMode::SinglePlayer,
            1..=1,
            SmallRng::seed_from_u64(2),
        );

        // Mass 1 buys five steps, but the turn stops at the fatal one.
        let mut asked = 0;
        let mut input = |_: &GameState, _: SnakeId| {
            asked += 1;
            Some(Direction::Right)
        };
        game.run(&mut input).unwrap();
        assert_eq!(asked, 1);

        let result = game.finish();
        assert_eq!(
            result.outcome,
            MatchOutcome::SinglePlayer {
                player: hero,
                player_won: false,
                score: 1,
            }
        );
        assert_eq!(result.rounds, 1);
        assert_eq!(result.participants[1].final_mass, 501);
        assert!(result.winner_name().is_none());
    }

    #[test]
    fn test_cpu_kill_lets_round_finish() {
        // A zero-stepping rng makes every CPU step go up.
        let mut state = GameState::new(5, 5).unwrap();
        let hero = seat(&mut state, "hero", 1, Coord::new(0, 0));
        let brute = seat(&mut state, "brute", 500, Coord::new(0, 1));
        let late = seat(&mut state, "late", 1, Coord::new(2, 2));
        let mut game = Match::from_parts(
            state,
            vec![
                Participant {
                    snake: hero,
                    control: Control::Human,
                },
                Participant {
                    snake: brute,
                    control: Control::Cpu,
                },
                Participant {
                    snake: late,
                    control: Control::Cpu,
                },
            ],
            MatchMode::SinglePlayer,
            1..=1,
            StepRng::new(0, 0),
        );

        // The player only bumps into the left edge.
        let mut input = ScriptedDirections::new(vec![Direction::Left]);
        let summary = game.play_round(&mut input).unwrap();
        assert_eq!(summary.eliminated, vec![hero]);
        assert!(game.is_over());

        // Seated after the killer, still took its turn.
        assert_eq!(game.state().snakes[usize::from(late)].pos, Coord::new(2, 0));

        let result = game.finish();
        assert_eq!(result.rounds, 1);
        assert_eq!(
            result.outcome,
            MatchOutcome::SinglePlayer {
                player: hero,
                player_won: false,
                score: 1,
            }
        );
        assert_eq!(result.participants[1].final_mass, 501);
        assert!(result.participants[2].alive);
    }

    #[test]
    fn test_input_closed_is_an_error() {
        let mut state = GameState::new(10, 10).unwrap();
        let hero = seat(&mut state, "hero", 1, Coord::new(0, 0));
        let mut game = Match::from_parts(
            state,
            vec![Participant {
                snake: hero,
                control: Control::Human,
            }],
            MatchMode::Multiplayer,
            1..=1,
            SmallRng::seed_from_u64(2),
        );
        let mut input = ScriptedDirections::new(Vec::new());
        assert_eq!(game.play_round(&mut input).unwrap_err(), EngineError::InputClosed);
    }

    #[test]
    fn test_cpu_only_match_finishes() {
        let config = MatchConfig::default();
        let game = Match::cpu_only(&config, 5, SmallRng::seed_from_u64(77)).unwrap();
        let mut no_humans = ScriptedDirections::new(Vec::new());
        let result = game.play(&mut no_humans).unwrap();

        let MatchOutcome::Multiplayer { winner, score } = result.outcome else {
            panic!("expected a multiplayer outcome");
        };
        let survivors: Vec<_> = result.participants.iter().filter(|p| p.alive).collect();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].snake, winner);
        assert_eq!(survivors[0].final_mass, score);
        assert!(result.rounds > 0);
    }

    #[test]
    fn test_finish_restores_mass() {
        let mut state = GameState::new(10, 10).unwrap();
        let solo = seat(&mut state, "solo", 777, Coord::new(2, 2));
        let game = Match::from_parts(
            state,
            vec![Participant {
                snake: solo,
                control: Control::Cpu,
            }],
            MatchMode::Multiplayer,
            1..=1,
            SmallRng::seed_from_u64(0),
        );
        assert!(game.is_over());
        let result = game.finish();
        assert_eq!(
            result.outcome,
            MatchOutcome::Multiplayer {
                winner: solo,
                score: 777,
            }
        );
        assert_eq!(result.participants[0].final_mass, 777);
        assert_eq!(result.winner_name(), Some("SOLO"));
    }
}
