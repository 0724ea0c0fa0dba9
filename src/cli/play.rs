//! Interactive single-player and hot-seat multiplayer matches.

use super::output::format_outcome;
use super::{CliError, load_config, resolve_seed};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use gridsnake::{
    Direction, DirectionSource, GameState, Match, MatchResult, Profile, ProfileStore, SnakeId,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

/// Reads directions for human snakes from a line-oriented reader.
///
/// The board is redrawn before every prompt. Lines that are not exactly one
/// of the four direction tokens are rejected and the prompt repeats.
struct TerminalInput<R, W> {
    reader: R,
    writer: W,
    clear: bool,
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    fn new(reader: R, writer: W, clear: bool) -> Self {
        Self {
            reader,
            writer,
            clear,
        }
    }

    fn draw(&mut self, state: &GameState, snake: SnakeId) -> io::Result<()> {
        if self.clear {
            execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(self.writer, "{state}")?;
        if let Some(snake) = state.snake(snake) {
            writeln!(
                self.writer,
                "{} at ({}, {}), mass {}, {} moves per turn",
                snake.name,
                snake.pos.x,
                snake.pos.y,
                snake.mass,
                snake.moves_per_turn()
            )?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<Option<Direction>> {
        let mut line = String::new();
        loop {
            write!(
                self.writer,
                "Enter 'UP', 'DOWN', 'LEFT', or 'RIGHT' to move your snake: "
            )?;
            self.writer.flush()?;

            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.parse::<Direction>() {
                Ok(direction) => return Ok(Some(direction)),
                Err(e) => writeln!(self.writer, "{e}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> DirectionSource for TerminalInput<R, W> {
    fn next_direction(&mut self, state: &GameState, snake: SnakeId) -> Option<Direction> {
        let read = self.draw(state, snake).and_then(|()| self.prompt());
        match read {
            Ok(direction) => direction,
            Err(e) => {
                warn!(error = %e, "terminal input failed");
                None
            }
        }
    }
}

fn stdin_input() -> TerminalInput<io::StdinLock<'static>, io::Stdout> {
    TerminalInput::new(io::stdin().lock(), io::stdout(), true)
}

/// Fold final masses into the profiles of the humans that played.
fn record_profiles(
    store: &ProfileStore,
    profiles: &mut [Profile],
    result: &MatchResult,
) -> Result<(), CliError> {
    for standing in result.humans() {
        let Some(profile) = profiles
            .iter_mut()
            .find(|p| standing.owner.as_deref() == Some(p.id.as_str()))
        else {
            continue;
        };
        let gained = profile.record_match(standing.final_mass);
        if gained > 0 {
            println!("{} reached level {}!", profile.name, profile.level);
        }
        store.save(profile)?;
        info!(name = %profile.name, level = profile.level, exp = profile.exp, "profile updated");
    }
    Ok(())
}

/// Execute the single-player command.
///
/// # Errors
///
/// Returns an error if setup, input or profile storage fails.
pub(crate) fn single(
    name: &str,
    profiles_dir: &Path,
    seed: Option<u64>,
    config: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    let mut rng = SmallRng::seed_from_u64(resolve_seed(seed));
    let store = ProfileStore::open(profiles_dir)?;

    let mut profile = store.load_or_create(name, &mut rng)?;
    println!("{profile}\n");

    let game = Match::single_player(&config, profile.snake(), rng)?;
    let result = game.play(&mut stdin_input())?;

    println!("{}", result.final_board);
    println!("{}", format_outcome(&result));
    record_profiles(&store, std::slice::from_mut(&mut profile), &result)
}

/// Execute the multiplayer command.
///
/// # Errors
///
/// Returns an error for duplicate names, or if setup, input or profile
/// storage fails.
pub(crate) fn multi(
    names: &[String],
    profiles_dir: &Path,
    seed: Option<u64>,
    config: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    let mut rng = SmallRng::seed_from_u64(resolve_seed(seed));
    let store = ProfileStore::open(profiles_dir)?;

    let mut seen = HashSet::new();
    let mut profiles = Vec::with_capacity(names.len());
    for name in names {
        let profile = store.load_or_create(name, &mut rng)?;
        if !seen.insert(profile.key()) {
            return Err(CliError::new(format!("Duplicate player name: {name}")));
        }
        profiles.push(profile);
    }

    let humans = profiles.iter().map(Profile::snake).collect();
    let game = Match::multiplayer(&config, humans, rng)?;
    let result = game.play(&mut stdin_input())?;

    println!("{}", result.final_board);
    println!("{}", format_outcome(&result));
    record_profiles(&store, &mut profiles, &result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsnake::Snake;

    fn state_with_snake() -> GameState {
        let mut state = GameState::new(3, 3).unwrap();
        let id = state.register(Snake::new(0, "ann")).unwrap();
        state
            .spawn_snake(id, &mut SmallRng::seed_from_u64(0))
            .unwrap();
        state
    }

    #[test]
    fn test_invalid_tokens_reprompt() {
        let state = state_with_snake();
        let mut out = Vec::new();
        let mut input = TerminalInput::new(&b"up\nNORTH\n LEFT \n"[..], &mut out, false);
        assert_eq!(input.next_direction(&state, 0), Some(Direction::Left));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("to move your snake").count(), 3);
        assert!(text.contains("ANN at"));
    }

    #[test]
    fn test_eof_closes_input() {
        let state = state_with_snake();
        let mut input = TerminalInput::new(&b"sideways\n"[..], Vec::new(), false);
        assert_eq!(input.next_direction(&state, 0), None);
    }
}
