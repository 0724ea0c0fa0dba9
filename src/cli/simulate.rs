//! Simulate command implementation.

use super::output::{JsonMatchResult, format_text};
use super::{CliError, OutputFormat, load_config, resolve_seed};
use gridsnake::{Match, ScriptedDirections};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the match cannot be set up or run.
pub(crate) fn execute(
    seed: Option<u64>,
    players: usize,
    format: OutputFormat,
    config: Option<&std::path::Path>,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    let seed = resolve_seed(seed);

    let game = Match::cpu_only(&config, players, SmallRng::seed_from_u64(seed))?;
    // No humans are seated, so the input is never consulted.
    let result = game.play(&mut ScriptedDirections::new(Vec::new()))?;

    match format {
        OutputFormat::Text => print!("{}", format_text(&result, seed)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonMatchResult {
                seed,
                result: &result,
            })?;
            println!("{json}");
        }
    }

    Ok(())
}
