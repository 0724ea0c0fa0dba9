//! Tournament command implementation.

use super::output::{JsonTournamentResult, TournamentStats, format_tournament_text};
use super::{CliError, OutputFormat, load_config, resolve_seed};
use gridsnake::{EngineError, Match, ScriptedDirections};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::warn;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
#[allow(clippy::too_many_arguments, clippy::cast_precision_loss)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    players: usize,
    threads: Option<usize>,
    format: OutputFormat,
    progress: bool,
    config: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    if players == 0 {
        return Err(EngineError::NoParticipants.into());
    }

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread folds into its own stats; the partials are merged at the end.
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || TournamentStats::new(players),
            |mut local, i| {
                let game_seed = base_seed.wrapping_add(i);
                let played = Match::cpu_only(&config, players, SmallRng::seed_from_u64(game_seed))
                    .and_then(|game| game.play(&mut ScriptedDirections::new(Vec::new())));
                match played {
                    Ok(result) => local.add_result(&result),
                    Err(e) => {
                        warn!(seed = game_seed, error = %e, "game failed");
                        local.add_failure();
                    }
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local
            },
        )
        .reduce(
            || TournamentStats::new(players),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonTournamentResult::from_stats(&stats))?;
            println!("{json}");
        }
    }

    Ok(())
}
