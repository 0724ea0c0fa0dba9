//! Output formatting utilities for CLI.

use std::fmt::Write as _;

use gridsnake::{Control, MatchOutcome, MatchResult};
use serde::Serialize;

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult<'a> {
    /// Random seed used.
    pub(super) seed: u64,
    /// The result itself.
    #[serde(flatten)]
    pub(super) result: &'a MatchResult,
}

/// Announcement line for a finished match.
pub(super) fn format_outcome(result: &MatchResult) -> String {
    match result.outcome {
        MatchOutcome::SinglePlayer {
            player_won, score, ..
        } => {
            if player_won {
                format!("YOU WIN! Your score is {score}.")
            } else {
                format!("YOU LOSE! Your score is {score}.")
            }
        }
        MatchOutcome::Multiplayer { score, .. } => {
            let name = result.winner_name().unwrap_or("Unknown");
            format!("{name} WINS with score {score}!!!")
        }
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult, seed: u64) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Match Result (seed: {seed})");
    let _ = writeln!(output, "  {}", format_outcome(result));
    let _ = writeln!(output, "  Rounds: {}\n", result.rounds);

    for (seat, p) in result.participants.iter().enumerate() {
        let kind = match p.control {
            Control::Human => "human",
            Control::Cpu => "cpu",
        };
        let _ = write!(
            output,
            "  Seat {}: {} ({kind}) mass {}",
            seat + 1,
            p.name,
            p.final_mass
        );
        if !p.alive {
            output.push_str(" [eaten]");
        }
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&result.final_board);
    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct TournamentStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that failed to set up or run.
    pub(super) failures: u64,
    /// Win count per seat.
    pub(super) wins: Vec<u64>,
    /// Total rounds across all games.
    total_rounds: u64,
    /// Sum of winning masses.
    total_winning_mass: u128,
    /// Heaviest winner seen.
    max_winning_mass: u64,
}

impl TournamentStats {
    /// Create new stats for n seats.
    pub(super) fn new(seats: usize) -> Self {
        Self {
            wins: vec![0; seats],
            ..Self::default()
        }
    }

    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_rounds += u64::from(result.rounds);

        if let MatchOutcome::Multiplayer { winner, score } = result.outcome {
            if let Some(seat) = result.participants.iter().position(|p| p.snake == winner)
                && let Some(wins) = self.wins.get_mut(seat)
            {
                *wins += 1;
            }
            self.total_winning_mass += u128::from(score);
            self.max_winning_mass = self.max_winning_mass.max(score);
        }
    }

    /// Count a game that errored.
    pub(super) fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Merge stats gathered on another thread.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.failures += other.failures;
        for (mine, theirs) in self.wins.iter_mut().zip(&other.wins) {
            *mine += theirs;
        }
        self.total_rounds += other.total_rounds;
        self.total_winning_mass += other.total_winning_mass;
        self.max_winning_mass = self.max_winning_mass.max(other.max_winning_mass);
    }

    /// Win rate for a seat (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn win_rate(&self, seat: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(seat).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Average match length in rounds.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_rounds(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games_played as f64
    }

    /// Average mass of the winning snake.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_winning_mass(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_winning_mass as f64 / self.games_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Games that failed.
    failures: u64,
    /// Per-seat statistics.
    seats: Vec<JsonTournamentSeat>,
    /// Average match length in rounds.
    avg_rounds: f64,
    /// Average winning mass.
    avg_winning_mass: f64,
    /// Heaviest winner.
    max_winning_mass: u64,
}

/// JSON-serializable per-seat tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentSeat {
    /// Seat number (1-based).
    seat: usize,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
}

impl JsonTournamentResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &TournamentStats) -> Self {
        let seats = (0..stats.wins.len())
            .map(|i| JsonTournamentSeat {
                seat: i + 1,
                wins: stats.wins[i],
                win_rate: stats.win_rate(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            failures: stats.failures,
            seats,
            avg_rounds: stats.avg_rounds(),
            avg_winning_mass: stats.avg_winning_mass(),
            max_winning_mass: stats.max_winning_mass,
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, wins) in stats.wins.iter().enumerate() {
        let rate = stats.win_rate(i) * 100.0;
        let _ = writeln!(output, "  Seat {}: {rate:.1}% ({wins} wins)", i + 1);
    }
    if stats.failures > 0 {
        let _ = writeln!(output, "  Failed games: {}", stats.failures);
    }

    let _ = writeln!(output, "\nAverage Match Length: {:.1} rounds", stats.avg_rounds());
    let _ = writeln!(
        output,
        "Winning Mass: {:.0} average, {} max",
        stats.avg_winning_mass(),
        stats.max_winning_mass
    );

    output
}
