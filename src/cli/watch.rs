//! Watch command implementation - interactive TUI spectator.

use super::{CliError, load_config, resolve_seed};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gridsnake::{GameState, Match, RoundSummary, ScriptedDirections, SnakeId};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::stdout;
use std::path::Path;
use std::time::{Duration, Instant};

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the match cannot be set up or the TUI fails.
pub(crate) fn execute(
    seed: Option<u64>,
    players: usize,
    speed: u64,
    config: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    let seed = resolve_seed(seed);
    let game = Match::cpu_only(&config, players, SmallRng::seed_from_u64(seed))?;
    run_tui(App::new(game, seed, speed))
}

/// App state for the TUI.
struct App {
    game: Match<SmallRng>,
    seed: u64,
    paused: bool,
    speed_ms: u64,
    last_step: Instant,
    last_round: Option<RoundSummary>,
    log: Vec<String>,
}

impl App {
    fn new(game: Match<SmallRng>, seed: u64, speed_ms: u64) -> Self {
        Self {
            game,
            seed,
            paused: true, // Start paused
            speed_ms,
            last_step: Instant::now(),
            last_round: None,
            log: Vec::new(),
        }
    }

    fn step_forward(&mut self) -> Result<(), CliError> {
        if self.game.is_over() {
            return Ok(());
        }
        let summary = self.game.play_round(&mut ScriptedDirections::new(Vec::new()))?;
        let round = self.game.rounds();
        for &id in &summary.eliminated {
            let name = snake_name(self.game.state(), id);
            self.log.push(format!("round {round}: {name} was eaten"));
        }
        self.last_round = Some(summary);
        self.last_step = Instant::now();
        Ok(())
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(50);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(2000);
    }

    fn should_auto_step(&self) -> bool {
        !self.paused
            && !self.game.is_over()
            && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }
}

fn snake_name(state: &GameState, id: SnakeId) -> &str {
    state.snake(id).map_or("?", |s| s.name.as_str())
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = event_loop(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if app.should_auto_step() {
            app.step_forward()?;
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Char('n') | KeyCode::Right => {
                    app.paused = true;
                    app.step_forward()?;
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app);
    render_stats(f, main_chunks[1], app);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = if app.game.is_over() {
        "GAME OVER"
    } else if app.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };

    let title = format!(
        " Gridsnake | Seed {} | Round {} | {} | Speed: {}ms ",
        app.seed,
        app.game.rounds(),
        status,
        app.speed_ms
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn snake_color(id: SnakeId) -> Color {
    match id % 8 {
        0 => Color::Red,
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Magenta,
        5 => Color::Cyan,
        6 => Color::LightRed,
        _ => Color::LightBlue,
    }
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    // The engine's own grid dump, one line per row.
    let dump = app.game.state().render();
    let lines: Vec<Line> = dump
        .lines()
        .map(|row| Line::from(row.to_string()))
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Board "))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let state = app.game.state();
    let mut lines = vec![Line::from("")];

    for snake in &state.snakes {
        let status = if snake.alive { "" } else { " [EATEN]" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", snake.name),
                Style::default()
                    .fg(snake_color(snake.id))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "mass {} ({} moves){status}",
                snake.mass,
                snake.moves_per_turn()
            )),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!("Food on board: {}", state.board.count_food())));
    if let Some(round) = &app.last_round {
        lines.push(Line::from(format!(
            "Last round: {} steps, {} food eaten",
            round.steps, round.food_eaten
        )));
    }

    lines.push(Line::from(""));
    let room = usize::from(area.height).saturating_sub(lines.len() + 2);
    let skip = app.log.len().saturating_sub(room);
    lines.extend(app.log[skip..].iter().map(|entry| Line::from(entry.as_str())));

    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Snakes "));
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let help = " [Space] Play/Pause  [n/→] Step  [+/-] Speed  [q] Quit ";
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
