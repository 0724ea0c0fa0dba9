//! Single-step resolution and the direction input seam.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::trace;

use crate::error::EngineResult;
use crate::game::{
    CombatResult, Direction, FoodPickup, GameState, SnakeId, consume_food, move_snake,
    resolve_combat,
};

/// Supplies directions for human-controlled snakes.
///
/// The engine asks once per step. Implementations validate raw input
/// themselves and only hand back real directions; `None` means the input
/// is gone and the match cannot continue.
pub trait DirectionSource {
    /// Direction for the next step of `snake`.
    fn next_direction(&mut self, state: &GameState, snake: SnakeId) -> Option<Direction>;
}

impl<F> DirectionSource for F
where
    F: FnMut(&GameState, SnakeId) -> Option<Direction>,
{
    fn next_direction(&mut self, state: &GameState, snake: SnakeId) -> Option<Direction> {
        self(state, snake)
    }
}

/// Replays a fixed list of directions, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDirections {
    moves: Vec<Direction>,
    next: usize,
}

impl ScriptedDirections {
    /// Script the given moves. An empty script behaves as closed input.
    #[must_use]
    pub fn new(moves: Vec<Direction>) -> Self {
        Self { moves, next: 0 }
    }
}

impl DirectionSource for ScriptedDirections {
    fn next_direction(&mut self, _state: &GameState, _snake: SnakeId) -> Option<Direction> {
        let direction = *self.moves.get(self.next % self.moves.len().max(1))?;
        self.next += 1;
        Some(direction)
    }
}

/// Everything that happened during one attempted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Snake that stepped.
    pub snake: SnakeId,
    /// Direction attempted.
    pub direction: Direction,
    /// Whether the snake actually changed tiles.
    pub moved: bool,
    /// Food eaten on the tile it ended on.
    pub food: Option<FoodPickup>,
    /// Fight on the tile it ended on.
    pub combat: Option<CombatResult>,
}

impl StepReport {
    /// Whether the stepping snake was absorbed during this step.
    #[must_use]
    pub fn mover_eliminated(&self) -> bool {
        self.combat.is_some_and(|combat| !combat.mover_won)
    }
}

/// Apply one attempted step: move, eat any food on the resulting tile, then
/// fight a rival sharing that tile.
///
/// An edge move still resolves the tile the snake stayed on. Unknown or
/// eliminated snakes do nothing.
///
/// # Errors
///
/// Propagates [`crate::EngineError::BoardFull`] if replacement food cannot
/// be placed.
pub fn apply_step<R: Rng>(
    state: &mut GameState,
    snake: SnakeId,
    direction: Direction,
    food_mass: &RangeInclusive<u64>,
    rng: &mut R,
) -> EngineResult<StepReport> {
    let mut report = StepReport {
        snake,
        direction,
        moved: false,
        food: None,
        combat: None,
    };

    let GameState { board, snakes } = state;
    let Some(mover) = snakes.get_mut(usize::from(snake)) else {
        return Ok(report);
    };
    if !mover.alive {
        return Ok(report);
    }

    report.moved = move_snake(board, mover, direction);
    trace!(
        snake,
        %direction,
        moved = report.moved,
        x = mover.pos.x,
        y = mover.pos.y,
        "step"
    );

    report.food = consume_food(board, snakes, snake, food_mass, rng)?;
    report.combat = resolve_combat(board, snakes, snake);
    Ok(report)
}
