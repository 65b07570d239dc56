use rand::Rng;

use crate::env::{CellSet, Command, Observation, PlayerRelative};
use crate::state::StateDescriptor;

/// Abstract actions available to the agent. The declaration order is the
/// column order of the Q-table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    NoOp,
    SelectUnit,
    DeselectRandomBackgroundCell,
    MoveToTarget,
    MoveToRandomPosition,
    MoveToCenter,
}

impl Action {
    pub const COUNT: usize = 6;

    pub const ALL: [Action; Action::COUNT] = [
        Action::NoOp,
        Action::SelectUnit,
        Action::DeselectRandomBackgroundCell,
        Action::MoveToTarget,
        Action::MoveToRandomPosition,
        Action::MoveToCenter,
    ];
}

impl From<usize> for Action {
    fn from(value: usize) -> Self {
        match Action::ALL.get(value) {
            Some(action) => *action,
            None => panic!(
                "action index {} is outside the catalog range 0..{}",
                value,
                Action::COUNT
            ),
        }
    }
}

impl From<Action> for usize {
    fn from(value: Action) -> Self {
        value as usize
    }
}

fn round_cell(value: f64, size: usize) -> usize {
    (value.round().max(0.0) as usize).min(size.saturating_sub(1))
}

/// Screen coordinate the `MoveToCenter` action walks to, as `(x, y)`.
pub fn map_center(obs: &Observation) -> (usize, usize) {
    let (rows, cols) = obs.shape();
    (cols / 2, rows / 2)
}

fn move_to_target(obs: &Observation, target: &CellSet) -> Command {
    let (rows, cols) = obs.shape();
    match target.mean() {
        Some((row, col)) => Command::Move {
            x: round_cell(col, cols),
            y: round_cell(row, rows),
        },
        None => Command::NoOp,
    }
}

// Target cells lie inside the map, so both ranges are non-empty.
fn move_to_random_position<R: Rng + ?Sized>(
    obs: &Observation,
    target: &CellSet,
    rng: &mut R,
) -> Command {
    let (rows, cols) = obs.shape();
    match target.max() {
        Some((row, col)) if row < rows && col < cols => Command::Move {
            x: rng.gen_range(col..cols),
            y: rng.gen_range(row..rows),
        },
        _ => Command::NoOp,
    }
}

fn deselect_unit<R: Rng + ?Sized>(obs: &Observation, rng: &mut R) -> Command {
    let background: CellSet = obs.cells_of(PlayerRelative::Background);
    if background.is_empty() {
        return Command::NoOp;
    }
    match background.get(rng.gen_range(0..background.len())) {
        Some((row, col)) => Command::SelectPoint { x: col, y: row },
        None => Command::NoOp,
    }
}

/// Turns an action index into a concrete command. Movement and deselection
/// need a selected unit; without one they degrade to `NoOp`.
///
/// Panics when `action_index` is not a valid catalog position.
pub fn resolve<R: Rng + ?Sized>(
    action_index: usize,
    state: &StateDescriptor,
    obs: &Observation,
    target: &CellSet,
    rng: &mut R,
) -> Command {
    let action: Action = Action::from(action_index);
    match action {
        Action::NoOp => Command::NoOp,
        Action::MoveToTarget if state.selected => move_to_target(obs, target),
        Action::SelectUnit => Command::SelectAll,
        Action::DeselectRandomBackgroundCell if state.selected => deselect_unit(obs, rng),
        Action::MoveToRandomPosition if state.selected => {
            move_to_random_position(obs, target, rng)
        }
        Action::MoveToCenter if state.selected => {
            let (x, y) = map_center(obs);
            Command::Move { x, y }
        }
        _ => Command::NoOp,
    }
}
