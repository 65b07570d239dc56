mod cells;
mod command;
mod move_to_beacon;
mod observation;

use thiserror::Error;

pub use cells::CellSet;
pub use command::{Command, CommandKind};
pub use move_to_beacon::{MoveToBeaconConfig, MoveToBeaconEnv};
pub use observation::{Observation, PlayerRelative};

/// Side length of the square screen every observation is laid out on.
pub const SCREEN_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    #[error("environment is not ready to receive commands, call reset first")]
    NotReady,
    #[error("command {0:?} is not available in the current observation")]
    CommandUnavailable(CommandKind),
    #[error("coordinate ({x}, {y}) lies outside the {size}x{size} screen")]
    OutOfBounds { x: usize, y: usize, size: usize },
}

pub trait Env {
    fn reset(&mut self) -> Observation;
    fn step(&mut self, command: &Command) -> Result<(Observation, f64, bool), EnvError>;
    fn render(&self) -> String;
}
