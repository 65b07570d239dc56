/// Primitive commands understood by the environment.
///
/// Coordinates follow the screen convention: `x` is the column and `y` the
/// row of the observation maps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    NoOp,
    SelectAll,
    SelectPoint { x: usize, y: usize },
    Move { x: usize, y: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommandKind {
    NoOp,
    SelectAll,
    SelectPoint,
    Move,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::NoOp => CommandKind::NoOp,
            Command::SelectAll => CommandKind::SelectAll,
            Command::SelectPoint { .. } => CommandKind::SelectPoint,
            Command::Move { .. } => CommandKind::Move,
        }
    }

    pub fn target(&self) -> Option<(usize, usize)> {
        match *self {
            Command::SelectPoint { x, y } | Command::Move { x, y } => Some((x, y)),
            _ => None,
        }
    }
}
