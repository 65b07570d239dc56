use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Command, CommandKind, Env, EnvError, Observation, PlayerRelative, SCREEN_SIZE};

#[derive(Debug, Clone)]
pub struct MoveToBeaconConfig {
    pub size: usize,
    /// The unit covers the square of side `2 * unit_radius + 1` around its centre.
    pub unit_radius: usize,
    pub beacon_radius: usize,
    /// Cells travelled per step along each axis.
    pub speed: usize,
    pub max_steps: u128,
    pub seed: u64,
}

impl Default for MoveToBeaconConfig {
    fn default() -> Self {
        Self {
            size: SCREEN_SIZE,
            unit_radius: 1,
            beacon_radius: 2,
            speed: 2,
            max_steps: 400,
            seed: 42,
        }
    }
}

/// Grid world where a single unit must walk onto a beacon. Touching the
/// beacon pays a reward of 1 and respawns it somewhere else.
#[derive(Debug, Clone)]
pub struct MoveToBeaconEnv {
    config: MoveToBeaconConfig,
    ready: bool,
    unit: (usize, usize),
    destination: Option<(usize, usize)>,
    beacon: (usize, usize),
    selected: bool,
    curr_step: u128,
    rng: StdRng,
}

impl MoveToBeaconEnv {
    pub fn new(config: MoveToBeaconConfig) -> Self {
        let rng: StdRng = StdRng::seed_from_u64(config.seed);
        let centre: usize = config.size / 2;
        Self {
            config,
            ready: false,
            unit: (centre, centre),
            destination: None,
            beacon: (centre, centre),
            selected: false,
            curr_step: 0,
            rng,
        }
    }

    pub fn unit_position(&self) -> (usize, usize) {
        self.unit
    }

    pub fn beacon_position(&self) -> (usize, usize) {
        self.beacon
    }

    fn random_centre(&mut self, radius: usize) -> (usize, usize) {
        let high: usize = self.config.size - radius;
        (
            self.rng.gen_range(radius..high),
            self.rng.gen_range(radius..high),
        )
    }

    fn respawn_beacon(&mut self) {
        let clearance: usize = self.config.unit_radius + self.config.beacon_radius;
        loop {
            let beacon: (usize, usize) = self.random_centre(self.config.beacon_radius);
            let distance: usize = beacon.0.abs_diff(self.unit.0).max(beacon.1.abs_diff(self.unit.1));
            if distance > clearance {
                self.beacon = beacon;
                return;
            }
        }
    }

    fn square(&self, centre: (usize, usize), radius: usize) -> impl Iterator<Item = (usize, usize)> {
        let last: usize = self.config.size - 1;
        let rows = centre.0.saturating_sub(radius)..=(centre.0 + radius).min(last);
        let cols = centre.1.saturating_sub(radius)..=(centre.1 + radius).min(last);
        rows.flat_map(move |r| cols.clone().map(move |c| (r, c)))
    }

    fn unit_covers(&self, row: usize, col: usize) -> bool {
        let radius: usize = self.config.unit_radius;
        row.abs_diff(self.unit.0) <= radius && col.abs_diff(self.unit.1) <= radius
    }

    fn on_beacon(&self) -> bool {
        let radius: usize = self.config.beacon_radius;
        self.unit.0.abs_diff(self.beacon.0) <= radius && self.unit.1.abs_diff(self.beacon.1) <= radius
    }

    fn advance(&mut self) {
        if let Some((row, col)) = self.destination {
            let speed: usize = self.config.speed;
            self.unit.0 = approach(self.unit.0, row, speed);
            self.unit.1 = approach(self.unit.1, col, speed);
            if self.unit == (row, col) {
                self.destination = None;
            }
        }
    }

    fn available_commands(&self) -> Vec<CommandKind> {
        let mut commands: Vec<CommandKind> = vec![
            CommandKind::NoOp,
            CommandKind::SelectAll,
            CommandKind::SelectPoint,
        ];
        if self.selected {
            commands.push(CommandKind::Move);
        }
        commands
    }

    fn observe(&self) -> Observation {
        let size: usize = self.config.size;
        let mut player_relative: Array2<u8> = Array2::zeros((size, size));
        let mut selected: Array2<u8> = Array2::zeros((size, size));
        for (r, c) in self.square(self.beacon, self.config.beacon_radius) {
            player_relative[[r, c]] = PlayerRelative::Neutral as u8;
        }
        for (r, c) in self.square(self.unit, self.config.unit_radius) {
            player_relative[[r, c]] = PlayerRelative::SelfUnit as u8;
            if self.selected {
                selected[[r, c]] = 1;
            }
        }
        Observation::new(player_relative, selected, self.available_commands())
    }
}

fn approach(from: usize, to: usize, speed: usize) -> usize {
    if from < to {
        (from + speed).min(to)
    } else {
        from.saturating_sub(speed).max(to)
    }
}

impl Env for MoveToBeaconEnv {
    fn reset(&mut self) -> Observation {
        self.unit = self.random_centre(self.config.unit_radius);
        self.respawn_beacon();
        self.destination = None;
        self.selected = false;
        self.curr_step = 0;
        self.ready = true;
        self.observe()
    }

    fn step(&mut self, command: &Command) -> Result<(Observation, f64, bool), EnvError> {
        if !self.ready {
            return Err(EnvError::NotReady);
        }
        if !self.available_commands().contains(&command.kind()) {
            return Err(EnvError::CommandUnavailable(command.kind()));
        }
        if let Some((x, y)) = command.target() {
            if x >= self.config.size || y >= self.config.size {
                return Err(EnvError::OutOfBounds {
                    x,
                    y,
                    size: self.config.size,
                });
            }
        }
        self.curr_step += 1;
        match *command {
            Command::NoOp => {}
            Command::SelectAll => self.selected = true,
            Command::SelectPoint { x, y } => self.selected = self.unit_covers(y, x),
            Command::Move { x, y } => self.destination = Some((y, x)),
        }
        self.advance();

        let mut reward: f64 = 0.0;
        if self.on_beacon() {
            reward = 1.0;
            self.destination = None;
            self.respawn_beacon();
        }
        let terminated: bool = self.curr_step >= self.config.max_steps;
        if terminated {
            self.ready = false;
        }
        Ok((self.observe(), reward, terminated))
    }

    fn render(&self) -> String {
        let size: usize = self.config.size;
        let mut map: Vec<Vec<char>> = vec![vec!['.'; size]; size];
        for (r, c) in self.square(self.beacon, self.config.beacon_radius) {
            map[r][c] = 'B';
        }
        let unit_char: char = if self.selected { 'M' } else { 'm' };
        for (r, c) in self.square(self.unit, self.config.unit_radius) {
            map[r][c] = unit_char;
        }
        map.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<String>>()
            .join("\n")
    }
}
