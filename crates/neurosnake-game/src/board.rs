use arrayvec::ArrayVec;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{Direction, Position};

/// Board width in cells.
pub const BOARD_WIDTH: i32 = 30;
/// Board height in cells.
pub const BOARD_HEIGHT: i32 = 30;

#[allow(clippy::cast_sign_loss)]
const CELL_COUNT: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

const INITIAL_BODY: [Position; 3] = [
    Position::new(5, 5),
    Position::new(4, 5),
    Position::new(3, 5),
];

/// Number of values in an [`Observation`].
pub const OBSERVATION_LEN: usize = 6;

/// Sensor vector handed to the controller each step.
///
/// | Index | Meaning |
/// |-------|---------|
/// | 0 | `1.0` if the cell one step ahead is blocked, `-1.0` otherwise |
/// | 1 | same for the cell two steps ahead |
/// | 2 | target x / board width |
/// | 3 | target y / board height |
/// | 4 | head x / board width |
/// | 5 | head y / board height |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation([f64; OBSERVATION_LEN]);

impl Observation {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Result of a single [`SnakeBoard::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The snake moved into a free cell.
    Moved,
    /// The snake moved onto the target and grew by one segment.
    ReachedTarget,
    /// The snake hit a wall or itself; the episode is over.
    Collided,
}

/// Snake game state.
///
/// The snake starts with three segments near the top-left corner heading
/// right. A target is placed on a random free cell and moved to another free
/// cell every time it is reached. Reversing straight into the neck counts as
/// a self collision.
#[derive(Debug, Clone)]
pub struct SnakeBoard {
    rng: Pcg32,
    /// Head first.
    body: ArrayVec<Position, CELL_COUNT>,
    direction: Direction,
    target: Option<Position>,
    alive: bool,
}

impl SnakeBoard {
    /// Creates a board whose target placement is driven by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut this = Self {
            rng: Pcg32::seed_from_u64(seed),
            body: INITIAL_BODY.into_iter().collect(),
            direction: Direction::Right,
            target: None,
            alive: true,
        };
        this.place_target();
        this
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    #[must_use]
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current target, `None` once the snake fills the board.
    #[must_use]
    pub fn target(&self) -> Option<Position> {
        self.target
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn contains(pos: Position) -> bool {
        (0..BOARD_WIDTH).contains(&pos.x) && (0..BOARD_HEIGHT).contains(&pos.y)
    }

    /// Whether the head would collide `steps_ahead` cells ahead in the
    /// current direction, assuming the tail keeps moving.
    fn is_blocked_ahead(&self, steps_ahead: usize) -> bool {
        let distance = i32::try_from(steps_ahead).unwrap_or(i32::MAX);
        let pos = self.head().moved(self.direction, distance);
        let remaining = self.body.len().saturating_sub(steps_ahead);
        !Self::contains(pos) || self.body[..remaining].contains(&pos)
    }

    #[must_use]
    pub fn observation(&self) -> Observation {
        let flag = |blocked: bool| if blocked { 1.0 } else { -1.0 };
        let head = self.head();
        let target = self.target.unwrap_or(head);
        let width = f64::from(BOARD_WIDTH);
        let height = f64::from(BOARD_HEIGHT);
        Observation([
            flag(self.is_blocked_ahead(1)),
            flag(self.is_blocked_ahead(2)),
            f64::from(target.x) / width,
            f64::from(target.y) / height,
            f64::from(head.x) / width,
            f64::from(head.y) / height,
        ])
    }

    /// Moves the snake one cell in `direction`.
    ///
    /// Once the snake has collided (or filled the board) every further call
    /// returns [`StepOutcome::Collided`] without changing the board.
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        if !self.alive {
            return StepOutcome::Collided;
        }

        self.direction = direction;
        let new_head = self.head().moved(direction, 1);
        let reached = self.target == Some(new_head);

        // the tail cell is vacated unless the snake grows this step
        let occupied = if reached {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        if !Self::contains(new_head) || occupied.contains(&new_head) {
            self.alive = false;
            return StepOutcome::Collided;
        }

        if !reached {
            self.body.pop();
        }
        self.body.insert(0, new_head);

        if reached {
            self.place_target();
            if self.target.is_none() {
                self.alive = false;
            }
            return StepOutcome::ReachedTarget;
        }
        StepOutcome::Moved
    }

    fn place_target(&mut self) {
        let free = (0..BOARD_HEIGHT)
            .flat_map(|y| (0..BOARD_WIDTH).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.body.contains(pos))
            .collect::<Vec<_>>();
        self.target = if free.is_empty() {
            None
        } else {
            Some(free[self.rng.random_range(0..free.len())])
        };
    }
}
