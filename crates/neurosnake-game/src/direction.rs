/// A cell on the board. `(0, 0)` is the top-left corner, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position `distance` cells away in `direction`.
    #[must_use]
    pub const fn moved(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Heading of the snake. The order matches the controller's output neurons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Down, Self::Right, Self::Left];

    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }

    /// Maps an output-neuron index to a direction.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_cancels_offset() {
        for dir in Direction::ALL {
            let p = Position::new(3, 3);
            assert_eq!(p.moved(dir, 1).moved(dir.opposite(), 1), p);
        }
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Direction::from_index(0), Some(Direction::Up));
        assert_eq!(Direction::from_index(3), Some(Direction::Left));
        assert_eq!(Direction::from_index(4), None);
    }
}
