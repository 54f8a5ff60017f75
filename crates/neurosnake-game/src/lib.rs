//! Headless snake simulation used to score neural-network controllers.
//!
//! This crate only models the rules of the game: a snake moving on a grid,
//! growing when it reaches a target, and dying on wall or self collision.
//! There is no rendering or input handling; a controller chooses a
//! [`Direction`] each step from the [`Observation`] the board exposes.
//!
//! - [`SnakeBoard`] - Board state and per-step movement rules
//! - [`Observation`] - Six-value sensor vector fed to the controller
//! - [`EpisodeStats`] - Steps survived and targets reached during an episode
//!
//! # Example
//!
//! ```
//! use neurosnake_game::{Direction, SnakeBoard};
//!
//! let mut board = SnakeBoard::with_seed(1);
//! assert_eq!(board.direction(), Direction::Right);
//!
//! let outcome = board.step(Direction::Down);
//! assert!(!outcome.is_collided());
//! assert_eq!(board.head().y, 6);
//! ```

pub use self::{board::*, direction::*, stats::*};

mod board;
mod direction;
mod stats;
