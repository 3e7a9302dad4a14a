//! Work Pac-Man: a tile-maze chase game with a headless simulation core.
//!
//! [`game::Game`] owns one session and is advanced by [`game::Game::tick`];
//! [`frame::run_frame`] pairs a tick with a paint so hosts drive it once per
//! display refresh.

pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod game;
pub mod ghost;
pub mod leaderboard;
pub mod level;
pub mod movement;
pub mod pellets;
pub mod player;
pub mod render;

pub use components::{Direction, Entity, PelletKind, Tile};
pub use error::{GameError, SubmissionError};
pub use game::{Game, GameEvent, SessionState};
pub use ghost::{Ghost, GhostKind, GhostMode};
pub use leaderboard::{Leaderboard, ScoreSink, ScoreSubmission};
pub use level::{CellKind, Maze};
