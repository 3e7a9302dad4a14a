//! Tuning values shared by the maze, the entities and the session.

use std::time::Duration;

pub const TILE_SIZE: f32 = 30.0;
pub const COLS: usize = 19;
pub const ROWS: usize = 22;
pub const MAZE_WIDTH: f32 = COLS as f32 * TILE_SIZE;
pub const MAZE_HEIGHT: f32 = ROWS as f32 * TILE_SIZE;

// Both speeds must stay below half a tile or intersections get skipped.
pub const PLAYER_SPEED: f32 = 3.0;
pub const GHOST_SPEED: f32 = 1.5;
pub const GHOST_EXIT_SPEED: f32 = 1.0;

pub const GHOST_COUNT: usize = 4;
pub const GHOST_RELEASE_FRAMES: u64 = 180;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_SCORE: u32 = 50;
pub const GHOST_CAPTURE_SCORE: u32 = 200;

/// Contact radius between the player and a ghost, as a fraction of a tile.
pub const CONTACT_RADIUS: f32 = TILE_SIZE * 0.8;

pub const FRIGHTENED_DURATION: Duration = Duration::from_secs(8);
pub const CRUNCHED_DURATION: Duration = Duration::from_secs(2);

pub const LEADERBOARD_SIZE: usize = 5;
pub const INITIALS_MAX: usize = 3;
