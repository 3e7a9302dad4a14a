use crossterm::event::KeyCode;

use crate::components::{Direction, Entity};
use crate::constants::PLAYER_SPEED;
use crate::level::Maze;
use crate::movement;

pub fn spawn_player(maze: &Maze) -> Entity {
    Entity::at_tile(maze.player_start, Direction::None, PLAYER_SPEED)
}

/// The four arrow keys steer; everything else is not a direction.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

pub fn move_player(player: &mut Entity, maze: &Maze) {
    movement::advance(player, maze, |x, y, dir| maze.can_move(x, y, dir));
}
