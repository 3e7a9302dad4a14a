//! Grid-snapped movement shared by the player and the ghosts.
//!
//! Entities move continuously in pixel space but only commit a turn, or
//! stop, when they are within one tick of a tile centre. That snap-then-move
//! step keeps them from clipping corners.

use crate::components::{Direction, Entity, Tile};
use crate::level::Maze;

/// Centre of the tile the entity is in, if it is close enough to turn there.
pub fn intersection(entity: &Entity) -> Option<(f32, f32)> {
    let (cx, cy) = entity.tile().center();
    let dx = entity.x - cx;
    let dy = entity.y - cy;
    if (dx * dx + dy * dy).sqrt() < entity.speed {
        Some((cx, cy))
    } else {
        None
    }
}

pub fn snap(entity: &mut Entity, center: (f32, f32)) {
    entity.x = center.0;
    entity.y = center.1;
}

/// Moves the entity one tick along its heading and wraps it through the tunnel.
pub fn translate(entity: &mut Entity, maze: &Maze) {
    match entity.direction {
        Direction::Up => entity.y -= entity.speed,
        Direction::Down => entity.y += entity.speed,
        Direction::Left => entity.x -= entity.speed,
        Direction::Right => entity.x += entity.speed,
        Direction::None => {}
    }
    entity.x = maze.wrap_x(entity.x);
}

/// One tick of buffered-input movement.
///
/// `can_enter(cx, cy, dir)` decides whether heading `dir` from the tile
/// centre `(cx, cy)` is allowed.
pub fn advance<F>(entity: &mut Entity, maze: &Maze, can_enter: F)
where
    F: Fn(f32, f32, Direction) -> bool,
{
    if let Some((cx, cy)) = intersection(entity) {
        if let Some(next) = entity.next_direction {
            if next != entity.direction && can_enter(cx, cy, next) {
                snap(entity, (cx, cy));
                entity.direction = next;
                entity.next_direction = None;
            }
        }

        if entity.direction != Direction::None && !can_enter(cx, cy, entity.direction) {
            snap(entity, (cx, cy));
            entity.direction = Direction::None;
        }
    }

    translate(entity, maze);
}

/// Tile the entity occupies next: its own tile until it passes the centre,
/// then the neighbour along its heading.
pub fn next_tile(entity: &Entity) -> Tile {
    let tile = entity.tile();
    let (cx, cy) = tile.center();
    let past_center = match entity.direction {
        Direction::Up => entity.y < cy,
        Direction::Down => entity.y > cy,
        Direction::Left => entity.x < cx,
        Direction::Right => entity.x > cx,
        Direction::None => false,
    };
    if past_center {
        tile.step(entity.direction)
    } else {
        tile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAZE_WIDTH, PLAYER_SPEED, TILE_SIZE};

    fn walk(entity: &mut Entity, maze: &Maze) {
        advance(entity, maze, |x, y, dir| maze.can_move(x, y, dir));
    }

    #[test]
    fn turns_only_at_a_tile_centre() {
        let maze = Maze::classic();
        // Row 4 is a long corridor; column 4 is open above and below it.
        let mut player = Entity::at_tile(Tile::new(4, 2), Direction::Right, PLAYER_SPEED);
        player.next_direction = Some(Direction::Down);

        // (4,3) has a wall below, so the request stays buffered.
        for _ in 0..10 {
            walk(&mut player, &maze);
            assert_eq!(player.direction, Direction::Right);
        }
        assert_eq!(player.tile(), Tile::new(4, 3));

        // Ten ticks reach the centre of (4,4), the eleventh turns there.
        for _ in 0..12 {
            walk(&mut player, &maze);
        }
        assert_eq!(player.direction, Direction::Down);
        assert_eq!(player.next_direction, None);
        assert_eq!(player.x, Tile::new(4, 4).center().0);
    }

    #[test]
    fn stops_against_a_wall_and_snaps_to_centre() {
        let maze = Maze::classic();
        let mut player = Entity::at_tile(Tile::new(1, 7), Direction::Right, PLAYER_SPEED);
        for _ in 0..40 {
            walk(&mut player, &maze);
        }
        assert_eq!(player.direction, Direction::None);
        assert_eq!((player.x, player.y), Tile::new(1, 8).center());
    }

    #[test]
    fn wraps_through_the_tunnel() {
        let maze = Maze::classic();
        let mut player = Entity::at_tile(Tile::new(10, 1), Direction::Left, PLAYER_SPEED);
        let mut wrapped = false;
        for _ in 0..40 {
            walk(&mut player, &maze);
            assert!(player.x >= -TILE_SIZE * 0.5 && player.x <= MAZE_WIDTH + TILE_SIZE * 0.5);
            if player.x > MAZE_WIDTH {
                wrapped = true;
            }
        }
        assert!(wrapped);
        assert_eq!(player.direction, Direction::Left);
    }

    #[test]
    fn idle_entity_does_not_move() {
        let maze = Maze::classic();
        let mut player = Entity::at_tile(Tile::new(16, 9), Direction::None, PLAYER_SPEED);
        let before = player.clone();
        walk(&mut player, &maze);
        assert_eq!(player, before);
        assert_eq!(next_tile(&player), Tile::new(16, 9));
    }
}
