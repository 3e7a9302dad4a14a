use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Direction, Entity};
use crate::constants::{GHOST_EXIT_SPEED, GHOST_RELEASE_FRAMES, GHOST_SPEED, TILE_SIZE};
use crate::level::Maze;
use crate::movement;

/// Cosmetic variant; both kinds share the same behaviour.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GhostKind {
    Doc,
    Folder,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GhostMode {
    Penned,
    Exiting,
    Active,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub id: usize,
    pub kind: GhostKind,
    pub mode: GhostMode,
    /// Overlay set by a power pellet; cleared by capture or the session deadline.
    pub frightened: bool,
    pub body: Entity,
}

impl Ghost {
    /// Frame count after which a penned ghost starts leaving the pen.
    ///
    /// Ghost 0 waits outside the pen and goes on the first started frame;
    /// ghost `n` in the pen waits `(n + 1)` release periods.
    pub fn release_frame(&self) -> u64 {
        match self.id {
            0 => 0,
            id => (id as u64 + 1) * GHOST_RELEASE_FRAMES,
        }
    }

    /// Puts a captured ghost straight back in the pen.
    pub fn send_home(&mut self, maze: &Maze) {
        self.mode = GhostMode::Penned;
        self.frightened = false;
        self.body = Entity::at_tile(maze.pen_exit, Direction::Up, GHOST_SPEED);
    }
}

pub fn spawn_ghosts(maze: &Maze) -> Vec<Ghost> {
    maze.ghost_starts
        .iter()
        .enumerate()
        .map(|(id, &tile)| Ghost {
            id,
            kind: if id % 2 == 0 {
                GhostKind::Doc
            } else {
                GhostKind::Folder
            },
            mode: GhostMode::Penned,
            frightened: false,
            body: Entity::at_tile(tile, Direction::Up, GHOST_SPEED),
        })
        .collect()
}

/// Advances one ghost by a tick. Returns the new mode when it changed.
pub fn update_ghost(
    ghost: &mut Ghost,
    maze: &Maze,
    frame: u64,
    target: (f32, f32),
    rng: &mut impl Rng,
) -> Option<GhostMode> {
    match ghost.mode {
        GhostMode::Penned => {
            if frame <= ghost.release_frame() {
                return None;
            }
            let tile = ghost.body.tile();
            if !maze.is_solid(tile.row, tile.col) {
                // Already outside the pen: start chasing from here.
                ghost.mode = GhostMode::Active;
                ghost.body.direction = random_heading(rng);
                return Some(GhostMode::Active);
            }
            ghost.mode = GhostMode::Exiting;
            let (x, y) = maze.pen_exit.center();
            ghost.body.x = x;
            ghost.body.y = y;
            ghost.body.direction = Direction::Up;
            Some(GhostMode::Exiting)
        }
        GhostMode::Exiting => {
            ghost.body.y -= GHOST_EXIT_SPEED;
            if ghost.body.y >= maze.exit_threshold_y {
                return None;
            }
            ghost.mode = GhostMode::Active;
            ghost.body.direction = random_heading(rng);
            Some(GhostMode::Active)
        }
        GhostMode::Active => {
            if let Some(center) = movement::intersection(&ghost.body) {
                movement::snap(&mut ghost.body, center);
                ghost.body.direction =
                    choose_direction(&ghost.body, maze, ghost.frightened, target, rng);
            }
            movement::translate(&mut ghost.body, maze);
            None
        }
    }
}

fn random_heading(rng: &mut impl Rng) -> Direction {
    if rng.gen_bool(0.5) {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Picks a heading at an intersection.
///
/// Reversing is never an option unless nothing else is open. A frightened
/// ghost wanders at random; otherwise the ghost greedily takes the step that
/// lands closest to `target`.
pub fn choose_direction(
    body: &Entity,
    maze: &Maze,
    frightened: bool,
    target: (f32, f32),
    rng: &mut impl Rng,
) -> Direction {
    let reverse = body.direction.opposite();
    let options: Vec<Direction> = Direction::COMPASS
        .iter()
        .copied()
        .filter(|&dir| dir != reverse && maze.can_move(body.x, body.y, dir))
        .collect();

    if options.is_empty() {
        return reverse;
    }

    if frightened {
        return *options.choose(rng).unwrap_or(&reverse);
    }

    let mut best = options[0];
    let mut best_dist = f32::MAX;
    for &dir in &options {
        let (dc, dr) = dir.delta();
        let tx = body.x + dc as f32 * TILE_SIZE;
        let ty = body.y + dr as f32 * TILE_SIZE;
        let dist = (tx - target.0).powi(2) + (ty - target.1).powi(2);
        if dist < best_dist {
            best_dist = dist;
            best = dir;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Tile;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn spawns_alternating_kinds_on_separate_tiles() {
        let maze = Maze::classic();
        let ghosts = spawn_ghosts(&maze);
        assert_eq!(ghosts.len(), 4);
        assert_eq!(ghosts[0].kind, GhostKind::Doc);
        assert_eq!(ghosts[1].kind, GhostKind::Folder);
        assert!(ghosts.iter().all(|g| g.mode == GhostMode::Penned && !g.frightened));
        let tiles: HashSet<Tile> = ghosts.iter().map(|g| g.body.tile()).collect();
        assert_eq!(tiles.len(), 4);
    }

    #[test]
    fn release_frames_are_staggered_after_the_first() {
        let maze = Maze::classic();
        let frames: Vec<u64> = spawn_ghosts(&maze).iter().map(Ghost::release_frame).collect();
        assert_eq!(frames, vec![0, 360, 540, 720]);
    }

    #[test]
    fn release_waits_for_staggered_frame() {
        let maze = Maze::classic();
        let mut ghost = spawn_ghosts(&maze).remove(1);
        let target = maze.player_start.center();
        assert_eq!(update_ghost(&mut ghost, &maze, 360, target, &mut rng()), None);
        assert_eq!(
            update_ghost(&mut ghost, &maze, 361, target, &mut rng()),
            Some(GhostMode::Exiting)
        );
        assert_eq!((ghost.body.x, ghost.body.y), maze.pen_exit.center());
    }

    #[test]
    fn ghost_outside_the_pen_chases_on_release() {
        let maze = Maze::classic();
        let mut ghost = spawn_ghosts(&maze).remove(0);
        let target = maze.player_start.center();
        assert_eq!(update_ghost(&mut ghost, &maze, 0, target, &mut rng()), None);
        assert_eq!(update_ghost(&mut ghost, &maze, 1, target, &mut rng()), Some(GhostMode::Active));
        assert_eq!(ghost.body.tile(), Tile::new(8, 9));
        assert!(ghost.body.direction.is_horizontal());
    }

    #[test]
    fn exiting_ghost_rises_until_above_threshold() {
        let maze = Maze::classic();
        let mut ghost = spawn_ghosts(&maze).remove(2);
        let target = maze.player_start.center();
        let mut rng = rng();
        update_ghost(&mut ghost, &maze, 541, target, &mut rng);
        assert_eq!(ghost.mode, GhostMode::Exiting);

        let mut ticks = 0;
        while ghost.mode == GhostMode::Exiting {
            update_ghost(&mut ghost, &maze, 542, target, &mut rng);
            ticks += 1;
            assert!(ticks < 200);
        }
        assert_eq!(ghost.mode, GhostMode::Active);
        assert!(ghost.body.y < maze.exit_threshold_y);
        assert!(ghost.body.direction.is_horizontal());
    }

    #[test]
    fn greedy_choice_minimises_distance_to_target() {
        let maze = Maze::classic();
        // (4,4) is a crossing with all four neighbours open.
        let body = Entity::at_tile(Tile::new(4, 4), Direction::Right, GHOST_SPEED);
        let below = Tile::new(14, 4).center();
        assert_eq!(choose_direction(&body, &maze, false, below, &mut rng()), Direction::Down);
        let above = Tile::new(1, 4).center();
        assert_eq!(choose_direction(&body, &maze, false, above, &mut rng()), Direction::Up);
    }

    #[test]
    fn never_reverses_while_another_way_is_open() {
        let maze = Maze::classic();
        // Target sits straight behind the ghost.
        let body = Entity::at_tile(Tile::new(4, 4), Direction::Right, GHOST_SPEED);
        let behind = Tile::new(4, 1).center();
        assert_ne!(choose_direction(&body, &maze, false, behind, &mut rng()), Direction::Left);
    }

    #[test]
    fn reverses_in_a_dead_end() {
        let maze = Maze::classic();
        // The sealed pocket at the left end of row 8 only opens to the left.
        let body = Entity::at_tile(Tile::new(8, 2), Direction::Right, GHOST_SPEED);
        let target = Tile::new(20, 18).center();
        assert_eq!(choose_direction(&body, &maze, false, target, &mut rng()), Direction::Left);
    }

    #[test]
    fn frightened_choice_stays_legal() {
        let maze = Maze::classic();
        let body = Entity::at_tile(Tile::new(4, 4), Direction::Right, GHOST_SPEED);
        let mut rng = rng();
        for _ in 0..50 {
            let dir = choose_direction(&body, &maze, true, (0.0, 0.0), &mut rng);
            assert_ne!(dir, Direction::Left);
            assert!(maze.can_move(body.x, body.y, dir));
        }
    }

    #[test]
    fn send_home_resets_mode_and_fright() {
        let maze = Maze::classic();
        let mut ghost = spawn_ghosts(&maze).remove(2);
        ghost.mode = GhostMode::Active;
        ghost.frightened = true;
        ghost.body = Entity::at_tile(Tile::new(4, 4), Direction::Left, GHOST_SPEED);
        ghost.send_home(&maze);
        assert_eq!(ghost.mode, GhostMode::Penned);
        assert!(!ghost.frightened);
        assert_eq!((ghost.body.x, ghost.body.y), maze.pen_exit.center());
    }
}
