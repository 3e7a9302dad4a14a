use std::collections::HashSet;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use work_pacman::constants::{MAZE_HEIGHT, MAZE_WIDTH, PLAYER_SPEED, TILE_SIZE};
use work_pacman::movement::{advance, next_tile};
use work_pacman::pellets::Ledger;
use work_pacman::{Direction, Entity, Game, GhostMode, Maze, SessionState, Tile};

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn in_bounds(entity: &Entity) -> bool {
    let half = TILE_SIZE * 0.5;
    entity.x >= -half
        && entity.x <= MAZE_WIDTH + half
        && entity.y >= 0.0
        && entity.y <= MAZE_HEIGHT
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn entities_stay_on_the_board_and_out_of_walls(
        seed in any::<u64>(),
        inputs in prop::collection::vec((direction(), 1_u32..40), 1..30)
    ) {
        let mut game = Game::default();
        game.start();
        let mut rng = StdRng::seed_from_u64(seed);
        let start = Instant::now();
        let mut ticks = 0_u64;

        'play: for (dir, hold) in inputs {
            game.handle_input(dir);
            for _ in 0..hold {
                ticks += 1;
                game.tick(start + Duration::from_millis(16 * ticks), &mut rng);
                if game.state() != SessionState::Playing {
                    break 'play;
                }

                let player = game.player();
                prop_assert!(in_bounds(player), "player at ({}, {})", player.x, player.y);
                let ahead = next_tile(player);
                prop_assert!(!game.maze().is_solid(ahead.row, ahead.col), "player heading into {:?}", ahead);

                for ghost in game.ghosts() {
                    prop_assert!(in_bounds(&ghost.body), "ghost {} at ({}, {})", ghost.id, ghost.body.x, ghost.body.y);
                    if ghost.mode == GhostMode::Active {
                        let ahead = next_tile(&ghost.body);
                        prop_assert!(!game.maze().is_solid(ahead.row, ahead.col), "ghost {} heading into {:?}", ghost.id, ahead);
                    }
                }
            }
        }
    }

    #[test]
    fn turns_happen_only_at_open_tile_centres(
        row in 1_i32..21,
        col in 1_i32..18,
        heading in direction(),
        offset in -14.0_f32..14.0,
        turn_clockwise in any::<bool>()
    ) {
        let maze = Maze::classic();
        prop_assume!(!maze.is_solid(row, col));

        let turn = match (heading, turn_clockwise) {
            (Direction::Up, true) | (Direction::Down, false) => Direction::Right,
            (Direction::Up, false) | (Direction::Down, true) => Direction::Left,
            (Direction::Left, true) | (Direction::Right, false) => Direction::Up,
            _ => Direction::Down,
        };
        let tile = Tile::new(row, col);
        let (cx, cy) = tile.center();
        let (dc, dr) = heading.delta();
        let mut entity = Entity::at_tile(tile, heading, PLAYER_SPEED);
        entity.x = cx + dc as f32 * offset;
        entity.y = cy + dr as f32 * offset;
        entity.next_direction = Some(turn);
        let (dx, dy) = (entity.x - cx, entity.y - cy);
        let near_centre = (dx * dx + dy * dy).sqrt() < PLAYER_SPEED;

        advance(&mut entity, &maze, |x, y, dir| maze.can_move(x, y, dir));

        let should_turn = near_centre && maze.can_move(cx, cy, turn);
        prop_assert_eq!(entity.direction == turn, should_turn);
        if !should_turn {
            let blocked = near_centre && !maze.can_move(cx, cy, heading);
            let expected = if blocked { Direction::None } else { heading };
            prop_assert_eq!(entity.direction, expected);
            prop_assert_eq!(entity.next_direction, Some(turn));
        }
    }

    #[test]
    fn collecting_scores_each_pellet_once(picks in prop::collection::vec(any::<prop::sample::Index>(), 1..200)) {
        let maze = Maze::classic();
        let mut ledger = Ledger::new(&maze);
        let tiles: Vec<Tile> = ledger.iter().map(|(tile, _)| tile).collect();
        let kinds = ledger.clone();
        let now = Instant::now();

        let mut eaten = HashSet::new();
        for pick in &picks {
            let tile = *pick.get(&tiles);
            let first = eaten.insert(tile);
            prop_assert_eq!(ledger.collect(tile, now).is_some(), first);
        }

        let expected: u32 = eaten
            .iter()
            .filter_map(|tile| kinds.pellet_at(*tile))
            .map(|kind| kind.points())
            .sum();
        prop_assert_eq!(ledger.score(), expected);
        prop_assert_eq!(ledger.remaining(), tiles.len() - eaten.len());
    }
}
