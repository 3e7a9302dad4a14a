use crate::components::{Direction, PelletKind, Tile};
use crate::constants::{COLS, GHOST_COUNT, MAZE_WIDTH, ROWS, TILE_SIZE};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CellKind {
    Wall,
    Open,
    Empty,
    PowerUp,
    Gate,
    PenInterior,
}

// 1 = wall, 0 = pellet, 2 = empty, 3 = power pellet, 4 = pen gate, 9 = pen interior.
const LAYOUT: [[u8; COLS]; ROWS] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 3, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 3, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 0, 1, 1, 1, 2, 1, 2, 1, 1, 1, 0, 1, 1, 1, 1],
    [2, 2, 2, 1, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 1, 2, 2, 2],
    [1, 1, 1, 1, 0, 1, 2, 1, 1, 4, 1, 1, 2, 1, 0, 1, 1, 1, 1],
    [2, 2, 2, 2, 0, 2, 2, 1, 9, 9, 9, 1, 2, 2, 0, 2, 2, 2, 2],
    [1, 1, 1, 1, 0, 1, 2, 1, 1, 1, 1, 1, 2, 1, 0, 1, 1, 1, 1],
    [2, 2, 2, 1, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 1, 2, 2, 2],
    [1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 3, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 3, 1],
    [1, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Static maze plus the fixed spawn points of the board.
///
/// The grid never changes during a session; pellets live in the
/// [`crate::pellets::Ledger`] and are only seeded from here.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: [[CellKind; COLS]; ROWS],
    pub player_start: Tile,
    pub ghost_starts: [Tile; GHOST_COUNT],
    /// Cell a released ghost is moved to before rising through the gate.
    pub pen_exit: Tile,
    /// A rising ghost becomes active once its y is above this line.
    pub exit_threshold_y: f32,
}

impl Default for Maze {
    fn default() -> Self {
        Self::classic()
    }
}

impl Maze {
    pub fn classic() -> Self {
        let mut grid = [[CellKind::Wall; COLS]; ROWS];
        for (row, codes) in LAYOUT.iter().enumerate() {
            for (col, code) in codes.iter().enumerate() {
                grid[row][col] = match code {
                    0 => CellKind::Open,
                    2 => CellKind::Empty,
                    3 => CellKind::PowerUp,
                    4 => CellKind::Gate,
                    9 => CellKind::PenInterior,
                    _ => CellKind::Wall,
                };
            }
        }

        Self {
            grid,
            player_start: Tile::new(16, 9),
            ghost_starts: [
                Tile::new(8, 9),
                Tile::new(10, 8),
                Tile::new(10, 9),
                Tile::new(10, 10),
            ],
            pen_exit: Tile::new(10, 9),
            exit_threshold_y: Tile::new(8, 9).center().1,
        }
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn cols(&self) -> usize {
        COLS
    }

    /// Out-of-range rows read as wall, out-of-range columns as tunnel.
    pub fn cell_at(&self, row: i32, col: i32) -> CellKind {
        if row < 0 || row >= ROWS as i32 {
            return CellKind::Wall;
        }
        if col < 0 || col >= COLS as i32 {
            return CellKind::Empty;
        }
        self.grid[row as usize][col as usize]
    }

    pub fn is_solid(&self, row: i32, col: i32) -> bool {
        matches!(
            self.cell_at(row, col),
            CellKind::Wall | CellKind::Gate | CellKind::PenInterior
        )
    }

    pub fn is_tunnel_col(&self, col: i32) -> bool {
        col < 0 || col >= COLS as i32
    }

    /// Whether an entity centred at pixel (x, y) may head towards `dir`.
    ///
    /// Tunnel columns are open sideways only, so nothing can leave the
    /// tunnel vertically outside the board.
    pub fn can_move(&self, x: f32, y: f32, dir: Direction) -> bool {
        if dir == Direction::None {
            return false;
        }
        let here = Tile::containing(x, y);
        let next = here.step(dir);
        if self.is_tunnel_col(next.col) || self.is_tunnel_col(here.col) {
            return dir.is_horizontal() && !self.is_solid(next.row, next.col);
        }
        !self.is_solid(next.row, next.col)
    }

    /// Horizontal tunnel wraparound; the vertical edges never wrap.
    pub fn wrap_x(&self, x: f32) -> f32 {
        let half = TILE_SIZE * 0.5;
        if x < -half {
            MAZE_WIDTH + half
        } else if x > MAZE_WIDTH + half {
            -half
        } else {
            x
        }
    }

    /// Pellets a fresh board starts with. The player's start tile is kept clear.
    pub fn pellet_spawns(&self) -> impl Iterator<Item = (Tile, PelletKind)> + '_ {
        self.grid.iter().enumerate().flat_map(move |(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                let tile = Tile::new(row as i32, col as i32);
                if tile == self.player_start {
                    return None;
                }
                match cell {
                    CellKind::Open => Some((tile, PelletKind::Normal)),
                    CellKind::PowerUp => Some((tile, PelletKind::Power)),
                    _ => None,
                }
            })
        })
    }
}

pub fn count_pellets(maze: &Maze) -> usize {
    maze.pellet_spawns().count()
}
