use crate::constants::TILE_SIZE;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    pub const COMPASS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in (column, row) space.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Grid address of a tile.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Tile {
    pub row: i32,
    pub col: i32,
}

impl Tile {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The tile containing a pixel coordinate.
    pub fn containing(x: f32, y: f32) -> Self {
        Self {
            row: (y / TILE_SIZE).floor() as i32,
            col: (x / TILE_SIZE).floor() as i32,
        }
    }

    pub fn center(self) -> (f32, f32) {
        (
            self.col as f32 * TILE_SIZE + TILE_SIZE * 0.5,
            self.row as f32 * TILE_SIZE + TILE_SIZE * 0.5,
        )
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dc, dr) = dir.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// Position and heading shared by the player and the ghosts.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    pub next_direction: Option<Direction>,
    pub speed: f32,
}

impl Entity {
    pub fn at_tile(tile: Tile, direction: Direction, speed: f32) -> Self {
        let (x, y) = tile.center();
        Self {
            x,
            y,
            direction,
            next_direction: None,
            speed,
        }
    }

    pub fn tile(&self) -> Tile {
        Tile::containing(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Entity) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PelletKind {
    Normal,
    Power,
}

impl PelletKind {
    pub fn points(self) -> u32 {
        match self {
            PelletKind::Normal => crate::constants::PELLET_SCORE,
            PelletKind::Power => crate::constants::POWER_SCORE,
        }
    }
}
