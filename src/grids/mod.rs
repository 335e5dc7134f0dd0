pub mod wall_grid;
pub mod walls;

pub use wall_grid::{Grid, Layout};
pub use walls::WallSet;

/// Grid position as `(column, row)`.
pub type Coord = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.0 < self.columns && coord.1 < self.rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

impl Direction {
    /// Order in which the solver tries neighbours.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Step from `coord` in this direction, `None` when it would leave `dims`.
    pub fn step(self, coord: Coord, dims: Dimensions) -> Option<Coord> {
        let (col, row) = coord;
        let next = match self {
            Direction::Left => (col.checked_sub(1)?, row),
            Direction::Right => (col + 1, row),
            Direction::Up => (col, row.checked_sub(1)?),
            Direction::Down => (col, row + 1),
        };

        if dims.contains(next) {
            Some(next)
        } else {
            None
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Pixel rectangle of a placed cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// Snapshot of one grid cell. Wall flags are read from the edge they share
/// with the neighbour, so two adjacent snapshots always agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
    pub has_top_wall: bool,
    pub has_bottom_wall: bool,
    pub has_left_wall: bool,
    pub has_right_wall: bool,
    pub visited: bool,
    pub bounds: Bounds,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        (self.col, self.row)
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.has_left_wall,
            Direction::Right => self.has_right_wall,
            Direction::Up => self.has_top_wall,
            Direction::Down => self.has_bottom_wall,
        }
    }
}
