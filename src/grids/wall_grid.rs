use std::fmt;

use log::debug;

use crate::error::{MazeError, Result};
use crate::grids::walls::WallSet;
use crate::grids::{Bounds, Cell, Coord, Dimensions, Direction};
use crate::renderer::RenderPort;

const DEFAULT_DIMS: (usize, usize) = (10, 12);
const DEFAULT_CELL_SIZE: f32 = 10.0;

/// Placement and size of a grid in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub rows: usize,
    pub columns: usize,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            rows: DEFAULT_DIMS.0,
            columns: DEFAULT_DIMS.1,
            cell_width: DEFAULT_CELL_SIZE,
            cell_height: DEFAULT_CELL_SIZE,
        }
    }
}

impl Layout {
    fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }

        let valid_side = |side: f32| side.is_finite() && side > 0.0;
        if !valid_side(self.cell_width) || !valid_side(self.cell_height) {
            return Err(MazeError::InvalidCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }

        Ok(())
    }
}

/// Column-major grid of cells. Walls live on the edges between cells (see
/// [`WallSet`]); the grid only tracks visitation per cell.
#[derive(Debug, Clone)]
pub struct Grid {
    pub dims: Dimensions,
    layout: Layout,
    walls: WallSet,
    visited: Vec<bool>,
}

impl Grid {
    /// Builds a grid with every wall standing and nothing visited. When a
    /// renderer is given each cell is drawn once.
    pub fn new(layout: Layout, renderer: Option<&mut dyn RenderPort>) -> Result<Self> {
        layout.validate()?;

        let dims = Dimensions::new(layout.rows, layout.columns);
        let walls = WallSet::new(dims)?;

        let mut visited = Vec::new();
        visited
            .try_reserve_exact(dims.cell_count())
            .map_err(|_| MazeError::OutOfMemory {
                rows: dims.rows,
                columns: dims.columns,
            })?;
        visited.resize(dims.cell_count(), false);

        let grid = Self {
            dims,
            layout,
            walls,
            visited,
        };

        debug!(
            "created {}x{} grid at ({}, {})",
            dims.columns, dims.rows, layout.origin_x, layout.origin_y
        );

        if let Some(renderer) = renderer {
            grid.draw_all(renderer);
        }

        Ok(grid)
    }

    /// Unit-sized grid at the origin, handy when only the topology matters.
    pub fn with_dims(rows: usize, columns: usize) -> Result<Self> {
        Self::new(
            Layout {
                rows,
                columns,
                cell_width: 1.0,
                cell_height: 1.0,
                ..Layout::default()
            },
            None,
        )
    }

    #[inline]
    fn index_of(&self, coord: Coord) -> usize {
        (self.dims.rows * coord.0) + coord.1
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.dims.contains(coord)
    }

    pub fn entrance(&self) -> Coord {
        (0, 0)
    }

    pub fn exit(&self) -> Coord {
        (self.dims.columns - 1, self.dims.rows - 1)
    }

    /// Column maps to the horizontal axis, row to the vertical one.
    pub fn bounds_of(&self, coord: Coord) -> Bounds {
        let x1 = self.layout.origin_x + coord.0 as f32 * self.layout.cell_width;
        let y1 = self.layout.origin_y + coord.1 as f32 * self.layout.cell_height;

        Bounds {
            x1,
            y1,
            x2: x1 + self.layout.cell_width,
            y2: y1 + self.layout.cell_height,
        }
    }

    /// Snapshot of an in-range cell; out-of-range coordinates go through
    /// [`Grid::get`].
    pub(crate) fn cell(&self, coord: Coord) -> Cell {
        Cell {
            col: coord.0,
            row: coord.1,
            has_top_wall: self.walls.has_wall(coord, Direction::Up),
            has_bottom_wall: self.walls.has_wall(coord, Direction::Down),
            has_left_wall: self.walls.has_wall(coord, Direction::Left),
            has_right_wall: self.walls.has_wall(coord, Direction::Right),
            visited: self.visited[self.index_of(coord)],
            bounds: self.bounds_of(coord),
        }
    }

    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if self.contains(coord) {
            Some(self.cell(coord))
        } else {
            None
        }
    }

    /// Every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let rows = self.dims.rows;
        (0..self.dims.columns)
            .flat_map(move |col| (0..rows).map(move |row| (col, row)))
            .map(move |coord| self.cell(coord))
    }

    #[inline]
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        direction.step(coord, self.dims)
    }

    #[inline]
    pub fn has_wall(&self, coord: Coord, direction: Direction) -> bool {
        self.walls.has_wall(coord, direction)
    }

    /// Knocks down the wall on the given side of `coord`. Returns the cell on
    /// the other side, or `None` when the wall was on the outer boundary.
    pub fn clear_wall(&mut self, coord: Coord, direction: Direction) -> Option<Coord> {
        self.walls.clear(coord, direction);
        self.neighbor(coord, direction)
    }

    /// True when a passage leads from `coord` towards `direction`.
    pub fn is_open(&self, coord: Coord, direction: Direction) -> bool {
        self.neighbor(coord, direction).is_some() && !self.has_wall(coord, direction)
    }

    #[inline]
    pub fn is_visited(&self, coord: Coord) -> bool {
        self.visited[self.index_of(coord)]
    }

    #[inline]
    pub fn set_visited(&mut self, coord: Coord, visited: bool) {
        let index = self.index_of(coord);
        self.visited[index] = visited;
    }

    pub fn reset_visited(&mut self) {
        for visited in self.visited.iter_mut() {
            *visited = false;
        }
    }

    /// Number of passages between cells, boundary openings excluded.
    pub fn open_edge_count(&self) -> usize {
        let mut count = 0;
        for col in 0..self.dims.columns {
            for row in 0..self.dims.rows {
                if self.is_open((col, row), Direction::Right) {
                    count += 1;
                }
                if self.is_open((col, row), Direction::Down) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn draw_cell(&self, coord: Coord, renderer: &mut dyn RenderPort) {
        renderer.draw_cell(&self.cell(coord));
        renderer.tick();
    }

    pub fn draw_all(&self, renderer: &mut dyn RenderPort) {
        for col in 0..self.dims.columns {
            for row in 0..self.dims.rows {
                self.draw_cell((col, row), renderer);
            }
        }
    }

    /// Text picture of the maze, marking the cells of `path` with `*`.
    pub fn to_ascii(&self, path: &[Coord]) -> String {
        let mut on_path = vec![false; self.dims.cell_count()];
        for &coord in path.iter().filter(|coord| self.contains(**coord)) {
            on_path[self.index_of(coord)] = true;
        }

        let mut out = String::new();
        for row in 0..self.dims.rows {
            for col in 0..self.dims.columns {
                out.push('+');
                out.push_str(if self.has_wall((col, row), Direction::Up) {
                    "---"
                } else {
                    "   "
                });
            }
            out.push_str("+\n");

            for col in 0..self.dims.columns {
                out.push(if self.has_wall((col, row), Direction::Left) {
                    '|'
                } else {
                    ' '
                });
                out.push_str(if on_path[self.index_of((col, row))] {
                    " * "
                } else {
                    "   "
                });
            }
            let last = (self.dims.columns - 1, row);
            out.push(if self.has_wall(last, Direction::Right) {
                '|'
            } else {
                ' '
            });
            out.push('\n');
        }

        let bottom = self.dims.rows - 1;
        for col in 0..self.dims.columns {
            out.push('+');
            out.push_str(if self.has_wall((col, bottom), Direction::Down) {
                "---"
            } else {
                "   "
            });
        }
        out.push_str("+\n");

        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii(&[]))
    }
}
