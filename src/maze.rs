use log::info;

use crate::config::MazeConfig;
use crate::error::Result;
use crate::generators::{Generator, RecursiveBacktracker};
use crate::grids::{Coord, Grid};
use crate::renderer::{NoRender, RenderPort};
use crate::solvers::{DepthFirst, Solver};

/// A generated maze together with the renderer watching it.
///
/// Construction draws the empty grid, carves it, and resets visitation so
/// [`Maze::solve`] starts from a clean slate.
pub struct Maze<R = NoRender> {
    grid: Grid,
    renderer: R,
    seed: Option<u64>,
    path: Vec<Coord>,
}

impl Maze<NoRender> {
    pub fn new(config: &MazeConfig) -> Result<Self> {
        Self::with_renderer(config, NoRender)
    }
}

impl<R: RenderPort> Maze<R> {
    pub fn with_renderer(config: &MazeConfig, mut renderer: R) -> Result<Self> {
        let mut grid = Grid::new(config.layout, Some(&mut renderer))?;
        let mut generator = RecursiveBacktracker::new(config.seed);
        generator.generate_maze(&mut grid, &mut renderer)?;

        info!(
            "generated {}x{} maze with {} passages",
            grid.dims.columns,
            grid.dims.rows,
            generator.carved()
        );

        Ok(Self {
            grid,
            renderer,
            seed: config.seed,
            path: Vec::new(),
        })
    }

    /// Searches for the route from entrance to exit.
    pub fn solve(&mut self) -> Result<bool> {
        let mut solver = DepthFirst::new();
        let solved = solver.solve(&mut self.grid, &mut self.renderer)?;
        self.path = solver.path();

        info!(
            "solve {}: explored {} cells, path of {}",
            if solved { "succeeded" } else { "failed" },
            solver.explored(),
            self.path.len()
        );

        Ok(solved)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Route found by the last successful [`Maze::solve`].
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
