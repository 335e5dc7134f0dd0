pub mod dfs;

pub use dfs::DepthFirst;

use crate::error::Result;
use crate::grids::{Coord, Grid};
use crate::renderer::RenderPort;

pub trait Solver {
    /// Advances the search by one move or one backtrack. Returns false once
    /// there is nothing left to do.
    fn step_solve(&mut self, grid: &mut Grid, renderer: &mut dyn RenderPort) -> Result<bool>;

    /// Runs the search to completion and reports whether the exit was reached.
    fn solve(&mut self, grid: &mut Grid, renderer: &mut dyn RenderPort) -> Result<bool> {
        while self.step_solve(grid, renderer)? {}
        Ok(self.is_solved())
    }

    fn is_done(&self) -> bool;

    fn is_solved(&self) -> bool;

    /// Cells from entrance to exit, empty unless solved.
    fn path(&self) -> Vec<Coord>;
}
