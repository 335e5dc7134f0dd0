pub mod backtracker;

pub use backtracker::RecursiveBacktracker;

use crate::error::Result;
use crate::grids::Grid;
use crate::renderer::RenderPort;

pub trait Generator {
    /// Performs one unit of work on `grid`; a no-op once done.
    fn step_generation(&mut self, grid: &mut Grid, renderer: &mut dyn RenderPort) -> Result<()>;

    fn generate_maze(&mut self, grid: &mut Grid, renderer: &mut dyn RenderPort) -> Result<()> {
        while !self.is_done() {
            self.step_generation(grid, renderer)?;
        }
        Ok(())
    }

    fn is_done(&self) -> bool;
}
