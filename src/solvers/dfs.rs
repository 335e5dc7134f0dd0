use log::{debug, warn};

use crate::error::{MazeError, Result};
use crate::grids::{Coord, Direction, Grid};
use crate::renderer::RenderPort;
use crate::solvers::Solver;

#[derive(Debug, Clone, Copy)]
struct Frame {
    coord: Coord,
    // index into Direction::ALL of the next direction to try
    next: usize,
}

/// Depth-first search from the entrance to the exit, trying neighbours left,
/// right, up, down. The frame stack doubles as the current path, so on success
/// it holds exactly the entrance-to-exit route.
#[derive(Debug, Default)]
pub struct DepthFirst {
    frames: Vec<Frame>,
    started: bool,
    solved: bool,
    done: bool,
    explored: usize,
}

impl DepthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells entered so far.
    pub fn explored(&self) -> usize {
        self.explored
    }

    fn start(&mut self, grid: &mut Grid, renderer: &mut dyn RenderPort) -> Result<()> {
        let frames = grid.dims.cell_count();
        self.frames
            .try_reserve(frames)
            .map_err(|_| MazeError::StackExhausted { frames })?;

        let entrance = grid.entrance();
        if grid.is_visited(entrance) {
            warn!("solving a grid whose visited flags were not reset");
        }

        self.started = true;
        self.enter(entrance, grid, renderer);
        Ok(())
    }

    fn enter(&mut self, coord: Coord, grid: &mut Grid, renderer: &mut dyn RenderPort) {
        renderer.tick();
        grid.set_visited(coord, true);
        self.frames.push(Frame { coord, next: 0 });
        self.explored += 1;

        if coord == grid.exit() {
            self.solved = true;
            self.done = true;
            debug!(
                "reached exit after exploring {} cells, path length {}",
                self.explored,
                self.frames.len()
            );
        }
    }
}

impl Solver for DepthFirst {
    fn step_solve(&mut self, grid: &mut Grid, renderer: &mut dyn RenderPort) -> Result<bool> {
        if self.done {
            return Ok(false);
        }

        if !self.started {
            self.start(grid, renderer)?;
            return Ok(!self.done);
        }

        let top = match self.frames.len().checked_sub(1) {
            Some(top) => top,
            None => {
                self.done = true;
                return Ok(false);
            }
        };
        let current = self.frames[top].coord;

        while self.frames[top].next < Direction::ALL.len() {
            let dir = Direction::ALL[self.frames[top].next];
            self.frames[top].next += 1;

            let next = match grid.neighbor(current, dir) {
                Some(next) => next,
                None => continue,
            };

            if !grid.has_wall(current, dir) && !grid.is_visited(next) {
                renderer.draw_move(&grid.cell(current), &grid.cell(next), false);
                renderer.tick();
                self.enter(next, grid, renderer);
                return Ok(!self.done);
            }
        }

        // dead end
        self.frames.pop();
        match self.frames.last() {
            Some(parent) => {
                renderer.draw_move(&grid.cell(parent.coord), &grid.cell(current), true);
                renderer.tick();
                Ok(true)
            }
            None => {
                self.done = true;
                debug!("no path to exit, explored {} cells", self.explored);
                Ok(false)
            }
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn is_solved(&self) -> bool {
        self.solved
    }

    fn path(&self) -> Vec<Coord> {
        if self.solved {
            self.frames.iter().map(|frame| frame.coord).collect()
        } else {
            Vec::new()
        }
    }
}
