use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MazeError, Result};
use crate::generators::Generator;
use crate::grids::{Coord, Direction, Grid};
use crate::renderer::RenderPort;

/// Randomized depth-first carving.
///
/// Runs the recursive backtracker on an explicit stack: the top of the stack
/// is the cell being carved from, a carve pushes the newly joined neighbour,
/// and a cell with no unvisited neighbours is popped so its parent gets to try
/// its remaining ones. The order of random draws matches the recursive
/// formulation, so a seed always yields the same maze for the same dimensions.
pub struct RecursiveBacktracker {
    rng: StdRng,
    seed: Option<u64>,
    stack: Vec<Coord>,
    started: bool,
    carved: usize,
    done: bool,
}

impl RecursiveBacktracker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            seed,
            stack: Vec::new(),
            started: false,
            carved: 0,
            done: false,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Walls knocked down between cells so far.
    pub fn carved(&self) -> usize {
        self.carved
    }

    fn start(&mut self, grid: &mut Grid, renderer: &mut dyn RenderPort) -> Result<()> {
        let frames = grid.dims.cell_count();
        self.stack
            .try_reserve(frames)
            .map_err(|_| MazeError::StackExhausted { frames })?;

        debug!(
            "carving {}x{} maze, seed {:?}",
            grid.dims.columns, grid.dims.rows, self.seed
        );

        let entrance = grid.entrance();
        grid.clear_wall(entrance, Direction::Up);
        grid.draw_cell(entrance, renderer);

        let exit = grid.exit();
        grid.clear_wall(exit, Direction::Down);
        grid.draw_cell(exit, renderer);

        grid.set_visited(entrance, true);
        self.stack.push(entrance);
        self.started = true;

        Ok(())
    }

    fn finish(&mut self, grid: &mut Grid) {
        grid.reset_visited();
        self.done = true;

        debug!("maze carved, {} passages", self.carved);
    }
}

/// Unvisited neighbours in left, right, up, down order.
fn unvisited_neighbors(grid: &Grid, coord: Coord) -> ([(Coord, Direction); 4], usize) {
    let mut neighbors = [(coord, Direction::Left); 4];
    let mut n = 0;

    for &dir in Direction::ALL.iter() {
        if let Some(next) = grid.neighbor(coord, dir) {
            if !grid.is_visited(next) {
                neighbors[n] = (next, dir);
                n += 1;
            }
        }
    }

    (neighbors, n)
}

impl Generator for RecursiveBacktracker {
    fn step_generation(&mut self, grid: &mut Grid, renderer: &mut dyn RenderPort) -> Result<()> {
        if self.done {
            return Ok(());
        }

        if !self.started {
            return self.start(grid, renderer);
        }

        let current = match self.stack.last() {
            Some(&current) => current,
            None => {
                self.finish(grid);
                return Ok(());
            }
        };

        let (neighbors, n) = unvisited_neighbors(grid, current);
        if n == 0 {
            // dead end, hand control back to the parent cell
            self.stack.pop();
            if self.stack.is_empty() {
                self.finish(grid);
            }
            return Ok(());
        }

        let (next, dir) = neighbors[self.rng.gen_range(0, n)];
        grid.clear_wall(current, dir);
        self.carved += 1;

        grid.draw_cell(current, renderer);
        grid.draw_cell(next, renderer);

        grid.set_visited(next, true);
        self.stack.push(next);

        Ok(())
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod test_backtracker {
    use super::*;
    use crate::grids::Dimensions;
    use crate::renderer::{NoRender, RenderEvent, TraceRenderer, VertexRenderer};
    use std::collections::VecDeque;

    fn generate(rows: usize, cols: usize, seed: Option<u64>) -> Grid {
        let mut grid = Grid::with_dims(rows, cols).unwrap();
        RecursiveBacktracker::new(seed)
            .generate_maze(&mut grid, &mut NoRender)
            .unwrap();
        grid
    }

    fn reachable_from_entrance(grid: &Grid) -> usize {
        let mut seen = vec![false; grid.dims.cell_count()];
        let index = |coord: Coord| coord.0 * grid.dims.rows + coord.1;
        let mut queue = VecDeque::new();
        queue.push_back(grid.entrance());
        seen[0] = true;

        let mut count = 0;
        while let Some(coord) = queue.pop_front() {
            count += 1;
            for &dir in Direction::ALL.iter() {
                if grid.is_open(coord, dir) {
                    let next = grid.neighbor(coord, dir).unwrap();
                    if !seen[index(next)] {
                        seen[index(next)] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        count
    }

    #[test]
    fn opens_entrance_and_exit() {
        for &(rows, cols) in [(1, 1), (1, 7), (7, 1), (6, 5), (10, 12)].iter() {
            let grid = generate(rows, cols, Some(7));
            assert!(!grid.cell(grid.entrance()).has_top_wall);
            assert!(!grid.cell(grid.exit()).has_bottom_wall);
        }
    }

    #[test]
    fn single_cell_needs_no_carving() {
        let mut grid = Grid::with_dims(1, 1).unwrap();
        let mut generator = RecursiveBacktracker::new(Some(1));
        generator.generate_maze(&mut grid, &mut NoRender).unwrap();

        let cell = grid.cell((0, 0));
        assert!(!cell.has_top_wall);
        assert!(!cell.has_bottom_wall);
        assert!(cell.has_left_wall);
        assert!(cell.has_right_wall);
        assert_eq!(generator.carved(), 0);
    }

    #[test]
    fn carves_spanning_trees() {
        for seed in 0..20u64 {
            for &(rows, cols) in [(1, 9), (9, 1), (2, 2), (6, 5), (10, 12), (17, 3)].iter() {
                let grid = generate(rows, cols, Some(seed));
                let cells = rows * cols;

                let label = format!("seed {} {}x{}", seed, cols, rows);

                assert_eq!(grid.open_edge_count(), cells - 1, "{}", label);
                assert_eq!(reachable_from_entrance(&grid), cells, "{}", label);
            }
        }
    }

    #[test]
    fn carved_count_matches_passages() {
        let mut grid = Grid::with_dims(8, 8).unwrap();
        let mut generator = RecursiveBacktracker::new(Some(99));
        generator.generate_maze(&mut grid, &mut NoRender).unwrap();
        assert_eq!(generator.carved(), 63);
        assert_eq!(grid.open_edge_count(), 63);
    }

    #[test]
    fn walls_stay_symmetric() {
        let grid = generate(9, 11, Some(3));
        for cell in grid.cells() {
            for &dir in Direction::ALL.iter() {
                if let Some(next) = grid.neighbor(cell.coord(), dir) {
                    assert_eq!(cell.has_wall(dir), grid.cell(next).has_wall(-dir));
                }
            }
        }
    }

    #[test]
    fn only_entrance_and_exit_break_the_boundary() {
        let grid = generate(7, 9, Some(11));
        let dims = Dimensions::new(7, 9);
        let mut openings = 0;
        for cell in grid.cells() {
            for &dir in Direction::ALL.iter() {
                if dir.step(cell.coord(), dims).is_none() && !cell.has_wall(dir) {
                    openings += 1;
                }
            }
        }
        assert_eq!(openings, 2);
    }

    #[test]
    fn same_seed_same_layout() {
        let first = generate(10, 12, Some(0xC0FFEE));
        let second = generate(10, 12, Some(0xC0FFEE));
        assert_eq!(first.walls().as_words(), second.walls().as_words());

        let other = generate(10, 12, Some(0xBEEF));
        assert_ne!(first.walls().as_words(), other.walls().as_words());
    }

    #[test]
    fn remembers_its_seed() {
        assert_eq!(RecursiveBacktracker::new(Some(17)).seed(), Some(17));
        assert_eq!(RecursiveBacktracker::new(None).seed(), None);
    }

    #[test]
    fn unseeded_runs_differ() {
        let reference = generate(10, 12, None);
        let differing = (0..5)
            .filter(|_| generate(10, 12, None).walls().as_words() != reference.walls().as_words())
            .count();
        assert!(differing > 0);
    }

    #[test]
    fn rendering_does_not_change_layout() {
        let plain = generate(6, 5, Some(42));

        let mut vr = VertexRenderer::new();
        let mut grid = Grid::new(*plain.layout(), Some(&mut vr)).unwrap();
        RecursiveBacktracker::new(Some(42))
            .generate_maze(&mut grid, &mut vr)
            .unwrap();

        assert_eq!(plain.walls().as_words(), grid.walls().as_words());
        assert!(vr.frames() > 0);
    }

    #[test]
    fn leaves_cells_unvisited() {
        let grid = generate(5, 5, Some(5));
        assert!(grid.cells().all(|cell| !cell.visited));
    }

    #[test]
    fn draws_both_cells_after_each_carve() {
        let mut grid = Grid::with_dims(4, 4).unwrap();
        let mut trace = TraceRenderer::new();
        RecursiveBacktracker::new(Some(8))
            .generate_maze(&mut grid, &mut trace)
            .unwrap();

        // entrance and exit, then two cells per carve, each followed by a tick
        let cells = trace.count(|event| matches!(event, RenderEvent::Cell(_)));
        assert_eq!(cells, 2 + 2 * 15);
        assert_eq!(trace.count(|event| *event == RenderEvent::Tick), cells);
        assert_eq!(trace.events()[0], RenderEvent::Cell((0, 0)));
        assert_eq!(trace.events()[2], RenderEvent::Cell((3, 3)));
    }

    #[test]
    fn steps_one_carve_at_a_time() {
        let mut grid = Grid::with_dims(3, 3).unwrap();
        let mut generator = RecursiveBacktracker::new(Some(21));

        generator.step_generation(&mut grid, &mut NoRender).unwrap();
        assert_eq!(grid.open_edge_count(), 0);
        assert!(grid.is_visited((0, 0)));

        generator.step_generation(&mut grid, &mut NoRender).unwrap();
        assert_eq!(grid.open_edge_count(), 1);
        assert!(!generator.is_done());

        generator.generate_maze(&mut grid, &mut NoRender).unwrap();
        assert!(generator.is_done());
        assert_eq!(grid.open_edge_count(), 8);

        // further steps change nothing
        let words = grid.walls().as_words().to_vec();
        generator.step_generation(&mut grid, &mut NoRender).unwrap();
        assert_eq!(grid.walls().as_words(), &words[..]);
    }

    #[test]
    fn deep_serpentine_grids_do_not_overflow() {
        // a single row forces one carve chain through every cell
        let grid = generate(1, 20_000, Some(2));
        assert_eq!(grid.open_edge_count(), 19_999);

        let grid = generate(100, 100, Some(2));
        assert_eq!(grid.open_edge_count(), 9_999);
    }
}
