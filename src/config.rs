use std::time::Duration;

use crate::grids::Layout;

/// Everything needed to build and animate one maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub layout: Layout,
    /// Fixed seed for a reproducible maze, fresh entropy when `None`.
    pub seed: Option<u64>,
    /// Pause a live renderer takes on every tick.
    pub frame_delay: Option<Duration>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            seed: None,
            frame_delay: None,
        }
    }
}

impl MazeConfig {
    pub fn with_dims(rows: usize, columns: usize) -> Self {
        Self {
            layout: Layout {
                rows,
                columns,
                ..Layout::default()
            },
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
