//! Perfect maze generation by randomized depth-first carving, and solving by
//! depth-first search, over a rectangular grid of cells.
//!
//! Rendering is optional: the grid, generator and solver report their changes
//! to a [`RenderPort`](renderer::RenderPort), and the outcome is the same with
//! or without one.

pub mod config;
pub mod error;
pub mod generators;
pub mod grids;
pub mod maze;
pub mod renderer;
pub mod solvers;

pub use config::MazeConfig;
pub use error::{MazeError, Result};
pub use maze::Maze;
