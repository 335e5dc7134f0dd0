use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MazeError {
    #[error("invalid grid dimensions: {rows} rows x {columns} columns")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("invalid cell size {width} x {height}, both sides must be finite and positive")]
    InvalidCellSize { width: f32, height: f32 },
    #[error("could not allocate storage for {rows} rows x {columns} columns")]
    OutOfMemory { rows: usize, columns: usize },
    #[error("could not reserve a traversal stack of {frames} frames")]
    StackExhausted { frames: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
