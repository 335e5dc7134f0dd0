const WORD_BYTES: usize = std::mem::size_of::<usize>();
const WORD_BITS: usize = WORD_BYTES * 8;

use crate::error::{MazeError, Result};
use crate::grids::{Coord, Dimensions, Direction};

/// One bit per grid edge, set while the wall on that edge stands.
///
/// Horizontal edges (tops and bottoms of cells) come first, stored per column
/// with `rows + 1` edges each. Vertical edges (lefts and rights) follow, stored
/// per column boundary with `rows` edges each. Two neighbouring cells resolve
/// their shared side to the same bit, so clearing it opens both at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallSet {
    dims: Dimensions,
    horizontal: usize,
    edges: usize,
    words: Vec<usize>,
}

impl WallSet {
    /// All walls standing.
    pub fn new(dims: Dimensions) -> Result<Self> {
        let invalid = || MazeError::InvalidDimensions {
            rows: dims.rows,
            columns: dims.columns,
        };

        let horizontal = dims
            .columns
            .checked_mul(dims.rows.checked_add(1).ok_or_else(invalid)?)
            .ok_or_else(invalid)?;
        let vertical = dims
            .columns
            .checked_add(1)
            .and_then(|boundaries| boundaries.checked_mul(dims.rows))
            .ok_or_else(invalid)?;
        let edges = horizontal.checked_add(vertical).ok_or_else(invalid)?;

        let len = edges / WORD_BITS + 1;
        let mut words = Vec::new();
        words
            .try_reserve_exact(len)
            .map_err(|_| MazeError::OutOfMemory {
                rows: dims.rows,
                columns: dims.columns,
            })?;
        words.resize(len, !0);

        Ok(Self {
            dims,
            horizontal,
            edges,
            words,
        })
    }

    #[inline]
    fn edge_index(&self, coord: Coord, direction: Direction) -> usize {
        let (col, row) = coord;
        let rows = self.dims.rows;

        match direction {
            Direction::Up => col * (rows + 1) + row,
            Direction::Down => col * (rows + 1) + row + 1,
            Direction::Left => self.horizontal + col * rows + row,
            Direction::Right => self.horizontal + (col + 1) * rows + row,
        }
    }

    pub fn has_wall(&self, coord: Coord, direction: Direction) -> bool {
        let edge = self.edge_index(coord, direction);
        get_bit(self.words[edge / WORD_BITS], edge % WORD_BITS)
    }

    /// Knocks the wall down, returning whether it was standing.
    pub fn clear(&mut self, coord: Coord, direction: Direction) -> bool {
        let edge = self.edge_index(coord, direction);
        let (word, offset) = (edge / WORD_BITS, edge % WORD_BITS);
        let prev_word = self.words[word];

        self.words[word] = unset_bit(prev_word, offset);

        get_bit(prev_word, offset)
    }

    /// Number of standing walls, boundary included.
    pub fn standing(&self) -> usize {
        (0..self.edges)
            .filter(|edge| get_bit(self.words[edge / WORD_BITS], edge % WORD_BITS))
            .count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Raw layout, suitable for comparing two mazes bit for bit.
    pub fn as_words(&self) -> &[usize] {
        &self.words
    }
}

#[inline(always)]
fn get_bit(n: usize, k: usize) -> bool {
    (n >> k) & 1 == 1
}

#[inline(always)]
fn unset_bit(n: usize, k: usize) -> usize {
    n & !(1 << k)
}
