//! Rectangular grid dimensions and 4-connected neighbour lookup.

use std::fmt;

/// One of the four axis-aligned neighbour directions.
///
/// The declaration order (`Up`, `Down`, `Left`, `Right`) is the order in
/// which the update rule accumulates neighbour contributions. Keeping a
/// single order everywhere makes every backend bit-identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row `y - 1`.
    Up,
    /// Towards row `y + 1`.
    Down,
    /// Towards column `x - 1`.
    Left,
    /// Towards column `x + 1`.
    Right,
}

impl Direction {
    /// All directions in accumulation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(dx, dy)` offset of the neighbour in this direction.
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Width and height of a row-major grid.
///
/// Cell `(x, y)` lives at flat index `y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl GridDims {
    /// Create a new dimension pair. No validation is performed; worlds
    /// reject empty grids at construction.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Flat row-major index of `(x, y)`.
    ///
    /// The caller guarantees `x < width` and `y < height`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }

    /// Returns `true` if `(x, y)` lies on the outermost ring of the grid.
    pub fn is_border(&self, x: u32, y: u32) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Flat index of the neighbour of `(x, y)` in `dir`, or `None` when the
    /// neighbour lies outside the grid.
    pub fn neighbour(&self, x: u32, y: u32, dir: Direction) -> Option<usize> {
        let (dx, dy) = dir.offset();
        let nx = i64::from(x) + dx;
        let ny = i64::from(y) + dy;
        if nx < 0 || ny < 0 || nx >= i64::from(self.width) || ny >= i64::from(self.height) {
            return None;
        }
        Some(self.index(nx as u32, ny as u32))
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
