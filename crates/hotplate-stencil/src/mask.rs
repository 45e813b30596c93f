//! Neighbour-mask precomputation.
//!
//! A [`NeighborMask`] packs everything the update rule needs to know about
//! a cell's boundary conditions into one byte:
//!
//! | Bit    | Value  | Meaning                                   |
//! |--------|--------|-------------------------------------------|
//! | `SKIP` | `0x01` | the cell itself is Fixed or Insulator     |
//! | `UP`   | `0x02` | the neighbour at `y - 1` is insulating    |
//! | `DOWN` | `0x04` | the neighbour at `y + 1` is insulating    |
//! | `LEFT` | `0x08` | the neighbour at `x - 1` is insulating    |
//! | `RIGHT`| `0x10` | the neighbour at `x + 1` is insulating    |
//!
//! A skipped cell carries no direction bits. A neighbour outside the grid
//! counts as insulating. Bounds are checked on coordinates, never on the
//! flat index, so the last cell of one row is not the left neighbour of
//! the first cell of the next.

use hotplate_core::{CellFlags, Direction, GridDims};

/// Compact per-cell boundary descriptor. See the [module docs](self).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NeighborMask(u8);

impl NeighborMask {
    /// All four neighbours contribute.
    pub const OPEN: Self = Self(0x00);
    /// The cell is never updated.
    pub const SKIP: Self = Self(0x01);
    /// The up neighbour is excluded.
    pub const UP: Self = Self(0x02);
    /// The down neighbour is excluded.
    pub const DOWN: Self = Self(0x04);
    /// The left neighbour is excluded.
    pub const LEFT: Self = Self(0x08);
    /// The right neighbour is excluded.
    pub const RIGHT: Self = Self(0x10);

    /// Construct from a raw byte.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw byte.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if the cell keeps its value unchanged.
    pub const fn is_skip(self) -> bool {
        self.contains(Self::SKIP)
    }

    /// The bit that blocks `dir`.
    pub const fn direction(dir: Direction) -> Self {
        match dir {
            Direction::Up => Self::UP,
            Direction::Down => Self::DOWN,
            Direction::Left => Self::LEFT,
            Direction::Right => Self::RIGHT,
        }
    }

    /// Returns `true` if the neighbour in `dir` is excluded.
    pub const fn blocks(self, dir: Direction) -> bool {
        self.contains(Self::direction(dir))
    }

    /// Number of neighbours that contribute. Zero for skipped cells.
    pub fn open_count(self) -> u32 {
        if self.is_skip() {
            return 0;
        }
        Direction::ALL.iter().filter(|d| !self.blocks(**d)).count() as u32
    }

    /// Derive the mask of cell `(x, y)` from the flag array.
    ///
    /// `flags` must hold `dims.cell_count()` entries.
    pub fn for_cell(flags: &[CellFlags], dims: GridDims, x: u32, y: u32) -> Self {
        if flags[dims.index(x, y)].is_frozen() {
            return Self::SKIP;
        }
        let mut bits = 0u8;
        for dir in Direction::ALL {
            let insulating = match dims.neighbour(x, y, dir) {
                None => true,
                Some(n) => flags[n].is_insulator(),
            };
            if insulating {
                bits |= Self::direction(dir).0;
            }
        }
        Self(bits)
    }
}

/// Compute the row-major mask table for a whole grid.
pub fn compute_masks(flags: &[CellFlags], dims: GridDims) -> Vec<NeighborMask> {
    debug_assert_eq!(flags.len(), dims.cell_count());
    let mut masks = Vec::with_capacity(dims.cell_count());
    for y in 0..dims.height {
        for x in 0..dims.width {
            masks.push(NeighborMask::for_cell(flags, dims, x, y));
        }
    }
    masks
}

/// Pack four masks per little-endian `u32` word for device upload.
///
/// Mask `i` occupies byte `i % 4` of word `i / 4`. The tail of the last
/// word is zero-filled. At least one word is always returned, since
/// device storage bindings may not be empty.
pub fn pack_masks(masks: &[NeighborMask]) -> Vec<u32> {
    let mut words: Vec<u32> = masks
        .chunks(4)
        .map(|chunk| {
            let mut bytes = [0u8; 4];
            for (b, m) in bytes.iter_mut().zip(chunk) {
                *b = m.bits();
            }
            u32::from_le_bytes(bytes)
        })
        .collect();
    if words.is_empty() {
        words.push(0);
    }
    words
}
