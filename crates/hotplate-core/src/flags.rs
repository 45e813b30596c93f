//! Per-cell boundary-condition flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Boundary-condition flags attached to a single cell.
///
/// Stored as a `u32` word so the flag array can be uploaded to a compute
/// device without conversion. Only the [`FIXED`](Self::FIXED) and
/// [`INSULATOR`](Self::INSULATOR) bits are meaningful; worlds reject any
/// other bit at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CellFlags(u32);

impl CellFlags {
    /// No flags: the cell takes part in diffusion normally.
    pub const NONE: Self = Self(0);
    /// The cell's value never changes.
    pub const FIXED: Self = Self(1);
    /// The cell's value never changes and it blocks heat flow to and from
    /// its neighbours.
    pub const INSULATOR: Self = Self(2);
    /// Every bit that has a defined meaning.
    pub const ALL: Self = Self(Self::FIXED.0 | Self::INSULATOR.0);

    /// Construct from a raw word without validation.
    ///
    /// Use [`is_known`](Self::is_known) to check for undefined bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw flag word.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit in `other` is also set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if the cell is Fixed or Insulator, i.e. it is never
    /// updated by a step.
    pub const fn is_frozen(self) -> bool {
        self.0 & Self::ALL.0 != 0
    }

    /// Returns `true` if the cell blocks heat flow.
    pub const fn is_insulator(self) -> bool {
        self.contains(Self::INSULATOR)
    }

    /// Returns `true` if no undefined bits are set.
    pub const fn is_known(self) -> bool {
        self.0 & !Self::ALL.0 == 0
    }
}

impl BitOr for CellFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for CellFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::FIXED), self.is_insulator()) {
            (false, false) => write!(f, "open"),
            (true, false) => write!(f, "fixed"),
            (false, true) => write!(f, "insulator"),
            (true, true) => write!(f, "fixed|insulator"),
        }
    }
}
