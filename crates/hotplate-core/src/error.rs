//! Error types for world construction.

use std::error::Error;
use std::fmt;

/// A world could not be constructed because one of its invariants failed.
///
/// Every variant names the first offending value so a malformed input
/// file can be fixed without re-running the validator cell by cell.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldError {
    /// Width or height is zero.
    EmptyGrid {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// `width * height` does not fit in `u32`.
    CellCountOverflow {
        /// The product that overflowed.
        value: u64,
    },
    /// A per-cell array has the wrong length.
    LengthMismatch {
        /// Which array (`"state"` or `"flags"`).
        what: &'static str,
        /// `width * height`.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// The diffusion coefficient is NaN, infinite, or negative.
    InvalidAlpha {
        /// The invalid value.
        value: f32,
    },
    /// The simulated time is NaN or infinite.
    InvalidTime {
        /// The invalid value.
        value: f32,
    },
    /// A temperature lies outside `[0, 1]` or is not finite.
    StateOutOfRange {
        /// Flat index of the cell.
        index: usize,
        /// The offending value.
        value: f32,
    },
    /// A flag word carries bits other than Fixed and Insulator.
    UnknownFlags {
        /// Flat index of the cell.
        index: usize,
        /// The raw flag word.
        bits: u32,
    },
    /// A border cell is neither Fixed nor Insulator, so its interior
    /// neighbours would read past the grid edge.
    OpenBorder {
        /// Column of the first open border cell.
        x: u32,
        /// Row of the first open border cell.
        y: u32,
    },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must be non-empty, got {width}x{height}")
            }
            Self::CellCountOverflow { value } => {
                write!(f, "cell count {value} exceeds u32::MAX")
            }
            Self::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what} has {actual} cells, expected {expected}"),
            Self::InvalidAlpha { value } => {
                write!(f, "alpha must be finite and non-negative, got {value}")
            }
            Self::InvalidTime { value } => write!(f, "time must be finite, got {value}"),
            Self::StateOutOfRange { index, value } => {
                write!(f, "state[{index}] = {value} is outside [0, 1]")
            }
            Self::UnknownFlags { index, bits } => {
                write!(f, "flags[{index}] = {bits:#x} has undefined bits")
            }
            Self::OpenBorder { x, y } => write!(
                f,
                "border cell ({x}, {y}) must be fixed or insulator"
            ),
        }
    }
}

impl Error for WorldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_border_names_cell() {
        let e = WorldError::OpenBorder { x: 3, y: 0 };
        assert_eq!(e.to_string(), "border cell (3, 0) must be fixed or insulator");
    }

    #[test]
    fn length_mismatch_message() {
        let e = WorldError::LengthMismatch {
            what: "state",
            expected: 9,
            actual: 8,
        };
        assert_eq!(e.to_string(), "state has 8 cells, expected 9");
    }
}
