//! The per-cell update rule.
//!
//! Given `outer = alpha * dt` and `inner = 1 - outer / 4`, an updatable
//! cell's next value is the weighted mean of itself (weight `inner`) and
//! each open neighbour (weight `outer`), clamped to `[0, 1]`:
//!
//! ```text
//! contrib = inner + outer * open_neighbours
//! acc     = inner * self + outer * sum(open neighbour values)
//! next    = clamp(acc / contrib, 0, 1)
//! ```
//!
//! Dividing by the weights actually used (instead of a constant) is what
//! makes an insulated side block heat: the cell redistributes its own
//! retained weight over the remaining open directions.

use std::fmt;

use hotplate_core::GridDims;

use crate::mask::NeighborMask;

/// Per-step stencil weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    /// Weight of the cell's own previous value.
    pub inner: f32,
    /// Weight of each open neighbour.
    pub outer: f32,
}

impl Coefficients {
    /// Derive the weights for diffusion coefficient `alpha` and step `dt`.
    pub fn new(alpha: f32, dt: f32) -> Self {
        let outer = alpha * dt;
        let inner = 1.0 - outer / 4.0;
        Self { inner, outer }
    }

    /// Use explicit weights.
    pub const fn from_parts(inner: f32, outer: f32) -> Self {
        Self { inner, outer }
    }

    /// Returns `true` when every weight is non-negative, so each update is
    /// a convex combination of its inputs. Steps with `alpha * dt > 4`
    /// still clamp into `[0, 1]` but no longer diffuse smoothly.
    pub fn is_stable(&self) -> bool {
        self.inner >= 0.0 && self.outer >= 0.0
    }
}

/// Which per-cell input a backend reads while stepping.
///
/// Both variants evaluate the same rule and produce bit-identical results;
/// they trade memory for recomputation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KernelVariant {
    /// Re-derive each cell's mask from the full flag array on every
    /// evaluation.
    Flags,
    /// Look the mask up in the table precomputed once per stepping call.
    #[default]
    PackedMask,
}

impl KernelVariant {
    /// Short name used in logs and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flags => "flags",
            Self::PackedMask => "packed",
        }
    }
}

impl fmt::Display for KernelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute a cell's next value from its previous value and the previous
/// values of its four neighbours.
///
/// Neighbours are accumulated in the order up, down, left, right. The clamp
/// is applied after the division; a NaN quotient clamps to `0`.
#[inline]
pub fn update_cell(
    center: f32,
    up: f32,
    down: f32,
    left: f32,
    right: f32,
    mask: NeighborMask,
    c: Coefficients,
) -> f32 {
    if mask.is_skip() {
        return center;
    }

    let mut contrib = c.inner;
    let mut acc = c.inner * center;
    let neighbours = [
        (NeighborMask::UP, up),
        (NeighborMask::DOWN, down),
        (NeighborMask::LEFT, left),
        (NeighborMask::RIGHT, right),
    ];
    for (bit, value) in neighbours {
        if !mask.contains(bit) {
            contrib += c.outer;
            acc += c.outer * value;
        }
    }

    (acc / contrib).max(0.0).min(1.0)
}

/// Evaluate the update rule for flat index `index` of a row-major buffer.
///
/// Skipped cells return their own value without touching any neighbour.
/// For every other cell the four neighbours are read unconditionally,
/// which is in bounds because worlds only allow open cells in the
/// interior.
#[inline]
pub fn evaluate_cell(
    state: &[f32],
    dims: GridDims,
    index: usize,
    mask: NeighborMask,
    c: Coefficients,
) -> f32 {
    let center = state[index];
    if mask.is_skip() {
        return center;
    }
    let w = dims.width as usize;
    update_cell(
        center,
        state[index - w],
        state[index + w],
        state[index - 1],
        state[index + 1],
        mask,
        c,
    )
}
