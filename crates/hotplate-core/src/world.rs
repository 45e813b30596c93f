//! The grid world: dimensions, coefficients, time, and per-cell data.
//!
//! A [`World`] can only be obtained through a validating constructor, so
//! every world in the program satisfies:
//!
//! - `width > 0` and `height > 0`, with `width * height <= u32::MAX`;
//! - `state` and `flags` both hold exactly `width * height` cells;
//! - `alpha` is finite and non-negative, `time` is finite;
//! - every temperature is in `[0, 1]`;
//! - every border cell is Fixed or Insulator.
//!
//! The last invariant is what lets stencil backends read the four
//! neighbours of any cell they update without a bounds check: only
//! interior cells are ever updated.
//!
//! Violations are reported as [`WorldError`], which is a configuration
//! failure wherever it surfaces: the engine wraps it as
//! `ConfigError::World` (a `StepError::Configuration`), and the world
//! loader wraps it as `CodecError::InvalidWorld`. An open border is
//! [`WorldError::OpenBorder`] in both cases.

use crate::error::WorldError;
use crate::flags::CellFlags;
use crate::grid::GridDims;

/// A rectangular heat-diffusion world.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    dims: GridDims,
    alpha: f32,
    time: f32,
    state: Vec<f32>,
    flags: Vec<CellFlags>,
}

impl World {
    /// Construct a world, validating every invariant.
    ///
    /// `state` and `flags` are row-major with `width * height` entries.
    pub fn new(
        width: u32,
        height: u32,
        alpha: f32,
        time: f32,
        state: Vec<f32>,
        flags: Vec<CellFlags>,
    ) -> Result<Self, WorldError> {
        // 1. Non-empty grid.
        if width == 0 || height == 0 {
            return Err(WorldError::EmptyGrid { width, height });
        }
        // 2. Cell count fits u32 (device buffers index with u32).
        let cells = u64::from(width) * u64::from(height);
        if u32::try_from(cells).is_err() {
            return Err(WorldError::CellCountOverflow { value: cells });
        }
        let dims = GridDims::new(width, height);
        let expected = dims.cell_count();
        // 3. Array lengths.
        if state.len() != expected {
            return Err(WorldError::LengthMismatch {
                what: "state",
                expected,
                actual: state.len(),
            });
        }
        if flags.len() != expected {
            return Err(WorldError::LengthMismatch {
                what: "flags",
                expected,
                actual: flags.len(),
            });
        }
        // 4. Scalars.
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(WorldError::InvalidAlpha { value: alpha });
        }
        if !time.is_finite() {
            return Err(WorldError::InvalidTime { value: time });
        }
        // 5. Per-cell values and flag words.
        if let Some((index, &value)) = state
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(WorldError::StateOutOfRange { index, value });
        }
        if let Some((index, f)) = flags.iter().enumerate().find(|(_, f)| !f.is_known()) {
            return Err(WorldError::UnknownFlags {
                index,
                bits: f.bits(),
            });
        }
        // 6. Closed border.
        for y in 0..height {
            for x in 0..width {
                if dims.is_border(x, y) && !flags[dims.index(x, y)].is_frozen() {
                    return Err(WorldError::OpenBorder { x, y });
                }
            }
        }

        Ok(Self {
            dims,
            alpha,
            time,
            state,
            flags,
        })
    }

    /// Build a world by evaluating `cell(x, y) -> (value, flags)` for every
    /// cell in row-major order, then validating the result.
    pub fn from_fn(
        width: u32,
        height: u32,
        alpha: f32,
        time: f32,
        mut cell: impl FnMut(u32, u32) -> (f32, CellFlags),
    ) -> Result<Self, WorldError> {
        let cells = u64::from(width) * u64::from(height);
        if u32::try_from(cells).is_err() {
            return Err(WorldError::CellCountOverflow { value: cells });
        }
        let count = cells as usize;
        let mut state = Vec::with_capacity(count);
        let mut flags = Vec::with_capacity(count);
        for y in 0..height {
            for x in 0..width {
                let (v, f) = cell(x, y);
                state.push(v);
                flags.push(f);
            }
        }
        Self::new(width, height, alpha, time, state, flags)
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.dims.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// Diffusion coefficient.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Simulated time.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Row-major temperatures.
    pub fn state(&self) -> &[f32] {
        &self.state
    }

    /// Row-major boundary flags.
    pub fn flags(&self) -> &[CellFlags] {
        &self.flags
    }

    /// Temperature at `(x, y)`, or `None` when out of range.
    pub fn value(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.dims.width && y < self.dims.height).then(|| self.state[self.dims.index(x, y)])
    }

    /// Flags at `(x, y)`, or `None` when out of range.
    pub fn cell_flags(&self, x: u32, y: u32) -> Option<CellFlags> {
        (x < self.dims.width && y < self.dims.height).then(|| self.flags[self.dims.index(x, y)])
    }

    /// Install the result of a stepping call: the final state buffer and
    /// the advanced simulated time.
    ///
    /// Flags, dimensions and alpha are immutable, so the border invariant
    /// cannot be broken here. Only the buffer length and time are checked;
    /// the update rule already guarantees values in `[0, 1]`.
    pub fn commit_step(&mut self, state: Vec<f32>, time: f32) -> Result<(), WorldError> {
        if state.len() != self.state.len() {
            return Err(WorldError::LengthMismatch {
                what: "state",
                expected: self.state.len(),
                actual: state.len(),
            });
        }
        if !time.is_finite() {
            return Err(WorldError::InvalidTime { value: time });
        }
        self.state = state;
        self.time = time;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_3x3(center: f32) -> Result<World, WorldError> {
        World::from_fn(3, 3, 1.0, 0.0, |x, y| {
            if x == 1 && y == 1 {
                (center, CellFlags::NONE)
            } else {
                (0.0, CellFlags::FIXED)
            }
        })
    }

    #[test]
    fn valid_world_constructs() {
        let w = closed_3x3(1.0).unwrap();
        assert_eq!(w.dims(), GridDims::new(3, 3));
        assert_eq!(w.value(1, 1), Some(1.0));
        assert_eq!(w.cell_flags(0, 0), Some(CellFlags::FIXED));
        assert_eq!(w.value(3, 0), None);
    }

    #[test]
    fn empty_grid_rejected() {
        match World::new(0, 4, 0.1, 0.0, vec![], vec![]) {
            Err(WorldError::EmptyGrid { width: 0, height: 4 }) => {}
            other => panic!("expected EmptyGrid, got {other:?}"),
        }
    }

    #[test]
    fn overflow_rejected() {
        match World::new(u32::MAX, 2, 0.1, 0.0, vec![], vec![]) {
            Err(WorldError::CellCountOverflow { .. }) => {}
            other => panic!("expected CellCountOverflow, got {other:?}"),
        }
    }

    #[test]
    fn length_mismatch_rejected() {
        let flags = vec![CellFlags::FIXED; 4];
        match World::new(2, 2, 0.1, 0.0, vec![0.0; 3], flags) {
            Err(WorldError::LengthMismatch { what: "state", .. }) => {}
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn open_border_rejected() {
        let result = World::from_fn(3, 3, 1.0, 0.0, |x, y| {
            if (x == 1 && y == 1) || (x == 2 && y == 1) {
                (0.5, CellFlags::NONE)
            } else {
                (0.0, CellFlags::INSULATOR)
            }
        });
        match result {
            Err(WorldError::OpenBorder { x: 2, y: 1 }) => {}
            other => panic!("expected OpenBorder at (2, 1), got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_state_rejected() {
        match closed_3x3(1.5) {
            Err(WorldError::StateOutOfRange { index: 4, .. }) => {}
            other => panic!("expected StateOutOfRange, got {other:?}"),
        }
        match closed_3x3(f32::NAN) {
            Err(WorldError::StateOutOfRange { index: 4, .. }) => {}
            other => panic!("expected StateOutOfRange for NaN, got {other:?}"),
        }
    }

    #[test]
    fn negative_alpha_rejected() {
        let result = World::new(1, 1, -0.5, 0.0, vec![0.0], vec![CellFlags::FIXED]);
        assert!(matches!(result, Err(WorldError::InvalidAlpha { .. })));
    }

    #[test]
    fn unknown_flag_bits_rejected() {
        let result = World::new(1, 1, 0.1, 0.0, vec![0.0], vec![CellFlags::from_bits(5)]);
        match result {
            Err(WorldError::UnknownFlags { index: 0, bits: 5 }) => {}
            other => panic!("expected UnknownFlags, got {other:?}"),
        }
    }

    #[test]
    fn commit_step_replaces_state_and_time() {
        let mut w = closed_3x3(1.0).unwrap();
        let mut next = w.state().to_vec();
        next[4] = 0.25;
        w.commit_step(next, 0.5).unwrap();
        assert_eq!(w.value(1, 1), Some(0.25));
        assert_eq!(w.time(), 0.5);
    }

    #[test]
    fn commit_step_rejects_wrong_length() {
        let mut w = closed_3x3(1.0).unwrap();
        assert!(w.commit_step(vec![0.0; 8], 0.5).is_err());
        assert_eq!(w.time(), 0.0);
    }
}
