//! The prepared, read-only inputs of a stepping call.

use hotplate_core::{CellFlags, GridDims, World};
use hotplate_stencil::{compute_masks, evaluate_cell, Coefficients, KernelVariant, NeighborMask};

use crate::error::ConfigError;

/// Everything a backend needs besides the state buffers.
///
/// Built once per stepping call, before the first iteration, and shared
/// read-only by every worker. For [`KernelVariant::PackedMask`] the mask
/// table is computed here, exactly once, independent of the number of
/// iterations. For [`KernelVariant::Flags`] no table is built and each
/// evaluation re-derives its mask from the borrowed flag array.
#[derive(Debug)]
pub struct StepPlan<'w> {
    dims: GridDims,
    dt: f32,
    coefficients: Coefficients,
    variant: KernelVariant,
    masks: Vec<NeighborMask>,
    flags: &'w [CellFlags],
}

impl<'w> StepPlan<'w> {
    /// Prepare a plan for stepping `world` by `dt`.
    pub fn new(world: &'w World, dt: f32, variant: KernelVariant) -> Result<Self, ConfigError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(ConfigError::InvalidDt { value: dt });
        }
        let dims = world.dims();
        let masks = match variant {
            KernelVariant::PackedMask => compute_masks(world.flags(), dims),
            KernelVariant::Flags => Vec::new(),
        };
        Ok(Self {
            dims,
            dt,
            coefficients: Coefficients::new(world.alpha(), dt),
            variant,
            masks,
            flags: world.flags(),
        })
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Time step.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Stencil weights.
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Which per-cell input the backend should read.
    pub fn variant(&self) -> KernelVariant {
        self.variant
    }

    /// Precomputed mask table. Empty for [`KernelVariant::Flags`].
    pub fn masks(&self) -> &[NeighborMask] {
        &self.masks
    }

    /// Row-major cell flags.
    pub fn flags(&self) -> &[CellFlags] {
        self.flags
    }

    /// Mask of the cell at flat `index`.
    #[inline]
    pub fn mask(&self, index: usize) -> NeighborMask {
        match self.variant {
            KernelVariant::PackedMask => self.masks[index],
            KernelVariant::Flags => {
                let (x, y) = self.dims.coords(index);
                NeighborMask::for_cell(self.flags, self.dims, x, y)
            }
        }
    }

    /// Next value of the cell at flat `index`, reading neighbours only
    /// from `current`.
    #[inline]
    pub fn evaluate(&self, current: &[f32], index: usize) -> f32 {
        evaluate_cell(current, self.dims, index, self.mask(index), self.coefficients)
    }
}
