//! Single-threaded reference backend.

use hotplate_stencil::KernelVariant;

use super::{host_upload, ExecutionBackend};
use crate::buffer::DoubleBuffer;
use crate::error::StepError;
use crate::plan::StepPlan;

/// Evaluates cells one at a time, rows top to bottom, columns left to
/// right. Needs no barrier: the loop finishes before `apply` returns.
#[derive(Clone, Debug, Default)]
pub struct SequentialBackend {
    variant: KernelVariant,
}

impl SequentialBackend {
    /// A sequential backend reading `variant` inputs.
    pub fn new(variant: KernelVariant) -> Self {
        Self { variant }
    }
}

impl ExecutionBackend for SequentialBackend {
    type Buffer = Vec<f32>;

    fn name(&self) -> &str {
        "sequential"
    }

    fn variant(&self) -> KernelVariant {
        self.variant
    }

    fn upload(
        &mut self,
        _plan: &StepPlan<'_>,
        state: &[f32],
    ) -> Result<DoubleBuffer<Vec<f32>>, StepError> {
        Ok(host_upload(state))
    }

    fn apply(
        &mut self,
        plan: &StepPlan<'_>,
        current: &Vec<f32>,
        next: &mut Vec<f32>,
    ) -> Result<(), StepError> {
        let dims = plan.dims();
        for y in 0..dims.height {
            for x in 0..dims.width {
                let i = dims.index(x, y);
                next[i] = plan.evaluate(current, i);
            }
        }
        Ok(())
    }

    fn download(&mut self, _plan: &StepPlan<'_>, buffer: Vec<f32>) -> Result<Vec<f32>, StepError> {
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotplate_test_utils::scenario_a;

    #[test]
    fn apply_writes_every_cell() {
        let world = scenario_a();
        let plan = StepPlan::new(&world, 0.25, KernelVariant::PackedMask).unwrap();
        let mut backend = SequentialBackend::default();
        let mut buffers = backend.upload(&plan, world.state()).unwrap();
        let (cur, next) = buffers.split();
        next.iter_mut().for_each(|v| *v = f32::NAN);
        backend.apply(&plan, cur, next).unwrap();
        let (_, next) = buffers.split();
        assert!(next.iter().all(|v| !v.is_nan()));
        assert_eq!(&next[..4], &world.state()[..4]);
    }

    #[test]
    fn download_returns_buffer_unchanged() {
        let world = scenario_a();
        let plan = StepPlan::new(&world, 0.25, KernelVariant::PackedMask).unwrap();
        let mut backend = SequentialBackend::new(KernelVariant::Flags);
        assert_eq!(backend.variant(), KernelVariant::Flags);
        let out = backend.download(&plan, vec![0.25; 9]).unwrap();
        assert_eq!(out, vec![0.25; 9]);
    }
}
