//! Host backend configuration.

use hotplate_stencil::KernelVariant;

use crate::platform::DeviceSelection;

// ── ParallelConfig ─────────────────────────────────────────────────

/// Configuration for [`ParallelBackend`](crate::ParallelBackend).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Platform and device to run on. The host registry has one platform
    /// with one device, so only `0/0` resolves. Default: `0/0`.
    pub selection: DeviceSelection,
    /// Worker threads. `None` = one per available core.
    pub worker_threads: Option<usize>,
    /// Per-cell input read by each work item. Default: packed mask.
    pub variant: KernelVariant,
}

impl ParallelConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 256]`; a pool with zero workers
    /// could never complete an iteration.
    pub fn resolved_worker_threads(&self) -> usize {
        match self.worker_threads {
            Some(n) => n.clamp(1, 256),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_threads_are_clamped() {
        let mut cfg = ParallelConfig {
            worker_threads: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_worker_threads(), 1);
        cfg.worker_threads = Some(10_000);
        assert_eq!(cfg.resolved_worker_threads(), 256);
        cfg.worker_threads = Some(3);
        assert_eq!(cfg.resolved_worker_threads(), 3);
    }

    #[test]
    fn auto_threads_is_positive() {
        assert!(ParallelConfig::default().resolved_worker_threads() >= 1);
    }
}
