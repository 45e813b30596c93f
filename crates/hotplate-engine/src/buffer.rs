//! Double-buffered state with ownership-transfer flips.
//!
//! [`DoubleBuffer`] holds the two state buffers of a stepping call. At any
//! instant one is *current* (read-only input of the iteration in progress)
//! and the other is *next* (write-only output). After an iteration has
//! completed for every cell, [`flip`](DoubleBuffer::flip) consumes the pair
//! and returns it with the roles exchanged:
//!
//! ```text
//! iteration t:   current = A (read)   next = B (write)
//! flip()
//! iteration t+1: current = B (read)   next = A (write)
//! ```
//!
//! Only the two handles move; no cell data is copied. The buffer type is
//! generic so device-resident buffers flip exactly like host vectors.

/// A current/next pair of state buffers.
#[derive(Debug)]
pub struct DoubleBuffer<B> {
    current: B,
    next: B,
}

impl<B> DoubleBuffer<B> {
    /// Pair `current` (holding the initial state) with scratch `next`.
    pub fn new(current: B, next: B) -> Self {
        Self { current, next }
    }

    /// The buffer holding the most recently completed iteration.
    pub fn current(&self) -> &B {
        &self.current
    }

    /// Borrow the pair for one iteration: `current` read-only, `next`
    /// writable. The borrow checker guarantees they never alias.
    pub fn split(&mut self) -> (&B, &mut B) {
        (&self.current, &mut self.next)
    }

    /// Exchange roles. Must only be called once every cell of `next` has
    /// been written.
    #[must_use]
    pub fn flip(self) -> Self {
        Self {
            current: self.next,
            next: self.current,
        }
    }

    /// Consume the pair, keeping the authoritative buffer.
    pub fn into_current(self) -> B {
        self.current
    }
}
