//! Benchmark profiles for the Hotplate heat diffusion simulator.
//!
//! - [`reference_world`]: 128x128 plate (16K cells), the `make_world` default size
//! - [`stress_world`]: 1024x1024 plate (~1M cells) for throughput runs
//! - [`plate`]: the shared layout at any size

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use hotplate_core::{CellFlags, World};

/// Square plate of side `n`: frozen cold border, warm interior, a fixed hot
/// square in the middle and an insulating bar across the lower half.
///
/// alpha=0.1, dt=0.1 keeps outer well below inner (0.0025 vs 0.9975).
///
/// # Panics
///
/// Panics if `n` is zero or `n * n` overflows `u32`.
pub fn plate(n: u32) -> World {
    let mid = n / 2;
    let hot = mid.saturating_sub(n / 16)..=mid + n / 16;
    World::from_fn(n, n, 0.1, 0.0, |x, y| {
        if x == 0 || y == 0 || x + 1 == n || y + 1 == n {
            (0.0, CellFlags::FIXED | CellFlags::INSULATOR)
        } else if hot.contains(&x) && hot.contains(&y) {
            (1.0, CellFlags::FIXED)
        } else if y == 3 * n / 4 && x > n / 8 && x < 7 * n / 8 {
            (0.25, CellFlags::INSULATOR)
        } else {
            (0.25, CellFlags::NONE)
        }
    })
    .expect("benchmark plate must be valid")
}

/// 128x128 reference plate.
pub fn reference_world() -> World {
    plate(128)
}

/// 1024x1024 stress plate.
pub fn stress_world() -> World {
    plate(1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_valid() {
        let w = reference_world();
        assert_eq!(w.dims().cell_count(), 128 * 128);
        assert_eq!(w.value(64, 64), Some(1.0));
        assert_eq!(w.cell_flags(64, 96), Some(CellFlags::INSULATOR));
        assert_eq!(plate(3).value(1, 1), Some(1.0));
    }
}
