//! Reusable world fixtures.
//!
//! - [`scenario_a`]: 3×3, fixed cold border, hot open centre.
//! - [`scenario_b`]: as A, with the north neighbour also insulating.
//! - [`scenario_c`]: 2×2, every cell fixed.
//! - [`bordered_world`]: any size, fixed cold border, uniform interior.
//! - [`random_world`]: seeded random flags and temperatures.

use hotplate_core::{CellFlags, World};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builder for worlds with a hand-placed layout.
///
/// Starts as a `width × height` grid of open cells at `0.0` with
/// `alpha = 1.0` and `time = 0.0`. [`build`](Self::build) panics if the
/// layout is not a valid world, which is what a test wants.
pub struct TestWorldBuilder {
    width: u32,
    height: u32,
    alpha: f32,
    time: f32,
    state: Vec<f32>,
    flags: Vec<CellFlags>,
}

impl TestWorldBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            alpha: 1.0,
            time: 0.0,
            state: vec![0.0; count],
            flags: vec![CellFlags::NONE; count],
        }
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    /// Set every cell's temperature.
    pub fn fill(mut self, value: f32) -> Self {
        self.state.iter_mut().for_each(|v| *v = value);
        self
    }

    /// Give every border cell `flags` and `value`.
    pub fn border(mut self, flags: CellFlags, value: f32) -> Self {
        for y in 0..self.height {
            for x in 0..self.width {
                if x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height {
                    let i = self.index(x, y);
                    self.flags[i] = flags;
                    self.state[i] = value;
                }
            }
        }
        self
    }

    /// Set one cell.
    pub fn cell(mut self, x: u32, y: u32, value: f32, flags: CellFlags) -> Self {
        let i = self.index(x, y);
        self.state[i] = value;
        self.flags[i] = flags;
        self
    }

    pub fn build(self) -> World {
        World::new(
            self.width,
            self.height,
            self.alpha,
            self.time,
            self.state,
            self.flags,
        )
        .expect("test world layout must be valid")
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// 3×3 world, `alpha = 1`: fixed border at `0.0`, open centre at `1.0`.
pub fn scenario_a() -> World {
    TestWorldBuilder::new(3, 3)
        .border(CellFlags::FIXED, 0.0)
        .cell(1, 1, 1.0, CellFlags::NONE)
        .build()
}

/// [`scenario_a`] with the north neighbour of the centre also insulating.
pub fn scenario_b() -> World {
    TestWorldBuilder::new(3, 3)
        .border(CellFlags::FIXED, 0.0)
        .cell(1, 0, 0.0, CellFlags::FIXED | CellFlags::INSULATOR)
        .cell(1, 1, 1.0, CellFlags::NONE)
        .build()
}

/// 2×2 world with every cell fixed at the given row-major values.
pub fn scenario_c(values: [f32; 4]) -> World {
    World::new(2, 2, 1.0, 0.0, values.to_vec(), vec![CellFlags::FIXED; 4])
        .expect("all-fixed 2x2 world is valid")
}

/// `width × height` world with a fixed border at `0.0` and every interior
/// cell open at `interior`.
pub fn bordered_world(width: u32, height: u32, alpha: f32, interior: f32) -> World {
    TestWorldBuilder::new(width, height)
        .alpha(alpha)
        .fill(interior)
        .border(CellFlags::FIXED, 0.0)
        .build()
}

/// Seeded random world.
///
/// Border cells are Fixed, Insulator, or both. Interior cells are open
/// with probability 11/16 and otherwise Fixed, Insulator, or both.
/// Temperatures are uniform in `[0, 1)`. The same seed always yields the
/// same world.
pub fn random_world(width: u32, height: u32, alpha: f32, seed: u64) -> World {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    World::from_fn(width, height, alpha, 0.0, |x, y| {
        let border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
        let roll = rng.next_u32();
        let flags = if border {
            match roll % 3 {
                0 => CellFlags::FIXED,
                1 => CellFlags::INSULATOR,
                _ => CellFlags::FIXED | CellFlags::INSULATOR,
            }
        } else {
            match roll % 16 {
                0 | 1 => CellFlags::FIXED,
                2 | 3 => CellFlags::INSULATOR,
                4 => CellFlags::FIXED | CellFlags::INSULATOR,
                _ => CellFlags::NONE,
            }
        };
        let value = (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32;
        (value, flags)
    })
    .expect("random world is valid by construction")
}
