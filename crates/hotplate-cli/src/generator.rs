//! The demonstration plate written by `make_world`.

use hotplate_core::{CellFlags, World, WorldError};

/// Build an `n×n` plate at time 0.
///
/// - Border: Fixed | Insulator at 0.0.
/// - Interior: 0.5, no flags.
/// - Hot source: Fixed 1.0 at the centre cell.
/// - Cold sink: Fixed 0.0 at `(n/4, n/4)`.
/// - Wall: Insulator in column `3n/4`, rows `n/4..3n/4`.
///
/// Features that land on the border are dropped, so every `n >= 1` gives a
/// valid world. The source wins over the sink and wall where they overlap.
pub fn make_test_world(n: u32, alpha: f32) -> Result<World, WorldError> {
    let centre = n / 2;
    let sink = n / 4;
    let wall_x = (u64::from(n) * 3 / 4) as u32;
    let wall_rows = n / 4..wall_x;
    let on_border = |x: u32, y: u32| x == 0 || y == 0 || x + 1 == n || y + 1 == n;

    World::from_fn(n, n, alpha, 0.0, |x, y| {
        if on_border(x, y) {
            (0.0, CellFlags::FIXED | CellFlags::INSULATOR)
        } else if x == centre && y == centre {
            (1.0, CellFlags::FIXED)
        } else if x == sink && y == sink {
            (0.0, CellFlags::FIXED)
        } else if x == wall_x && wall_rows.contains(&y) {
            (0.5, CellFlags::INSULATOR)
        } else {
            (0.5, CellFlags::NONE)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(
            make_test_world(0, 0.1),
            Err(WorldError::EmptyGrid {
                width: 0,
                height: 0
            })
        );
    }

    #[test]
    fn tiny_grids_are_all_border() {
        for n in 1..=2 {
            let w = make_test_world(n, 0.1).unwrap();
            assert!(w.flags().iter().all(|f| f.is_frozen()));
            assert!(w.state().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn features_are_placed() {
        let w = make_test_world(16, 0.1).unwrap();
        assert_eq!(w.value(8, 8), Some(1.0));
        assert_eq!(w.cell_flags(8, 8), Some(CellFlags::FIXED));
        assert_eq!(w.value(4, 4), Some(0.0));
        assert_eq!(w.cell_flags(4, 4), Some(CellFlags::FIXED));
        for y in 4..12 {
            assert_eq!(w.cell_flags(12, y), Some(CellFlags::INSULATOR), "row {y}");
        }
        assert_eq!(w.cell_flags(12, 3), Some(CellFlags::NONE));
        assert_eq!(w.cell_flags(12, 12), Some(CellFlags::NONE));
        assert_eq!(w.value(2, 9), Some(0.5));
        assert_eq!(w.time(), 0.0);
        assert_eq!(w.alpha(), 0.1);
    }

    #[test]
    fn border_is_frozen_cold() {
        let w = make_test_world(9, 0.2).unwrap();
        for i in 0..9 {
            for (x, y) in [(i, 0), (i, 8), (0, i), (8, i)] {
                assert_eq!(w.value(x, y), Some(0.0));
                assert_eq!(
                    w.cell_flags(x, y),
                    Some(CellFlags::FIXED | CellFlags::INSULATOR)
                );
            }
        }
    }
}
