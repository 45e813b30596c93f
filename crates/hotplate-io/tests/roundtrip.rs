//! Save/load through both encodings, including worlds produced by
//! stepping.

use std::io::Cursor;

use hotplate_io::{load_world, save_world, world_hash, CodecError, WorldEncoding};
use hotplate_test_utils::random_world;
use proptest::prelude::*;

fn reload(world: &hotplate_core::World, encoding: WorldEncoding) -> Result<hotplate_core::World, CodecError> {
    let mut bytes = Vec::new();
    save_world(&mut bytes, world, encoding)?;
    load_world(&mut Cursor::new(bytes))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn text_preserves_hash(w in 1u32..20, h in 1u32..20, seed in any::<u64>(), alpha in 0.0f32..5.0) {
        let world = random_world(w, h, alpha, seed);
        let back = reload(&world, WorldEncoding::Text).unwrap();
        prop_assert_eq!(world_hash(&back), world_hash(&world));
    }

    #[test]
    fn binary_preserves_hash(w in 1u32..20, h in 1u32..20, seed in any::<u64>()) {
        let world = random_world(w, h, 0.1, seed);
        let back = reload(&world, WorldEncoding::Binary).unwrap();
        prop_assert_eq!(world_hash(&back), world_hash(&world));
    }
}

#[test]
fn text_and_binary_decode_to_the_same_world() {
    let world = random_world(31, 17, 0.25, 42);
    let a = reload(&world, WorldEncoding::Text).unwrap();
    let b = reload(&world, WorldEncoding::Binary).unwrap();
    assert_eq!(a, b);
}

#[test]
fn encoding_flag_mapping() {
    assert_eq!(WorldEncoding::from_flag(true), WorldEncoding::Binary);
    assert_eq!(WorldEncoding::from_flag(false), WorldEncoding::Text);
    assert_eq!(WorldEncoding::default(), WorldEncoding::Text);
}
