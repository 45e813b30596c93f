//! World fingerprinting.
//!
//! Uses FNV-1a for fast, deterministic hashing of world contents. Not
//! cryptographically secure; used to compare runs and to tag log lines.

use hotplate_core::World;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Hash dimensions, alpha, time, every flag word and every temperature.
///
/// Floats are hashed by bit pattern, so two worlds hash equal exactly
/// when a binary save of each would produce identical bytes.
pub fn world_hash(world: &World) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, world.width());
    hash = fnv1a_u32(hash, world.height());
    hash = fnv1a_u32(hash, world.alpha().to_bits());
    hash = fnv1a_u32(hash, world.time().to_bits());
    for f in world.flags() {
        hash = fnv1a_u32(hash, f.bits());
    }
    for v in world.state() {
        hash = fnv1a_u32(hash, v.to_bits());
    }
    hash
}
