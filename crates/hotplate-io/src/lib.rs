//! World serialisation for Hotplate.
//!
//! Worlds are stored in a small line-oriented container with either a
//! human-readable text payload or a compact little-endian binary payload:
//!
//! ```text
//! HotplateWorld v1
//! <width> <height> <alpha> <time>
//! Text | Binary
//! <payload>
//! ```
//!
//! - [`save_world`] / [`load_world`] encode and decode whole worlds.
//! - [`world_hash`] fingerprints a world for logs and determinism checks.
//! - All I/O uses a custom codec (no serde dependency).
//!
//! Text payloads hold `height` lines of `width` `flags:value` tokens.
//! Values are written with the shortest representation that parses back
//! to the same `f32`, so text round-trips are exact. Binary payloads hold
//! `width * height` `u32` flag words followed by `width * height` `f32`
//! temperatures.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hash;

pub use codec::{load_world, save_world, WorldEncoding};
pub use error::CodecError;
pub use hash::world_hash;

/// Magic word on the first line of every world file.
pub const MAGIC: &str = "HotplateWorld";

/// Current format version, written as `v<N>` after the magic word.
pub const FORMAT_VERSION: u32 = 1;
