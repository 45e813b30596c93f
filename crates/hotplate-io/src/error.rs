//! Error types for world encoding and decoding.

use std::fmt;
use std::io;

use hotplate_core::WorldError;

/// Errors that can occur while loading or saving a world.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The input does not start with the `HotplateWorld` magic word.
    InvalidMagic {
        /// First line actually found.
        found: String,
    },
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version token found in the file.
        found: String,
    },
    /// The encoding line is neither `Text` nor `Binary`.
    UnknownEncoding {
        /// The encoding token found in the file.
        found: String,
    },
    /// A line could not be parsed.
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The decoded fields do not form a valid world.
    InvalidWorld(WorldError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic { found } => {
                write!(f, "invalid magic (expected \"{}\"), found {found:?}", crate::MAGIC)
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found:?}")
            }
            Self::UnknownEncoding { found } => {
                write!(f, "unknown encoding {found:?} (expected Text or Binary)")
            }
            Self::Malformed { line, detail } => write!(f, "line {line}: {detail}"),
            Self::InvalidWorld(e) => write!(f, "invalid world: {e}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidWorld(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<WorldError> for CodecError {
    fn from(e: WorldError) -> Self {
        Self::InvalidWorld(e)
    }
}
