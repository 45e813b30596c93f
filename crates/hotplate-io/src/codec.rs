//! Text and binary encode/decode for world files.

use std::io::{BufRead, Read, Write};

use tracing::debug;

use hotplate_core::{CellFlags, World};

use crate::error::CodecError;
use crate::{FORMAT_VERSION, MAGIC};

/// Payload encoding of a world file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorldEncoding {
    /// Whitespace-separated `flags:value` tokens, one grid row per line.
    #[default]
    Text,
    /// Little-endian `u32` flags then little-endian `f32` state.
    Binary,
}

impl WorldEncoding {
    /// `Binary` when `binary` is set, `Text` otherwise.
    pub fn from_flag(binary: bool) -> Self {
        if binary {
            Self::Binary
        } else {
            Self::Text
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Binary => "Binary",
        }
    }
}

// ── Primitive writers ───────────────────────────────────────────

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian f32.
pub fn write_f32_le(w: &mut dyn Write, v: f32) -> Result<(), CodecError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian f32.
pub fn read_f32_le(r: &mut dyn Read) -> Result<f32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

// ── World encode ────────────────────────────────────────────────

/// Write `world` to `w` with the given payload encoding.
pub fn save_world(
    w: &mut dyn Write,
    world: &World,
    encoding: WorldEncoding,
) -> Result<(), CodecError> {
    writeln!(w, "{MAGIC} v{FORMAT_VERSION}")?;
    writeln!(
        w,
        "{} {} {} {}",
        world.width(),
        world.height(),
        world.alpha(),
        world.time()
    )?;
    writeln!(w, "{}", encoding.keyword())?;

    match encoding {
        WorldEncoding::Text => {
            let width = world.width() as usize;
            let rows = world.flags().chunks(width).zip(world.state().chunks(width));
            for (flags, values) in rows {
                let mut sep = "";
                for (f, v) in flags.iter().zip(values) {
                    write!(w, "{sep}{}:{v}", f.bits())?;
                    sep = " ";
                }
                writeln!(w)?;
            }
        }
        WorldEncoding::Binary => {
            for f in world.flags() {
                write_u32_le(w, f.bits())?;
            }
            for &v in world.state() {
                write_f32_le(w, v)?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

// ── World decode ────────────────────────────────────────────────

/// Line reader that tracks 1-based line numbers for error messages.
struct Lines<'a> {
    r: &'a mut dyn BufRead,
    line: usize,
    buf: String,
}

impl<'a> Lines<'a> {
    fn new(r: &'a mut dyn BufRead) -> Self {
        Self {
            r,
            line: 0,
            buf: String::new(),
        }
    }

    /// Next line with the trailing newline removed, or `None` at EOF.
    fn next_line(&mut self) -> Result<Option<&str>, CodecError> {
        self.buf.clear();
        if self.r.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(self.buf.trim_end_matches(['\n', '\r'])))
    }

    /// Next line, treating EOF as a malformed file.
    fn expect_line(&mut self, what: &str) -> Result<&str, CodecError> {
        let line = self.line + 1;
        self.next_line()?.ok_or_else(|| CodecError::Malformed {
            line,
            detail: format!("unexpected end of input, expected {what}"),
        })
    }

    fn malformed(&self, detail: impl Into<String>) -> CodecError {
        CodecError::Malformed {
            line: self.line,
            detail: detail.into(),
        }
    }
}

fn parse_field<T: std::str::FromStr>(
    lines: &Lines<'_>,
    token: Option<&str>,
    name: &str,
) -> Result<T, CodecError> {
    let token = token.ok_or_else(|| lines.malformed(format!("missing {name}")))?;
    token
        .parse()
        .map_err(|_| lines.malformed(format!("invalid {name} {token:?}")))
}

/// Upper bound on the per-array capacity reserved from a header before any
/// payload has been read.
const MAX_RESERVED_CELLS: usize = 1 << 20;

/// Read a world from `r`, accepting either payload encoding.
///
/// A header announcing more cells than the payload holds fails with an
/// error once the payload runs out; memory is committed only for cells
/// actually read.
pub fn load_world(r: &mut dyn BufRead) -> Result<World, CodecError> {
    let mut lines = Lines::new(r);

    // Magic and version.
    let first = lines.expect_line("header")?.to_string();
    let mut tokens = first.split_whitespace();
    if tokens.next() != Some(MAGIC) {
        return Err(CodecError::InvalidMagic { found: first });
    }
    let version = tokens.next().unwrap_or("").to_string();
    if version != format!("v{FORMAT_VERSION}") {
        return Err(CodecError::UnsupportedVersion { found: version });
    }

    // Dimensions and scalars.
    let dims_line = lines.expect_line("dimensions")?.to_string();
    let mut tokens = dims_line.split_whitespace();
    let width: u32 = parse_field(&lines, tokens.next(), "width")?;
    let height: u32 = parse_field(&lines, tokens.next(), "height")?;
    let alpha: f32 = parse_field(&lines, tokens.next(), "alpha")?;
    let time: f32 = parse_field(&lines, tokens.next(), "time")?;
    if let Some(extra) = tokens.next() {
        return Err(lines.malformed(format!("unexpected token {extra:?}")));
    }

    let encoding = match lines.expect_line("encoding")?.trim() {
        "Text" => WorldEncoding::Text,
        "Binary" => WorldEncoding::Binary,
        other => {
            return Err(CodecError::UnknownEncoding {
                found: other.to_string(),
            })
        }
    };

    // Grids too large for u32 cell counts are rejected by World::new; do
    // not try to allocate them first.
    let cells = u64::from(width) * u64::from(height);
    let count = usize::try_from(cells)
        .ok()
        .filter(|_| u32::try_from(cells).is_ok())
        .unwrap_or(0);

    // The header is untrusted: reserve at most a bounded prefix and let the
    // vectors grow only as cells are actually decoded.
    let reserve = count.min(MAX_RESERVED_CELLS);
    let mut state = Vec::with_capacity(reserve);
    let mut flags = Vec::with_capacity(reserve);
    match encoding {
        WorldEncoding::Text => {
            while flags.len() < count {
                let row = lines.expect_line("grid row")?.to_string();
                if row.trim().is_empty() {
                    continue;
                }
                let before = flags.len();
                for token in row.split_whitespace() {
                    let (f, v) = token
                        .split_once(':')
                        .ok_or_else(|| lines.malformed(format!("expected flags:value, got {token:?}")))?;
                    let f: u32 = parse_field(&lines, Some(f), "flags")?;
                    let v: f32 = parse_field(&lines, Some(v), "value")?;
                    flags.push(CellFlags::from_bits(f));
                    state.push(v);
                }
                if flags.len() - before != width as usize {
                    return Err(lines.malformed(format!(
                        "expected {width} cells in row, got {}",
                        flags.len() - before
                    )));
                }
            }
        }
        WorldEncoding::Binary => {
            for _ in 0..count {
                flags.push(CellFlags::from_bits(read_u32_le(&mut lines.r)?));
            }
            for _ in 0..count {
                state.push(read_f32_le(&mut lines.r)?);
            }
        }
    }

    let world = World::new(width, height, alpha, time, state, flags)?;
    debug!(
        width,
        height,
        alpha,
        time,
        encoding = encoding.keyword(),
        "loaded world"
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotplate_core::WorldError;
    use hotplate_test_utils::{random_world, scenario_b};
    use std::io::Cursor;

    fn encode(world: &World, encoding: WorldEncoding) -> Vec<u8> {
        let mut out = Vec::new();
        save_world(&mut out, world, encoding).unwrap();
        out
    }

    fn decode(bytes: &[u8]) -> Result<World, CodecError> {
        load_world(&mut Cursor::new(bytes))
    }

    #[test]
    fn text_layout_is_one_row_per_line() {
        let text = String::from_utf8(encode(&scenario_b(), WorldEncoding::Text)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "HotplateWorld v1");
        assert_eq!(lines[1], "3 3 1 0");
        assert_eq!(lines[2], "Text");
        assert_eq!(lines[3], "1:0 3:0 1:0");
        assert_eq!(lines[4], "1:0 0:1 1:0");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn binary_payload_size() {
        let world = random_world(7, 5, 0.1, 11);
        let bytes = encode(&world, WorldEncoding::Binary);
        let header = b"HotplateWorld v1\n".len();
        assert!(bytes.len() > header + 35 * 8);
        assert!(bytes.ends_with(&world.state()[34].to_le_bytes()));
    }

    #[test]
    fn both_encodings_reload_exactly() {
        let world = random_world(13, 9, 0.37, 2);
        for enc in [WorldEncoding::Text, WorldEncoding::Binary] {
            let back = decode(&encode(&world, enc)).unwrap();
            assert_eq!(back, world, "{enc:?} changed the world");
        }
    }

    #[test]
    fn bad_magic_rejected() {
        match decode(b"NotAWorld v1\n3 3 1 0\nText\n") {
            Err(CodecError::InvalidMagic { found }) => assert_eq!(found, "NotAWorld v1"),
            other => panic!("expected InvalidMagic, got {other:?}"),
        }
    }

    #[test]
    fn future_version_rejected() {
        assert!(matches!(
            decode(b"HotplateWorld v9\n1 1 0 0\nText\n1:0\n"),
            Err(CodecError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn unknown_encoding_rejected() {
        assert!(matches!(
            decode(b"HotplateWorld v1\n1 1 0 0\nYaml\n"),
            Err(CodecError::UnknownEncoding { .. })
        ));
    }

    #[test]
    fn short_row_reports_line() {
        let input = b"HotplateWorld v1\n2 2 0.1 0\nText\n1:0 1:0\n1:0\n";
        match decode(input) {
            Err(CodecError::Malformed { line: 5, detail }) => {
                assert!(detail.contains("expected 2 cells"), "{detail}");
            }
            other => panic!("expected Malformed at line 5, got {other:?}"),
        }
    }

    #[test]
    fn truncated_text_reports_eof() {
        let input = b"HotplateWorld v1\n2 2 0.1 0\nText\n1:0 1:0\n";
        assert!(matches!(decode(input), Err(CodecError::Malformed { line: 5, .. })));
    }

    #[test]
    fn truncated_binary_is_io_error() {
        let world = random_world(4, 4, 0.1, 1);
        let mut bytes = encode(&world, WorldEncoding::Binary);
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(decode(&bytes), Err(CodecError::Io(_))));
    }

    #[test]
    fn oversized_header_with_short_binary_payload_fails_cleanly() {
        let input = b"HotplateWorld v1\n65535 65535 0.1 0\nBinary\n\0\0\0\0";
        assert!(matches!(decode(input), Err(CodecError::Io(_))));
    }

    #[test]
    fn oversized_header_with_short_text_payload_fails_cleanly() {
        let input = b"HotplateWorld v1\n65535 65535 0.1 0\nText\n";
        assert!(matches!(decode(input), Err(CodecError::Malformed { .. })));
    }

    #[test]
    fn invalid_world_is_surfaced() {
        // Open border cell.
        let input = b"HotplateWorld v1\n1 1 0.1 0\nText\n0:0.5\n";
        assert!(matches!(
            decode(input),
            Err(CodecError::InvalidWorld(WorldError::OpenBorder { x: 0, y: 0 }))
        ));
    }

    #[test]
    fn crlf_line_endings_accepted() {
        let input = b"HotplateWorld v1\r\n1 1 0.1 0\r\nText\r\n3:0.25\r\n";
        let world = decode(input).unwrap();
        assert_eq!(world.value(0, 0), Some(0.25));
    }
}
