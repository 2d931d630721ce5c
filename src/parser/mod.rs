//! `.rmd` decoder, the inverse of [`crate::writer::bin::save`].
//!
//! Decoding either yields a complete [`Document`] or an error; nothing
//! partially filled ever escapes, so the caller's current document is
//! only replaced on success.

use std::io::Read;

use crate::error::{RmdError, RmdResult};
use crate::model::{Document, Tile, TileFamily, TileMap, TileType};
use crate::processor::script_parser;
use crate::writer::bin::{MAGIC, VERSION};

fn read_u16<R: Read>(input: &mut R) -> RmdResult<u16> {
    let mut bytes = [0u8; 2];
    input.read_exact(&mut bytes)?;
    Ok(u16::from_le_bytes(bytes))
}

fn read_u32<R: Read>(input: &mut R) -> RmdResult<u32> {
    let mut bytes = [0u8; 4];
    input.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn decode_tile(layer: TileFamily, code: u8) -> RmdResult<TileType> {
    TileType::from_code(layer, code).ok_or(RmdError::UnknownTileCode { layer, code })
}

fn read_line<R: Read>(input: &mut R, index: u32) -> RmdResult<String> {
    let len = read_u32(input)? as u64;
    // read through `take` so a bogus length cannot force a huge allocation
    let mut bytes = Vec::new();
    input.take(len).read_to_end(&mut bytes)?;
    if bytes.len() as u64 != len {
        return Err(RmdError::CorruptFile(format!(
            "script line {index} truncated: expected {len} bytes, got {}",
            bytes.len()
        )));
    }
    String::from_utf8(bytes)
        .map_err(|_| RmdError::CorruptFile(format!("script line {index} is not valid UTF-8")))
}

/// Decode a whole document from `input`, which must hold nothing else.
pub fn load<R: Read>(input: &mut R) -> RmdResult<Document> {
    let mut magic = [0u8; 4];
    input.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(RmdError::CorruptFile(
            "invalid magic bytes - not a ray map file".to_string(),
        ));
    }

    let version = read_u16(input)?;
    if version != VERSION {
        return Err(RmdError::UnsupportedVersion(version));
    }

    let width = read_u16(input)?;
    let height = read_u16(input)?;

    let grid_len = width as u64 * height as u64 * 2;
    let mut cells = Vec::new();
    input.take(grid_len).read_to_end(&mut cells)?;
    if cells.len() as u64 != grid_len {
        return Err(RmdError::CorruptFile(format!(
            "tile grid truncated: expected {grid_len} bytes, got {}",
            cells.len()
        )));
    }

    let tiles = cells
        .chunks_exact(2)
        .map(|pair| -> RmdResult<Tile> {
            Ok(Tile {
                background: decode_tile(TileFamily::Background, pair[0])?,
                object: decode_tile(TileFamily::Object, pair[1])?,
            })
        })
        .collect::<RmdResult<Vec<Tile>>>()?;

    let count = read_u32(input)?;
    let mut scripts = Vec::with_capacity(count.min(1024) as usize);
    for index in 0..count {
        let raw = read_line(input, index)?;
        scripts.push(script_parser::parse(&raw));
    }

    let mut rest = [0u8; 1];
    if input.read(&mut rest)? != 0 {
        return Err(RmdError::CorruptFile(
            "trailing bytes after script section".to_string(),
        ));
    }

    log::debug!(
        "loaded {}x{} map with {} script lines",
        width,
        height,
        scripts.len()
    );

    Ok(Document {
        map: TileMap::from_cells(width, height, tiles),
        scripts,
    })
}

pub fn from_bytes(mut bytes: &[u8]) -> RmdResult<Document> {
    load(&mut bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::bin::to_bytes;

    fn sample() -> Document {
        let mut doc = Document::new(3, 2);
        doc.map.set_background(0, 0, TileType::Floor).unwrap();
        doc.map.set_background(2, 1, TileType::Ceiling).unwrap();
        doc.map.set_object(1, 1, TileType::Skeleton).unwrap();
        doc.set_scripts("setflag flag_a\n\n{broken\nmsg {ünïcödé ✓}\n");
        doc
    }

    #[test]
    fn test_round_trip() {
        let doc = sample();
        let loaded = from_bytes(&to_bytes(&doc).unwrap()).unwrap();
        assert_eq!(loaded, doc);
        assert!(!loaded.scripts[2].is_valid());
        assert_eq!(loaded.scripts[2].raw(), "{broken");
    }

    #[test]
    fn test_every_truncation_is_corrupt() {
        let bytes = to_bytes(&sample()).unwrap();
        for len in 0..bytes.len() {
            let res = from_bytes(&bytes[..len]);
            assert!(
                matches!(res, Err(RmdError::CorruptFile(_))),
                "prefix of {len} bytes: {res:?}"
            );
        }
    }

    #[test]
    fn test_huge_header_without_body_is_corrupt() {
        let test_cases = vec![(0xFFFFu16, 0xFFFFu16), (0xFFFF, 1), (1, 0xFFFF)];

        for (width, height) in test_cases {
            let mut bytes = MAGIC.to_vec();
            bytes.extend_from_slice(&VERSION.to_le_bytes());
            bytes.extend_from_slice(&width.to_le_bytes());
            bytes.extend_from_slice(&height.to_le_bytes());
            bytes.extend_from_slice(&[1, 0]);
            assert!(
                matches!(from_bytes(&bytes), Err(RmdError::CorruptFile(_))),
                "{width}x{height}"
            );
        }
    }

    #[test]
    fn test_trailing_bytes_are_corrupt() {
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes.push(0);
        assert!(matches!(from_bytes(&bytes), Err(RmdError::CorruptFile(_))));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(from_bytes(&bytes), Err(RmdError::CorruptFile(_))));
    }

    #[test]
    fn test_unsupported_version() {
        let test_cases = vec![0u16, 2, 0xFFFF];

        for version in test_cases {
            let mut bytes = to_bytes(&sample()).unwrap();
            bytes[4..6].copy_from_slice(&version.to_le_bytes());
            assert!(
                matches!(from_bytes(&bytes), Err(RmdError::UnsupportedVersion(v)) if v == version),
                "version {version}"
            );
        }
    }

    #[test]
    fn test_unknown_tile_codes() {
        // header is 10 bytes; first cell's background then object follow
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes[10] = 9;
        assert!(matches!(
            from_bytes(&bytes),
            Err(RmdError::UnknownTileCode {
                layer: TileFamily::Background,
                code: 9
            })
        ));

        let mut bytes = to_bytes(&sample()).unwrap();
        bytes[11] = 8;
        assert!(matches!(
            from_bytes(&bytes),
            Err(RmdError::UnknownTileCode {
                layer: TileFamily::Object,
                code: 8
            })
        ));
    }

    #[test]
    fn test_invalid_utf8_line() {
        let mut doc = Document::new(1, 1);
        doc.set_scripts("ab");
        let mut bytes = to_bytes(&doc).unwrap();
        let last = bytes.len() - 1;
        bytes[last] = 0xFF;
        assert!(matches!(from_bytes(&bytes), Err(RmdError::CorruptFile(_))));
    }

    #[test]
    fn test_huge_line_length_does_not_allocate() {
        let mut doc = Document::new(1, 1);
        doc.set_scripts("x");
        let mut bytes = to_bytes(&doc).unwrap();
        // length prefix of the only line sits right before its single byte
        let at = bytes.len() - 5;
        bytes[at..at + 4].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(from_bytes(&bytes), Err(RmdError::CorruptFile(_))));
    }

    #[test]
    fn test_empty_map() {
        let doc = Document::new(0, 0);
        assert_eq!(from_bytes(&to_bytes(&doc).unwrap()).unwrap(), doc);
    }
}
