//! `.rmd` encoder.
//!
//! Layout (little-endian):
//!
//! ```text
//! magic    b"RMD\0"
//! version  u16
//! width    u16
//! height   u16
//! cells    width*height × (bg code u8, obj code u8), row-major
//! count    u32
//! lines    count × (len u32, UTF-8 bytes)
//! ```

use std::io::Write;

use crate::error::{RmdError, RmdResult};
use crate::model::{Document, TileFamily, TileType};

pub const MAGIC: &[u8; 4] = b"RMD\0";
pub const VERSION: u16 = 1;

fn tile_code(tile: TileType, layer: TileFamily) -> RmdResult<u8> {
    // the map never stores Delete, so a missing code means a broken invariant
    tile.code().ok_or(RmdError::WrongLayer { tile, layer })
}

/// Encode `doc` into `out`.
///
/// Everything is checked before the first byte is written, so a rejected
/// document leaves the sink untouched.
pub fn save<W: Write>(doc: &Document, out: &mut W) -> RmdResult<()> {
    let map = &doc.map;
    // maps are only ever built from u16 dimensions
    let (width, height) = (map.width() as u16, map.height() as u16);
    let count = u32::try_from(doc.scripts.len())
        .map_err(|_| RmdError::CorruptFile("too many script lines".to_string()))?;

    let mut buf = Vec::with_capacity(10 + map.width() * map.height() * 2);
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());

    for (_, tile) in map.iter() {
        buf.push(tile_code(tile.background, TileFamily::Background)?);
        buf.push(tile_code(tile.object, TileFamily::Object)?);
    }

    buf.extend_from_slice(&count.to_le_bytes());
    for script in &doc.scripts {
        let raw = script.raw().as_bytes();
        let len = u32::try_from(raw.len())
            .map_err(|_| RmdError::CorruptFile("script line too long".to_string()))?;
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(raw);
    }

    out.write_all(&buf)?;
    out.flush()?;

    log::debug!(
        "saved {}x{} map with {} script lines ({} bytes)",
        width,
        height,
        count,
        buf.len()
    );
    Ok(())
}

pub fn to_bytes(doc: &Document) -> RmdResult<Vec<u8>> {
    let mut out = Vec::new();
    save(doc, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_layout() {
        let mut doc = Document::new(2, 1);
        doc.map.set_background(0, 0, TileType::Wall).unwrap();
        doc.map.set_object(1, 0, TileType::Gun).unwrap();
        doc.set_scripts("msg {a}\n");

        let bytes = to_bytes(&doc).unwrap();
        assert_eq!(
            bytes,
            vec![
                b'R', b'M', b'D', 0, // magic
                1, 0, // version
                2, 0, // width
                1, 0, // height
                2, 0, // (0,0) wall / empty
                0, 7, // (1,0) empty / gun
                1, 0, 0, 0, // one line
                7, 0, 0, 0, b'm', b's', b'g', b' ', b'{', b'a', b'}',
            ]
        );
    }

    #[test]
    fn test_raw_text_is_saved_not_canonical() {
        let mut doc = Document::new(1, 1);
        doc.set_scripts("  clear   0,0");
        let bytes = to_bytes(&doc).unwrap();
        assert!(bytes.ends_with(b"  clear   0,0"));
    }

    #[test]
    fn test_widest_map_header() {
        let doc = Document::new(u16::MAX, 1);
        let bytes = to_bytes(&doc).unwrap();
        assert_eq!(&bytes[6..10], &[0xFF, 0xFF, 1, 0]);
        assert_eq!(bytes.len(), 10 + u16::MAX as usize * 2 + 4);
    }
}
