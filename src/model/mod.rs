pub mod tile_map;
pub mod tiles;

use std::fmt;

use crate::error::RmdResult;
use crate::processor::ast::ScriptStatement;
use crate::processor::splitter;

pub use tile_map::TileMap;
pub use tiles::{Tile, TileFamily, TileType};

/// Everything a `.rmd` file holds: the grid plus its script lines.
///
/// Widgets are views over this; nothing else owns map state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub map: TileMap,
    pub scripts: Vec<ScriptStatement>,
}

impl Document {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            map: TileMap::new(width, height),
            scripts: Vec::new(),
        }
    }

    /// Replace the script list with the statements of a whole text buffer.
    pub fn set_scripts(&mut self, text: &str) {
        self.scripts = splitter::split(text);
    }

    /// Script list rendered back into editor text.
    pub fn script_text(&self) -> String {
        splitter::join(&self.scripts)
    }

    /// 1-based line numbers and statements that did not parse.
    pub fn invalid_scripts(&self) -> impl Iterator<Item = (usize, &ScriptStatement)> + '_ {
        self.scripts
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_valid())
            .map(|(i, s)| (i + 1, s))
    }

    pub fn cell_info(&self, x: i32, y: i32) -> RmdResult<CellInfo> {
        let tile = self.map.get(x, y)?;
        let object_id = self.map.object_id(x, y)?;
        Ok(CellInfo {
            x,
            y,
            tile,
            object_id,
        })
    }
}

/// What the metadata pane shows for the selected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    pub x: i32,
    pub y: i32,
    pub tile: Tile,
    /// Row-major ordinal among object-bearing cells.
    pub object_id: Option<usize>,
}

impl fmt::Display for CellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{{}.{}}}", self.x, self.y)?;
        writeln!(f, "BG: {}", self.tile.background)?;
        write!(f, "OBJ: {}", self.tile.object)?;
        if let Some(id) = self.object_id {
            write!(f, "\nID: {id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_info() {
        let mut doc = Document::new(4, 4);
        doc.map.set_background(2, 3, TileType::Floor).unwrap();
        doc.map.set_object(2, 3, TileType::StartPoint).unwrap();

        let info = doc.cell_info(2, 3).unwrap();
        assert_eq!(info.to_string(), "{2.3}\nBG: floor\nOBJ: start\nID: 0");
        assert!(doc.cell_info(4, 0).is_err());

        doc.map.set_object(3, 1, TileType::Golem).unwrap();
        let test_cases = vec![
            ((3, 1), "{3.1}\nBG: empty\nOBJ: golem\nID: 0"),
            ((2, 3), "{2.3}\nBG: floor\nOBJ: start\nID: 1"),
            ((0, 0), "{0.0}\nBG: empty\nOBJ: empty"),
        ];

        for ((x, y), expected) in test_cases {
            assert_eq!(doc.cell_info(x, y).unwrap().to_string(), expected);
        }
    }

    #[test]
    fn test_set_scripts_reports_invalid_lines() {
        let mut doc = Document::new(1, 1);
        doc.set_scripts("msg {hi}\nnonsense here\n\nsetflag flag_a\n");

        assert_eq!(doc.scripts.len(), 4);
        let invalid: Vec<_> = doc.invalid_scripts().map(|(n, _)| n).collect();
        assert_eq!(invalid, vec![2]);
        assert_eq!(
            doc.script_text(),
            "msg {hi}\nnonsense here\n\nsetflag flag_a\n"
        );
    }
}
