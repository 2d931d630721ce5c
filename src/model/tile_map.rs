//! Fixed-size grid of tiles.
//!
//! Cells are stored row-major (`y * width + x`) and every full traversal
//! walks them in that same order, so the codec writes and reads cells
//! identically.

use crate::error::{RmdError, RmdResult};
use crate::model::tiles::{Tile, TileFamily, TileType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// A blank `width × height` map. Dimensions are `u16`, as on disk.
    pub fn new(width: u16, height: u16) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            tiles: vec![Tile::BLANK; width * height],
        }
    }

    /// Build a map from cells already in row-major order.
    pub(crate) fn from_cells(width: u16, height: u16, tiles: Vec<Tile>) -> Self {
        let (width, height) = (width as usize, height as usize);
        debug_assert_eq!(tiles.len(), width * height);
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> RmdResult<usize> {
        if !self.in_bounds(x, y) {
            return Err(RmdError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> RmdResult<Tile> {
        let i = self.index(x, y)?;
        Ok(self.tiles[i])
    }

    /// Overwrite the background slot only.
    pub fn set_background(&mut self, x: i32, y: i32, tile: TileType) -> RmdResult<()> {
        if !tile.fits_background() {
            return Err(RmdError::WrongLayer {
                tile,
                layer: TileFamily::Background,
            });
        }
        let i = self.index(x, y)?;
        self.tiles[i].background = tile;
        Ok(())
    }

    /// Overwrite the object slot. `Delete` wipes both slots instead.
    pub fn set_object(&mut self, x: i32, y: i32, tile: TileType) -> RmdResult<()> {
        if tile != TileType::Delete && !tile.fits_object() {
            return Err(RmdError::WrongLayer {
                tile,
                layer: TileFamily::Object,
            });
        }
        let i = self.index(x, y)?;
        if tile == TileType::Delete {
            self.tiles[i] = Tile::BLANK;
        } else {
            self.tiles[i].object = tile;
        }
        Ok(())
    }

    /// Paint whatever the palette has selected, routing by family.
    /// `Empty` clears the object slot, like picking the empty object slot.
    pub fn paint(&mut self, x: i32, y: i32, tile: TileType) -> RmdResult<()> {
        match tile.family() {
            TileFamily::Background => self.set_background(x, y, tile),
            TileFamily::Object | TileFamily::Empty => self.set_object(x, y, tile),
        }
    }

    /// All cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Tile)> + '_ {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| ((i % width, i / width), *t))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.width.max(1))
    }

    /// Ordinal of the object at `(x, y)` among all object-bearing cells,
    /// counted row-major from 0. `None` when the cell has no object.
    pub fn object_id(&self, x: i32, y: i32) -> RmdResult<Option<usize>> {
        let i = self.index(x, y)?;
        if self.tiles[i].object == TileType::Empty {
            return Ok(None);
        }
        let before = self.tiles[..i]
            .iter()
            .filter(|t| t.object != TileType::Empty)
            .count();
        Ok(Some(before))
    }

    /// Cells carrying `tile` in either slot.
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.background == tile || t.object == tile)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out_of_bounds(res: RmdResult<impl std::fmt::Debug>) -> bool {
        matches!(res, Err(RmdError::OutOfBounds { .. }))
    }

    #[test]
    fn test_new_map_is_blank() {
        let map = TileMap::new(3, 2);
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert!(map.iter().all(|(_, t)| t.is_blank()));
        assert_eq!(map.iter().count(), 6);
    }

    #[test]
    fn test_bounds() {
        let mut map = TileMap::new(4, 3);
        let test_cases = vec![(4, 0), (0, 3), (-1, 0), (0, -1), (4, 3), (i32::MIN, 0)];

        for (x, y) in test_cases {
            assert!(out_of_bounds(map.get(x, y)), "get ({x}, {y})");
            assert!(
                out_of_bounds(map.set_background(x, y, TileType::Wall)),
                "set_background ({x}, {y})"
            );
            assert!(
                out_of_bounds(map.set_object(x, y, TileType::Dragon)),
                "set_object ({x}, {y})"
            );
        }

        assert!(map.get(3, 2).is_ok());
    }

    #[test]
    fn test_layers_are_independent() {
        let mut map = TileMap::new(2, 2);
        map.set_background(1, 1, TileType::Floor).unwrap();
        map.set_object(1, 1, TileType::Knight).unwrap();
        assert_eq!(map.get(1, 1).unwrap(), Tile::new(TileType::Floor, TileType::Knight));

        map.set_background(1, 1, TileType::Door).unwrap();
        assert_eq!(map.get(1, 1).unwrap().object, TileType::Knight);

        map.set_object(1, 1, TileType::Empty).unwrap();
        assert_eq!(map.get(1, 1).unwrap(), Tile::new(TileType::Door, TileType::Empty));
    }

    #[test]
    fn test_delete_clears_whole_cell() {
        let priors = vec![
            Tile::new(TileType::Wall, TileType::Gun),
            Tile::new(TileType::Empty, TileType::Obelisk),
            Tile::new(TileType::Ceiling, TileType::Empty),
            Tile::BLANK,
        ];

        for prior in priors {
            let mut map = TileMap::new(1, 1);
            map.set_background(0, 0, prior.background).unwrap();
            map.set_object(0, 0, prior.object).unwrap();
            map.set_object(0, 0, TileType::Delete).unwrap();
            assert_eq!(map.get(0, 0).unwrap(), Tile::BLANK, "prior {prior:?}");
        }
    }

    #[test]
    fn test_wrong_layer_is_rejected() {
        let mut map = TileMap::new(1, 1);
        assert!(matches!(
            map.set_background(0, 0, TileType::Dragon),
            Err(RmdError::WrongLayer { .. })
        ));
        assert!(matches!(
            map.set_background(0, 0, TileType::Delete),
            Err(RmdError::WrongLayer { .. })
        ));
        assert!(matches!(
            map.set_object(0, 0, TileType::Floor),
            Err(RmdError::WrongLayer { .. })
        ));
        assert!(map.get(0, 0).unwrap().is_blank());
    }

    #[test]
    fn test_paint_routes_by_family() {
        let mut map = TileMap::new(1, 1);
        map.paint(0, 0, TileType::Wall).unwrap();
        map.paint(0, 0, TileType::Golem).unwrap();
        assert_eq!(map.get(0, 0).unwrap(), Tile::new(TileType::Wall, TileType::Golem));

        map.paint(0, 0, TileType::Empty).unwrap();
        assert_eq!(map.get(0, 0).unwrap(), Tile::new(TileType::Wall, TileType::Empty));

        map.paint(0, 0, TileType::Delete).unwrap();
        assert!(map.get(0, 0).unwrap().is_blank());
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut map = TileMap::new(3, 2);
        map.set_background(2, 0, TileType::Wall).unwrap();
        map.set_background(0, 1, TileType::Door).unwrap();

        let coords: Vec<_> = map.iter().map(|(c, _)| c).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);

        let cells: Vec<_> = map.iter().map(|(_, t)| t.background).collect();
        assert_eq!(cells[2], TileType::Wall);
        assert_eq!(cells[3], TileType::Door);
    }

    #[test]
    fn test_full_width_dimensions() {
        let map = TileMap::new(u16::MAX, 1);
        assert_eq!(map.width(), u16::MAX as usize);
        assert_eq!(map.iter().count(), u16::MAX as usize);
        assert!(map.in_bounds(u16::MAX as i32 - 1, 0));
        assert!(!map.in_bounds(u16::MAX as i32, 0));

        let map = TileMap::new(0, u16::MAX);
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_object_id_is_row_major_ordinal() {
        let mut map = TileMap::new(3, 2);
        map.set_object(2, 0, TileType::Dragon).unwrap();
        map.set_object(0, 1, TileType::Gun).unwrap();
        map.set_object(2, 1, TileType::StartPoint).unwrap();
        map.set_background(1, 1, TileType::Floor).unwrap();

        let test_cases = vec![
            ((2, 0), Some(0)),
            ((0, 1), Some(1)),
            ((2, 1), Some(2)),
            ((0, 0), None),
            ((1, 1), None),
        ];

        for ((x, y), expected) in test_cases {
            assert_eq!(map.object_id(x, y).unwrap(), expected, "({x}, {y})");
        }
        assert!(out_of_bounds(map.object_id(3, 0)));

        map.set_object(2, 0, TileType::Delete).unwrap();
        assert_eq!(map.object_id(2, 1).unwrap(), Some(1));
    }

    #[test]
    fn test_count() {
        let mut map = TileMap::new(2, 2);
        map.set_background(0, 0, TileType::Floor).unwrap();
        map.set_background(1, 0, TileType::Floor).unwrap();
        map.set_object(1, 0, TileType::Dragon).unwrap();
        assert_eq!(map.count(TileType::Floor), 2);
        assert_eq!(map.count(TileType::Dragon), 1);
        assert_eq!(map.count(TileType::Wall), 0);
    }
}
