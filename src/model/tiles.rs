//! Tile kinds and the static tables hanging off them.
//!
//! Every per-kind property (family, save code, script name, texture,
//! glyph) is a `match` on the tag. The set of kinds is closed, so
//! adding one means touching every table below; the compiler will
//! point at each of them.

use std::fmt;

/// Which layer of a cell a kind may be painted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileFamily {
    /// Only [`TileType::Empty`]; valid on either layer.
    Empty,
    Background,
    Object,
}

impl fmt::Display for TileFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TileFamily::Empty => "empty",
            TileFamily::Background => "background",
            TileFamily::Object => "object",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileType {
    #[default]
    Empty,

    // background family
    Floor,
    Wall,
    Ceiling,
    Door,

    // object family
    Dragon,
    Skeleton,
    Knight,
    Golem,
    Obelisk,
    StartPoint,
    Gun,
    /// Eraser. Never stored in a cell; painting it clears the whole cell.
    Delete,
}

/// Background column of the palette, top to bottom.
pub const BACKGROUND_PALETTE: [TileType; 5] = [
    TileType::Empty,
    TileType::Floor,
    TileType::Wall,
    TileType::Ceiling,
    TileType::Door,
];

/// Object column of the palette, top to bottom.
pub const OBJECT_PALETTE: [TileType; 9] = [
    TileType::Empty,
    TileType::Dragon,
    TileType::Skeleton,
    TileType::Knight,
    TileType::Golem,
    TileType::Obelisk,
    TileType::StartPoint,
    TileType::Gun,
    TileType::Delete,
];

/// Palette slot lookup: column 0 holds backgrounds, column 1 objects.
pub fn palette_at(column: usize, row: usize) -> Option<TileType> {
    match column {
        0 => BACKGROUND_PALETTE.get(row).copied(),
        1 => OBJECT_PALETTE.get(row).copied(),
        _ => None,
    }
}

impl TileType {
    pub const ALL: [TileType; 13] = [
        TileType::Empty,
        TileType::Floor,
        TileType::Wall,
        TileType::Ceiling,
        TileType::Door,
        TileType::Dragon,
        TileType::Skeleton,
        TileType::Knight,
        TileType::Golem,
        TileType::Obelisk,
        TileType::StartPoint,
        TileType::Gun,
        TileType::Delete,
    ];

    pub fn family(self) -> TileFamily {
        match self {
            TileType::Empty => TileFamily::Empty,
            TileType::Floor | TileType::Wall | TileType::Ceiling | TileType::Door => {
                TileFamily::Background
            }
            TileType::Dragon
            | TileType::Skeleton
            | TileType::Knight
            | TileType::Golem
            | TileType::Obelisk
            | TileType::StartPoint
            | TileType::Gun
            | TileType::Delete => TileFamily::Object,
        }
    }

    /// True for kinds that may sit in the background slot.
    pub fn fits_background(self) -> bool {
        matches!(self.family(), TileFamily::Empty | TileFamily::Background)
    }

    /// True for kinds that may sit in the object slot (`Delete` excluded).
    pub fn fits_object(self) -> bool {
        self != TileType::Delete
            && matches!(self.family(), TileFamily::Empty | TileFamily::Object)
    }

    /// Save code inside the kind's family table. `Empty` is 0 in both
    /// tables; `Delete` has no code because it is never stored.
    pub fn code(self) -> Option<u8> {
        let code = match self {
            TileType::Empty => 0,
            TileType::Floor => 1,
            TileType::Wall => 2,
            TileType::Ceiling => 3,
            TileType::Door => 4,
            TileType::Dragon => 1,
            TileType::Skeleton => 2,
            TileType::Knight => 3,
            TileType::Golem => 4,
            TileType::Obelisk => 5,
            TileType::StartPoint => 6,
            TileType::Gun => 7,
            TileType::Delete => return None,
        };
        Some(code)
    }

    /// Inverse of [`TileType::code`] for one family's table.
    pub fn from_code(layer: TileFamily, code: u8) -> Option<TileType> {
        if code == 0 {
            return Some(TileType::Empty);
        }
        let tile = match (layer, code) {
            (TileFamily::Background, 1) => TileType::Floor,
            (TileFamily::Background, 2) => TileType::Wall,
            (TileFamily::Background, 3) => TileType::Ceiling,
            (TileFamily::Background, 4) => TileType::Door,
            (TileFamily::Object, 1) => TileType::Dragon,
            (TileFamily::Object, 2) => TileType::Skeleton,
            (TileFamily::Object, 3) => TileType::Knight,
            (TileFamily::Object, 4) => TileType::Golem,
            (TileFamily::Object, 5) => TileType::Obelisk,
            (TileFamily::Object, 6) => TileType::StartPoint,
            (TileFamily::Object, 7) => TileType::Gun,
            _ => return None,
        };
        Some(tile)
    }

    /// Name used by the script language and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            TileType::Empty => "empty",
            TileType::Floor => "floor",
            TileType::Wall => "wall",
            TileType::Ceiling => "ceiling",
            TileType::Door => "door",
            TileType::Dragon => "dragon",
            TileType::Skeleton => "skeleton",
            TileType::Knight => "knight",
            TileType::Golem => "golem",
            TileType::Obelisk => "obelisk",
            TileType::StartPoint => "start",
            TileType::Gun => "gun",
            TileType::Delete => "delete",
        }
    }

    pub fn from_name(name: &str) -> Option<TileType> {
        TileType::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Texture file, relative to the editor's image directory.
    pub fn texture(self) -> Option<&'static str> {
        let file = match self {
            TileType::Empty => return None,
            TileType::Floor => "floor.png",
            TileType::Wall => "wall.png",
            TileType::Ceiling => "ceiling.png",
            TileType::Door => "door.png",
            TileType::Dragon => "dragon.png",
            TileType::Skeleton => "skeleton.png",
            TileType::Knight => "knight.png",
            TileType::Golem => "golem.png",
            TileType::Obelisk => "obelisk.png",
            TileType::StartPoint => "start.png",
            TileType::Gun => "item.png",
            TileType::Delete => "delete.png",
        };
        Some(file)
    }

    /// One-character rendering for text dumps of the grid.
    pub fn glyph(self) -> char {
        match self {
            TileType::Empty => '.',
            TileType::Floor => '_',
            TileType::Wall => '#',
            TileType::Ceiling => '^',
            TileType::Door => '+',
            TileType::Dragon => 'D',
            TileType::Skeleton => 'S',
            TileType::Knight => 'K',
            TileType::Golem => 'G',
            TileType::Obelisk => 'O',
            TileType::StartPoint => '@',
            TileType::Gun => '!',
            TileType::Delete => 'x',
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One grid cell: a background layer with an optional object on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub background: TileType,
    pub object: TileType,
}

impl Tile {
    pub const BLANK: Tile = Tile {
        background: TileType::Empty,
        object: TileType::Empty,
    };

    pub fn new(background: TileType, object: TileType) -> Self {
        Self { background, object }
    }

    pub fn is_blank(&self) -> bool {
        *self == Tile::BLANK
    }

    /// Object glyph if one is painted, otherwise the background glyph.
    pub fn glyph(&self) -> char {
        if self.object != TileType::Empty {
            self.object.glyph()
        } else {
            self.background.glyph()
        }
    }
}
