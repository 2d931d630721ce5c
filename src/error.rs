//! Errors shared by the grid and the `.rmd` codec.
//!
//! Script lines never produce one of these: an unparsable line is data
//! (see [`crate::processor::ast::ScriptStatement`]), not a failure.

use crate::model::tiles::{TileFamily, TileType};

#[derive(Debug)]
pub enum RmdError {
    /// Grid access outside `[0, width) × [0, height)`.
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// A tile kind painted into a slot of the other family.
    WrongLayer { tile: TileType, layer: TileFamily },
    /// Truncated or malformed byte stream.
    CorruptFile(String),
    /// A tile code this build does not know for that family.
    UnknownTileCode { layer: TileFamily, code: u8 },
    UnsupportedVersion(u16),
    Io(std::io::Error),
}

impl std::fmt::Display for RmdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RmdError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "cell ({x}, {y}) is outside the {width}x{height} map"),
            RmdError::WrongLayer { tile, layer } => {
                write!(f, "tile `{}` cannot be painted on the {layer} layer", tile.name())
            }
            RmdError::CorruptFile(msg) => write!(f, "corrupt map file: {msg}"),
            RmdError::UnknownTileCode { layer, code } => {
                write!(f, "unknown {layer} tile code {code}")
            }
            RmdError::UnsupportedVersion(v) => write!(f, "unsupported map format version {v}"),
            RmdError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for RmdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RmdError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RmdError {
    fn from(e: std::io::Error) -> Self {
        // read_exact reports a short stream as UnexpectedEof
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            RmdError::CorruptFile("unexpected end of file".to_string())
        } else {
            RmdError::Io(e)
        }
    }
}

pub type RmdResult<T> = Result<T, RmdError>;
