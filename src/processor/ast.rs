//! Typed form of one script line.
//!
//! `Display` on these types is the canonical rendering: single spaces,
//! coordinates as `x,y`, text literals in braces. Parsing a canonical
//! rendering gives back the same command.

use std::fmt;

use crate::model::tiles::TileType;

/// A map cell named by a script, `x,y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    FlagSet(String),   // `flag_X`
    FlagClear(String), // `!flag_X`
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::FlagSet(flag) => f.write_str(flag),
            Condition::FlagClear(flag) => write!(f, "!{flag}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// `spawn <object> at x,y`
    Spawn { object: TileType, at: Cell },

    /// `paint <background> at x,y`
    Paint { background: TileType, at: Cell },

    /// `clear x,y` – wipe both layers of a cell.
    Clear { at: Cell },

    /// `tp x1,y1 x2,y2` – teleport the player.
    Tp { from: Cell, to: Cell },

    /// `msg {text}`
    Msg { text: String },

    /// `setflag flag_X`
    SetFlag { flag: String },

    /// `unsetflag flag_X`
    UnsetFlag { flag: String },

    /// `on enter x,y <action>` – run `action` when the player steps on `at`.
    OnEnter { at: Cell, action: Box<Cmd> },

    /// `if [!]flag_X <action>`
    If { condition: Condition, action: Box<Cmd> },
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cmd::Spawn { object, at } => write!(f, "spawn {object} at {at}"),
            Cmd::Paint { background, at } => write!(f, "paint {background} at {at}"),
            Cmd::Clear { at } => write!(f, "clear {at}"),
            Cmd::Tp { from, to } => write!(f, "tp {from} {to}"),
            Cmd::Msg { text } => write!(f, "msg {{{text}}}"),
            Cmd::SetFlag { flag } => write!(f, "setflag {flag}"),
            Cmd::UnsetFlag { flag } => write!(f, "unsetflag {flag}"),
            Cmd::OnEnter { at, action } => write!(f, "on enter {at} {action}"),
            Cmd::If { condition, action } => write!(f, "if {condition} {action}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// Empty or whitespace-only line.
    Blank,
    /// `# ...`, stored trimmed.
    Comment(String),
    Command(Cmd),
    /// Anything the parser could not understand, with the reason.
    Invalid { reason: String },
}

/// One line of the map's script block.
///
/// The raw text is kept untouched whatever the outcome of the parse, so
/// saving never loses what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStatement {
    pub(crate) raw: String,
    pub(crate) kind: StatementKind,
}

impl ScriptStatement {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &StatementKind {
        &self.kind
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.kind, StatementKind::Invalid { .. })
    }

    pub fn command(&self) -> Option<&Cmd> {
        match &self.kind {
            StatementKind::Command(cmd) => Some(cmd),
            _ => None,
        }
    }

    /// Why the line is invalid, if it is.
    pub fn reason(&self) -> Option<&str> {
        match &self.kind {
            StatementKind::Invalid { reason } => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for ScriptStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatementKind::Blank => Ok(()),
            StatementKind::Comment(text) => f.write_str(text),
            StatementKind::Command(cmd) => write!(f, "{cmd}"),
            StatementKind::Invalid { .. } => f.write_str(&self.raw),
        }
    }
}
