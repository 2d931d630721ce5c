//! The script engine.
//!
//! `script_parser::parse` is a pure function over one line and
//! `splitter::split` maps it over a whole text buffer.
pub mod ast;
pub mod lexer;
pub mod script_parser;
pub mod splitter;

pub use ast::{Cmd, ScriptStatement, StatementKind};
pub use script_parser::parse;
pub use splitter::{join, split};
