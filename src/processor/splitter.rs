//! Whole-buffer side of the script engine.
//!
//! Line rule: lines end at `\n` (a `\r` right before it belongs to the
//! terminator) and a final terminator does not open another line.
//! `"a\nb\n"` is two lines, `"a\n\nb"` three, `"\n"` one empty line and
//! `""` none. This is `str::lines`.

use super::ast::ScriptStatement;
use super::script_parser;

/// One statement per source line, in order, each parsed on its own.
pub fn split(text: &str) -> Vec<ScriptStatement> {
    let statements: Vec<ScriptStatement> = text.lines().map(script_parser::parse).collect();

    let invalid = statements.iter().filter(|s| !s.is_valid()).count();
    log::trace!(
        "split {} script lines, {} invalid",
        statements.len(),
        invalid
    );

    statements
}

/// Render statements back into editor text, one terminated line each.
pub fn join(statements: &[ScriptStatement]) -> String {
    let mut text = String::new();
    for statement in statements {
        text.push_str(&statement.to_string());
        text.push('\n');
    }
    text
}
