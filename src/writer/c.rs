//! Emit a C header with the map baked in, for the game runtime.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::{Document, TileFamily, TileType};
use crate::processor::StatementKind;

/// Turn a file stem into a usable C identifier.
pub fn c_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    // octal escapes cannot swallow following digits the way \x can
                    let _ = write!(out, "\\{b:03o}");
                }
            }
        }
    }
    out.push('"');
    out
}

fn code_enum(h: &mut String, prefix: &str, layer: TileFamily) {
    let _ = writeln!(h, "enum {{");
    for tile in TileType::ALL {
        let fits = tile.family() == layer || tile == TileType::Empty;
        if let (true, Some(code)) = (fits, tile.code()) {
            let _ = writeln!(
                h,
                "    {prefix}_{} = {code},",
                tile.name().to_ascii_uppercase()
            );
        }
    }
    let _ = writeln!(h, "}};\n");
}

fn byte_array(h: &mut String, name: &str, codes: impl Iterator<Item = u8>, width: usize) {
    let _ = writeln!(h, "static const uint8_t {name}[] = {{");
    let codes: Vec<u8> = codes.collect();
    for row in codes.chunks(width.max(1)) {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        let _ = writeln!(h, "    {},", cells.join(", "));
    }
    let _ = writeln!(h, "}};\n");
}

/// Header text for `doc`, with every symbol prefixed by `name`.
pub fn render(doc: &Document, name: &str) -> String {
    let n = c_ident(name);
    let map = &doc.map;
    let mut h = String::new();

    let _ = writeln!(h, "#pragma once");
    let _ = writeln!(h, "#include <stdint.h>");
    let _ = writeln!(h, "// Auto-generated by rme – DO NOT EDIT\n");

    // shared by every exported map, so guard them across headers
    let _ = writeln!(h, "#ifndef RMD_TILE_CODES");
    let _ = writeln!(h, "#define RMD_TILE_CODES\n");
    code_enum(&mut h, "RMD_BG", TileFamily::Background);
    code_enum(&mut h, "RMD_OBJ", TileFamily::Object);
    let _ = writeln!(h, "#endif // RMD_TILE_CODES\n");

    let upper = n.to_ascii_uppercase();
    let _ = writeln!(h, "#define {upper}_WIDTH {}", map.width());
    let _ = writeln!(h, "#define {upper}_HEIGHT {}\n", map.height());

    // map cells never hold Delete, so every slot has a code
    byte_array(
        &mut h,
        &format!("{n}_bg"),
        map.iter().map(|(_, t)| t.background.code().unwrap_or(0)),
        map.width(),
    );
    byte_array(
        &mut h,
        &format!("{n}_obj"),
        map.iter().map(|(_, t)| t.object.code().unwrap_or(0)),
        map.width(),
    );

    // only statements the game can run: no blanks, comments or invalid lines
    let commands: Vec<String> = doc
        .scripts
        .iter()
        .filter(|s| matches!(s.kind(), StatementKind::Command(_)))
        .map(|s| c_string(&s.to_string()))
        .collect();

    let _ = writeln!(h, "#define {upper}_SCRIPT_COUNT {}", commands.len());
    let _ = writeln!(h, "static const char *{n}_scripts[] = {{");
    for cmd in &commands {
        let _ = writeln!(h, "    {cmd},");
    }
    let _ = writeln!(h, "    0,");
    let _ = writeln!(h, "}};");

    h
}

/// Write `<name>_map.h` into `out_dir` and return its path.
pub fn emit(doc: &Document, name: &str, out_dir: &Path) -> io::Result<PathBuf> {
    let path = out_dir.join(format!("{}_map.h", c_ident(name)));
    fs::write(&path, render(doc, name))?;
    Ok(path)
}
