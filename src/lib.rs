pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, anyhow, bail};
use clap::Parser;
use serde::Serialize;

use cli::Command;
use config::EditorConfig;
use model::{Document, TileType};

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let config = EditorConfig::load(args.config.as_deref())?;
    let level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let _logger = logging::init_logger(level)
        .with_context(|| format!("Starting logger with `{level}`"))?;

    execute(args.command, &config)
}

/// Read and decode a whole `.rmd` file.
pub fn read_document(path: &Path) -> anyhow::Result<Document> {
    let bytes = std::fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
    parser::from_bytes(&bytes).with_context(|| format!("Decoding {}", path.display()))
}

/// Encode first, then write: a document that fails to encode never
/// truncates the file on disk.
pub fn write_document(path: &Path, doc: &Document) -> anyhow::Result<()> {
    let bytes = writer::to_bytes(doc).with_context(|| format!("Encoding {}", path.display()))?;
    std::fs::write(path, bytes).with_context(|| format!("Writing {}", path.display()))
}

pub fn execute(command: Command, config: &EditorConfig) -> anyhow::Result<()> {
    match command {
        Command::New {
            file,
            width,
            height,
        } => {
            let width = width.unwrap_or(config.default_width);
            let height = height.unwrap_or(config.default_height);
            let doc = Document::new(width, height);
            write_document(&file, &doc)?;
            log::info!("created {}x{} map {}", width, height, file.display());
        }
        Command::Info { file, json } => {
            let doc = read_document(&file)?;
            let summary = Summary::of(&doc);
            if json {
                let text = serde_json::to_string_pretty(&summary)
                    .with_context(|| "Serialising summary")?;
                println!("{text}");
            } else {
                print!("{}", summary.render(&doc));
            }
        }
        Command::Paint { file, x, y, tile } => {
            let kind = TileType::from_name(&tile).ok_or_else(|| anyhow!("unknown tile `{tile}`"))?;
            let mut doc = read_document(&file)?;
            doc.map
                .paint(x, y, kind)
                .with_context(|| format!("Painting `{tile}` at ({x}, {y})"))?;
            write_document(&file, &doc)?;
            println!("{}", doc.cell_info(x, y)?);
        }
        Command::Cell { file, x, y } => {
            let doc = read_document(&file)?;
            println!("{}", doc.cell_info(x, y)?);
        }
        Command::Scripts { file, text } => {
            let source = std::fs::read_to_string(&text)
                .with_context(|| format!("Reading {}", text.display()))?;
            let mut doc = read_document(&file)?;
            doc.set_scripts(&source);
            write_document(&file, &doc)?;

            let invalid = doc.invalid_scripts().count();
            println!("{} script lines, {} invalid", doc.scripts.len(), invalid);
            if invalid > 0 {
                log::warn!("{} saved with {} invalid script lines", file.display(), invalid);
            }
        }
        Command::Check { file } => {
            let doc = read_document(&file)?;
            for (i, script) in doc.scripts.iter().enumerate() {
                match script.reason() {
                    None => println!("{:>4} ok  | {}", i + 1, script.raw()),
                    Some(reason) => println!("{:>4} ERR | {}  <- {}", i + 1, script.raw(), reason),
                }
            }
            let invalid = doc.invalid_scripts().count();
            if invalid > 0 {
                bail!(
                    "{} of {} script lines are invalid",
                    invalid,
                    doc.scripts.len()
                );
            }
        }
        Command::Export { file, out_dir } => {
            let doc = read_document(&file)?;
            let name = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("map")
                .to_string();
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("Creating {}", out_dir.display()))?;
            let path = writer::c::emit(&doc, &name, &out_dir)
                .with_context(|| "Writing C artifacts")?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
pub struct InvalidLine {
    pub line: usize,
    pub text: String,
    pub reason: String,
}

/// What `info` reports about a document.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub width: usize,
    pub height: usize,
    /// Cells per painted kind; kinds not on the map are left out.
    pub tiles: BTreeMap<&'static str, usize>,
    pub scripts: usize,
    pub invalid_scripts: Vec<InvalidLine>,
}

impl Summary {
    pub fn of(doc: &Document) -> Self {
        let tiles = TileType::ALL
            .iter()
            .filter(|t| **t != TileType::Empty)
            .map(|t| (t.name(), doc.map.count(*t)))
            .filter(|(_, n)| *n > 0)
            .collect();

        let invalid_scripts = doc
            .invalid_scripts()
            .map(|(line, s)| InvalidLine {
                line,
                text: s.raw().to_string(),
                reason: s.reason().unwrap_or_default().to_string(),
            })
            .collect();

        Self {
            width: doc.map.width(),
            height: doc.map.height(),
            tiles,
            scripts: doc.scripts.len(),
            invalid_scripts,
        }
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut out = format!("map {}x{}\n", self.width, self.height);
        for (name, count) in &self.tiles {
            out.push_str(&format!("  {name:<10}{count}\n"));
        }
        out.push('\n');
        if self.width > 0 {
            for row in doc.map.rows() {
                out.extend(row.iter().map(|t| t.glyph()));
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "{} script lines, {} invalid\n",
            self.scripts,
            self.invalid_scripts.len()
        ));
        for bad in &self.invalid_scripts {
            out.push_str(&format!("  line {}: {} ({})\n", bad.line, bad.text, bad.reason));
        }
        out
    }
}
