use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ray Map Editor command line")]
pub struct Cli {
    /// Editor config (.toml); built-in defaults when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log at debug level regardless of the config
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty .rmd map
    New {
        file: PathBuf,
        #[arg(long)]
        width: Option<u16>,
        #[arg(long)]
        height: Option<u16>,
    },
    /// Summarise a map: size, tile counts, script health, grid preview
    Info {
        file: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Paint one cell with a tile (`delete` clears it) and save
    Paint {
        file: PathBuf,
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
        tile: String,
    },
    /// Show the metadata of one cell
    Cell {
        file: PathBuf,
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
    },
    /// Replace the map's scripts with the lines of a text file and save
    Scripts { file: PathBuf, text: PathBuf },
    /// Validate every script line; fails if any is invalid
    Check { file: PathBuf },
    /// Write `<name>_map.h` for the game runtime
    Export { file: PathBuf, out_dir: PathBuf },
}
