//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// stash - Keep track of what is stored where at home.
///
/// Items live in storage spots, storage spots live in rooms. Use --robot or
/// --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "stash", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Output format (text for humans, json for scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "STASH_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Inventory file to use for this run (overrides the configured path)
    #[arg(long, global = true, env = "STASH_DATA_FILE", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Settings file location
    #[arg(long, global = true, env = "STASH_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Inventory ===
    /// Add items to a storage spot (separate items with "；")
    Add(AddArgs),

    /// Find where an item is stored
    #[command(visible_alias = "search")]
    Find(FindArgs),

    /// Show the stored inventory
    List(ListArgs),

    /// Show room and item counts
    Stats,

    /// Remove everything, a room, or a storage spot
    #[command(subcommand)]
    Clear(ClearCommand),

    /// Write a copy of the inventory to another file
    Export(ExportArgs),

    // === Configuration ===
    /// Create the inventory file if it does not exist
    Init,

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommand),

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Room name
    pub room: String,

    /// Storage spot inside the room
    pub storage: String,

    /// Items, separated by the full-width semicolon "；"
    pub items: String,

    /// What to do when some items are already stored there
    #[arg(long, default_value = "ask")]
    pub on_duplicate: OnDuplicate,
}

/// Handling of items already present in the target storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OnDuplicate {
    /// Ask on the terminal (treated as skip in robot mode)
    #[default]
    Ask,
    /// Add them anyway
    Add,
    /// Leave the storage unchanged
    Skip,
}

#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Exact item name
    pub item: String,

    /// Only look in this room
    #[arg(long, short = 'r')]
    pub room: Option<String>,

    /// Report every storage holding the item instead of the first one
    #[arg(long, short = 'a')]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only show this room
    #[arg(long, short = 'r')]
    pub room: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ClearCommand {
    /// Remove every room and item
    All(ClearAllArgs),

    /// Remove a room and everything in it
    Room {
        /// Room name
        room: String,
    },

    /// Remove a storage spot (and its room, if it was the last one)
    Storage {
        /// Room name
        room: String,
        /// Storage spot name
        storage: String,
    },
}

#[derive(Parser, Debug)]
pub struct ClearAllArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Destination file (default: stash-backup-<timestamp>.json in the current directory)
    #[arg(value_name = "DEST")]
    pub destination: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show settings and the resolved inventory file
    Show,

    /// Store a new inventory file path in the settings
    SetPath {
        /// New inventory file path
        path: PathBuf,
    },

    /// Forget the configured path and use the default
    Reset,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
