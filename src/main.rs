//! stash CLI - household inventory tracker.
//!
//! Provides both human-friendly and script-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use stash::backup::{default_backup_name, export_to};
use stash::cli::{self, ClearCommand, Cli, Commands, ConfigCommand, OnDuplicate};
use stash::config::{
    ResolvedConfig, Settings, default_config_path, default_data_file, resolve_cli_path,
};
use stash::error::{Result, ResultExt, StashError};
use stash::logging::init_logging;
use stash::output::{Output, OutputMode, VersionInfo};
use stash::persist::{InventoryFile, LoadNotice, Loaded};
use stash::query::{SearchMode, compute_statistics, find};
use stash::store::{DuplicatePolicy, InventoryDatabase, Location, require};
use stash::prompt;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let mode = OutputMode::from_cli(&cli);
    let output = mode.into_output();

    if let Err(e) = run(&cli, mode, output.as_ref()) {
        output.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, mode: OutputMode, out: &dyn Output) -> Result<()> {
    match &cli.command {
        None => {
            print_quick_start(mode);
            Ok(())
        }
        Some(Commands::Add(args)) => cmd_add(cli, mode, out, args),
        Some(Commands::Find(args)) => cmd_find(cli, out, args),
        Some(Commands::List(args)) => cmd_list(cli, out, args),
        Some(Commands::Stats) => cmd_stats(cli, out),
        Some(Commands::Clear(command)) => cmd_clear(cli, mode, out, command),
        Some(Commands::Export(args)) => cmd_export(cli, out, args),
        Some(Commands::Init) => cmd_init(cli, out),
        Some(Commands::Config(command)) => cmd_config(cli, out, command),
        Some(Commands::Version) => {
            out.version_info(&version_info());
            Ok(())
        }
        Some(Commands::Completions(args)) => {
            cmd_completions(args);
            Ok(())
        }
    }
}

// === Session ===

/// Resolved configuration plus the inventory file it points at.
struct Session {
    config: ResolvedConfig,
    file: InventoryFile,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self> {
        let settings_path = settings_path(cli)?;
        let config = ResolvedConfig::resolve(settings_path, data_file_override(cli)?)?;
        Ok(Self::from_config(config))
    }

    /// Open for a command that rewrites the settings file.
    ///
    /// Unparseable settings are replaced rather than reported.
    fn open_for_settings_rewrite(cli: &Cli) -> Result<Self> {
        let settings_path = settings_path(cli)?;
        let settings = Settings::load_for_rewrite(&settings_path)?;
        let config =
            ResolvedConfig::with_settings(settings_path, settings, data_file_override(cli)?)?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: ResolvedConfig) -> Self {
        let file = InventoryFile::new(&config.data_file);
        debug!(data_file = %file.path().display(), "Session opened");
        Self { config, file }
    }

    /// Load for reading. Problems are reported and an empty store is used.
    fn load(&self, out: &dyn Output) -> InventoryDatabase {
        let Loaded { db, notice } = self.file.load();
        if let Some(notice) = notice {
            out.load_notice(&notice);
        }
        db
    }

    /// Load for a change that will be saved back, or a copy that will be
    /// exported.
    ///
    /// A file that exists but cannot be read is an error here: writing an
    /// empty store in its place would discard its contents.
    fn load_for_update(&self, out: &dyn Output) -> Result<InventoryDatabase> {
        let Loaded { db, notice } = self.file.load();
        match notice {
            Some(LoadNotice::ReadFailed(err)) => Err(err),
            Some(notice) => {
                out.load_notice(&notice);
                Ok(db)
            }
            None => Ok(db),
        }
    }
}

fn settings_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => resolve_cli_path(path),
        None => default_config_path(),
    }
}

fn data_file_override(cli: &Cli) -> Result<Option<PathBuf>> {
    cli.data_file.as_deref().map(resolve_cli_path).transpose()
}

// === Command Implementations ===

fn cmd_add(cli: &Cli, mode: OutputMode, out: &dyn Output, args: &cli::AddArgs) -> Result<()> {
    let session = Session::open(cli)?;
    let mut db = session.load_for_update(out)?;

    let mut prompt_error = None;
    let outcome = db.add_items(&args.room, &args.storage, &args.items, |duplicates| {
        match args.on_duplicate {
            OnDuplicate::Add => DuplicatePolicy::AddAnyway,
            OnDuplicate::Skip => DuplicatePolicy::Skip,
            OnDuplicate::Ask if mode.is_robot() => DuplicatePolicy::Skip,
            OnDuplicate::Ask => {
                let question = format!(
                    "Already stored here: {}. Add anyway?",
                    duplicates.join(", ")
                );
                match prompt::confirm(&question) {
                    Ok(true) => DuplicatePolicy::AddAnyway,
                    Ok(false) => DuplicatePolicy::Skip,
                    Err(e) => {
                        prompt_error = Some(e);
                        DuplicatePolicy::Skip
                    }
                }
            }
        }
    })?;
    if let Some(e) = prompt_error {
        return Err::<(), _>(e).with_context(|| "Reading duplicate confirmation");
    }

    if !outcome.skipped {
        session.file.save(&db)?;
    }
    out.items_added(&outcome);
    Ok(())
}

fn cmd_find(cli: &Cli, out: &dyn Output, args: &cli::FindArgs) -> Result<()> {
    let session = Session::open(cli)?;
    let db = session.load(out);

    let mode = if args.all {
        SearchMode::All
    } else {
        SearchMode::First
    };
    let result = find(&db, &args.item, mode, args.room.as_deref())?;
    out.search_result(args.item.trim(), &result);
    Ok(())
}

fn cmd_list(cli: &Cli, out: &dyn Output, args: &cli::ListArgs) -> Result<()> {
    let session = Session::open(cli)?;
    let db = session.load(out);

    match args.room.as_deref().map(|room| require("room", room)).transpose()? {
        None => out.inventory(&db),
        Some(room) => {
            let record = db.room(room).ok_or_else(|| StashError::RoomNotFound {
                room: room.to_string(),
            })?;
            let single: InventoryDatabase = [(room.to_string(), record.clone())]
                .into_iter()
                .collect();
            out.inventory(&single);
        }
    }
    Ok(())
}

fn cmd_stats(cli: &Cli, out: &dyn Output) -> Result<()> {
    let session = Session::open(cli)?;
    let db = session.load(out);
    out.statistics(&compute_statistics(&db));
    Ok(())
}

fn cmd_clear(cli: &Cli, mode: OutputMode, out: &dyn Output, command: &ClearCommand) -> Result<()> {
    let session = Session::open(cli)?;

    match command {
        ClearCommand::All(args) => {
            if !args.yes {
                if mode.is_robot() {
                    return Err(StashError::ConfirmationRequired {
                        action: "clear all data",
                    });
                }
                let confirmed =
                    prompt::confirm("Clear ALL rooms and items? This cannot be undone.")
                        .with_context(|| "Reading clear confirmation")?;
                if !confirmed {
                    out.clear_cancelled();
                    return Ok(());
                }
            }
            // Everything is discarded anyway, so an unreadable file is not fatal here.
            let mut db = session.load(out);
            let rooms = db.room_count();
            db.clear_all();
            session.file.save(&db)?;
            info!(rooms, "All data cleared");
            out.all_cleared(rooms);
        }
        ClearCommand::Room { room } => {
            let mut db = session.load_for_update(out)?;
            let removed = db.clear_room(room)?;
            session.file.save(&db)?;
            out.room_cleared(room.trim(), &removed);
        }
        ClearCommand::Storage { room, storage } => {
            let mut db = session.load_for_update(out)?;
            let removal = db.clear_storage(room, storage)?;
            session.file.save(&db)?;
            out.storage_cleared(&Location::new(room.trim(), storage.trim()), &removal);
        }
    }
    Ok(())
}

fn cmd_export(cli: &Cli, out: &dyn Output, args: &cli::ExportArgs) -> Result<()> {
    let session = Session::open(cli)?;
    let destination = match &args.destination {
        Some(path) => resolve_cli_path(path)?,
        None => resolve_cli_path(Path::new(&default_backup_name(&chrono::Local::now())))?,
    };

    let db = session.load_for_update(out)?;
    let report = export_to(&db, &destination)?;
    out.exported(&report);
    Ok(())
}

fn cmd_init(cli: &Cli, out: &dyn Output) -> Result<()> {
    let session = Session::open(cli)?;
    let created = session.file.ensure_exists()?;
    out.initialized(session.file.path(), created);
    Ok(())
}

fn cmd_config(cli: &Cli, out: &dyn Output, command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => out.config_info(&Session::open(cli)?.config),
        ConfigCommand::SetPath { path } => {
            let path = resolve_cli_path(path)?;
            let mut session = Session::open_for_settings_rewrite(cli)?;
            set_data_file(&mut session, Some(path))?;
            out.data_path_set(session.file.path());
        }
        ConfigCommand::Reset => {
            let mut session = Session::open_for_settings_rewrite(cli)?;
            set_data_file(&mut session, None)?;
            out.data_path_set(session.file.path());
        }
    }
    Ok(())
}

/// Persist a new configured data file and point the session at it.
fn set_data_file(session: &mut Session, path: Option<PathBuf>) -> Result<()> {
    let target = match &path {
        Some(path) => path.clone(),
        None => default_data_file()?,
    };
    session.config.settings.data_file = path;
    session.config.settings.save(&session.config.settings_path)?;
    session.file.set_path(target);
    Ok(())
}

fn cmd_completions(args: &cli::CompletionsArgs) {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "stash", &mut io::stdout());
}

fn version_info() -> VersionInfo {
    VersionInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        git_dirty: build_info::git_dirty() == "true",
        build_timestamp: build_info::build_timestamp(),
        rustc_version: build_info::rustc_semver(),
        target: build_info::target(),
    }
}

// === Quick Start ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    inventory: RobotInventory,
    clearing: RobotClearing,
    settings: RobotSettings,
    item_delimiter: &'static str,
    output_modes: OutputModes,
}

#[derive(Serialize)]
struct RobotInventory {
    add_items: &'static str,
    add_duplicates: &'static str,
    find_first: &'static str,
    find_all: &'static str,
    list: &'static str,
    stats: &'static str,
    export: &'static str,
}

#[derive(Serialize)]
struct RobotClearing {
    clear_all: &'static str,
    clear_room: &'static str,
    clear_storage: &'static str,
}

#[derive(Serialize)]
struct RobotSettings {
    show: &'static str,
    set_path: &'static str,
    per_run: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

fn print_quick_start(mode: OutputMode) {
    if mode.is_robot() {
        print_robot_quick_start();
    } else {
        print_human_quick_start();
    }
}

fn print_robot_quick_start() {
    let help = RobotQuickStart {
        tool: "stash",
        version: build_info::VERSION,
        description: "Household inventory: rooms, storage spots and items in one JSON file",
        inventory: RobotInventory {
            add_items: "stash --robot add <ROOM> <STORAGE> \"<ITEM>；<ITEM>\"",
            add_duplicates: "stash --robot add <ROOM> <STORAGE> <ITEMS> --on-duplicate add",
            find_first: "stash --robot find <ITEM>",
            find_all: "stash --robot find <ITEM> --all",
            list: "stash --robot list",
            stats: "stash --robot stats",
            export: "stash --robot export <DEST>",
        },
        clearing: RobotClearing {
            clear_all: "stash --robot clear all --yes",
            clear_room: "stash --robot clear room <ROOM>",
            clear_storage: "stash --robot clear storage <ROOM> <STORAGE>",
        },
        settings: RobotSettings {
            show: "stash --robot config show",
            set_path: "stash --robot config set-path <PATH>",
            per_run: "--data-file <PATH> or STASH_DATA_FILE",
        },
        item_delimiter: "；",
        output_modes: OutputModes {
            human: "--format=text (default)",
            robot: "--robot or --format=json",
            compact: "--format=json-compact",
        },
    };

    match serde_json::to_string_pretty(&help) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{e}"),
    }
}

fn print_human_quick_start() {
    println!(
        "{} {} - household inventory\n",
        style("stash").bold().cyan(),
        build_info::VERSION
    );

    println!("{}", style("QUICK START").bold().underlined());
    println!();
    println!("  {}  Add items", style("stash add Kitchen Drawer \"Fork；Spoon\"").green());
    println!("  {}  Where is it?", style("stash find Fork").green());
    println!("  {}  Every place holding it", style("stash find Fork --all").green());
    println!("  {}  Show everything", style("stash list").green());
    println!("  {}  Counts", style("stash stats").green());
    println!("  {}  Back up", style("stash export backup.json").green());
    println!();

    println!("{}", style("CLEARING").bold().underlined());
    println!();
    println!("  {}  Remove a storage spot", style("stash clear storage Kitchen Drawer").green());
    println!("  {}  Remove a room", style("stash clear room Kitchen").green());
    println!("  {}  Remove everything", style("stash clear all").green());
    println!();

    println!(
        "Separate items with the full-width semicolon {}. Run {} for full help",
        style("；").bold(),
        style("stash --help").yellow()
    );
}
