//! Configuration: where the inventory file lives.
//!
//! The data file path is resolved once per run from, in order:
//! `--data-file` / `STASH_DATA_FILE`, the settings file, then the
//! built-in default beside the executable.

mod path;
mod settings;

pub use path::{
    APP_DIR, default_config_path, default_data_file, home_dir, resolve_cli_path, resolve_path,
};
pub use settings::{DataFileSource, ResolvedConfig, Settings};
