//! Run configuration layering
//!
//! Built-in defaults, then an optional config file, then command-line flags.

use std::path::Path;

use partial_blocks::{ExtractOptions, UnterminatedPolicy};
use partial_fs::{FormatStore, NormalizedPath};

use crate::cli::Cli;
use crate::error::Result;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "partial-extract.toml";

/// Locate the config file for this run, if any.
pub fn config_path(cli: &Cli, cwd: &Path) -> Option<NormalizedPath> {
    match &cli.config {
        Some(path) => Some(NormalizedPath::new(path)),
        None => {
            let candidate = NormalizedPath::new(cwd.join(DEFAULT_CONFIG_FILE));
            candidate.exists().then_some(candidate)
        }
    }
}

/// Resolve the options for this run.
///
/// An explicit `--config` that cannot be read is an error; the implicit
/// default file is only used when it exists.
pub fn resolve(cli: &Cli, cwd: &Path) -> Result<ExtractOptions> {
    let mut options = match config_path(cli, cwd) {
        Some(path) => {
            tracing::debug!(path = %path, "loading config");
            FormatStore::new().load::<ExtractOptions>(&path)?
        }
        None => ExtractOptions::default(),
    };

    apply_flags(&mut options, cli);
    Ok(options)
}

fn apply_flags(options: &mut ExtractOptions, cli: &Cli) {
    if cli.flatten {
        options.flatten = true;
    }
    if let Some(indent) = &cli.indent {
        options.indent = indent.clone();
    }
    if let Some(base) = &cli.base {
        options.base = base.clone();
    }
    if let Some(dir) = &cli.partials_dir {
        options.partials_dir = dir.clone();
    }
    if let Some(storage) = &cli.storage {
        options.storage_path = storage.clone();
    }
    if cli.close_unterminated {
        options.unterminated = UnterminatedPolicy::CloseAtEnd;
    }
}
