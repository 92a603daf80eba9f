//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Extract annotated blocks from HTML pages into reusable partials
///
/// Blocks are marked in the page source:
///
///   <!-- extract:teaser/card.html brand:acme -->
///     ...
///   <!-- endextract -->
///
/// Each unique block is written below the partials directory and the run
/// is recorded in an inventory file.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "partial-extract")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Documents to scan, relative to the base directory
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Config file (.toml, .json, .yaml); defaults to ./partial-extract.toml if present
    #[arg(short, long, env = "PARTIAL_EXTRACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reduce every destination to its file name
    #[arg(long)]
    pub flatten: bool,

    /// Indentation unit used for tab expansion and view wraps
    #[arg(long)]
    pub indent: Option<String>,

    /// Directory relative document paths resolve against
    #[arg(long)]
    pub base: Option<String>,

    /// Directory partials are written to
    #[arg(long)]
    pub partials_dir: Option<String>,

    /// Inventory file; the extension picks the format
    #[arg(long)]
    pub storage: Option<String>,

    /// Close a block left open at the end of a document instead of dropping it
    #[arg(long)]
    pub close_unterminated: bool,

    /// Run the extraction without writing partials or the inventory
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
