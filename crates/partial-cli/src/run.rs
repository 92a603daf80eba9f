//! Extraction run: read documents, materialize partials, persist the inventory

use std::path::{Path, PathBuf};

use colored::Colorize;

use partial_blocks::{
    DirectorySink, Document, DocumentReport, ExtractOptions, Inventory, InventoryBuilder,
};
use partial_fs::{FormatStore, NormalizedPath, io};

use crate::error::Result;

/// Outcome of one run.
#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<DocumentReport>,
    pub inventory: Inventory,
    pub partials_dir: NormalizedPath,
    pub storage_path: NormalizedPath,
    pub dry_run: bool,
}

/// Resolve a configured location against the working directory.
fn resolve_location(cwd: &Path, location: &str) -> NormalizedPath {
    if Path::new(location).is_absolute() {
        NormalizedPath::new(location)
    } else {
        NormalizedPath::new(cwd).join(location)
    }
}

/// Path a document is read from. Relative paths resolve against `base`.
fn document_path(base: &NormalizedPath, file: &Path) -> NormalizedPath {
    if file.is_absolute() {
        NormalizedPath::new(file)
    } else {
        base.join(NormalizedPath::new(file).as_str())
    }
}

/// Run the extraction over `files` in order.
///
/// Partials are written as blocks are accepted; the inventory is saved once
/// every document has been processed. A dry run writes neither.
pub fn execute(
    options: &ExtractOptions,
    files: &[PathBuf],
    cwd: &Path,
    dry_run: bool,
) -> Result<RunSummary> {
    let base = resolve_location(cwd, &options.base);
    let partials_dir = resolve_location(cwd, &options.partials_dir);
    let storage_path = resolve_location(cwd, &options.storage_path);

    let sink = DirectorySink::new(partials_dir.clone());
    let mut builder = InventoryBuilder::new(options)?;
    if !dry_run {
        builder = builder.with_sink(&sink);
    }

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let path = document_path(&base, file);
        let text = io::read_text(&path)?;
        let origin = NormalizedPath::new(file).to_string();
        reports.push(builder.add_document(&Document::new(origin, text))?);
    }

    let inventory = builder.finish();
    if !dry_run {
        FormatStore::new().save(&storage_path, &inventory)?;
        tracing::info!(path = %storage_path, "inventory saved");
    }

    Ok(RunSummary {
        reports,
        inventory,
        partials_dir,
        storage_path,
        dry_run,
    })
}

/// Print the per-document outcome and the totals.
pub fn print_summary(summary: &RunSummary) {
    for report in &summary.reports {
        if report.no_annotations() {
            println!(
                "{} No extraction blocks found in {}",
                "--".yellow(),
                report.origin.cyan()
            );
            continue;
        }

        println!(
            "{} {}: {} added, {} duplicate(s), {} skipped",
            "=>".blue().bold(),
            report.origin.cyan(),
            report.added,
            report.duplicates,
            report.issues.len() - report.duplicates
        );
        for issue in &report.issues {
            println!("   {} {}", "!".yellow(), issue);
        }
    }

    println!();
    println!(
        "{} {} unique of {} block(s)",
        "OK".green().bold(),
        summary.inventory.unique_count,
        summary.inventory.total_count
    );

    if summary.dry_run {
        println!("{}", "Dry run: nothing written.".dimmed());
    } else {
        println!("   Partials:  {}", summary.partials_dir.to_string().cyan());
        println!("   Inventory: {}", summary.storage_path.to_string().cyan());
    }
}
