//! Inventory building across documents.
//!
//! Documents are fed one at a time, in caller order. Blocks are identified by
//! their checksum id; the first block with a given id is kept (and handed to
//! the [`PartialSink`], if one is attached), later ones only count towards
//! the total. A destination belongs to the first block that claims it; a
//! different block aimed at the same destination is reported and skipped.

use crate::error::{BlockIssue, Result};
use crate::options::ExtractOptions;
use crate::processor::{BlockProcessor, Document, ExtractedBlock};
use crate::scanner::{UnterminatedPolicy, scan};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Materializes unique blocks as they are accepted.
pub trait PartialSink {
    /// Write one block's partial.
    fn write_partial(&self, block: &ExtractedBlock) -> partial_fs::Result<()>;
}

/// Final record of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub options: ExtractOptions,
    pub items: Vec<ExtractedBlock>,
    /// Valid blocks found, duplicates included.
    pub total_count: usize,
    pub unique_count: usize,
}

/// What happened to one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentReport {
    pub origin: String,
    /// Opening annotations seen, dangling ones included.
    pub annotations: usize,
    /// Blocks added to the inventory.
    pub added: usize,
    pub duplicates: usize,
    /// Everything that kept a block out, duplicates included.
    pub issues: Vec<BlockIssue>,
}

impl DocumentReport {
    /// The document held no extraction annotations.
    pub fn no_annotations(&self) -> bool {
        self.annotations == 0
    }
}

/// Accumulates [`ExtractedBlock`]s from many documents into an [`Inventory`].
pub struct InventoryBuilder<'a> {
    processor: BlockProcessor<'a>,
    sink: Option<&'a dyn PartialSink>,
    seen: HashSet<String>,
    destinations: HashMap<String, String>,
    items: Vec<ExtractedBlock>,
    total_count: usize,
}

impl<'a> InventoryBuilder<'a> {
    /// # Errors
    ///
    /// Fails when the configured `viewWrap` is invalid.
    pub fn new(options: &'a ExtractOptions) -> Result<Self> {
        Ok(Self {
            processor: BlockProcessor::new(options)?,
            sink: None,
            seen: HashSet::new(),
            destinations: HashMap::new(),
            items: Vec::new(),
            total_count: 0,
        })
    }

    /// Write every unique block to `sink` as it is accepted.
    pub fn with_sink(mut self, sink: &'a dyn PartialSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Scan and process one document.
    ///
    /// Malformed blocks are skipped and listed in the report.
    ///
    /// # Errors
    ///
    /// Only a failing sink aborts; the failing block is not added.
    pub fn add_document(&mut self, document: &Document) -> Result<DocumentReport> {
        let policy = self.processor.options().unterminated;
        let scanned = scan(&document.text, policy);
        let mut report = DocumentReport {
            origin: document.origin.clone(),
            annotations: scanned.blocks.len(),
            ..DocumentReport::default()
        };

        if scanned.is_empty() {
            tracing::info!(origin = %document.origin, "no extraction blocks found");
            return Ok(report);
        }

        if let Some(line) = scanned.unterminated {
            let discarded = policy == UnterminatedPolicy::Discard;
            if discarded {
                report.annotations += 1;
            }
            let issue = BlockIssue::UnterminatedBlock { line, discarded };
            tracing::warn!(origin = %document.origin, "{}", issue);
            report.issues.push(issue);
        }

        for raw in &scanned.blocks {
            let block = match self.processor.process(raw, &document.origin) {
                Ok(block) => block,
                Err(issue) => {
                    tracing::warn!(origin = %document.origin, "skipping block: {}", issue);
                    report.issues.push(issue);
                    continue;
                }
            };

            self.total_count += 1;
            if self.seen.contains(&block.id) {
                let issue = BlockIssue::DuplicateDestination {
                    line: raw.start_line,
                    destination: block.destination,
                    id: block.id,
                };
                tracing::warn!(origin = %document.origin, "{}", issue);
                report.duplicates += 1;
                report.issues.push(issue);
                continue;
            }

            if let Some(owner) = self.destinations.get(&block.destination) {
                let issue = BlockIssue::DestinationConflict {
                    line: raw.start_line,
                    destination: block.destination,
                };
                tracing::warn!(origin = %document.origin, owner = %owner, "{}", issue);
                report.issues.push(issue);
                continue;
            }

            if let Some(sink) = self.sink {
                sink.write_partial(&block)?;
            }
            self.seen.insert(block.id.clone());
            self.destinations
                .insert(block.destination.clone(), block.id.clone());
            self.items.push(block);
            report.added += 1;
        }

        tracing::info!(
            origin = %document.origin,
            annotations = report.annotations,
            added = report.added,
            duplicates = report.duplicates,
            skipped = report.issues.len() - report.duplicates,
            "extracted blocks"
        );
        Ok(report)
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn unique_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[ExtractedBlock] {
        &self.items
    }

    /// Seal the inventory.
    pub fn finish(self) -> Inventory {
        Inventory {
            options: self.processor.options().clone(),
            unique_count: self.items.len(),
            total_count: self.total_count,
            items: self.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_annotations() {
        let options = ExtractOptions::default();
        let mut builder = InventoryBuilder::new(&options).unwrap();
        let report = builder
            .add_document(&Document::new("plain.html", "<p>hello</p>"))
            .unwrap();
        assert!(report.no_annotations());
        assert!(report.issues.is_empty());
        assert_eq!(builder.finish().total_count, 0);
    }

    #[test]
    fn test_duplicate_across_documents() {
        let options = ExtractOptions::default();
        let mut builder = InventoryBuilder::new(&options).unwrap();
        let text = "<!-- extract:a/b.html -->\n<b>x</b>\n<!-- endextract -->";

        builder.add_document(&Document::new("one.html", text)).unwrap();
        let second = builder.add_document(&Document::new("two.html", text)).unwrap();
        assert_eq!(second.duplicates, 1);
        assert_eq!(second.added, 0);

        let inventory = builder.finish();
        assert_eq!(inventory.total_count, 2);
        assert_eq!(inventory.unique_count, 1);
        assert_eq!(inventory.items[0].origin, "one.html");
    }

    #[test]
    fn test_invalid_blocks_do_not_stop_the_document() {
        let options = ExtractOptions::default();
        let mut builder = InventoryBuilder::new(&options).unwrap();
        let text = "<!-- extract: -->\nnothing\n<!-- endextract -->\n\
                    <!-- extract:ok.html -->\nok\n<!-- endextract -->\n\
                    <!-- extract:dangling.html -->\nlost";

        let report = builder.add_document(&Document::new("mixed.html", text)).unwrap();

        assert_eq!(report.annotations, 3);
        assert_eq!(report.added, 1);
        assert_eq!(
            report.issues,
            vec![
                BlockIssue::UnterminatedBlock {
                    line: 7,
                    discarded: true
                },
                BlockIssue::MissingMandatoryDirective { line: 1 },
            ]
        );
        assert_eq!(builder.items()[0].destination, "ok.html");
    }

    #[test]
    fn test_conflicting_destination_is_skipped() {
        let options = ExtractOptions::default();
        let mut builder = InventoryBuilder::new(&options).unwrap();

        builder
            .add_document(&Document::new(
                "one.html",
                "<!-- extract:a/b.html -->\nFIRST\n<!-- endextract -->",
            ))
            .unwrap();
        let second = builder
            .add_document(&Document::new(
                "two.html",
                "<!-- extract:a/b.html -->\nSECOND\n<!-- endextract -->",
            ))
            .unwrap();

        assert_eq!(second.added, 0);
        assert_eq!(
            second.issues,
            vec![BlockIssue::DestinationConflict {
                line: 1,
                destination: "a/b.html".to_string()
            }]
        );
        let inventory = builder.finish();
        assert_eq!(inventory.total_count, 2);
        assert_eq!(inventory.unique_count, 1);
        assert!(inventory.items[0].template.contains("FIRST"));
    }

    #[test]
    fn test_escaping_destination_does_not_stop_the_document() {
        let options = ExtractOptions::default();
        let mut builder = InventoryBuilder::new(&options).unwrap();
        let text = "<!-- extract:../evil.html -->\nbad\n<!-- endextract -->\n\
                    <!-- extract:ok/good.html -->\ngood\n<!-- endextract -->";

        let report = builder.add_document(&Document::new("page.html", text)).unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(
            report.issues,
            vec![BlockIssue::UnsafeDestination {
                line: 1,
                destination: "../evil.html".to_string()
            }]
        );
        assert_eq!(builder.items()[0].destination, "ok/good.html");
    }
}
