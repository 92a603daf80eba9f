//! Annotation-driven block extraction.
//!
//! Pages mark reusable fragments with HTML comments:
//!
//! ```text
//! <!-- extract:teaser/content-teaser--small.html brand:example -->
//!     <div class="teaser">...</div>
//! <!-- endextract -->
//! ```
//!
//! The pipeline runs one way:
//!
//! ```text
//! document text -> scanner -> RawBlock -> processor -> ExtractedBlock -> inventory
//! ```
//!
//! - [`scanner`] finds open/close marker pairs.
//! - [`directive`] parses the opening annotation into ordered `key:value` directives.
//! - [`wrap`] collapses every wrap shape into a `{before, after}` pair.
//! - [`indent`] crops the indentation a block inherited from its page.
//! - [`processor`] resolves metadata and renders the `view` and `template` variants.
//! - [`inventory`] deduplicates blocks across documents and seals the record.
//!
//! The engine itself never touches the filesystem. Reading pages happens
//! before the scanner; writing partials happens through an
//! [`inventory::PartialSink`] such as [`sink::DirectorySink`].

pub mod attributes;
pub mod case;
pub mod directive;
pub mod error;
pub mod indent;
pub mod inventory;
pub mod options;
pub mod processor;
pub mod scanner;
pub mod sink;
pub mod wrap;

pub use directive::{DirectiveValue, Directives};
pub use error::{BlockIssue, Error, Result};
pub use inventory::{DocumentReport, Inventory, InventoryBuilder, PartialSink};
pub use options::{BlockDefaults, ExtractOptions};
pub use processor::{BlockProcessor, Document, ExtractedBlock};
pub use scanner::{RawBlock, Scan, UnterminatedPolicy, scan};
pub use sink::DirectorySink;
pub use wrap::{WrapPair, WrapSpec};
