//! Partial materialization into a directory.

use crate::inventory::PartialSink;
use crate::processor::ExtractedBlock;
use partial_fs::{Error, NormalizedPath, io};

/// Writes each block's `template` to `<root>/<destination>`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: NormalizedPath,
}

impl DirectorySink {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }
}

impl PartialSink for DirectorySink {
    /// # Errors
    ///
    /// Destinations that are absolute or climb out of the root are refused.
    fn write_partial(&self, block: &ExtractedBlock) -> partial_fs::Result<()> {
        let destination = NormalizedPath::new(&block.destination);
        if !destination.is_contained() {
            return Err(Error::PathEscape {
                path: block.destination.clone(),
            });
        }
        let target = self.root.join(destination.as_str());
        io::write_text(&target, &block.template)?;
        tracing::info!(path = %target, "partial created");
        Ok(())
    }
}
