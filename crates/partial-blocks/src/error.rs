//! Error types for partial-blocks

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that stop a run.
///
/// Malformed annotations never produce one of these; they are reported as
/// [`BlockIssue`]s and the run carries on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] partial_fs::Error),

    #[error("Invalid wrap: {message}")]
    InvalidWrap { message: String },
}

/// Why a block, or a whole annotation, did not reach the inventory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockIssue {
    #[error("annotation at line {line} has no extract destination")]
    MissingMandatoryDirective { line: usize },

    #[error("annotation at line {line} is never closed")]
    UnterminatedBlock { line: usize, discarded: bool },

    #[error("block at line {line} duplicates {destination} ({id})")]
    DuplicateDestination {
        line: usize,
        destination: String,
        id: String,
    },

    #[error("block at line {line} targets {destination}, already taken by a different block")]
    DestinationConflict { line: usize, destination: String },

    #[error("annotation at line {line} targets {destination} outside the partials directory")]
    UnsafeDestination { line: usize, destination: String },

    #[error("annotation at line {line} has an invalid wrap: {message}")]
    InvalidWrap { line: usize, message: String },
}
