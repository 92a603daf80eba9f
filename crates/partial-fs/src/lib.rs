//! Filesystem boundary for partial-extract
//!
//! Everything the extraction engine needs from the outside world lives here:
//! forward-slash paths, text reads, atomic writes, content checksums and a
//! store that reads or writes serde records in the format implied by a file
//! extension.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use store::{FormatStore, RecordFormat};
