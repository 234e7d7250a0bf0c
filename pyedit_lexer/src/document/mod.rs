//! Documents open in the editor
//!
//! A [`Document`] owns its text and, when string-state carrying is enabled,
//! the classifier state recorded at the end of each restyled range. The
//! [`DocumentRegistry`] keeps documents in step with file-watcher events.

pub mod buffer;
pub mod registry;

pub use buffer::{is_binary, Document, DocumentError, Language};
pub use registry::{DocumentChange, DocumentId, DocumentRegistry, FileEvent};
