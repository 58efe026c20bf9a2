//! Notes system — plain-text notes persisted as files
//!
//! One file per note inside a single flat store directory configured at
//! startup. The HTTP controllers map requests onto the five store
//! operations; everything on disk is the note text verbatim.

pub mod file_ops;
pub mod store;

pub use store::{Note, NoteStore, StoreError};
