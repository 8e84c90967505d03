//! Tree comparison engine for precopy.
//!
//! Before merging a source tree into a destination tree, every name that
//! exists on both sides at the same relative path must hold the same kind
//! of entry with the same bytes; otherwise the merge would overwrite data.
//! This crate finds those collisions and reports how they diverge.
//!
//! - [`DirectoryPairer`] walks both trees depth-first, pairing entries by
//!   name one directory level at a time.
//! - [`FileComparator`] decides byte equality by streaming both files in
//!   fixed-size chunks.
//!
//! Neither tree is ever modified.
//!
//! ```rust,no_run
//! use precopy_compare::compare_trees;
//!
//! let notes = compare_trees("/data/incoming", "/data/archive").unwrap();
//! if notes.is_empty() {
//!     println!("Safe to copy");
//! }
//! for note in &notes {
//!     println!("{note}");
//! }
//! ```

mod file_compare;
mod listing;
mod pairer;

pub use file_compare::{ContentComparison, FileComparator, files_equal, read_chunk};
pub use listing::{list_dir, list_dir_map};
pub use pairer::{DirectoryPairer, check, compare_trees};

// Re-export core types for convenience
pub use precopy_core::{
    CheckConfig, CheckError, CheckReport, CompareStats, DivergenceKind, DivergenceNote, Verdict,
};
