//! Directory entry snapshots and cross-tree pairs.

use std::ffi::{OsStr, OsString};
use std::fs::{FileType, Metadata};

use serde::{Deserialize, Serialize};

/// Type of a directory entry, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symlinks, devices, sockets, FIFOs.
    Other,
}

impl EntryKind {
    /// Classify a file type.
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// A read-only snapshot of one entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry name (not full path), unique within its parent.
    pub name: OsString,

    /// Entry type at listing time.
    pub kind: EntryKind,

    /// Length in bytes reported by `lstat` at listing time.
    pub len: u64,
}

impl DirectoryEntry {
    /// Create a new entry snapshot.
    pub fn new(name: impl Into<OsString>, kind: EntryKind, len: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            len,
        }
    }

    /// Create a snapshot from metadata obtained without following symlinks.
    pub fn from_metadata(name: impl Into<OsString>, metadata: &Metadata) -> Self {
        Self::new(
            name,
            EntryKind::from_file_type(metadata.file_type()),
            metadata.len(),
        )
    }

    /// Entry name.
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// How a colliding pair of entries must be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairClass {
    /// Both sides are directories: recurse.
    Directories,
    /// Exactly one side is a directory.
    TypeMismatch,
    /// Neither side is a directory: compare as files.
    Files,
}

/// Two same-named entries found at the same relative position in both trees.
#[derive(Debug, Clone, Copy)]
pub struct EntryPair<'a> {
    pub source: &'a DirectoryEntry,
    pub dest: &'a DirectoryEntry,
}

impl<'a> EntryPair<'a> {
    pub fn new(source: &'a DirectoryEntry, dest: &'a DirectoryEntry) -> Self {
        Self { source, dest }
    }

    /// Classify the pair for the tree walk.
    ///
    /// Anything that is not a directory pairs like a file, so two symlinks
    /// (or a symlink and a regular file) go through the file comparison.
    pub fn classify(&self) -> PairClass {
        match (self.source.is_dir(), self.dest.is_dir()) {
            (true, true) => PairClass::Directories,
            (false, false) => PairClass::Files,
            _ => PairClass::TypeMismatch,
        }
    }

    /// Whether the listed lengths differ.
    pub fn sizes_differ(&self) -> bool {
        self.source.len != self.dest.len
    }
}
