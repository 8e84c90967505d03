//! Divergence notes: the findings that make a merge unsafe.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The dimension in which a colliding pair differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    /// One side is a directory, the other is not.
    TypeMismatch,
    /// Both are non-directories with different lengths.
    SizeMismatch,
    /// Same length, different bytes.
    ContentMismatch,
}

impl std::fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch => write!(f, "have different types"),
            Self::SizeMismatch => write!(f, "have different sizes"),
            Self::ContentMismatch => write!(f, "content differs"),
        }
    }
}

/// One detected unsafe condition between two structurally equivalent paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivergenceNote {
    /// Path in the source tree.
    pub source: PathBuf,
    /// Path at the same relative position in the destination tree.
    pub destination: PathBuf,
    /// How the two differ.
    pub kind: DivergenceKind,
}

impl DivergenceNote {
    /// Create a new note.
    pub fn new(source: PathBuf, destination: PathBuf, kind: DivergenceKind) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }

    /// Create a type mismatch note.
    pub fn type_mismatch(source: PathBuf, destination: PathBuf) -> Self {
        Self::new(source, destination, DivergenceKind::TypeMismatch)
    }

    /// Create a size mismatch note.
    pub fn size_mismatch(source: PathBuf, destination: PathBuf) -> Self {
        Self::new(source, destination, DivergenceKind::SizeMismatch)
    }

    /// Create a content mismatch note.
    pub fn content_mismatch(source: PathBuf, destination: PathBuf) -> Self {
        Self::new(source, destination, DivergenceKind::ContentMismatch)
    }

    /// Path of the source entry relative to `source_root`.
    ///
    /// Falls back to the full source path when it is not under the root.
    pub fn relative_path<'a>(&'a self, source_root: &Path) -> &'a Path {
        self.source
            .strip_prefix(source_root)
            .unwrap_or(self.source.as_path())
    }
}

impl std::fmt::Display for DivergenceNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' and '{}' {}",
            self.source.display(),
            self.destination.display(),
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_messages() {
        let note = DivergenceNote::type_mismatch("src/x".into(), "dst/x".into());
        assert_eq!(note.to_string(), "'src/x' and 'dst/x' have different types");

        let note = DivergenceNote::size_mismatch("src/x".into(), "dst/x".into());
        assert_eq!(note.to_string(), "'src/x' and 'dst/x' have different sizes");

        let note = DivergenceNote::content_mismatch("src/x".into(), "dst/x".into());
        assert_eq!(note.to_string(), "'src/x' and 'dst/x' content differs");
    }

    #[test]
    fn test_relative_path() {
        let note = DivergenceNote::content_mismatch(
            "/src/dir1/dir2/file.bin".into(),
            "/dst/dir1/dir2/file.bin".into(),
        );
        assert_eq!(
            note.relative_path(Path::new("/src")),
            Path::new("dir1/dir2/file.bin")
        );
        assert_eq!(
            note.relative_path(Path::new("/elsewhere")),
            Path::new("/src/dir1/dir2/file.bin")
        );
    }
}
