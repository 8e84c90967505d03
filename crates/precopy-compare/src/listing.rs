//! Single-level directory listing.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use precopy_core::{CheckError, DirectoryEntry};

/// List one directory level, sorted by name.
///
/// Entries are classified without following symlinks. Any failure to read
/// the directory or an entry's metadata is a [`CheckError::Listing`].
pub fn list_dir(path: &Path) -> Result<Vec<DirectoryEntry>, CheckError> {
    let read_dir = fs::read_dir(path).map_err(|e| CheckError::listing(path, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| CheckError::listing(path, e))?;
        // DirEntry::metadata does not traverse symlinks.
        let metadata = entry
            .metadata()
            .map_err(|e| CheckError::listing(entry.path(), e))?;
        entries.push(DirectoryEntry::from_metadata(entry.file_name(), &metadata));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// List one directory level keyed by entry name.
pub fn list_dir_map(path: &Path) -> Result<HashMap<OsString, DirectoryEntry>, CheckError> {
    Ok(list_dir(path)?
        .into_iter()
        .map(|entry| (entry.name.clone(), entry))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use precopy_core::EntryKind;
    use tempfile::TempDir;

    #[test]
    fn test_list_dir_sorted_and_classified() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("b.txt"), "hello").unwrap();
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("c"), "").unwrap();

        let entries = list_dir(root).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.to_str().unwrap()).collect();
        assert_eq!(names, ["a", "b.txt", "c"]);

        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[1].len, 5);
        assert_eq!(entries[2].len, 0);
    }

    #[test]
    fn test_list_dir_map() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("x"), "1").unwrap();

        let map = list_dir_map(temp.path()).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&OsString::from("x")));
    }

    #[test]
    fn test_missing_directory_is_listing_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = list_dir(&missing).unwrap_err();
        assert!(matches!(err, CheckError::Listing { .. }));
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_other() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let map = list_dir_map(temp.path()).unwrap();
        assert_eq!(map[&OsString::from("link")].kind, EntryKind::Other);
        assert_eq!(map[&OsString::from("real")].kind, EntryKind::Directory);
    }
}
