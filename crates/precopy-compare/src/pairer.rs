//! Lock-step walk over two directory trees.

use std::path::Path;
use std::time::Instant;

use precopy_core::{
    CheckConfig, CheckError, CheckReport, CompareStats, DivergenceNote, EntryPair, PairClass,
};
use tracing::debug;

use crate::file_compare::FileComparator;
use crate::listing::{list_dir, list_dir_map};

type Observer<'o> = Box<dyn FnMut(&DivergenceNote) + 'o>;

/// Notes and counters for one subtree.
#[derive(Debug, Default)]
struct SubtreeResult {
    notes: Vec<DivergenceNote>,
    stats: CompareStats,
}

impl SubtreeResult {
    fn merge(&mut self, other: SubtreeResult) {
        self.notes.extend(other.notes);
        self.stats.merge(&other.stats);
    }
}

/// Pairs same-named entries across two trees and reports divergences.
///
/// Only names present on both sides are inspected. Directory pairs are
/// walked recursively, mixed directory/non-directory pairs are reported as
/// type mismatches, and everything else is compared as files: by listed
/// length first, then by content.
pub struct DirectoryPairer<'o> {
    comparator: FileComparator,
    observer: Option<Observer<'o>>,
}

impl<'o> DirectoryPairer<'o> {
    /// Create a pairer with the default chunk size.
    pub fn new() -> Self {
        Self {
            comparator: FileComparator::new(),
            observer: None,
        }
    }

    /// Create a pairer tuned by a config.
    pub fn with_config(config: &CheckConfig) -> Self {
        Self {
            comparator: FileComparator::with_chunk_size(config.chunk_size),
            observer: None,
        }
    }

    /// Call `observer` with each note as soon as it is found.
    pub fn with_observer(mut self, observer: impl FnMut(&DivergenceNote) + 'o) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Compare two trees and collect every divergence.
    ///
    /// Fails if any paired directory cannot be listed or any compared file
    /// cannot be read; in that case no verdict exists.
    pub fn compare_trees(
        &mut self,
        source_root: &Path,
        dest_root: &Path,
    ) -> Result<CheckReport, CheckError> {
        let start = Instant::now();
        let result = self.compare_dirs(source_root, dest_root)?;

        debug!(
            notes = result.notes.len(),
            dirs = result.stats.dirs_paired,
            files = result.stats.files_compared,
            "tree comparison finished"
        );

        Ok(CheckReport::new(
            source_root.to_path_buf(),
            dest_root.to_path_buf(),
            result.notes,
            result.stats,
            start.elapsed(),
        ))
    }

    fn compare_dirs(&mut self, source_dir: &Path, dest_dir: &Path) -> Result<SubtreeResult, CheckError> {
        debug!(source = %source_dir.display(), dest = %dest_dir.display(), "pairing directory");

        let dest_entries = list_dir_map(dest_dir)?;
        let source_entries = list_dir(source_dir)?;

        let mut result = SubtreeResult::default();
        result.stats.dirs_paired = 1;

        for source_entry in &source_entries {
            let Some(dest_entry) = dest_entries.get(&source_entry.name) else {
                result.stats.source_only += 1;
                continue;
            };

            let source_path = source_dir.join(&source_entry.name);
            let dest_path = dest_dir.join(&dest_entry.name);
            let pair = EntryPair::new(source_entry, dest_entry);

            match pair.classify() {
                PairClass::Directories => {
                    let subtree = self.compare_dirs(&source_path, &dest_path)?;
                    result.merge(subtree);
                }
                PairClass::TypeMismatch => {
                    self.emit(&mut result, DivergenceNote::type_mismatch(source_path, dest_path));
                }
                PairClass::Files if pair.sizes_differ() => {
                    result.stats.size_rejections += 1;
                    self.emit(&mut result, DivergenceNote::size_mismatch(source_path, dest_path));
                }
                PairClass::Files => {
                    let comparison = self.comparator.compare_files(&source_path, &dest_path)?;
                    result.stats.files_compared += 1;
                    result.stats.bytes_read += comparison.bytes_read;
                    if !comparison.equal {
                        self.emit(
                            &mut result,
                            DivergenceNote::content_mismatch(source_path, dest_path),
                        );
                    }
                }
            }
        }

        Ok(result)
    }

    fn emit(&mut self, result: &mut SubtreeResult, note: DivergenceNote) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&note);
        }
        result.notes.push(note);
    }
}

impl Default for DirectoryPairer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a full check as described by `config`.
///
/// The config is validated first; an invalid one yields
/// [`CheckError::InvalidConfig`] without touching either tree.
pub fn check(config: &CheckConfig) -> Result<CheckReport, CheckError> {
    config.validate()?;
    DirectoryPairer::with_config(config).compare_trees(&config.source_root, &config.dest_root)
}

/// Compare two trees with default tuning and return the divergence notes.
///
/// An empty result means the trees can be merged safely.
pub fn compare_trees(
    source_root: impl AsRef<Path>,
    dest_root: impl AsRef<Path>,
) -> Result<Vec<DivergenceNote>, CheckError> {
    DirectoryPairer::new()
        .compare_trees(source_root.as_ref(), dest_root.as_ref())
        .map(|report| report.notes)
}
