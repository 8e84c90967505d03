//! Check reports, statistics and the derived verdict.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::note::{DivergenceKind, DivergenceNote};

/// Counters gathered while walking two trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareStats {
    /// Directory pairs listed (including the two roots).
    pub dirs_paired: u64,
    /// File pairs whose content was streamed and compared.
    pub files_compared: u64,
    /// File pairs rejected by the size precheck alone.
    pub size_rejections: u64,
    /// Bytes read from both sides during content comparison.
    pub bytes_read: u64,
    /// Source entries with no counterpart in the destination.
    pub source_only: u64,
}

impl CompareStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another subtree's counters into these.
    pub fn merge(&mut self, other: &CompareStats) {
        self.dirs_paired += other.dirs_paired;
        self.files_compared += other.files_compared;
        self.size_rejections += other.size_rejections;
        self.bytes_read += other.bytes_read;
        self.source_only += other.source_only;
    }
}

/// Aggregate safe/unsafe determination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No colliding pair diverges.
    Safe,
    /// At least one colliding pair diverges.
    Unsafe,
}

impl Verdict {
    /// Check if merging is safe.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe to copy"),
            Self::Unsafe => write!(f, "It may be unsafe"),
        }
    }
}

/// Result of one top-level check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Source root that was checked.
    pub source_root: PathBuf,
    /// Destination root that was checked.
    pub dest_root: PathBuf,
    /// Every divergence found, in traversal order.
    pub notes: Vec<DivergenceNote>,
    /// Walk counters.
    pub stats: CompareStats,
    /// Wall-clock duration of the check.
    pub duration: Duration,
}

impl CheckReport {
    /// Create a new report.
    pub fn new(
        source_root: PathBuf,
        dest_root: PathBuf,
        notes: Vec<DivergenceNote>,
        stats: CompareStats,
        duration: Duration,
    ) -> Self {
        Self {
            source_root,
            dest_root,
            notes,
            stats,
            duration,
        }
    }

    /// Derive the verdict: safe iff there are no notes.
    pub fn verdict(&self) -> Verdict {
        if self.notes.is_empty() {
            Verdict::Safe
        } else {
            Verdict::Unsafe
        }
    }

    /// Check if merging is safe.
    pub fn is_safe(&self) -> bool {
        self.verdict().is_safe()
    }

    /// Number of notes of a given kind.
    pub fn count_of(&self, kind: DivergenceKind) -> usize {
        self.notes.iter().filter(|n| n.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(notes: Vec<DivergenceNote>) -> CheckReport {
        CheckReport::new(
            "/src".into(),
            "/dst".into(),
            notes,
            CompareStats::new(),
            Duration::ZERO,
        )
    }

    #[test]
    fn test_empty_report_is_safe() {
        let report = report(Vec::new());
        assert_eq!(report.verdict(), Verdict::Safe);
        assert!(report.is_safe());
        assert_eq!(report.verdict().to_string(), "Safe to copy");
    }

    #[test]
    fn test_any_note_is_unsafe() {
        let report = report(vec![
            DivergenceNote::size_mismatch("/src/a".into(), "/dst/a".into()),
            DivergenceNote::content_mismatch("/src/b".into(), "/dst/b".into()),
        ]);
        assert_eq!(report.verdict(), Verdict::Unsafe);
        assert_eq!(report.verdict().to_string(), "It may be unsafe");
        assert_eq!(report.count_of(DivergenceKind::SizeMismatch), 1);
        assert_eq!(report.count_of(DivergenceKind::TypeMismatch), 0);
    }

    #[test]
    fn test_stats_merge() {
        let mut total = CompareStats {
            dirs_paired: 1,
            files_compared: 2,
            size_rejections: 0,
            bytes_read: 10,
            source_only: 1,
        };
        total.merge(&CompareStats {
            dirs_paired: 2,
            files_compared: 1,
            size_rejections: 3,
            bytes_read: 5,
            source_only: 0,
        });
        assert_eq!(total.dirs_paired, 3);
        assert_eq!(total.files_compared, 3);
        assert_eq!(total.size_rejections, 3);
        assert_eq!(total.bytes_read, 15);
        assert_eq!(total.source_only, 1);
    }
}
