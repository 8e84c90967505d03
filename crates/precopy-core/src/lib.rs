//! Core types for precopy.
//!
//! This crate provides the data model shared by the comparison engine and
//! the command-line front end: directory entry snapshots, divergence notes,
//! the aggregated report and its verdict, configuration, and errors.

mod config;
mod entry;
mod error;
mod note;
mod report;

pub use config::{CheckConfig, CheckConfigBuilder, CheckConfigBuilderError, DEFAULT_CHUNK_SIZE};
pub use entry::{DirectoryEntry, EntryKind, EntryPair, PairClass};
pub use error::CheckError;
pub use note::{DivergenceKind, DivergenceNote};
pub use report::{CheckReport, CompareStats, Verdict};
