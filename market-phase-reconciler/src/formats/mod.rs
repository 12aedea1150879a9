//! Snapshot file parsers
//!
//! Two CSV dialects are in circulation:
//! - **Headered**: a header row naming Pair, Market_Phase, Last_Signal, Date and
//!   Source_Summary, bound by column name.
//! - **Simple**: `PAIR,SENTIMENT,DATE,"DETAILS"` lines, with or without a header.
//!
//! The dialect is chosen from the first line of the file only.

use crate::types::{Result, SignalRecord};
use std::path::Path;

pub mod headered;
pub mod simple;

/// Snapshot CSV dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotDialect {
    /// Header-named columns, parsed with a CSV reader
    Headered,
    /// Fixed four-field lines, parsed line by line
    Simple,
}

/// Decide the dialect from the first line of a snapshot
pub fn detect_dialect(first_line: &str) -> SnapshotDialect {
    let lower = first_line.to_lowercase();
    if lower.contains("pair") && lower.contains("market_phase") {
        SnapshotDialect::Headered
    } else {
        SnapshotDialect::Simple
    }
}

/// Parse a snapshot file into signal records
pub fn parse_snapshot(path: &Path) -> Result<Vec<SignalRecord>> {
    log::info!("Parsing snapshot: {:?}", path);

    let content = read_snapshot_text(path)?;
    let records = parse_snapshot_str(&content, path)?;

    log::info!("Parsed {} record(s) from {:?}", records.len(), path);
    Ok(records)
}

/// Parse snapshot content that was already read into memory
///
/// `path` is only used for error messages.
pub fn parse_snapshot_str(content: &str, path: &Path) -> Result<Vec<SignalRecord>> {
    let first_line = content.lines().next().unwrap_or("");

    match detect_dialect(first_line) {
        SnapshotDialect::Headered => {
            log::debug!("Detected headered snapshot dialect");
            headered::parse(content, path)
        }
        SnapshotDialect::Simple => {
            log::debug!("Detected simple snapshot dialect");
            Ok(simple::parse(content))
        }
    }
}

/// Read a snapshot as text
///
/// Snapshots written by Windows tooling are not always UTF-8; those are
/// decoded as Latin-1.
fn read_snapshot_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            log::warn!("Snapshot {:?} is not UTF-8, trying Latin-1 encoding", path);
            Ok(e.into_bytes().iter().map(|&b| b as char).collect())
        }
    }
}
