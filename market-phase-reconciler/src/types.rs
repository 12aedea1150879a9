//! Core types for the market phase reconciler
//!
//! This module defines the record shape shared by both snapshot dialects, the
//! classifications derived from it, and the error type used throughout the
//! library. Records carry plain strings exactly as they appeared in the
//! snapshot; classification happens on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Result type for reconciler operations
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Signal string carried forward for a bullish previous snapshot
pub const BUY_SIGNAL: &str = "Buy Signal";
/// Signal string carried forward for a bearish previous snapshot
pub const SELL_SIGNAL: &str = "Sell Signal";
/// Signal string carried forward when the previous snapshot had no direction
pub const NEUTRAL_SIGNAL: &str = "Neutral Signal";
/// Last signal for pairs missing from the previous snapshot
pub const NO_HISTORY: &str = "N/A";

/// Errors that can occur while locating, parsing or exporting snapshots
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Invalid directory: {0:?}")]
    InvalidDirectory(PathBuf),

    #[error("No files found in input directory: {0:?}")]
    NoFilesFound(PathBuf),

    #[error("Failed to parse CSV file {path:?}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("Could not parse line {line}: {content}")]
    MalformedRow { line: usize, content: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One row of a snapshot file
///
/// Every field is always present; a value missing from the file is stored as
/// an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Instrument identifier as written in the snapshot (e.g. "EUR/USD")
    pub pair: String,
    /// Externally computed sentiment (Bullish/Bearish/anything else)
    pub market_phase: String,
    /// Carried-forward signal from the previous snapshot
    pub last_signal: String,
    /// Opaque date string, never parsed
    pub date: String,
    /// Free-text explanation from the analysis process
    pub source_summary: String,
}

impl SignalRecord {
    /// Create a record with an empty last signal
    pub fn new(
        pair: impl Into<String>,
        market_phase: impl Into<String>,
        date: impl Into<String>,
        source_summary: impl Into<String>,
    ) -> Self {
        Self {
            pair: pair.into(),
            market_phase: market_phase.into(),
            last_signal: String::new(),
            date: date.into(),
            source_summary: source_summary.into(),
        }
    }

    /// Return a copy of this record with the given last signal
    pub fn with_last_signal(mut self, last_signal: impl Into<String>) -> Self {
        self.last_signal = last_signal.into();
        self
    }

    /// Normalized pair key used for cross-snapshot matching
    pub fn key(&self) -> String {
        normalize_pair(&self.pair)
    }

    /// Classified market phase
    pub fn phase(&self) -> MarketPhase {
        MarketPhase::classify(&self.market_phase)
    }

    /// Signal string this record contributes as history for the next snapshot
    ///
    /// A directional phase wins; otherwise the record's own last signal is
    /// passed on verbatim, falling back to "Neutral Signal".
    pub fn history_signal(&self) -> String {
        match self.phase() {
            MarketPhase::Bullish => BUY_SIGNAL.to_string(),
            MarketPhase::Bearish => SELL_SIGNAL.to_string(),
            MarketPhase::Neutral if !self.last_signal.is_empty() => self.last_signal.clone(),
            MarketPhase::Neutral => NEUTRAL_SIGNAL.to_string(),
        }
    }

    /// Signal written to the exported summary
    pub fn output_signal(&self) -> OutputSignal {
        match self.phase() {
            MarketPhase::Bullish => OutputSignal::Buy,
            MarketPhase::Bearish => OutputSignal::Sell,
            MarketPhase::Neutral => {
                if self.last_signal.eq_ignore_ascii_case(BUY_SIGNAL) {
                    OutputSignal::Buy
                } else if self.last_signal.eq_ignore_ascii_case(SELL_SIGNAL) {
                    OutputSignal::Sell
                } else {
                    OutputSignal::Neutral
                }
            }
        }
    }
}

/// Normalize a pair name for comparison
///
/// Trims, upper-cases and removes all whitespace, so "EUR USD", "eurusd"
/// and " EURUSD " all map to "EURUSD".
pub fn normalize_pair(pair: &str) -> String {
    pair.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Market phase classification of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketPhase {
    Bullish,
    Bearish,
    /// Any other value, including an empty one
    Neutral,
}

impl MarketPhase {
    /// Classify a raw phase string (case-insensitive)
    pub fn classify(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("Bullish") {
            MarketPhase::Bullish
        } else if raw.eq_ignore_ascii_case("Bearish") {
            MarketPhase::Bearish
        } else {
            MarketPhase::Neutral
        }
    }
}

impl fmt::Display for MarketPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketPhase::Bullish => write!(f, "Bullish"),
            MarketPhase::Bearish => write!(f, "Bearish"),
            MarketPhase::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Directional signal written to the summary file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputSignal {
    Buy,
    Sell,
    Neutral,
}

impl fmt::Display for OutputSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSignal::Buy => write!(f, "BUY"),
            OutputSignal::Sell => write!(f, "SELL"),
            OutputSignal::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// A regular file found in the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Last modification time
    pub modified: Timestamp,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified: DateTime::<Utc>::from(modified),
        }
    }

    /// File name for display, falling back to the full path
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
