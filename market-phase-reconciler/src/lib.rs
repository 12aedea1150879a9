//! Market Phase Reconciler Library
//!
//! Reads market signal snapshots produced by an external analysis process,
//! carries each pair's previous signal forward, and exports a compact summary.
//!
//! # Architecture
//!
//! - Picks the newest and second-newest file of an input directory by
//!   modification time
//! - Parses two CSV dialects (headered and simple) into one record shape
//! - Fills each record's last signal from the previous snapshot, matching
//!   pairs case- and whitespace-insensitively
//! - Writes a `pair;SIGNAL` summary file on demand
//!
//! The library does NOT:
//! - Compute market phases (they arrive in the snapshot)
//! - Keep state between loads
//! - Render anything
//!
//! Presentation lives in the application layer (market-phase-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use market_phase_reconciler::{ReconcilerConfig, SnapshotLoader};
//! use std::path::Path;
//!
//! let loader = SnapshotLoader::new(ReconcilerConfig::new());
//! let loaded = loader.load(Path::new("snapshots")).unwrap();
//!
//! for record in &loaded.records {
//!     println!("{}: {} (last: {})", record.pair, record.phase(), record.last_signal);
//! }
//!
//! let written = loader.export(&loaded.records, Path::new("out")).unwrap();
//! println!("Exported to {:?}", written);
//! ```

// Public modules
pub mod config;
pub mod exporter;
pub mod formats;
pub mod loader;
pub mod locator;
pub mod reconciler;
pub mod types;

// Re-export main types for convenience
pub use config::ReconcilerConfig;
pub use formats::{detect_dialect, parse_snapshot, SnapshotDialect};
pub use loader::{LoadedSnapshot, SnapshotLoader};
pub use locator::{find_latest, find_previous, list_candidates, SnapshotPair};
pub use reconciler::reconcile;
pub use types::{
    normalize_pair, MarketPhase, OutputSignal, ReconcileError, Result, SignalRecord,
    SnapshotFile, Timestamp,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
