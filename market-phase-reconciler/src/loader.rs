//! Main loader API
//!
//! The [`SnapshotLoader`] wires the pieces together: locate the current and
//! previous snapshot, parse both, reconcile, and export on request.

use crate::config::ReconcilerConfig;
use crate::formats::parse_snapshot;
use crate::locator;
use crate::reconciler::reconcile;
use crate::types::{Result, SignalRecord, SnapshotFile};
use std::path::{Path, PathBuf};

/// Result of one successful load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSnapshot {
    /// Newest snapshot, source of the records
    pub current: SnapshotFile,
    /// Second-newest snapshot, source of the last signals
    pub previous: Option<SnapshotFile>,
    /// Reconciled records, in current snapshot order
    pub records: Vec<SignalRecord>,
}

impl LoadedSnapshot {
    /// One-line description of what was loaded
    pub fn status_line(&self) -> String {
        match &self.previous {
            Some(previous) => format!(
                "Loaded: {} (Previous: {})",
                self.current.name(),
                previous.name()
            ),
            None => format!("Loaded: {} (No previous file)", self.current.name()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Entry point for loading and exporting snapshots
#[derive(Debug, Clone, Default)]
pub struct SnapshotLoader {
    config: ReconcilerConfig,
}

impl SnapshotLoader {
    /// Create a loader with the given configuration
    pub fn new(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Load the newest snapshot in `input_dir` with history from the one before it
    ///
    /// # Example
    /// ```no_run
    /// use market_phase_reconciler::SnapshotLoader;
    /// use std::path::Path;
    ///
    /// let loader = SnapshotLoader::default();
    /// let loaded = loader.load(Path::new("snapshots")).unwrap();
    /// println!("{}", loaded.status_line());
    /// loader.export(&loaded.records, Path::new("out")).unwrap();
    /// ```
    pub fn load(&self, input_dir: &Path) -> Result<LoadedSnapshot> {
        log::info!("Loading snapshots from {:?}", input_dir);

        let pair = locator::locate(input_dir)?;
        let current_records = parse_snapshot(&pair.current.path)?;

        // The producer may have removed the file since the listing
        let previous = pair.previous.filter(|p| p.path.exists());
        let previous_records = match &previous {
            Some(file) => Some(parse_snapshot(&file.path)?),
            None => None,
        };

        let records = reconcile(current_records, previous_records.as_deref());

        let loaded = LoadedSnapshot {
            current: pair.current,
            previous,
            records,
        };
        log::info!("{} ({} record(s))", loaded.status_line(), loaded.records.len());
        Ok(loaded)
    }

    /// Export records into `output_dir`
    pub fn export(&self, records: &[SignalRecord], output_dir: &Path) -> Result<PathBuf> {
        crate::exporter::export(records, output_dir, &self.config)
    }
}
