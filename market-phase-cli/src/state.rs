//! Load/export session state
//!
//! Holds the last successfully loaded snapshot. A failed load leaves the
//! previous result untouched, and export refuses to run without loaded
//! records.

use anyhow::{bail, Context, Result};
use market_phase_reconciler::{LoadedSnapshot, SnapshotLoader};
use std::path::{Path, PathBuf};

pub struct Session {
    loader: SnapshotLoader,
    loaded: Option<LoadedSnapshot>,
}

impl Session {
    pub fn new(loader: SnapshotLoader) -> Self {
        Self {
            loader,
            loaded: None,
        }
    }

    /// Load the newest snapshot from `input_dir`, replacing the previous load on success
    pub fn load(&mut self, input_dir: &Path) -> Result<&LoadedSnapshot> {
        let loaded = self
            .loader
            .load(input_dir)
            .with_context(|| format!("Error loading data from {:?}", input_dir))?;

        Ok(self.loaded.insert(loaded))
    }

    /// Export the loaded records into `output_dir`
    pub fn export(&self, output_dir: &Path) -> Result<PathBuf> {
        let records = match &self.loaded {
            Some(loaded) if !loaded.is_empty() => &loaded.records,
            _ => bail!("No data to export. Please load data first."),
        };

        self.loader
            .export(records, output_dir)
            .with_context(|| format!("Error exporting data to {:?}", output_dir))
    }

    pub fn loaded(&self) -> Option<&LoadedSnapshot> {
        self.loaded.as_ref()
    }
}
