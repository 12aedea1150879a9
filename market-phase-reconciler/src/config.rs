//! Reconciler configuration types
//!
//! The only tunable part of the core is the shape of the exported summary.
//! Selection, parsing and reconciliation rules are fixed.

use serde::{Deserialize, Serialize};

/// Default file name of the exported summary
pub const DEFAULT_EXPORT_FILE_NAME: &str = "last_known_signals.csv";

/// Default header line of the exported summary
pub const DEFAULT_EXPORT_HEADER: &str = "Waehrungspaar;Letztes_Signal";

/// Configuration for the reconciler library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// File name written inside the output directory
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,

    /// First line of the exported summary
    #[serde(default = "default_export_header")]
    pub export_header: String,
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

fn default_export_header() -> String {
    DEFAULT_EXPORT_HEADER.to_string()
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            export_file_name: default_export_file_name(),
            export_header: default_export_header(),
        }
    }
}

impl ReconcilerConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the exported file name
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    /// Builder method: set the exported header line
    pub fn with_export_header(mut self, header: impl Into<String>) -> Self {
        self.export_header = header.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReconcilerConfig::new();
        assert_eq!(config.export_file_name, "last_known_signals.csv");
        assert_eq!(config.export_header, "Waehrungspaar;Letztes_Signal");
    }

    #[test]
    fn test_builder() {
        let config = ReconcilerConfig::new()
            .with_export_file_name("signals.txt")
            .with_export_header("Pair;Signal");

        assert_eq!(config.export_file_name, "signals.txt");
        assert_eq!(config.export_header, "Pair;Signal");
    }
}
