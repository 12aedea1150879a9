//! Configuration loading and saving
//!
//! Remembers the input and output directories between runs and lets the
//! export file name and header be overridden.

use anyhow::{Context, Result};
use market_phase_reconciler::ReconcilerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from market-phase.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InputConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExportConfig {
    pub file_name: Option<String>,
    pub header: Option<String>,
}

impl AppConfig {
    /// Library configuration with any export overrides applied
    pub fn reconciler_config(&self) -> ReconcilerConfig {
        let mut config = ReconcilerConfig::new();
        if let Some(name) = &self.export.file_name {
            config = config.with_export_file_name(name.clone());
        }
        if let Some(header) = &self.export.header {
            config = config.with_export_header(header.clone());
        }
        config
    }
}

/// Load configuration from a TOML file
///
/// A missing file is not an error; defaults are used instead.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        log::debug!("No config file at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Write configuration back to a TOML file
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::debug!("Saved config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            dir = "/data/snapshots"

            [output]
            dir = "/data/out"

            [export]
            header = "Pair;Signal"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.dir, Some(PathBuf::from("/data/snapshots")));
        assert_eq!(config.output.dir, Some(PathBuf::from("/data/out")));

        let reconciler = config.reconciler_config();
        assert_eq!(reconciler.export_header, "Pair;Signal");
        assert_eq!(reconciler.export_file_name, "last_known_signals.csv");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.reconciler_config(), ReconcilerConfig::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("market-phase.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market-phase.toml");

        let mut config = AppConfig::default();
        config.input.dir = Some(PathBuf::from("/data/in"));
        config.export.file_name = Some("signals.csv".to_string());

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[input\ndir = 3").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
