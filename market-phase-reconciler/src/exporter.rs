//! Summary export
//!
//! Writes one `pair;SIGNAL` line per record under a fixed header. The output
//! is semicolon-separated and carries only the resolved direction, so it
//! cannot be read back as a snapshot.

use crate::config::ReconcilerConfig;
use crate::types::{Result, SignalRecord};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Export records into `output_dir`, creating the directory if needed
///
/// Returns the path of the written file. A failed write may leave a partial
/// file behind.
pub fn export(
    records: &[SignalRecord],
    output_dir: &Path,
    config: &ReconcilerConfig,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(&config.export_file_name);

    log::info!("Exporting {} signal(s) to {:?}", records.len(), output_path);

    let mut writer = BufWriter::new(File::create(&output_path)?);
    write_summary(records, &mut writer, config)?;
    writer.flush()?;

    Ok(output_path)
}

/// Write the summary to any writer
pub fn write_summary<W: Write>(
    records: &[SignalRecord],
    writer: &mut W,
    config: &ReconcilerConfig,
) -> Result<()> {
    writeln!(writer, "{}", config.export_header)?;
    for record in records {
        writeln!(writer, "{};{}", record.pair, record.output_signal())?;
    }
    Ok(())
}
