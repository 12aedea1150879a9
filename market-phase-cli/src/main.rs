//! Market Phase CLI Application
//!
//! Command-line front end for the market-phase-reconciler library.
//! It supplies the input and output directories and adds:
//! - Remembered directories (market-phase.toml)
//! - A terminal table with BUY/SELL/NEUTRAL badges
//! - JSON output of the loaded records
//! - Export of last_known_signals.csv

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod config;
mod report;
mod state;

use config::AppConfig;
use state::Session;

/// Market Phase Analyzer - Reconcile and export market signal snapshots
#[derive(Parser, Debug)]
#[command(name = "market-phase-cli")]
#[command(about = "Reconcile market phase snapshots and export last known signals", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "market-phase.toml")]
    config: PathBuf,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the newest snapshot and show its signals
    Load {
        /// Directory holding the snapshot files
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Store the directory in the config file
        #[arg(long)]
        remember: bool,
    },

    /// Load the newest snapshot and export last_known_signals.csv
    Export {
        /// Directory holding the snapshot files
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        /// Directory to write the summary into
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Store the directories in the config file
        #[arg(long)]
        remember: bool,
    },

    /// Describe what this tool does
    Info,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Market Phase CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using reconciler library v{}", market_phase_reconciler::VERSION);

    let mut app_config = config::load_config(&args.config)?;
    let mut session = Session::new(market_phase_reconciler::SnapshotLoader::new(
        app_config.reconciler_config(),
    ));

    match &args.command {
        Command::Load { input, json, remember } => {
            let input_dir = resolve_dir(input, &app_config.input.dir, "input")?;
            load_mode(&mut session, &input_dir, *json)?;

            if *remember {
                app_config.input.dir = Some(input_dir);
                config::save_config(&args.config, &app_config)?;
            }
        }
        Command::Export { input, output, remember } => {
            let input_dir = resolve_dir(input, &app_config.input.dir, "input")?;
            let output_dir = resolve_dir(output, &app_config.output.dir, "output")?;
            export_mode(&mut session, &input_dir, &output_dir)?;

            if *remember {
                app_config.input.dir = Some(input_dir);
                app_config.output.dir = Some(output_dir);
                config::save_config(&args.config, &app_config)?;
            }
        }
        Command::Info => info_mode(&app_config),
    }

    Ok(())
}

/// Pick the directory from the command line, then from the config file
fn resolve_dir(arg: &Option<PathBuf>, remembered: &Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    arg.clone()
        .or_else(|| remembered.clone())
        .filter(|p| !p.as_os_str().is_empty())
        .with_context(|| format!("Please select an {} directory.", kind))
}

/// Load mode - locate, parse and reconcile, then print the records
fn load_mode(session: &mut Session, input_dir: &Path, json: bool) -> Result<()> {
    let loaded = session.load(input_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&loaded.records)?);
        return Ok(());
    }

    let modified = loaded
        .current
        .modified
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S");

    println!("{}", loaded.status_line());
    println!("Snapshot modified: {}\n", modified);

    if loaded.is_empty() {
        println!("No signals found in {}", loaded.current.name());
    } else {
        print!("{}", report::render_table(&loaded.records));
    }

    Ok(())
}

/// Export mode - load, then write the summary file
fn export_mode(session: &mut Session, input_dir: &Path, output_dir: &Path) -> Result<()> {
    let status = session.load(input_dir)?.status_line();
    println!("{}", status);

    let written = session.export(output_dir)?;
    let count = session.loaded().map_or(0, |loaded| loaded.records.len());
    println!("✓ Exported {} signal(s) successfully to {}", count, written.display());

    Ok(())
}

fn info_mode(app_config: &AppConfig) {
    let export = app_config.reconciler_config();

    println!("═══════════════════════════════════════════════");
    println!("  Market Phase Analyzer");
    println!("═══════════════════════════════════════════════\n");
    println!("Evaluates market phase snapshots written by an external analysis");
    println!("process. The newest file in the input directory supplies today's");
    println!("phases, the second-newest supplies each pair's last signal.");
    println!("\nExport writes {} into the output directory.", export.export_file_name);
    println!("\nQuick Start:");
    println!("  market-phase-cli load --input ./snapshots");
    println!("  market-phase-cli export --input ./snapshots --output ./out --remember");
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
