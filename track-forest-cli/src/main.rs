//! Track Forest CLI Application
//!
//! Command-line interface for the track-forest library. It adds:
//! - Event file selection via flags or a TOML configuration file
//! - Threshold overrides for the pruning policy
//! - Compact or pretty JSON output to stdout or a file

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use track_forest::{build_forest, EventFile, TrackNode};

mod config;

/// Track Forest - build pruned particle-track trees from event files
#[derive(Parser, Debug)]
#[command(name = "track-forest-cli")]
#[command(about = "Build pruned particle-track trees from JSON event files", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the JSON event file to process
    #[arg(short, long, value_name = "FILE")]
    event: Option<PathBuf>,

    /// Output file for the forest JSON (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep threshold for photons, electrons and positrons, in MeV
    #[arg(long, value_name = "MEV")]
    em_threshold: Option<f64>,

    /// Keep threshold for nucleons and nuclei, in MeV
    #[arg(long, value_name = "MEV")]
    nucleon_threshold: Option<f64>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Track Forest CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using library v{}", track_forest::VERSION);

    // Load the config file when given; command-line flags override it
    let file_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let event_path = args.event.clone().or(file_config.input.event_file.clone());
    let Some(event_path) = event_path else {
        // No input - show help
        println!("Track Forest - No event file specified");
        println!("\nQuick Start:");
        println!("  track-forest-cli --event event.json");
        println!("  track-forest-cli --event event.json --pretty --output forest.json");
        println!("\nFor file-based configuration:");
        println!("  track-forest-cli --config config.toml");
        println!("\nUse --help for more options");
        return Ok(());
    };

    let mut policy = file_config.prune;
    if let Some(mev) = args.em_threshold {
        policy = policy.with_em_threshold(mev);
    }
    if let Some(mev) = args.nucleon_threshold {
        policy = policy.with_nucleon_threshold(mev);
    }
    log::debug!(
        "Pruning thresholds: em {} MeV, nucleon {} MeV",
        policy.em_threshold_mev,
        policy.nucleon_threshold_mev
    );

    let event = EventFile::read(&event_path)
        .with_context(|| format!("Failed to load event file: {:?}", event_path))?;

    let forest = build_forest(&event.tracks, &policy)
        .with_context(|| format!("Failed to resolve genealogy in {:?}", event_path))?;

    let pretty = args.pretty || file_config.output.pretty;
    let document = if pretty {
        serde_json::to_string_pretty(&forest)?
    } else {
        serde_json::to_string(&forest)?
    };

    match args.output.clone().or(file_config.output.path.clone()) {
        Some(path) => {
            fs::write(&path, &document)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            log::info!("Forest written to {:?}", path);
        }
        None => println!("{}", document),
    }

    log::info!(
        "Kept {} of {} tracks in {} trees",
        count_nodes(&forest),
        event.len(),
        forest.len()
    );

    Ok(())
}

/// Total nodes in the serialized forest
fn count_nodes(nodes: &[TrackNode]) -> usize {
    nodes.iter().map(|node| 1 + count_nodes(&node.children)).sum()
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
