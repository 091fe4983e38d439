//! # opendata-sync
//!
//! Pair an AK4 and an AK7 event collection and write one compact record per event.
//!
//! ```bash
//! opendata-sync --ak4 ak4.toon --ak7 ak7.toon -o OpenDataTree.toon
//! opendata-sync --ak4 ak4.toon --ak7 ak7.toon --config sync.toon --max-events 100000
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{LevelFilter, info};

use opendata_sync::storage::{ToonSink, read_collection};
use opendata_sync::{PrimaryEvent, SecondaryEvent, SyncConfig, SyncError, synchronize};

/// AK4/AK7 open-data tree producer
#[derive(Parser, Debug)]
#[command(name = "opendata-sync")]
#[command(about = "Synchronize AK4 and AK7 jet collections into one record per event")]
struct Args {
    /// Primary (AK4) collection
    #[arg(long)]
    ak4: PathBuf,

    /// Secondary (AK7) collection
    #[arg(long)]
    ak7: PathBuf,

    /// Output file
    #[arg(long, short = 'o', default_value = "./OpenDataTree.toon")]
    output: PathBuf,

    /// TOON file with run settings; flags below override it
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Primary jet pT threshold
    #[arg(long)]
    min_pt: Option<f64>,

    /// Only process the first N primary entries
    #[arg(long, short = 'n')]
    max_events: Option<u64>,

    /// Treat input as simulation (generator jets, no triggers)
    #[arg(long)]
    mc: bool,

    /// Debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn run(args: Args) -> Result<(), SyncError> {
    let mut config = match &args.config {
        Some(path) => SyncConfig::from_toon_file(path)?,
        None => SyncConfig::default(),
    };
    if let Some(min_pt) = args.min_pt {
        config.min_pt = min_pt;
    }
    if args.max_events.is_some() {
        config.max_events = args.max_events;
    }
    config.is_mc |= args.mc;

    let mut primary = read_collection::<PrimaryEvent>(&args.ak4)?;
    let mut secondary = read_collection::<SecondaryEvent>(&args.ak7)?;
    let mut sink = ToonSink::create(&args.output);
    info!("output will be saved in file: {}", sink.path().display());

    let summary = synchronize(config, &mut primary, &mut secondary, &mut sink)?;
    info!(
        "{} secondary entries over {} runs indexed, {} canonical triggers",
        summary.secondary_indexed, summary.runs_indexed, summary.canonical_triggers
    );
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(err) = run(args) {
        eprintln!("fatal: {err}");
        process::exit(1);
    }
}
