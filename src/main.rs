//! Dodge RL entry point
//!
//! Loads settings, runs the simulation headless and reports the result.

use std::path::PathBuf;

use clap::Parser;

use dodge_rl::Settings;
use dodge_rl::platform::{HeadlessShell, NullSink};
use dodge_rl::sim::Simulation;

#[derive(Parser, Debug)]
#[command(name = "dodge-rl", version, about)]
struct Args {
    /// JSON settings file. Missing fields use built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks. Runs until interrupted if omitted.
    #[arg(long)]
    ticks: Option<u64>,

    /// Hold the configured tick rate instead of running flat out
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    settings.validate()?;

    log::info!("Dodge RL starting (seed {})", settings.seed);
    log::debug!("Settings: {:?}", settings);
    if args.ticks.is_none() && !args.realtime {
        log::warn!("No tick limit and no pacing: running until killed");
    }

    let mut shell = HeadlessShell::new(args.ticks, settings.tick_duration(), args.realtime);
    let mut sink = NullSink::default();
    let mut sim = Simulation::new(settings);
    let summary = sim.run(&mut shell, &mut sink);

    summary.log();
    if args.summary {
        println!("{}", summary.to_json()?);
    }

    Ok(())
}
