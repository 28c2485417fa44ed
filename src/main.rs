//! Theater COA - headless runner
//!
//! Drives the engine without a rendering surface: either as fast as possible
//! for a fixed number of ticks, or in real time from a fixed-rate timer.
//! Prints the final snapshot as JSON or a text summary.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

use theater_coa::control::{ControlInputs, Simulation, SimulationEvent};
use theater_coa::core::config::{load_config, EngineConfig, ExplorationMode};
use theater_coa::core::error::Result;
use theater_coa::policy::{Logistics, Policy, Roe};
use theater_coa::steering::Strategy;
use theater_coa::world::SimMode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    MultiTheater,
    Standard,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoeArg {
    Defensive,
    Standard,
    Aggressive,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Headless COA runner - simulate theaters and rank courses of action
#[derive(Parser, Debug)]
#[command(name = "theater-coa")]
#[command(about = "Run the blue/red theater simulation and print the COA leaderboard")]
struct Args {
    /// World layout
    #[arg(long, value_enum, default_value = "multi-theater")]
    mode: ModeArg,

    /// Number of frames to run (ignored with --realtime)
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Frames per second of wall time
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Simulation speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config TOML (defaults built in)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Steering strategy when the explorer is off; unknown names mean "direct"
    #[arg(long, default_value = "direct")]
    strategy: String,

    /// Disable the COA explorer
    #[arg(long)]
    no_explore: bool,

    /// Score a random strategy every tick instead of switching periodically
    #[arg(long)]
    continuous: bool,

    /// Rules of engagement
    #[arg(long, value_enum, default_value = "standard")]
    roe: RoeArg,

    /// Committed force level (0-100)
    #[arg(long, default_value_t = 75.0)]
    force_level: f64,

    /// Comms reliability (0-100)
    #[arg(long, default_value_t = 85.0)]
    comms: f64,

    /// Supply rate (0-100)
    #[arg(long, default_value_t = 80.0)]
    supply: f64,

    /// Transport capacity (0-100)
    #[arg(long, default_value_t = 75.0)]
    transport: f64,

    /// Pace frames from a real-time timer until Ctrl-C or exploration halts
    #[arg(long)]
    realtime: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log every simulation event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("theater_coa=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if args.continuous {
        config.exploration_mode = ExplorationMode::Continuous;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let inputs = ControlInputs {
        mode: match args.mode {
            ModeArg::MultiTheater => SimMode::MultiTheater,
            ModeArg::Standard => SimMode::Standard,
        },
        policy: Policy {
            force_level: args.force_level,
            roe: match args.roe {
                RoeArg::Defensive => Roe::Defensive,
                RoeArg::Standard => Roe::Standard,
                RoeArg::Aggressive => Roe::Aggressive,
            },
            ..Policy::default()
        },
        logistics: Logistics {
            supply_rate: args.supply,
            comms_reliability: args.comms,
            transport_capacity: args.transport,
            ..Logistics::default()
        },
        speed: args.speed,
        strategy: Strategy::parse(&args.strategy),
        exploring: !args.no_explore,
    };

    tracing::info!(
        "Theater COA starting: mode={}, seed={}, exploration={:?}",
        inputs.mode,
        seed,
        config.exploration_mode
    );

    let mut sim = Simulation::with_inputs(config, inputs, seed)?;
    let frame_dt = 1.0 / args.fps.max(1) as f64;

    if args.realtime {
        run_realtime(&mut sim, frame_dt, args.verbose).await;
    } else {
        for _ in 0..args.ticks {
            let events = sim.frame(frame_dt);
            log_events(&events, args.verbose);
            if !sim.is_running() {
                break;
            }
        }
    }

    let snapshot = sim.snapshot();
    match args.format {
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
        OutputFormat::Text => {
            println!("{}", snapshot.summary());
            println!("\n--- Top COAs ---");
            for (rank, record) in snapshot.leaderboard.iter().take(10).enumerate() {
                println!(
                    "{:>2}. {:<13} {:>6.1}  @ {:.1}s",
                    rank + 1,
                    record.strategy.label(),
                    record.score,
                    record.evaluated_at
                );
            }
        }
    }

    Ok(())
}

/// One frame per timer tick, measuring real elapsed time between frames.
/// Each frame completes before the next tick is awaited.
async fn run_realtime(sim: &mut Simulation, frame_dt: f64, verbose: bool) {
    let mut interval = tokio::time::interval(Duration::from_secs_f64(frame_dt));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Instant::now();
                let events = sim.frame(now.duration_since(last).as_secs_f64());
                last = now;
                log_events(&events, verbose);
                if !sim.is_running() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                sim.pause();
                tracing::info!("Paused at {:.1}s", sim.elapsed());
                break;
            }
        }
    }
}

fn log_events(events: &[SimulationEvent], verbose: bool) {
    if !verbose {
        return;
    }
    for event in events {
        match serde_json::to_string(event) {
            Ok(line) => eprintln!("{}", line),
            Err(e) => tracing::warn!("Failed to encode event: {}", e),
        }
    }
}
