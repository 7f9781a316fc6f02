use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tickworld_common::ObjectId;
use tickworld_engine::{Engine, EngineConfig};
use tickworld_kernel::{lock, physics, SimObject};
use tickworld_spatial::{Location, Mass, Volume};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tickworld", about = "Fixed-tick 3D simulation kernel")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the scheduler poll interval, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Drop a person onto the ground, stepping the engine by hand
    Drop {
        /// Height of the person's feet above the ground, in metres
        #[arg(long, default_value = "10")]
        height: f64,
        /// Mass of the person, in kilograms
        #[arg(long, default_value = "70")]
        mass: f64,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "200")]
        ticks: u64,
        /// Length of one tick, in milliseconds
        #[arg(long, default_value = "15")]
        tick_ms: u64,
    },
    /// Run the threaded engine against the wall clock
    Run {
        /// How long to run, in seconds
        #[arg(short, long, default_value = "3")]
        seconds: u64,
        /// Height the person starts falling from, in metres
        #[arg(long, default_value = "20")]
        height: f64,
    },
}

/// Person-sized box: 0.2 m x 1.7 m x 0.2 m.
fn person(location: Location, kilograms: f64) -> anyhow::Result<SimObject> {
    Ok(SimObject::realistic(location)
        .with_mass(Mass::kilograms(kilograms)?)
        .with_volume(Volume::new(0.2, 1.7, 0.2)?))
}

/// Add a ground slab and a person whose feet are `height` above it.
fn populate(engine: &Engine, height: f64, kilograms: f64) -> anyhow::Result<ObjectId> {
    let world_id = engine.create_world("earth")?;
    let state = engine.state();
    let mut state = lock(&state);
    let world = state
        .world_mut(world_id)
        .context("world vanished after creation")?;
    let top = world.ground_level();
    let ground = SimObject::immovable(Location::new(world_id, 0.0, top - 1.0, 0.0))
        .with_volume(Volume::new(100.0, 2.0, 100.0)?);
    world.add_object(ground)?;
    let body = person(Location::new(world_id, 0.0, top + height + 0.85, 0.0), kilograms)?;
    let id = body.id();
    world.add_object(body)?;
    Ok(id)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(ms) = cli.poll_interval_ms {
        config.poll_interval_ms = ms;
        config.validate()?;
    }

    match cli.command {
        Commands::Info => {
            println!("tickworld v{}", env!("CARGO_PKG_VERSION"));
            println!("engine: {}", tickworld_engine::crate_info());
            println!("events: {}", tickworld_events::crate_info());
            println!("scheduler: {}", tickworld_scheduler::crate_info());
            println!("physics: {}", tickworld_physics::crate_info());
            println!("render: {}", tickworld_render::crate_info());
            println!(
                "config: poll={}ms restitution={} gravity={} air_density={}",
                config.poll_interval_ms,
                config.restitution,
                config.world.gravity,
                config.world.air_density
            );
        }
        Commands::Drop {
            height,
            mass,
            ticks,
            tick_ms,
        } => {
            println!("Drop: height={height}m mass={mass}kg ticks={ticks} tick={tick_ms}ms");
            let mut engine = Engine::headless(config)?;
            let id = populate(&engine, height, mass)?;
            let tick = Duration::from_millis(tick_ms);
            let report_every = (ticks / 10).max(1);

            for n in 1..=ticks {
                engine.step(tick)?;
                if n % report_every == 0 || n == ticks {
                    let state = engine.state();
                    let state = lock(&state);
                    let Some((world, body)) = state
                        .worlds()
                        .iter()
                        .find_map(|w| w.object(id).map(|o| (w, o)))
                    else {
                        anyhow::bail!("person left the world");
                    };
                    println!(
                        "  tick {n:>5}: y={:>8.3} vy={:>8.3} kinetic={:>10.1}J potential={:>10.1}J",
                        body.location().y() - 0.85,
                        body.vector().y(),
                        physics::kinetic_energy(body),
                        physics::potential_energy(world, body)
                    );
                }
            }
            print!("{}", engine.last_frame());
        }
        Commands::Run { seconds, height } => {
            let mut engine = Engine::new(config)?;
            populate(&engine, height, 70.0)?;
            engine.start()?;
            tracing::info!(seconds, "engine running");
            std::thread::sleep(Duration::from_secs(seconds));
            engine.stop()?;
            print!("{}", engine.last_frame());
        }
    }

    Ok(())
}
