//! # Lattice
//!
//! Command-line driver for Project Lattice topology generation.
//!
//! Loads a generation config, applies command-line overrides, runs the
//! pipeline to completion, and prints the resulting topology.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lattice_world::{GenerationConfig, Orchestrator, CONFIG_FILE};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "lattice")]
#[command(about = "Generate seeded region/chunk topologies")]
struct Args {
    /// Config file to load
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Seed string (overrides the config file)
    #[arg(short, long)]
    seed: Option<String>,

    /// Chunks per region side (overrides the config file)
    #[arg(short = 'r', long)]
    region_width: Option<usize>,

    /// Regions per world side (overrides the config file)
    #[arg(short = 'w', long)]
    world_width: Option<usize>,

    /// Print every region as an ASCII map
    #[arg(short, long)]
    print_regions: bool,

    /// Write the default config to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

impl Args {
    fn apply(&self, config: &mut GenerationConfig) {
        if let Some(seed) = &self.seed {
            config.seed.clone_from(seed);
        }
        if let Some(width) = self.region_width {
            config.region_width = width;
        }
        if let Some(width) = self.world_width {
            config.world_width = width;
        }
    }
}

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("lattice=info".parse()?))
        .init();

    let args = Args::parse();
    info!("Lattice {} starting", env!("CARGO_PKG_VERSION"));

    if args.write_default_config {
        GenerationConfig::default()
            .save_to(&args.config)
            .with_context(|| format!("writing {}", args.config.display()))?;
        return Ok(());
    }

    let mut config = GenerationConfig::load_from(&args.config);
    args.apply(&mut config);

    let mut orchestrator = Orchestrator::new(config).context("invalid generation config")?;
    let summary = orchestrator.run().context("generation failed")?;

    println!("{summary}");
    if args.print_regions {
        if let Some(world) = orchestrator.world() {
            for region in world.regions() {
                println!("\nregion {}", region.world_pos());
                print!("{}", region.map().render_ascii());
            }
        }
    }

    Ok(())
}
