//! Ribbon CLI: simulation, benchmarking, and debugging.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ribbon")]
#[command(version, about = "Ribbon: planar mass-spring cloth strip with tearing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation for a fixed number of ticks.
    Simulate {
        /// Path to simulation config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of ticks to run.
        #[arg(short, long, default_value_t = 250)]
        ticks: u32,

        /// Write a state snapshot here when the run ends.
        #[arg(long)]
        snapshot: Option<String>,

        /// Write every simulation event here as JSON lines.
        #[arg(long)]
        events: Option<String>,
    },

    /// Run benchmark scenarios.
    Benchmark {
        /// Which scenario to run (free_fall, sphere_sweep, ground_drop, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a simulation config.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            ticks,
            snapshot,
            events,
        } => commands::simulate(
            config.as_deref(),
            ticks,
            snapshot.as_deref(),
            events.as_deref(),
        ),
        Commands::Benchmark { scenario, output } => commands::benchmark(&scenario, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
