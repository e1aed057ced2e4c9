//! Headless frontend for the Kindling survival simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use kd_simulation::Action;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kd",
    about = "Kindling: run and inspect the survival simulation without a window",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log filter for diagnostics on stderr (overrides RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted simulation and report the final state
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,

        /// RNG seed for deterministic placement and respawn
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Seconds per tick (clamped to 0.06)
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Built-in tuning profile
        #[arg(short, long, default_value = "classic", conflicts_with = "profile_file")]
        profile: String,

        /// Load the tuning profile from a JSON file
        #[arg(long)]
        profile_file: Option<PathBuf>,

        /// Actions held for the whole run, comma separated (e.g. right,chop)
        #[arg(long, value_delimiter = ',')]
        hold: Vec<Action>,

        /// Press craft on every n-th tick, releasing it in between
        #[arg(long)]
        craft_every: Option<u64>,

        /// Show all events (not just the notable ones)
        #[arg(short, long)]
        verbose: bool,

        /// Print the result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// List the built-in tuning profiles
    Profiles,

    /// Print a built-in tuning profile as JSON
    ExportProfile {
        /// Profile name
        name: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    let result = match cli.command {
        Commands::Simulate {
            ticks,
            seed,
            dt,
            profile,
            profile_file,
            hold,
            craft_every,
            verbose,
            json,
        } => commands::load_profile(&profile, profile_file.as_deref()).and_then(|profile| {
            commands::simulate::run(&commands::simulate::SimulateArgs {
                ticks,
                seed,
                dt,
                profile,
                hold,
                craft_every,
                verbose,
                json,
            })
        }),
        Commands::Profiles => commands::profiles::run(),
        Commands::ExportProfile { name, output } => {
            commands::export_profile::run(&name, output.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
