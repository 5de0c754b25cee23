mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rombo",
    version,
    about = "Chemical storage compatibility checks for GHS / NFPA 704 inventories"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the hazard tags of every item in an inventory
    Classify {
        /// Inventory file (.json or .xlsx)
        inventory: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Check whether two items of an inventory may be stored together
    Check {
        /// Inventory file (.json or .xlsx)
        inventory: PathBuf,

        /// First item, by id or product name
        a: String,

        /// Second item, by id or product name
        b: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show every decision step
        #[arg(long)]
        trace: bool,
    },
    /// Build the pairwise compatibility matrix of an inventory
    Matrix {
        /// Inventory file (.json or .xlsx)
        inventory: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// List only DANGER and CAUTION pairs
        #[arg(long)]
        conflicts: bool,
    },
    /// List the compatibility rules in precedence order
    Rules,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Classify { inventory, output } => commands::classify::run(&inventory, &output),
        Commands::Check {
            inventory,
            a,
            b,
            output,
            trace,
        } => commands::check::run(&inventory, &a, &b, &output, trace),
        Commands::Matrix {
            inventory,
            output,
            conflicts,
        } => commands::matrix::run(&inventory, &output, conflicts),
        Commands::Rules => commands::rules::list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
