//! CLI frontend for the Escapade escape-room engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "esc",
    about = "Escapade — a text escape-room engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new game directory with a template room
    Init {
        /// Name of the game directory to create
        name: String,
    },

    /// List all rooms with their status
    Rooms {
        /// Directory containing room .json files (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show detailed information about a room
    Show {
        /// Room id or name (case-insensitive)
        name: String,

        /// Directory containing room .json files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Play a room interactively
    Play {
        /// Room id or name (case-insensitive)
        name: String,

        /// Directory containing room .json files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Progress file path
        #[arg(short, long, default_value = "progress.json")]
        progress: PathBuf,
    },

    /// Show lifetime statistics and achievements
    Progress {
        /// Progress file path
        #[arg(short, long, default_value = "progress.json")]
        progress: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Rooms { dir } => commands::rooms::run(&dir),
        Commands::Show { name, dir } => commands::show::run(&dir, &name),
        Commands::Play {
            name,
            dir,
            progress,
        } => commands::play::run(&dir, &name, &progress),
        Commands::Progress { progress } => commands::progress::run(&progress),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
