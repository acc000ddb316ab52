//! FlightDesk CLI: the main entry point.
//!
//! Commands:
//! - `serve`      : Start the HTTP front door
//! - `ask`        : Run one message (or an interactive session) through the planner loop
//! - `operations` : List the operations the planner can use
//! - `init`       : Write a default config file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "flightdesk",
    about = "FlightDesk — talk to your flight-operations backend",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP front door
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask the planner something
    Ask {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Print the whole run (steps included) as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available operations
    Operations,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask { message, json } => commands::ask::run(message, json).await?,
        Commands::Operations => commands::operations::run()?,
        Commands::Init { force } => commands::init::run(force)?,
    }

    Ok(())
}
