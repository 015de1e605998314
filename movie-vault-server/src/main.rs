//! movie-vault server
//!
//! Serves the movie catalog over HTTP, backed by SQLite.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use movie_vault_server::config::Config;
use movie_vault_server::error::ServerError;
use movie_vault_server::{logging, server};

#[derive(Parser)]
#[command(name = "movie-vault")]
#[command(about = "Movie catalog HTTP service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "CONFIG_PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create the database schema and exit
    InitDb,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ServerError> {
    let path = cli.config.ok_or_else(|| {
        ServerError::config("configuration file path must be provided via CONFIG_PATH or --config")
    })?;
    let config = Config::load(&path)?;
    logging::init(&config)?;

    let repo = server::open_repository(&config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::InitDb => {
            log::info!("Schema ready at {}", repo.path().display());
            Ok(())
        }
        Commands::Serve => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|e| ServerError::runtime(e.to_string()))?;
            rt.block_on(server::serve(&config, repo))
        }
    }
}
