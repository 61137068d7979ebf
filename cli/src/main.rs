//! # safebite CLI
//!
//! Command-line front end for the SafeBite dashboard shell.
//!
//! ## Usage
//!
//! - `safebite` - Start the interactive shell
//! - `safebite navigate dashboard devices` - Run a navigation script headlessly
//! - `safebite pages` - List configured pages
//! - `safebite login --token T --role admin --username U` - Store a session
//! - `safebite fetch /devices` - Query the backend with the stored session

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod dashboard;
mod output;

use commands::{
    fetch_command, login_command, logout_command, navigate_command, open_store, pages_command,
    shell_command, whoami_command,
};
use config::CliConfigLoader;

/// safebite - Headless SafeBite dashboard shell
#[derive(Parser)]
#[command(name = "safebite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Navigate the SafeBite food-safety dashboard from the terminal")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend API base URL override
    #[arg(long, env = "SAFEBITE_API_URL", global = true)]
    api_url: Option<String>,

    /// Height of the content viewport in rows
    #[arg(long, global = true)]
    viewport_rows: Option<u16>,

    /// Session file (defaults to the user data directory)
    #[arg(long, env = "SAFEBITE_SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured pages
    Pages,

    /// Navigate through pages in order and print the result
    Navigate {
        /// Pages to visit; the default page when empty
        pages: Vec<String>,

        /// Scroll every visited page to this row before moving on
        #[arg(long)]
        scroll: Option<u32>,

        /// Print navigation state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive shell
    Shell,

    /// Store a session token
    Login {
        #[arg(long)]
        token: String,

        /// admin or user
        #[arg(long, default_value = "user")]
        role: String,

        #[arg(long)]
        username: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// GET a backend path with the stored session
    Fetch {
        /// Path relative to the API base URL, e.g. /devices
        path: String,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(api_url) = &cli.api_url {
        loader = loader.with_api_url_override(api_url.clone());
    }

    if let Some(rows) = cli.viewport_rows {
        loader = loader.with_viewport_rows_override(rows);
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout is reserved for command output
    safebite_core::init_tracing(cli.verbose);

    let config_loader = build_config_loader(&cli);
    let store = open_store(cli.session_file.clone())?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Pages => pages_command(config_loader).await,
        Commands::Navigate {
            pages,
            scroll,
            json,
        } => navigate_command(config_loader, store, pages, scroll, json).await,
        Commands::Shell => shell_command(config_loader, store, cli.viewport_rows.is_some()).await,
        Commands::Login {
            token,
            role,
            username,
        } => login_command(store, token, role, username).await,
        Commands::Logout => logout_command(store).await,
        Commands::Whoami => whoami_command(store).await,
        Commands::Fetch { path } => fetch_command(config_loader, store, path).await,
    }
}
