//! Platter CLI - account layer smoke checks against a live backend.
//!
//! # Usage
//!
//! ```bash
//! # Submit credentials and report the navigation outcome
//! platter-cli login -i user@example.com -p secret
//!
//! # Log in and show the profile record
//! platter-cli profile -i user@example.com -p secret
//!
//! # Request a password reset
//! platter-cli reset-password -i 9876543210
//! ```
//!
//! # Environment Variables
//!
//! - `PLATTER_BACKEND_URL` - Base URL of the backend (required)
//!
//! # Commands
//!
//! - `login` - Submit credentials, report role and destination route
//! - `profile` - Log in and print the profile record
//! - `reset-password` - Fire a password reset request

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "platter-cli")]
#[command(author, version, about = "Platter CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit credentials and report the navigation outcome
    Login {
        /// Email or phone identifier
        #[arg(short, long)]
        identifier: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Log in and show the profile record
    Profile {
        /// Email or phone identifier
        #[arg(short, long)]
        identifier: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Request a password reset
    ResetPassword {
        /// Email or phone identifier
        #[arg(short, long)]
        identifier: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login {
            identifier,
            password,
        } => commands::account::login(&identifier, password).await?,
        Commands::Profile {
            identifier,
            password,
        } => commands::account::profile(&identifier, password).await?,
        Commands::ResetPassword { identifier } => {
            commands::account::reset_password(&identifier).await?;
        }
    }
    Ok(())
}
