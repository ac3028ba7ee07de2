//! Argos CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the schema and the session table
//! argos-cli migrate
//!
//! # Create the demo manager and worker accounts
//! argos-cli seed
//!
//! # Create a user
//! argos-cli user create -e ana@argos.cl -n "Ana Soto" -p secreto -r MANAGER
//! ```
//!
//! # Environment Variables
//!
//! - `ARGOS_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "argos-cli")]
#[command(author, version, about = "Argos CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (schema and session store)
    Migrate,
    /// Create the demo accounts if they do not exist
    Seed,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Role (`MANAGER` or `WORKER`)
        #[arg(short, long, default_value = "WORKER")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                password,
                role,
            } => {
                commands::user::create(&email, &name, &password, &role).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_user_create_defaults_to_worker() {
        let cli = Cli::try_parse_from([
            "argos-cli", "user", "create", "-e", "a@argos.cl", "-n", "Ana", "-p", "pw",
        ]);
        match cli.map(|c| c.command) {
            Ok(Commands::User {
                action: UserAction::Create { role, .. },
            }) => assert_eq!(role, "WORKER"),
            _ => panic!("expected user create"),
        }
    }
}
