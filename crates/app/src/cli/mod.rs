//! Operator commands run against the service database.

use clap::{Args, Parser, Subcommand};
use homestay_app::database;
use sqlx::PgPool;

mod activity;
mod package;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "homestay-app", about = "Homestay CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Connection flag shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Token(token::TokenCommand),
    Package(package::PackageCommand),
    Activity(activity::ActivityCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Package(command) => package::run(command).await,
            Commands::Activity(command) => activity::run(command).await,
        }
    }
}
