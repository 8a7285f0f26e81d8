//! Banking API - HTTP front end for the banking stored procedures.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bank_service_lib::Dialect;
use common::DatabaseConfig;
use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Banking HTTP API over MySQL, Oracle or Postgres")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Database driver [mysql, oracle, pgx]
        #[arg(long, env = "BANK_DRIVER", default_value = "oracle")]
        driver: Dialect,
        /// Database connection string
        #[arg(long, env = "DATABASE_URL")]
        url: String,
        /// Address to listen on
        #[arg(long, env = "BANK_ADDR", default_value = "localhost:3000")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { driver, url, addr } => {
            let db_config = DatabaseConfig::from_env(url);
            let repo = bank_service_lib::connect(driver, &db_config).await?;

            bank_service_lib::ping_with_timeout(repo.as_ref(), db_config.ping_timeout()).await?;
            info!(driver = %driver, "Database is reachable");

            gateway_lib::run_server(GatewayConfig::from_env(addr), repo).await?;
        }
    }

    Ok(())
}
