mod collect;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use collect::ScrapeArgs;

#[derive(Debug, Parser)]
#[command(name = "gymcat-cli")]
#[command(about = "Supplement catalog scraper and sync tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a collection page and sync its products into the catalog
    Scrape(ScrapeArgs),
    /// Catalog database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = gymcat_core::load_app_config().context("failed to load configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    let decorated = config.env.decorated_logs();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(decorated)
        .with_target(decorated)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Scrape(args)) => collect::run_scrape(&config, &args).await,
        Some(Commands::Db { command }) => run_db(&config, command).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

async fn run_db(config: &gymcat_core::AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let database_url = config.require_database_url()?;
    let pool = gymcat_db::connect_pool(
        database_url,
        gymcat_db::PoolConfig::from_app_config(config),
    )
    .await
    .context("failed to connect to the catalog database")?;

    match command {
        DbCommands::Ping => {
            gymcat_db::ping(&pool).await?;
            println!("database reachable");
        }
        DbCommands::Migrate => {
            let applied = gymcat_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }

    Ok(())
}
