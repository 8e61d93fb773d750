mod db;
mod score;
mod signals;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use scout_core::SignalType;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scout-cli")]
#[command(about = "Game Scout deal-intent command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Cached score maintenance
    Score {
        #[command(subcommand)]
        command: ScoreCommands,
    },
    /// Print the full deal assessment for one game as JSON
    Thesis {
        /// Steam app id
        app_id: i64,
    },
    /// Signal log operations
    Signals {
        #[command(subcommand)]
        command: SignalsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Upsert games and seed signals from the games file
    Seed,
}

#[derive(Debug, Subcommand)]
enum ScoreCommands {
    /// Recompute cached intent and quality scores
    ///
    /// Without flags only games never scored or scored longer ago than
    /// `SCOUT_RESCORE_STALE_HOURS` are recomputed.
    Recompute {
        /// Recompute a single game
        #[arg(long, conflicts_with = "all")]
        app_id: Option<i64>,
        /// Recompute every tracked game
        #[arg(long)]
        all: bool,
    },
}

#[derive(Debug, Subcommand)]
enum SignalsCommands {
    /// Classify and append one signal to a game's log
    Import {
        #[arg(long)]
        app_id: i64,
        /// Where the mention was seen (twitter, reddit, discord, ...)
        #[arg(long)]
        source: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        url: Option<String>,
        /// Overrides the classifier's suggestion
        #[arg(long)]
        signal_type: Option<SignalType>,
        /// RFC 3339 timestamp of the original post
        #[arg(long)]
        published_at: Option<DateTime<Utc>>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("scout-cli: run with --help to list commands");
        return Ok(());
    };

    let config = scout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = scout_db::PoolConfig::from_app_config(&config);
    let pool = scout_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => db::run_db_ping(&pool).await,
            DbCommands::Migrate => db::run_db_migrate(&pool).await,
            DbCommands::Seed => db::run_db_seed(&pool, &config.games_path).await,
        },
        Commands::Score {
            command: ScoreCommands::Recompute { app_id, all },
        } => {
            let scope = match (app_id, all) {
                (Some(id), _) => score::RecomputeScope::One(id),
                (None, true) => score::RecomputeScope::All,
                (None, false) => score::RecomputeScope::Stale(config.rescore_stale_hours),
            };
            score::run_score_recompute(&pool, scope).await
        }
        Commands::Thesis { app_id } => score::run_thesis(&pool, app_id).await,
        Commands::Signals {
            command:
                SignalsCommands::Import {
                    app_id,
                    source,
                    text,
                    url,
                    signal_type,
                    published_at,
                },
        } => {
            signals::run_signals_import(
                &pool,
                &signals::ImportArgs {
                    app_id,
                    source,
                    text,
                    url,
                    signal_type,
                    published_at,
                },
            )
            .await
        }
    }
}
