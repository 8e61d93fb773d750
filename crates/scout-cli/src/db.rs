//! `db` command handlers.

use std::path::Path;

/// # Errors
///
/// Returns an error if the database does not answer.
pub(crate) async fn run_db_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    scout_db::ping(pool).await?;
    println!("database ok");
    Ok(())
}

/// # Errors
///
/// Returns an error if any migration fails.
pub(crate) async fn run_db_migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let applied = scout_db::run_migrations(pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}

/// Upsert every game in the games file together with its seed signals.
///
/// # Errors
///
/// Returns an error if the file is invalid or the seed transaction fails.
pub(crate) async fn run_db_seed(pool: &sqlx::PgPool, games_path: &Path) -> anyhow::Result<()> {
    let file = scout_core::load_games(games_path)?;
    tracing::info!(path = %games_path.display(), games = file.games.len(), "seeding games");

    let summary = scout_db::seed_games(pool, &file.games).await?;
    println!(
        "seeded {} game(s); {} signal(s) inserted, {} already present",
        summary.games, summary.signals_inserted, summary.signals_skipped
    );
    Ok(())
}
