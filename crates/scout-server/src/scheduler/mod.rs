//! Background job scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring score recompute job.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::rescore::rescore_game;

/// Builds and starts the background job scheduler.
///
/// The returned handle must be kept alive for the lifetime of the process;
/// dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    config: Arc<scout_core::AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_rescore_job(&scheduler, pool, &config).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the score recompute job on `SCOUT_RESCORE_CRON`.
async fn register_rescore_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    config: &scout_core::AppConfig,
) -> Result<(), JobSchedulerError> {
    let pool = Arc::new(pool);
    let stale_hours = config.rescore_stale_hours;

    let job = Job::new_async(config.rescore_cron.as_str(), move |_uuid, _lock| {
        let pool = Arc::clone(&pool);

        Box::pin(async move {
            tracing::info!(stale_hours, "scheduler: starting score recompute run");
            let summary = run_rescore_job(&pool, stale_hours).await;
            tracing::info!(
                rescored = summary.rescored,
                failed = summary.failed,
                "scheduler: score recompute run complete"
            );
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %config.rescore_cron, "scheduler: registered score recompute job");
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct RescoreSummary {
    pub rescored: usize,
    pub failed: usize,
}

/// Recompute cached scores for every game that was never scored or whose
/// scores are older than `stale_hours`. A failing game is logged and skipped.
pub(crate) async fn run_rescore_job(pool: &PgPool, stale_hours: i32) -> RescoreSummary {
    let mut summary = RescoreSummary::default();

    let app_ids = match scout_db::list_games_needing_rescore(pool, stale_hours).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "scheduler: failed to list games needing rescore");
            return summary;
        }
    };

    if app_ids.is_empty() {
        tracing::info!("scheduler: all cached scores are fresh; skipping");
        return summary;
    }

    let now = Utc::now();
    for app_id in app_ids {
        let inputs = match scout_db::load_game_inputs(pool, app_id).await {
            Ok(Some(inputs)) => inputs,
            Ok(None) => continue,
            Err(e) => {
                tracing::error!(app_id, error = %e, "scheduler: failed to load game inputs");
                summary.failed += 1;
                continue;
            }
        };

        match rescore_game(pool, &inputs, now).await {
            Ok(assessment) => {
                tracing::debug!(
                    app_id,
                    intent_score = assessment.intent_score,
                    quality_score = assessment.quality_score,
                    "scheduler: game rescored"
                );
                summary.rescored += 1;
            }
            Err(e) => {
                tracing::error!(app_id, error = %e, "scheduler: rescore failed");
                summary.failed += 1;
            }
        }
    }

    summary
}
