//! Cron scheduler for the periodic unmatched-request sweep.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use lifelink_core::config::worker::WorkerConfig;
use lifelink_core::error::AppError;
use lifelink_service::sweep::SweepService;

/// Cron-based scheduler that runs the sweep on a fixed cadence.
///
/// The sweep itself is read-only with respect to matches and safe to
/// run concurrently with ordinary matching, so overlapping ticks are
/// harmless.
pub struct SweepScheduler {
    scheduler: JobScheduler,
    sweep: Arc<SweepService>,
    schedule: String,
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler")
            .field("schedule", &self.schedule)
            .finish()
    }
}

impl SweepScheduler {
    /// Create a new scheduler for the given sweep service.
    pub async fn new(sweep: Arc<SweepService>, config: &WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            sweep,
            schedule: config.sweep_schedule.clone(),
        })
    }

    /// Register the sweep job and start ticking.
    pub async fn start(&self) -> Result<(), AppError> {
        let sweep = Arc::clone(&self.sweep);
        let job = CronJob::new_async(self.schedule.as_str(), move |_uuid, _lock| {
            let sweep = Arc::clone(&sweep);
            Box::pin(async move {
                match sweep.sweep_unmatched().await {
                    Ok(report) => {
                        tracing::debug!(
                            scanned = report.scanned,
                            notified = report.notified,
                            failed = report.failed,
                            "Scheduled sweep tick"
                        );
                    }
                    Err(e) => tracing::error!("Scheduled sweep failed: {e}"),
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create sweep schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add sweep schedule: {e}")))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!(schedule = %self.schedule, "Sweep scheduler started");
        Ok(())
    }

    /// Shut the scheduler down.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Sweep scheduler shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifelink_core::config::delivery::DeliveryConfig;
    use lifelink_core::config::matching::MatchingConfig;
    use lifelink_core::traits::MessageSender;
    use lifelink_database::memory::MemoryStore;
    use lifelink_database::repositories::{
        DonorStore, MatchStore, NotificationStore, RequestStore,
    };
    use lifelink_delivery::MemorySender;
    use lifelink_service::dispatch::NotificationDispatcher;

    #[tokio::test]
    async fn test_scheduler_starts_and_shuts_down() {
        let store = MemoryStore::new();
        let sender = Arc::new(MemorySender::new());
        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::clone(&store) as Arc<dyn DonorStore>,
            Arc::clone(&store) as Arc<dyn RequestStore>,
            Arc::clone(&store) as Arc<dyn MatchStore>,
            Arc::clone(&store) as Arc<dyn NotificationStore>,
            sender as Arc<dyn MessageSender>,
            &MatchingConfig::default(),
            &DeliveryConfig::default(),
        ));
        let sweep = Arc::new(SweepService::new(
            Arc::clone(&store) as Arc<dyn RequestStore>,
            dispatcher,
        ));

        let scheduler = SweepScheduler::new(sweep, &WorkerConfig::default())
            .await
            .expect("create scheduler");
        scheduler.start().await.expect("start scheduler");
        scheduler.shutdown().await.expect("shutdown scheduler");
    }
}
