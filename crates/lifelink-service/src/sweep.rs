//! Unmatched-request sweep.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use lifelink_core::result::AppResult;
use lifelink_database::repositories::RequestStore;
use lifelink_entity::notification::DeliveryStatus;

use crate::dispatch::NotificationDispatcher;

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Pending requests found with zero matches.
    pub scanned: usize,
    /// No-match notifications the gateway accepted.
    pub notified: usize,
    /// No-match notifications that failed to deliver.
    pub failed: usize,
}

/// Finds pending requests with no matches at all and tells their
/// requesters that the search continues.
///
/// The sweep only inspects state and never creates or mutates match
/// rows, so it is safe to run repeatedly and concurrently with
/// ordinary matching, on a timer, on demand, or both.
#[derive(Debug, Clone)]
pub struct SweepService {
    requests: Arc<dyn RequestStore>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl SweepService {
    /// Create a new sweep service.
    pub fn new(requests: Arc<dyn RequestStore>, dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self {
            requests,
            dispatcher,
        }
    }

    /// Run one sweep pass.
    pub async fn sweep_unmatched(&self) -> AppResult<SweepReport> {
        let unmatched = self.requests.find_unmatched_pending().await?;

        let mut report = SweepReport {
            scanned: unmatched.len(),
            ..SweepReport::default()
        };

        for request in &unmatched {
            match self.dispatcher.notify_no_match(request).await {
                Ok(n) if n.status == DeliveryStatus::Sent => report.notified += 1,
                Ok(_) => report.failed += 1,
                Err(e) => {
                    tracing::warn!(request_id = %request.id, error = %e, "No-match notification failed");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            notified = report.notified,
            failed = report.failed,
            "Unmatched-request sweep complete"
        );

        Ok(report)
    }
}
