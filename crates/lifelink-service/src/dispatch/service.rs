//! Notification dispatcher.
//!
//! Turns matches into outbound messages, records per-message delivery
//! state, and drives match/request state transitions from delivery
//! outcome and recipient response. A send is at-most-once per call;
//! retry policy belongs to the caller or the sweep scheduler.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use uuid::Uuid;

use lifelink_core::config::delivery::DeliveryConfig;
use lifelink_core::config::matching::MatchingConfig;
use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_core::traits::MessageSender;
use lifelink_database::repositories::{DonorStore, MatchStore, NotificationStore, RequestStore};
use lifelink_entity::donor::Donor;
use lifelink_entity::donor_match::{DonorMatch, MatchStatus};
use lifelink_entity::notification::{
    DeliveryStatus, NewNotification, Notification, NotificationKind,
};
use lifelink_entity::request::{BloodRequest, RequestStatus};

use super::template;

/// Per-request accounting for a batch dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Messages the gateway accepted.
    pub sent: usize,
    /// Messages rejected, errored, or timed out.
    pub failed: usize,
    /// Matches skipped because the donor record is gone.
    pub skipped: usize,
}

/// Dispatches notifications and advances match state on delivery outcome.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    donors: Arc<dyn DonorStore>,
    requests: Arc<dyn RequestStore>,
    matches: Arc<dyn MatchStore>,
    notifications: Arc<dyn NotificationStore>,
    sender: Arc<dyn MessageSender>,
    send_timeout: Duration,
    dispatch_concurrency: usize,
}

impl NotificationDispatcher {
    /// Create a new dispatcher.
    pub fn new(
        donors: Arc<dyn DonorStore>,
        requests: Arc<dyn RequestStore>,
        matches: Arc<dyn MatchStore>,
        notifications: Arc<dyn NotificationStore>,
        sender: Arc<dyn MessageSender>,
        matching: &MatchingConfig,
        delivery: &DeliveryConfig,
    ) -> Self {
        Self {
            donors,
            requests,
            matches,
            notifications,
            sender,
            send_timeout: Duration::from_secs(delivery.timeout_seconds),
            dispatch_concurrency: matching.dispatch_concurrency.max(1),
        }
    }

    /// Attempt one delivery and classify the outcome.
    ///
    /// Nothing is held across the send: the notification row and any
    /// match transition are committed only after the result is known. A
    /// timeout is indistinguishable from an explicit gateway rejection.
    async fn deliver(&self, recipient: &str, message: &str) -> DeliveryStatus {
        match tokio::time::timeout(self.send_timeout, self.sender.send(recipient, message)).await {
            Ok(Ok(outcome)) if outcome.accepted => DeliveryStatus::Sent,
            Ok(Ok(outcome)) => {
                tracing::warn!(
                    recipient = %recipient,
                    detail = outcome.detail.as_deref().unwrap_or("none"),
                    "Gateway rejected message"
                );
                DeliveryStatus::Failed
            }
            Ok(Err(e)) => {
                tracing::warn!(recipient = %recipient, error = %e, "Send failed");
                DeliveryStatus::Failed
            }
            Err(_) => {
                tracing::warn!(
                    recipient = %recipient,
                    timeout_seconds = self.send_timeout.as_secs(),
                    "Send timed out"
                );
                DeliveryStatus::Failed
            }
        }
    }

    /// Render, send, and record one donor-directed notification.
    ///
    /// For the `Matched` template a successful delivery also advances
    /// the match `Pending → Notified` and re-stamps `notified_at`; the
    /// advance is a compare-and-set, so a match that has already moved
    /// on is left untouched and never reverts.
    async fn dispatch_to_donor(
        &self,
        donor_match: &DonorMatch,
        donor: &Donor,
        request: &BloodRequest,
        kind: NotificationKind,
    ) -> AppResult<Notification> {
        let message = match kind {
            NotificationKind::Matched => template::matched_message(donor, request),
            NotificationKind::Accepted => template::accepted_message(donor, request),
            NotificationKind::Declined => template::declined_message(donor, request),
            NotificationKind::Completed => template::completed_message(donor, request),
            NotificationKind::NoMatch | NotificationKind::Manual => {
                return Err(AppError::internal(format!(
                    "Template '{kind}' is not donor-directed"
                )));
            }
        };

        let status = self.deliver(&donor.phone, &message).await;

        let notification = self
            .notifications
            .create(&NewNotification {
                donor_id: Some(donor.id),
                request_id: Some(request.id),
                recipient: donor.phone.clone(),
                kind,
                message,
                status,
            })
            .await?;

        if status == DeliveryStatus::Sent && kind == NotificationKind::Matched {
            self.matches
                .advance_status(
                    donor_match.id,
                    MatchStatus::Pending,
                    MatchStatus::Notified,
                    Some(Utc::now()),
                )
                .await?;
        }

        Ok(notification)
    }

    /// Notify the donor of a freshly created match.
    ///
    /// Entities are already loaded by the match engine; this avoids
    /// re-reading them per match right after the batch commit.
    pub async fn notify_new_match(
        &self,
        donor_match: &DonorMatch,
        donor: &Donor,
        request: &BloodRequest,
    ) -> AppResult<Notification> {
        self.dispatch_to_donor(donor_match, donor, request, NotificationKind::Matched)
            .await
    }

    /// Notify the donor of an existing match by id.
    pub async fn notify_match(&self, match_id: Uuid) -> AppResult<Notification> {
        let donor_match = self
            .matches
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor match not found"))?;
        let donor = self
            .donors
            .find_by_id(donor_match.donor_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))?;
        let request = self
            .requests
            .find_by_id(donor_match.request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Blood request not found"))?;

        self.dispatch_to_donor(&donor_match, &donor, &request, NotificationKind::Matched)
            .await
    }

    /// Notify every `Pending` match of a request.
    ///
    /// Sends fan out with bounded parallelism. A missing donor is
    /// skipped; a failed delivery is counted; neither aborts the rest of
    /// the batch. Each match's state change commits independently.
    pub async fn notify_batch(&self, request_id: Uuid) -> AppResult<DispatchSummary> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Blood request not found"))?;

        let pending = self.matches.find_pending_by_request(request_id).await?;
        let semaphore = Arc::new(Semaphore::new(self.dispatch_concurrency));

        let outcomes = futures::future::join_all(pending.iter().map(|donor_match| {
            let semaphore = Arc::clone(&semaphore);
            let request = &request;
            async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return BatchOutcome::Failed;
                };

                let donor = match self.donors.find_by_id(donor_match.donor_id).await {
                    Ok(Some(donor)) => donor,
                    Ok(None) => {
                        tracing::warn!(
                            match_id = %donor_match.id,
                            donor_id = %donor_match.donor_id,
                            "Skipping match: donor no longer exists"
                        );
                        return BatchOutcome::Skipped;
                    }
                    Err(e) => {
                        tracing::warn!(match_id = %donor_match.id, error = %e, "Donor lookup failed");
                        return BatchOutcome::Failed;
                    }
                };

                match self
                    .dispatch_to_donor(donor_match, &donor, request, NotificationKind::Matched)
                    .await
                {
                    Ok(n) if n.status == DeliveryStatus::Sent => BatchOutcome::Sent,
                    Ok(_) => BatchOutcome::Failed,
                    Err(e) => {
                        tracing::warn!(match_id = %donor_match.id, error = %e, "Dispatch failed");
                        BatchOutcome::Failed
                    }
                }
            }
        }))
        .await;

        let mut summary = DispatchSummary::default();
        for outcome in outcomes {
            match outcome {
                BatchOutcome::Sent => summary.sent += 1,
                BatchOutcome::Failed => summary.failed += 1,
                BatchOutcome::Skipped => summary.skipped += 1,
            }
        }

        tracing::info!(
            request_id = %request_id,
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.skipped,
            "Batch dispatch complete"
        );

        Ok(summary)
    }

    /// Apply an externally driven match status update and fire the
    /// corresponding follow-up notification.
    ///
    /// The side effects run only when the status actually changes; an
    /// idempotent rewrite of the current status is a no-op. An
    /// `Accepted` transition additionally advances the parent request to
    /// `Matched`. Follow-up delivery is best-effort: the transition is
    /// already committed, so a delivery problem is logged and recorded
    /// in the notification log rather than failing the update.
    pub async fn handle_status_change(
        &self,
        match_id: Uuid,
        new_status: MatchStatus,
    ) -> AppResult<DonorMatch> {
        let donor_match = self
            .matches
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor match not found"))?;

        if donor_match.status == new_status {
            return Ok(donor_match);
        }

        if !donor_match.status.can_transition_to(new_status) {
            return Err(AppError::conflict(format!(
                "Illegal match transition: {} -> {}",
                donor_match.status, new_status
            )));
        }

        let updated = self
            .matches
            .advance_status(match_id, donor_match.status, new_status, None)
            .await?
            .ok_or_else(|| AppError::conflict("Match status changed concurrently"))?;

        if let Err(e) = self.fire_status_side_effects(&updated, new_status).await {
            tracing::warn!(match_id = %match_id, error = %e, "Status side effects failed");
        }

        Ok(updated)
    }

    async fn fire_status_side_effects(
        &self,
        donor_match: &DonorMatch,
        new_status: MatchStatus,
    ) -> AppResult<()> {
        let kind = match new_status {
            MatchStatus::Accepted => NotificationKind::Accepted,
            MatchStatus::Declined => NotificationKind::Declined,
            MatchStatus::Completed => NotificationKind::Completed,
            MatchStatus::Pending | MatchStatus::Notified => return Ok(()),
        };

        let donor = self
            .donors
            .find_by_id(donor_match.donor_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))?;
        let request = self
            .requests
            .find_by_id(donor_match.request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Blood request not found"))?;

        if new_status == MatchStatus::Accepted
            && request.status.can_transition_to(RequestStatus::Matched)
        {
            self.requests
                .update_status(request.id, RequestStatus::Matched)
                .await?;
        }

        self.dispatch_to_donor(donor_match, &donor, &request, kind)
            .await?;
        Ok(())
    }

    /// Tell the requester that no donors have been found yet.
    pub async fn notify_no_match(&self, request: &BloodRequest) -> AppResult<Notification> {
        let message = template::no_match_message(request);
        let status = self.deliver(&request.contact_number, &message).await;

        self.notifications
            .create(&NewNotification {
                donor_id: None,
                request_id: Some(request.id),
                recipient: request.contact_number.clone(),
                kind: NotificationKind::NoMatch,
                message,
                status,
            })
            .await
    }

    /// Send operator-supplied text to a donor and record it.
    pub async fn send_manual(
        &self,
        donor_id: Uuid,
        request_id: Option<Uuid>,
        message: String,
    ) -> AppResult<Notification> {
        let donor = self
            .donors
            .find_by_id(donor_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))?;

        let status = self.deliver(&donor.phone, &message).await;

        self.notifications
            .create(&NewNotification {
                donor_id: Some(donor.id),
                request_id,
                recipient: donor.phone.clone(),
                kind: NotificationKind::Manual,
                message,
                status,
            })
            .await
    }
}

enum BatchOutcome {
    Sent,
    Failed,
    Skipped,
}
