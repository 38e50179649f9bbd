//! Store traits and their PostgreSQL implementations.
//!
//! The traits are the seam between the service layer and persistence:
//! services hold `Arc<dyn …Store>` and never touch SQL. The Postgres
//! repositories in this module are the production implementation; the
//! [`crate::memory`] backend implements the same traits for tests.

pub mod donor;
pub mod donor_match;
pub mod notification;
pub mod request;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use lifelink_core::result::AppResult;
use lifelink_entity::donor::{BloodType, CreateDonor, Donor, UpdateDonor};
use lifelink_entity::donor_match::{DonorMatch, MatchStatus, NewMatch};
use lifelink_entity::notification::{NewNotification, Notification, UpdateNotification};
use lifelink_entity::request::{BloodRequest, CreateBloodRequest, RequestStatus, UpdateBloodRequest};

pub use donor::DonorRepository;
pub use donor_match::MatchRepository;
pub use notification::NotificationRepository;
pub use request::BloodRequestRepository;

/// Store for donor records.
#[async_trait]
pub trait DonorStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a donor by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donor>>;

    /// List all donors in registration order.
    async fn find_all(&self) -> AppResult<Vec<Donor>>;

    /// List available donors whose blood type is in `types`, in
    /// registration order. Cooldown filtering happens in the service
    /// layer so the rule has a single source of truth.
    async fn find_available_by_types(&self, types: &[BloodType]) -> AppResult<Vec<Donor>>;

    /// Register a new donor.
    async fn create(&self, donor: &CreateDonor) -> AppResult<Donor>;

    /// Apply a partial update. Returns `None` if the donor does not exist.
    async fn update(&self, id: Uuid, changes: &UpdateDonor) -> AppResult<Option<Donor>>;

    /// Delete a donor. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Store for blood request records.
#[async_trait]
pub trait RequestStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a request by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BloodRequest>>;

    /// List all requests in creation order.
    async fn find_all(&self) -> AppResult<Vec<BloodRequest>>;

    /// List `Pending` requests that have no match rows at all.
    async fn find_unmatched_pending(&self) -> AppResult<Vec<BloodRequest>>;

    /// Open a new request (status starts at `Pending`).
    async fn create(&self, request: &CreateBloodRequest) -> AppResult<BloodRequest>;

    /// Apply a partial update. Returns `None` if the request does not exist.
    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateBloodRequest,
    ) -> AppResult<Option<BloodRequest>>;

    /// Set the lifecycle status. Returns `None` if the request does not
    /// exist. Transition legality is the caller's responsibility.
    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> AppResult<Option<BloodRequest>>;

    /// Delete a request. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Store for donor match records.
///
/// Match creation is the concurrency serialization point of the whole
/// system: implementations must enforce the `(request_id, donor_id)`
/// uniqueness invariant atomically, treating duplicate inserts as benign
/// no-ops.
#[async_trait]
pub trait MatchStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a match by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DonorMatch>>;

    /// List all matches in creation order.
    async fn find_all(&self) -> AppResult<Vec<DonorMatch>>;

    /// List all matches for a request in creation order.
    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Vec<DonorMatch>>;

    /// List matches for a request still in `Pending` state.
    async fn find_pending_by_request(&self, request_id: Uuid) -> AppResult<Vec<DonorMatch>>;

    /// Insert a batch of new matches as a single atomic unit, all in
    /// `Pending` state. Pairs that already exist are silently skipped;
    /// only the rows actually inserted are returned. A storage failure
    /// rolls back the entire batch.
    async fn insert_batch(&self, matches: &[NewMatch]) -> AppResult<Vec<DonorMatch>>;

    /// Compare-and-set status advance: moves the match from `from` to
    /// `to`, optionally re-stamping `notified_at`. Returns `None` when
    /// the match is missing or no longer in the `from` state, so a lost
    /// race is observable rather than destructive.
    async fn advance_status(
        &self,
        id: Uuid,
        from: MatchStatus,
        to: MatchStatus,
        notified_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<DonorMatch>>;

    /// Delete a match (administrative). Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Store for the append-only notification log.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Record a notification attempt.
    async fn create(&self, notification: &NewNotification) -> AppResult<Notification>;

    /// Find a notification by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// List all notifications, most recent first.
    async fn find_all(&self) -> AppResult<Vec<Notification>>;

    /// Administrative override of `message`/`status`. Returns `None` if
    /// the notification does not exist.
    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateNotification,
    ) -> AppResult<Option<Notification>>;

    /// Delete a notification. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
