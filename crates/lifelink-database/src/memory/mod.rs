//! In-memory store backend.
//!
//! Implements every store trait over a single `RwLock`-guarded state so
//! cross-entity queries (the unmatched-request anti-join) see one
//! consistent snapshot. Used by unit and router-level tests, and usable
//! as a throwaway local backend.
//!
//! The match-uniqueness invariant is serialized behind the write lock:
//! a whole `insert_batch` holds the lock, so two concurrent auto-match
//! runs cannot both insert a row for the same `(request, donor)` pair.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use lifelink_core::result::AppResult;
use lifelink_entity::donor::{BloodType, CreateDonor, Donor, UpdateDonor};
use lifelink_entity::donor_match::{DonorMatch, MatchStatus, NewMatch};
use lifelink_entity::notification::{NewNotification, Notification, UpdateNotification};
use lifelink_entity::request::{
    BloodRequest, CreateBloodRequest, RequestStatus, UpdateBloodRequest,
};

use crate::repositories::{DonorStore, MatchStore, NotificationStore, RequestStore};

#[derive(Debug, Default)]
struct Inner {
    donors: Vec<Donor>,
    requests: Vec<BloodRequest>,
    matches: Vec<DonorMatch>,
    notifications: Vec<Notification>,
}

/// In-memory implementation of all LifeLink stores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl DonorStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donor>> {
        let inner = self.inner.read().await;
        Ok(inner.donors.iter().find(|d| d.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Donor>> {
        let inner = self.inner.read().await;
        Ok(inner.donors.clone())
    }

    async fn find_available_by_types(&self, types: &[BloodType]) -> AppResult<Vec<Donor>> {
        let inner = self.inner.read().await;
        Ok(inner
            .donors
            .iter()
            .filter(|d| d.availability_status && types.contains(&d.blood_type))
            .cloned()
            .collect())
    }

    async fn create(&self, donor: &CreateDonor) -> AppResult<Donor> {
        let now = Utc::now();
        let created = Donor {
            id: Uuid::new_v4(),
            name: donor.name.clone(),
            age: donor.age,
            blood_type: donor.blood_type,
            phone: donor.phone.clone(),
            email: donor.email.clone(),
            city: donor.city.clone(),
            location: donor.location.clone(),
            availability_status: donor.availability_status,
            last_donation_date: None,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.write().await;
        inner.donors.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: &UpdateDonor) -> AppResult<Option<Donor>> {
        let mut inner = self.inner.write().await;
        let Some(donor) = inner.donors.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            donor.name = name.clone();
        }
        if let Some(phone) = &changes.phone {
            donor.phone = phone.clone();
        }
        if let Some(email) = &changes.email {
            donor.email = Some(email.clone());
        }
        if let Some(city) = &changes.city {
            donor.city = city.clone();
        }
        if let Some(location) = &changes.location {
            donor.location = Some(location.clone());
        }
        if let Some(available) = changes.availability_status {
            donor.availability_status = available;
        }
        if let Some(last) = changes.last_donation_date {
            donor.last_donation_date = Some(last);
        }
        donor.updated_at = Utc::now();
        Ok(Some(donor.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.donors.len();
        inner.donors.retain(|d| d.id != id);
        Ok(inner.donors.len() < before)
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BloodRequest>> {
        let inner = self.inner.read().await;
        Ok(inner.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<BloodRequest>> {
        let inner = self.inner.read().await;
        Ok(inner.requests.clone())
    }

    async fn find_unmatched_pending(&self) -> AppResult<Vec<BloodRequest>> {
        let inner = self.inner.read().await;
        Ok(inner
            .requests
            .iter()
            .filter(|r| {
                r.status == RequestStatus::Pending
                    && !inner.matches.iter().any(|m| m.request_id == r.id)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, request: &CreateBloodRequest) -> AppResult<BloodRequest> {
        let now = Utc::now();
        let created = BloodRequest {
            id: Uuid::new_v4(),
            patient_name: request.patient_name.clone(),
            blood_type: request.blood_type,
            hospital: request.hospital.clone(),
            city: request.city.clone(),
            location: request.location.clone(),
            contact_number: request.contact_number.clone(),
            urgency: request.urgency,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.write().await;
        inner.requests.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateBloodRequest,
    ) -> AppResult<Option<BloodRequest>> {
        let mut inner = self.inner.write().await;
        let Some(request) = inner.requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(patient_name) = &changes.patient_name {
            request.patient_name = patient_name.clone();
        }
        if let Some(hospital) = &changes.hospital {
            request.hospital = hospital.clone();
        }
        if let Some(city) = &changes.city {
            request.city = city.clone();
        }
        if let Some(location) = &changes.location {
            request.location = Some(location.clone());
        }
        if let Some(contact) = &changes.contact_number {
            request.contact_number = contact.clone();
        }
        if let Some(urgency) = changes.urgency {
            request.urgency = urgency;
        }
        if let Some(status) = changes.status {
            request.status = status;
        }
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> AppResult<Option<BloodRequest>> {
        let mut inner = self.inner.write().await;
        let Some(request) = inner.requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        request.status = status;
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.requests.len();
        inner.requests.retain(|r| r.id != id);
        Ok(inner.requests.len() < before)
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DonorMatch>> {
        let inner = self.inner.read().await;
        Ok(inner.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<DonorMatch>> {
        let inner = self.inner.read().await;
        Ok(inner.matches.clone())
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Vec<DonorMatch>> {
        let inner = self.inner.read().await;
        Ok(inner
            .matches
            .iter()
            .filter(|m| m.request_id == request_id)
            .cloned()
            .collect())
    }

    async fn find_pending_by_request(&self, request_id: Uuid) -> AppResult<Vec<DonorMatch>> {
        let inner = self.inner.read().await;
        Ok(inner
            .matches
            .iter()
            .filter(|m| m.request_id == request_id && m.status == MatchStatus::Pending)
            .cloned()
            .collect())
    }

    async fn insert_batch(&self, matches: &[NewMatch]) -> AppResult<Vec<DonorMatch>> {
        let mut inner = self.inner.write().await;
        let mut created = Vec::with_capacity(matches.len());
        for m in matches {
            let exists = inner
                .matches
                .iter()
                .any(|existing| {
                    existing.request_id == m.request_id && existing.donor_id == m.donor_id
                });
            if exists {
                continue;
            }
            let row = DonorMatch {
                id: Uuid::new_v4(),
                request_id: m.request_id,
                donor_id: m.donor_id,
                status: MatchStatus::Pending,
                notified_at: m.notified_at,
                created_at: Utc::now(),
            };
            inner.matches.push(row.clone());
            created.push(row);
        }
        Ok(created)
    }

    async fn advance_status(
        &self,
        id: Uuid,
        from: MatchStatus,
        to: MatchStatus,
        notified_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<DonorMatch>> {
        let mut inner = self.inner.write().await;
        let Some(m) = inner
            .matches
            .iter_mut()
            .find(|m| m.id == id && m.status == from)
        else {
            return Ok(None);
        };
        m.status = to;
        if let Some(at) = notified_at {
            m.notified_at = at;
        }
        Ok(Some(m.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.matches.len();
        inner.matches.retain(|m| m.id != id);
        Ok(inner.matches.len() < before)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create(&self, notification: &NewNotification) -> AppResult<Notification> {
        let created = Notification {
            id: Uuid::new_v4(),
            donor_id: notification.donor_id,
            request_id: notification.request_id,
            recipient: notification.recipient.clone(),
            kind: notification.kind,
            message: notification.message.clone(),
            status: notification.status,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.notifications.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let inner = self.inner.read().await;
        Ok(inner.notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Notification>> {
        let inner = self.inner.read().await;
        let mut all = inner.notifications.clone();
        all.reverse();
        Ok(all)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateNotification,
    ) -> AppResult<Option<Notification>> {
        let mut inner = self.inner.write().await;
        let Some(n) = inner.notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(message) = &changes.message {
            n.message = message.clone();
        }
        if let Some(status) = changes.status {
            n.status = status;
        }
        Ok(Some(n.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.notifications.len();
        inner.notifications.retain(|n| n.id != id);
        Ok(inner.notifications.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifelink_entity::request::UrgencyLevel;

    fn sample_match(request_id: Uuid, donor_id: Uuid) -> NewMatch {
        NewMatch {
            request_id,
            donor_id,
            notified_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_batch_skips_existing_pairs() {
        let store = MemoryStore::new();
        let request_id = Uuid::new_v4();
        let donor_id = Uuid::new_v4();

        let first = MatchStore::insert_batch(&*store, &[sample_match(request_id, donor_id)])
            .await
            .unwrap();
        assert_eq!(first.len(), 1);

        let second = MatchStore::insert_batch(&*store, &[sample_match(request_id, donor_id)])
            .await
            .unwrap();
        assert!(second.is_empty());

        let all = MatchStore::find_by_request(&*store, request_id).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_advance_status_is_compare_and_set() {
        let store = MemoryStore::new();
        let created = MatchStore::insert_batch(
            &*store,
            &[sample_match(Uuid::new_v4(), Uuid::new_v4())],
        )
        .await
        .unwrap();
        let id = created[0].id;

        let advanced = store
            .advance_status(id, MatchStatus::Pending, MatchStatus::Notified, None)
            .await
            .unwrap();
        assert_eq!(advanced.unwrap().status, MatchStatus::Notified);

        // second advance from Pending no longer applies
        let stale = store
            .advance_status(id, MatchStatus::Pending, MatchStatus::Notified, None)
            .await
            .unwrap();
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn test_find_unmatched_pending_excludes_matched_requests() {
        let store = MemoryStore::new();
        let matched = RequestStore::create(
            &*store,
            &CreateBloodRequest {
                patient_name: "Jane".into(),
                blood_type: BloodType::APos,
                hospital: "General".into(),
                city: "Nairobi".into(),
                location: None,
                contact_number: "+100".into(),
                urgency: UrgencyLevel::High,
            },
        )
        .await
        .unwrap();
        let unmatched = RequestStore::create(
            &*store,
            &CreateBloodRequest {
                patient_name: "Joe".into(),
                blood_type: BloodType::ONeg,
                hospital: "General".into(),
                city: "Nairobi".into(),
                location: None,
                contact_number: "+200".into(),
                urgency: UrgencyLevel::Low,
            },
        )
        .await
        .unwrap();

        MatchStore::insert_batch(&*store, &[sample_match(matched.id, Uuid::new_v4())])
            .await
            .unwrap();

        let found = store.find_unmatched_pending().await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, unmatched.id);
    }
}
