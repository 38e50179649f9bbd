//! Match engine — orchestrates compatibility, eligibility, and
//! proximity against the donor population for a request.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lifelink_core::config::matching::MatchingConfig;
use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_database::repositories::{DonorStore, MatchStore, RequestStore};
use lifelink_entity::donor::Donor;
use lifelink_entity::donor_match::{DonorMatch, NewMatch};
use lifelink_entity::request::BloodRequest;

use super::compatibility::compatible_donor_types;
use super::eligibility::is_eligible;
use super::proximity::{parse_coordinates, rank_by_proximity};
use crate::dispatch::NotificationDispatcher;

/// One match paired with its donor and the distance computed during the
/// ranking pass. The distance is ephemeral: attached to responses,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// The match row.
    pub donor_match: DonorMatch,
    /// The matched donor.
    pub donor: Donor,
    /// Great-circle distance to the request, where rankable.
    pub distance_km: Option<f64>,
}

/// Selects, ranks, and deduplicates eligible donors for a request, and
/// hands freshly created matches to the dispatcher.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    donors: Arc<dyn DonorStore>,
    requests: Arc<dyn RequestStore>,
    matches: Arc<dyn MatchStore>,
    dispatcher: Arc<NotificationDispatcher>,
    cooldown: Duration,
    nearby_radius_km: f64,
}

impl MatchEngine {
    /// Create a new match engine.
    pub fn new(
        donors: Arc<dyn DonorStore>,
        requests: Arc<dyn RequestStore>,
        matches: Arc<dyn MatchStore>,
        dispatcher: Arc<NotificationDispatcher>,
        config: &MatchingConfig,
    ) -> Self {
        Self {
            donors,
            requests,
            matches,
            dispatcher,
            cooldown: Duration::days(config.cooldown_days),
            nearby_radius_km: config.nearby_radius_km,
        }
    }

    /// Match eligible donors to a request and dispatch notifications.
    ///
    /// Candidate selection, ranking, and dedup happen first; all new
    /// matches then commit as one unit through the store's batch insert,
    /// whose `(request_id, donor_id)` uniqueness handling makes
    /// concurrent runs race-safe. Dispatch happens strictly after the
    /// commit so a slow sender cannot stall match creation, and a
    /// dispatch failure never unwinds committed matches.
    ///
    /// Zero eligible donors is a success with an empty list; the sweep
    /// scheduler picks such requests up later.
    pub async fn auto_match(&self, request_id: Uuid) -> AppResult<Vec<MatchCandidate>> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Blood request not found"))?;

        let now = Utc::now();
        let compatible = compatible_donor_types(request.blood_type);
        let candidates = self.donors.find_available_by_types(compatible).await?;

        let eligible: Vec<Donor> = candidates
            .into_iter()
            .filter(|d| is_eligible(d, now, self.cooldown))
            .collect();

        let ranked: Vec<(Donor, Option<f64>)> = match request
            .location
            .as_deref()
            .map(parse_coordinates)
        {
            Some(Ok(origin)) => rank_by_proximity(origin, eligible, self.nearby_radius_km),
            Some(Err(err)) => {
                tracing::debug!(request_id = %request_id, error = %err, "Request location unrankable");
                eligible.into_iter().map(|d| (d, None)).collect()
            }
            None => eligible.into_iter().map(|d| (d, None)).collect(),
        };

        let existing = self.matches.find_by_request(request_id).await?;
        let already_matched: HashSet<Uuid> = existing.iter().map(|m| m.donor_id).collect();

        let new_matches: Vec<NewMatch> = ranked
            .iter()
            .filter(|(donor, _)| !already_matched.contains(&donor.id))
            .map(|(donor, _)| NewMatch {
                request_id,
                donor_id: donor.id,
                notified_at: now,
            })
            .collect();

        let created = self.matches.insert_batch(&new_matches).await?;
        let mut created_by_donor: HashMap<Uuid, DonorMatch> =
            created.into_iter().map(|m| (m.donor_id, m)).collect();

        let results: Vec<MatchCandidate> = ranked
            .into_iter()
            .filter_map(|(donor, distance_km)| {
                created_by_donor.remove(&donor.id).map(|donor_match| MatchCandidate {
                    donor_match,
                    donor,
                    distance_km,
                })
            })
            .collect();

        tracing::info!(
            request_id = %request_id,
            blood_type = %request.blood_type,
            matches_created = results.len(),
            "Auto-match complete"
        );

        for candidate in &results {
            if let Err(e) = self
                .dispatcher
                .notify_new_match(&candidate.donor_match, &candidate.donor, &request)
                .await
            {
                tracing::warn!(
                    match_id = %candidate.donor_match.id,
                    error = %e,
                    "Failed to dispatch match notification"
                );
            }
        }

        Ok(results)
    }

    /// All matches for a request with per-match distance, where both
    /// ends have parseable coordinates. Matches whose donor record has
    /// been deleted are omitted.
    pub async fn matches_for_request(
        &self,
        request_id: Uuid,
    ) -> AppResult<(BloodRequest, Vec<MatchCandidate>)> {
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::not_found("Blood request not found"))?;

        let origin = request
            .location
            .as_deref()
            .and_then(|s| parse_coordinates(s).ok());

        let mut results = Vec::new();
        for donor_match in self.matches.find_by_request(request_id).await? {
            let Some(donor) = self.donors.find_by_id(donor_match.donor_id).await? else {
                continue;
            };
            let distance_km = origin.and_then(|origin| {
                donor
                    .location
                    .as_deref()
                    .and_then(|s| parse_coordinates(s).ok())
                    .map(|coords| super::proximity::distance_km(origin, coords))
            });
            results.push(MatchCandidate {
                donor_match,
                donor,
                distance_km,
            });
        }

        Ok((request, results))
    }

    /// Look up a single match.
    pub async fn get_match(&self, id: Uuid) -> AppResult<DonorMatch> {
        self.matches
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor match not found"))
    }

    /// List all matches.
    pub async fn list_matches(&self) -> AppResult<Vec<DonorMatch>> {
        self.matches.find_all().await
    }

    /// Administrative removal of a match.
    pub async fn delete_match(&self, id: Uuid) -> AppResult<()> {
        if !self.matches.delete(id).await? {
            return Err(AppError::not_found("Donor match not found"));
        }
        Ok(())
    }
}
