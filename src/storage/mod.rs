//! Storage contracts consumed by the engine.
//!
//! The engine is constructed with these collaborators injected, so tests can
//! substitute doubles and the production wiring can point at whatever backs
//! the platform. [`json`] provides the file-backed reference adapter.

pub mod json;

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::Duration;

use crate::models::matching::{CohortStat, InteractionRecord};
use crate::models::profile::{Profile, ProfileType};
use crate::models::recommendation::ProactiveRecommendation;

/// Candidate listing filter. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub exclude_user: i64,
    pub match_types: BTreeSet<ProfileType>,
    pub sectors: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    /// Upper bound on rows returned, 0 meaning unbounded.
    pub fetch_limit: usize,
}

pub trait ProfileStore: Send + Sync {
    fn get_profile(&self, user_id: i64) -> Result<Option<Profile>>;

    /// Validated candidate profiles matching the filter, ordered by id.
    fn list_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Profile>>;

    /// Validated profiles created within `since` of now, excluding one user.
    fn count_recent_profiles(&self, since: Duration, exclude_user: i64) -> Result<usize>;
}

pub trait InteractionStore: Send + Sync {
    fn append(&self, record: &InteractionRecord) -> Result<()>;

    /// Two-hop cohort aggregation for the given requester.
    fn query_cohort(&self, user_id: i64) -> Result<Vec<CohortStat>>;
}

pub trait RecommendationStore: Send + Sync {
    fn persist(&self, recommendation: &ProactiveRecommendation) -> Result<()>;

    /// Every stored recommendation for a user, including read and expired
    /// rows — the store never forgets them.
    fn list_for_user(&self, user_id: i64) -> Result<Vec<ProactiveRecommendation>>;
}
