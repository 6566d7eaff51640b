//! Matching request/result types and the append-only interaction history.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::ProfileType;

/// How one participant interacted with another.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    Message,
    Meeting,
    Connection,
}

/// Outcome of an interaction. The numeric indicator feeds the collaborative
/// success-rate average: failed=0, success=1, ongoing=2.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionOutcome {
    Failed,
    Success,
    Ongoing,
}

impl InteractionOutcome {
    pub fn indicator(&self) -> f64 {
        match self {
            Self::Failed => 0.0,
            Self::Success => 1.0,
            Self::Ongoing => 2.0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.indicator() >= 1.0
    }
}

/// One row of the append-only interaction log. Never mutated, consumed only
/// in aggregate by the collaborative adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub actor_id: i64,
    pub target_id: i64,
    pub kind: InteractionKind,
    pub compatibility_score: u8,
    pub outcome: InteractionOutcome,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregated cohort row for one candidate target, as produced by the
/// two-hop cohort query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CohortStat {
    pub target_id: i64,
    pub avg_score: f64,
    pub interactions: usize,
    pub avg_success: f64,
}

/// A matching search with its filter criteria. Empty filter sets mean "all".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingRequest {
    pub user_id: i64,
    #[serde(default)]
    pub match_types: BTreeSet<ProfileType>,
    #[serde(default)]
    pub sectors: BTreeSet<String>,
    #[serde(default = "default_min_compatibility")]
    pub min_compatibility: u8,
    #[serde(default)]
    pub location_filter: BTreeSet<String>,
    #[serde(default)]
    pub package_filter: BTreeSet<String>,
    #[serde(default)]
    pub budget_filter: Option<String>,
    #[serde(default)]
    pub custom_criteria: BTreeMap<String, serde_json::Value>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl MatchingRequest {
    /// Request with default thresholds and no filters.
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id,
            match_types: BTreeSet::new(),
            sectors: BTreeSet::new(),
            min_compatibility: default_min_compatibility(),
            location_filter: BTreeSet::new(),
            package_filter: BTreeSet::new(),
            budget_filter: None,
            custom_criteria: BTreeMap::new(),
            limit: default_limit(),
        }
    }
}

const fn default_min_compatibility() -> u8 {
    70
}

const fn default_limit() -> usize {
    20
}

/// Explanation features derived from two profiles and their text analyses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingFactors {
    #[serde(default)]
    pub common_interests: Vec<String>,
    /// "{need} ← {offer}" strings for every looking-for/product token match.
    #[serde(default)]
    pub complementary_needs: Vec<String>,
    #[serde(default)]
    pub sector_alignment: f64,
}

/// Coarse categorical summary of a match's estimated value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BusinessPotential {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// One scored candidate with its full explanation bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched_user_id: i64,
    pub compatibility_score: u8,
    pub explanation: String,
    #[serde(default)]
    pub mutual_interests: Vec<String>,
    pub business_potential: BusinessPotential,
    pub matching_factors: MatchingFactors,
    pub recommended_action: String,
    #[serde(default)]
    pub conversation_topics: Vec<String>,
}
