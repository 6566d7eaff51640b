//! Proactive recommendations and detected trends.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    NewMatch,
    TrendingTopic,
    Opportunity,
}

/// A system-initiated, time-boxed suggestion surfaced without an explicit
/// request. Read and expired records stay stored for audit; the engine never
/// deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProactiveRecommendation {
    pub id: Uuid,
    pub user_id: i64,
    pub kind: RecommendationKind,
    pub title: String,
    pub body: String,
    pub confidence: u8,
    #[serde(default)]
    pub action_suggestions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl ProactiveRecommendation {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// A topic judged currently rising in relevance. Regenerated per invocation,
/// never diffed against prior runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendRecord {
    pub topic: String,
    pub strength: f64,
    #[serde(default)]
    pub sectors: BTreeSet<String>,
    pub description: String,
    pub growth_label: String,
    pub detected_at: DateTime<Utc>,
}
