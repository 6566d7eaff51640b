//! Drafting and deduplication of proactive recommendations.
//!
//! The engine drafts recommendations here, filters them through the
//! deduplication policy, and persists survivors. Repeated `generate` calls
//! inside a TTL window therefore do not pile up identical rows.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::recommendation::{ProactiveRecommendation, RecommendationKind, TrendRecord};

pub const NEW_MATCH_CONFIDENCE: u8 = 85;

/// Trend-based recommendation for one matching trend.
pub fn trend_recommendation(
    user_id: i64,
    trend: &TrendRecord,
    now: DateTime<Utc>,
    ttl_days: i64,
) -> ProactiveRecommendation {
    ProactiveRecommendation {
        id: Uuid::new_v4(),
        user_id,
        kind: RecommendationKind::TrendingTopic,
        title: format!("Trending topic detected: {}", trend.topic),
        body: format!("{} (growth {})", trend.description, trend.growth_label),
        confidence: (trend.strength * 100.0).round().min(100.0) as u8,
        action_suggestions: vec![
            "Search for partners working on this topic".to_string(),
            "Refresh your profile with these keywords".to_string(),
            "Join the discussions on this theme".to_string(),
        ],
        created_at: now,
        expires_at: now + Duration::days(ttl_days),
        read: false,
    }
}

/// Recommendation emitted when validated profiles signed up recently.
pub fn new_match_recommendation(
    user_id: i64,
    recent_count: usize,
    now: DateTime<Utc>,
    ttl_days: i64,
) -> ProactiveRecommendation {
    ProactiveRecommendation {
        id: Uuid::new_v4(),
        user_id,
        kind: RecommendationKind::NewMatch,
        title: format!("{recent_count} new compatible profiles detected"),
        body: "New participants joined the platform with profiles matching your interests."
            .to_string(),
        confidence: NEW_MATCH_CONFIDENCE,
        action_suggestions: vec![
            "Run a new matching search".to_string(),
            "Review the new profiles".to_string(),
            "Send connection requests".to_string(),
        ],
        created_at: now,
        expires_at: now + Duration::days(ttl_days),
        read: false,
    }
}

/// Deduplication policy: a draft is dropped when the store already holds an
/// unexpired recommendation with the same owner, kind, and title. Expired
/// rows do not block re-emission.
pub fn deduplicate_pending(
    existing: &[ProactiveRecommendation],
    drafts: Vec<ProactiveRecommendation>,
    now: DateTime<Utc>,
) -> Vec<ProactiveRecommendation> {
    drafts
        .into_iter()
        .filter(|draft| {
            !existing.iter().any(|rec| {
                rec.user_id == draft.user_id
                    && rec.kind == draft.kind
                    && rec.title == draft.title
                    && !rec.is_expired(now)
            })
        })
        .collect()
}
