//! The matching and recommendation engine.
//!
//! A single long-lived instance constructed with its storage collaborators
//! injected. Every call is a stateless computation over data read at call
//! start; the only mutable state is the seedable rng feeding cosmetic
//! confidence values and conversation-topic padding, never the scoring path.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde_json::json;

use crate::config::EngineConfig;
use crate::events::{EngineEventLog, EngineEventType};
use crate::models::matching::{
    InteractionKind, InteractionOutcome, InteractionRecord, MatchResult, MatchingRequest,
};
use crate::models::profile::Profile;
use crate::models::recommendation::ProactiveRecommendation;
use crate::services::analysis::{analyze_text, TextAnalysis};
use crate::services::collaborative::{adjusted_score, collaborative_boosts, DEFAULT_BOOST};
use crate::services::explanation::{
    assess_business_potential, build_explanation, recommended_action, suggest_conversation_topics,
};
use crate::services::recommendations::{
    deduplicate_pending, new_match_recommendation, trend_recommendation,
};
use crate::services::scoring::{analyze_matching_factors, compatibility_score};
use crate::services::trends::TrendSource;
use crate::storage::{CandidateFilter, InteractionStore, ProfileStore, RecommendationStore};

pub struct MatchEngine {
    profiles: Arc<dyn ProfileStore>,
    interactions: Arc<dyn InteractionStore>,
    recommendations: Arc<dyn RecommendationStore>,
    trends: Arc<dyn TrendSource>,
    config: EngineConfig,
    events: EngineEventLog,
    rng: Mutex<StdRng>,
}

impl MatchEngine {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        interactions: Arc<dyn InteractionStore>,
        recommendations: Arc<dyn RecommendationStore>,
        trends: Arc<dyn TrendSource>,
        config: EngineConfig,
        events: EngineEventLog,
    ) -> Self {
        Self {
            profiles,
            interactions,
            recommendations,
            trends,
            config,
            events,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the cosmetic rng with a seeded one for deterministic tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Scores, explains, adjusts, and ranks candidates for one request.
    ///
    /// An unknown requester yields an empty result set rather than an error:
    /// at this layer "no results" is indistinguishable from "unknown user".
    /// A failure while building one candidate's explanation bundle excludes
    /// only that candidate.
    pub fn find_matches(&self, request: &MatchingRequest) -> Result<Vec<MatchResult>> {
        let Some(requester) = self.profiles.get_profile(request.user_id)? else {
            return Ok(Vec::new());
        };
        let filter = CandidateFilter {
            exclude_user: request.user_id,
            match_types: request.match_types.clone(),
            sectors: request.sectors.clone(),
            locations: request.location_filter.clone(),
            fetch_limit: request
                .limit
                .saturating_mul(self.config.matching.candidate_fetch_multiplier),
        };
        let candidates = self.profiles.list_candidates(&filter)?;

        // Base scoring is pure and per-candidate independent.
        let accepted: Vec<(Profile, u8)> = candidates
            .into_par_iter()
            .map(|candidate| {
                let score = compatibility_score(&requester, &candidate);
                (candidate, score)
            })
            .filter(|(_, score)| *score >= request.min_compatibility)
            .collect();

        let mut results = Vec::new();
        {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let requester_analysis = analyze_text(&requester.description, &mut *rng);
            for (candidate, score) in &accepted {
                match build_match_result(
                    &requester,
                    &requester_analysis,
                    candidate,
                    *score,
                    &mut rng,
                ) {
                    Ok(result) => results.push(result),
                    Err(err) => {
                        let _ = self.events.append(
                            EngineEventType::CandidateSkipped,
                            json!({
                                "requester_id": request.user_id,
                                "candidate_id": candidate.id,
                                "reason": err.to_string(),
                            }),
                        );
                    }
                }
            }
        }

        if !results.is_empty() {
            let stats = self.interactions.query_cohort(request.user_id)?;
            let targets: Vec<i64> = results.iter().map(|result| result.matched_user_id).collect();
            let boosts = collaborative_boosts(&stats, &targets);
            for result in &mut results {
                let boost = boosts
                    .get(&result.matched_user_id)
                    .copied()
                    .unwrap_or(DEFAULT_BOOST);
                result.compatibility_score = adjusted_score(result.compatibility_score, boost);
            }
        }

        results.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));
        results.truncate(request.limit);
        self.events.append(
            EngineEventType::MatchSearchCompleted,
            json!({
                "requester_id": request.user_id,
                "returned": results.len(),
                "min_compatibility": request.min_compatibility,
            }),
        )?;
        Ok(results)
    }

    /// Drafts, deduplicates, persists, and returns proactive recommendations
    /// for one user. Unknown users yield an empty sequence.
    pub fn generate_recommendations(
        &self,
        user_id: i64,
    ) -> Result<Vec<ProactiveRecommendation>> {
        let Some(profile) = self.profiles.get_profile(user_id)? else {
            return Ok(Vec::new());
        };
        let now = Utc::now();
        let settings = &self.config.recommendations;

        let mut drafts = Vec::new();
        for trend in self.trends.current_trends() {
            let matches_interest = trend
                .sectors
                .intersection(&profile.interest_themes)
                .next()
                .is_some();
            if matches_interest {
                drafts.push(trend_recommendation(
                    user_id,
                    &trend,
                    now,
                    settings.trend_ttl_days,
                ));
            }
        }

        let window = Duration::days(settings.recent_signup_window_days);
        let recent_signups = self.profiles.count_recent_profiles(window, user_id)?;
        if recent_signups > 0 {
            drafts.push(new_match_recommendation(
                user_id,
                recent_signups,
                now,
                settings.new_match_ttl_days,
            ));
        }

        let existing = self.recommendations.list_for_user(user_id)?;
        let emitted = deduplicate_pending(&existing, drafts, now);
        for recommendation in &emitted {
            self.recommendations.persist(recommendation)?;
        }
        self.events.append(
            EngineEventType::RecommendationsGenerated,
            json!({ "user_id": user_id, "emitted": emitted.len() }),
        )?;
        Ok(emitted)
    }

    /// Recomputes compatibility between the two parties at call time and
    /// appends one interaction record. Silent no-op when either profile
    /// cannot be resolved — the caller validated existence upstream.
    pub fn record_feedback(
        &self,
        actor_id: i64,
        target_id: i64,
        kind: InteractionKind,
        outcome: InteractionOutcome,
    ) -> Result<()> {
        let (Some(actor), Some(target)) = (
            self.profiles.get_profile(actor_id)?,
            self.profiles.get_profile(target_id)?,
        ) else {
            return Ok(());
        };
        let score = compatibility_score(&actor, &target);
        self.interactions.append(&InteractionRecord {
            actor_id,
            target_id,
            kind,
            compatibility_score: score,
            outcome,
            recorded_at: Utc::now(),
        })?;
        self.events.append(
            EngineEventType::FeedbackRecorded,
            json!({
                "actor_id": actor_id,
                "target_id": target_id,
                "compatibility_score": score,
            }),
        )?;
        Ok(())
    }
}

fn build_match_result(
    requester: &Profile,
    requester_analysis: &TextAnalysis,
    candidate: &Profile,
    score: u8,
    rng: &mut StdRng,
) -> Result<MatchResult> {
    let candidate_analysis = analyze_text(&candidate.description, rng);
    let factors =
        analyze_matching_factors(requester, candidate, requester_analysis, &candidate_analysis);
    let explanation = build_explanation(&factors, score);
    let conversation_topics = suggest_conversation_topics(&factors, rng);
    Ok(MatchResult {
        matched_user_id: candidate.id,
        compatibility_score: score,
        explanation,
        mutual_interests: factors.common_interests.clone(),
        business_potential: assess_business_potential(score, &factors),
        recommended_action: recommended_action(score, &factors),
        matching_factors: factors,
        conversation_topics,
    })
}
