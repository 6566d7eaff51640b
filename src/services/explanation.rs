//! Turns a score and its factors into reader-facing text: explanation,
//! business-potential tier, action recommendation, conversation starters.
//! Everything here is pure except the random padding of short topic lists.

use rand::Rng;

use crate::models::matching::{BusinessPotential, MatchingFactors};
use crate::vocabulary::{CONVERSATION_SUGGESTIONS, GENERIC_CONVERSATION_TOPICS};

const PRIORITY_CONTACT_THRESHOLD: u8 = 85;

fn score_band(score: u8) -> &'static str {
    if score >= 90 {
        "Exceptional match"
    } else if score >= 80 {
        "Very good compatibility"
    } else if score >= 70 {
        "Good compatibility"
    } else {
        "Moderate compatibility"
    }
}

/// Score-band opening plus up to two supporting clauses.
pub fn build_explanation(factors: &MatchingFactors, score: u8) -> String {
    let mut clauses = Vec::new();
    if !factors.common_interests.is_empty() {
        let leading: Vec<String> = factors.common_interests.iter().take(2).cloned().collect();
        clauses.push(format!("shared interests in {}", leading.join(", ")));
    }
    if !factors.complementary_needs.is_empty() {
        clauses.push(format!(
            "complementary needs identified ({} matches)",
            factors.complementary_needs.len()
        ));
    }
    if factors.sector_alignment > 0.5 {
        clauses.push("strong sector alignment".to_string());
    }
    clauses.truncate(2);

    let band = score_band(score);
    if clauses.is_empty() {
        format!("{band} based on behavioral analysis")
    } else {
        format!("{band}: {}", clauses.join(", "))
    }
}

pub fn assess_business_potential(score: u8, factors: &MatchingFactors) -> BusinessPotential {
    if score >= 90 && factors.complementary_needs.len() >= 2 {
        BusinessPotential::VeryHigh
    } else if score >= 80
        && (factors.sector_alignment > 0.7 || factors.common_interests.len() >= 2)
    {
        BusinessPotential::High
    } else if score >= 70 {
        BusinessPotential::Medium
    } else {
        BusinessPotential::Low
    }
}

/// Ordered applicable action tags joined into one string.
pub fn recommended_action(score: u8, factors: &MatchingFactors) -> String {
    let mut tags = Vec::new();
    if score >= PRIORITY_CONTACT_THRESHOLD {
        tags.push("Priority contact recommended");
    }
    if !factors.complementary_needs.is_empty() {
        tags.push("Propose a direct collaboration");
    }
    if factors.common_interests.len() >= 2 {
        tags.push("Strong partnership potential");
    }
    if tags.is_empty() {
        tags.push("Explore collaboration opportunities");
    }
    tags.join(" • ")
}

/// Conversation starters: one mapped entry per matching common interest, one
/// for complementary needs, then random generic topics (no duplicates) until
/// the list holds at least three entries. Always 3 or 4 entries long.
pub fn suggest_conversation_topics(factors: &MatchingFactors, rng: &mut impl Rng) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for interest in &factors.common_interests {
        if let Some((_, suggestion)) = CONVERSATION_SUGGESTIONS
            .iter()
            .find(|(topic, _)| topic == interest)
        {
            let suggestion = (*suggestion).to_string();
            if !topics.contains(&suggestion) {
                topics.push(suggestion);
            }
        }
    }
    if !factors.complementary_needs.is_empty() {
        topics.push("Business collaboration opportunities".to_string());
    }
    while topics.len() < 3 {
        let pick = GENERIC_CONVERSATION_TOPICS[rng.gen_range(0..GENERIC_CONVERSATION_TOPICS.len())];
        if !topics.iter().any(|existing| existing == pick) {
            topics.push(pick.to_string());
        }
    }
    topics.truncate(4);
    topics
}
