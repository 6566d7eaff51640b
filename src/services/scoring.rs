//! Deterministic compatibility scoring and matching-factor analysis.
//!
//! `compatibility_score` is a pure function of its two inputs: same profiles,
//! same score, no randomness anywhere on this path. It is directional — the
//! complementarity factor reads the requester's objectives against the
//! candidate's offerings, so swapping arguments can change the result.

use crate::models::matching::MatchingFactors;
use crate::models::profile::Profile;
use crate::services::analysis::TextAnalysis;

const SECTOR_OVERLAP_CAP: u32 = 25;
const COMPLEMENTARITY_CAP: u32 = 20;
const INTEREST_OVERLAP_CAP: u32 = 20;

/// Company-size category pairs and their contribution. Matched as
/// case-insensitive substrings of either side's category string, either
/// direction; the first matching pair wins and nothing accumulates.
const SIZE_COMPATIBILITY: &[(&str, &str, u32)] = &[
    ("startup", "enterprise", 8),
    ("sme", "enterprise", 10),
    ("sme", "sme", 10),
    ("startup", "startup", 7),
];

/// Weighted additive compatibility between two profiles, clamped to [0,100].
pub fn compatibility_score(requester: &Profile, candidate: &Profile) -> u8 {
    let mut score: u32 = 0;

    // Sector overlap: 8 points per common sector, capped at 25.
    let common_sectors = requester.sectors.intersection(&candidate.sectors).count() as u32;
    score += (common_sectors * 8).min(SECTOR_OVERLAP_CAP);

    // Complementarity: requester objectives vs candidate offerings.
    let mut complementarity: u32 = 0;
    for objective in &requester.objectives {
        for service in &candidate.products_services {
            if shares_token(objective, service) {
                complementarity += 1;
            }
        }
    }
    score += (complementarity * 4).min(COMPLEMENTARITY_CAP);

    // Interest themes: 5 points per common theme, capped at 20.
    let common_themes = requester
        .interest_themes
        .intersection(&candidate.interest_themes)
        .count() as u32;
    score += (common_themes * 5).min(INTEREST_OVERLAP_CAP);

    score += geography_points(requester, candidate);
    score += company_size_points(&requester.company_size, &candidate.company_size);
    score += availability_points(&requester.meeting_availability, &candidate.meeting_availability);

    score.min(100) as u8
}

/// True when some whitespace token of `need` appears, case-insensitively, as
/// a substring of `offer`.
pub fn shares_token(need: &str, offer: &str) -> bool {
    let offer = offer.to_lowercase();
    need.to_lowercase()
        .split_whitespace()
        .any(|token| offer.contains(token))
}

fn geography_points(a: &Profile, b: &Profile) -> u32 {
    if a.locations.is_empty() || b.locations.is_empty() {
        return 0;
    }
    if a.locations.intersection(&b.locations).next().is_some() {
        return 15;
    }
    let cross_match = a.locations.iter().any(|left| {
        b.locations.iter().any(|right| {
            let left = left.to_lowercase();
            let right = right.to_lowercase();
            left.contains(&right) || right.contains(&left)
        })
    });
    if cross_match {
        8
    } else {
        0
    }
}

fn company_size_points(size_a: &str, size_b: &str) -> u32 {
    if size_a.is_empty() || size_b.is_empty() {
        return 0;
    }
    let a = size_a.to_lowercase();
    let b = size_b.to_lowercase();
    for (first, second, points) in SIZE_COMPATIBILITY {
        if (a.contains(first) && b.contains(second)) || (a.contains(second) && b.contains(first)) {
            return *points;
        }
    }
    0
}

fn availability_points(avail_a: &str, avail_b: &str) -> u32 {
    let immediate = avail_a.to_lowercase().contains("immediate")
        || avail_b.to_lowercase().contains("immediate");
    if immediate {
        10
    } else if !avail_a.is_empty() && !avail_b.is_empty() {
        5
    } else {
        0
    }
}

/// Derives the explanation features for a scored pair.
pub fn analyze_matching_factors(
    requester: &Profile,
    candidate: &Profile,
    requester_analysis: &TextAnalysis,
    candidate_analysis: &TextAnalysis,
) -> MatchingFactors {
    let common_interests: Vec<String> = requester_analysis
        .topics
        .intersection(&candidate_analysis.topics)
        .cloned()
        .collect();

    let sector_alignment = if requester.sectors.is_empty() || candidate.sectors.is_empty() {
        0.0
    } else {
        let overlap = requester.sectors.intersection(&candidate.sectors).count() as f64;
        let widest = requester.sectors.len().max(candidate.sectors.len()) as f64;
        (overlap / widest).min(1.0)
    };

    let mut complementary_needs = Vec::new();
    for need in &requester.looking_for {
        for offer in &candidate.products_services {
            if shares_token(need, offer) {
                complementary_needs.push(format!("{need} ← {offer}"));
            }
        }
    }

    MatchingFactors {
        common_interests,
        complementary_needs,
        sector_alignment,
    }
}
