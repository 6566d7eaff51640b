use std::fs;

use crate::support::{exhibitor, tags, visitor, IntegrationHarness};
use portmatch::events::EngineEventType;
use portmatch::models::matching::{BusinessPotential, MatchingRequest};
use portmatch::models::profile::{Profile, ProfileType};

/// Requester scoring 70 against a fully-equipped candidate: four common
/// sectors (25), four common themes (20), same location (15), both immediately
/// available (10).
fn requester() -> Profile {
    let mut profile = visitor(1);
    profile.sectors = tags(&["s1", "s2", "s3", "s4"]);
    profile.interest_themes = tags(&["t1", "t2", "t3", "t4"]);
    profile.objectives = tags(&["automation systems"]);
    profile.locations = tags(&["Rotterdam"]);
    profile.meeting_availability = "immediate".into();
    profile
}

fn base_candidate(id: i64) -> Profile {
    let mut profile = exhibitor(id);
    profile.sectors = tags(&["s1", "s2", "s3", "s4"]);
    profile.interest_themes = tags(&["t1", "t2", "t3", "t4"]);
    profile.locations = tags(&["Rotterdam"]);
    profile.meeting_availability = "immediate".into();
    profile
}

#[test]
fn unknown_requester_returns_empty() {
    let harness = IntegrationHarness::new();
    let results = harness
        .engine()
        .find_matches(&MatchingRequest::for_user(404))
        .expect("matches");
    assert!(results.is_empty());
}

#[test]
fn results_are_ranked_adjusted_and_limited() {
    let harness = IntegrationHarness::new();
    harness.insert(&requester());

    // Base 70, 74, and 78: zero, one, and two complementary offers for the
    // "automation systems" objective.
    harness.insert(&base_candidate(10));
    let mut one_offer = base_candidate(11);
    one_offer.products_services = tags(&["terminal automation systems suite"]);
    harness.insert(&one_offer);
    let mut two_offers = base_candidate(12);
    two_offers.products_services = tags(&[
        "automation systems integration",
        "crane automation systems",
    ]);
    harness.insert(&two_offers);
    // Base 26, below the default threshold.
    let mut weak = exhibitor(13);
    weak.sectors = tags(&["s1", "s2"]);
    weak.interest_themes = tags(&["t1", "t2"]);
    harness.insert(&weak);

    let mut request = MatchingRequest::for_user(1);
    request.limit = 2;
    let results = harness.engine().find_matches(&request).expect("matches");

    // No interaction history, so every survivor gets the default adjustment
    // floor(base * 1.05).
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].matched_user_id, 12);
    assert_eq!(results[0].compatibility_score, 81);
    assert_eq!(results[1].matched_user_id, 11);
    assert_eq!(results[1].compatibility_score, 77);
}

#[test]
fn threshold_applies_before_adjustment() {
    let harness = IntegrationHarness::new();
    harness.insert(&requester());
    harness.insert(&base_candidate(10));

    // Base 70 fails a threshold of 71 even though the default adjustment
    // would lift it to 73.
    let mut request = MatchingRequest::for_user(1);
    request.min_compatibility = 71;
    let results = harness.engine().find_matches(&request).expect("matches");
    assert!(results.is_empty());
}

#[test]
fn results_carry_full_explanation_bundle() {
    let harness = IntegrationHarness::new();
    harness.insert(&requester());
    let mut candidate = base_candidate(10);
    candidate.products_services = tags(&["automation systems integration"]);
    harness.insert(&candidate);

    let results = harness
        .engine()
        .find_matches(&MatchingRequest::for_user(1))
        .expect("matches");
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(!result.explanation.is_empty());
    assert!(!result.recommended_action.is_empty());
    assert!((3..=4).contains(&result.conversation_topics.len()));
    assert_ne!(result.business_potential, BusinessPotential::Low);
}

#[test]
fn type_and_sector_filters_restrict_candidates() {
    let harness = IntegrationHarness::new();
    harness.insert(&requester());
    harness.insert(&base_candidate(10));
    let mut partner = base_candidate(11);
    partner.profile_type = ProfileType::Partner;
    harness.insert(&partner);

    let mut request = MatchingRequest::for_user(1);
    request.match_types = [ProfileType::Partner].into_iter().collect();
    let results = harness.engine().find_matches(&request).expect("matches");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].matched_user_id, 11);

    let mut request = MatchingRequest::for_user(1);
    request.sectors = tags(&["no_such_sector"]);
    let results = harness.engine().find_matches(&request).expect("matches");
    assert!(results.is_empty());
}

#[test]
fn pending_profiles_never_surface_as_candidates() {
    let harness = IntegrationHarness::new();
    harness.insert(&requester());
    let mut unapproved = base_candidate(10);
    unapproved.status = portmatch::models::profile::ProfileStatus::Pending;
    harness.insert(&unapproved);

    let results = harness
        .engine()
        .find_matches(&MatchingRequest::for_user(1))
        .expect("matches");
    assert!(results.is_empty());
}

#[test]
fn corrupt_profile_rows_are_skipped_not_fatal() {
    let harness = IntegrationHarness::new();
    harness.insert(&requester());
    harness.insert(&base_candidate(10));

    // Inject one row without an id and one with a malformed tag list directly
    // into the stored array.
    let path = harness.data_dir().join("profiles.json");
    let data = fs::read_to_string(&path).expect("read profiles");
    let mut rows: Vec<serde_json::Value> = serde_json::from_str(&data).expect("parse profiles");
    rows.push(serde_json::json!({ "profile_type": "exhibitor" }));
    rows.push(serde_json::json!({
        "id": 11,
        "profile_type": "exhibitor",
        "status": "validated",
        "sectors": "not-a-list",
        "created_at": "2026-08-01T00:00:00Z"
    }));
    fs::write(&path, serde_json::to_string(&rows).expect("encode")).expect("write profiles");

    let results = harness
        .engine()
        .find_matches(&MatchingRequest::for_user(1))
        .expect("matches");
    // Row 11 decodes with empty tag sets and scores zero; the id-less row
    // disappears entirely.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].matched_user_id, 10);
}

#[test]
fn searches_append_a_completion_event() {
    let harness = IntegrationHarness::new();
    harness.insert(&requester());
    harness.insert(&base_candidate(10));
    harness
        .engine()
        .find_matches(&MatchingRequest::for_user(1))
        .expect("matches");

    let events = harness.event_log().load_events().expect("events");
    let completed: Vec<_> = events
        .iter()
        .filter(|event| event.event_type == EngineEventType::MatchSearchCompleted)
        .collect();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].details["requester_id"], 1);
    assert_eq!(completed[0].details["returned"], 1);
}
