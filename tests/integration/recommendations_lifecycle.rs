use chrono::{Duration, Utc};
use portmatch::events::EngineEventType;
use portmatch::models::profile::ProfileStatus;
use portmatch::models::recommendation::RecommendationKind;
use portmatch::services::recommendations::{deduplicate_pending, trend_recommendation};
use portmatch::services::trends::{StaticTrendCatalog, TrendSeed, TrendSource};
use portmatch::storage::RecommendationStore;

use crate::support::{exhibitor, tags, visitor, IntegrationHarness};

#[test]
fn matching_interest_theme_yields_a_trend_recommendation() {
    let harness = IntegrationHarness::new();
    let mut user = visitor(1);
    user.interest_themes = tags(&["port_management"]);
    harness.insert(&user);

    let emitted = harness
        .engine()
        .generate_recommendations(1)
        .expect("recommendations");
    assert_eq!(emitted.len(), 1);
    let rec = &emitted[0];
    assert_eq!(rec.kind, RecommendationKind::TrendingTopic);
    assert_eq!(rec.title, "Trending topic detected: AI in port operations");
    assert_eq!(rec.confidence, 85);
    assert_eq!(rec.expires_at - rec.created_at, Duration::days(7));
    assert!(!rec.read);
    assert_eq!(rec.action_suggestions.len(), 3);

    // Persisted, not just returned.
    let stored = harness.store().list_for_user(1).expect("stored");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, rec.id);
}

#[test]
fn custom_catalog_trend_confidence_rounds_from_strength() {
    let harness = IntegrationHarness::new();
    let mut user = visitor(1);
    user.interest_themes = tags(&["digitalization"]);
    harness.insert(&user);

    let catalog = StaticTrendCatalog::new(vec![TrendSeed::new(
        "Port digital twins",
        0.85,
        &["digitalization"],
        "Digital twin pilots moving into production terminals",
        "+40%",
    )]);
    let emitted = harness
        .engine_with_trends(catalog)
        .generate_recommendations(1)
        .expect("recommendations");
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].kind, RecommendationKind::TrendingTopic);
    assert_eq!(emitted[0].confidence, 85);
    assert_eq!(emitted[0].expires_at - emitted[0].created_at, Duration::days(7));
}

#[test]
fn trend_recommendations_follow_strength_order() {
    let harness = IntegrationHarness::new();
    let mut user = visitor(1);
    user.interest_themes = tags(&["digitalization"]);
    harness.insert(&user);

    let emitted = harness
        .engine()
        .generate_recommendations(1)
        .expect("recommendations");
    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].title, "Trending topic detected: AI in port operations");
    assert_eq!(emitted[0].confidence, 85);
    assert_eq!(emitted[1].title, "Trending topic detected: Terminal automation");
    assert_eq!(emitted[1].confidence, 72);
}

#[test]
fn no_matching_themes_and_no_signups_yield_nothing() {
    let harness = IntegrationHarness::new();
    harness.insert(&visitor(1));

    let emitted = harness
        .engine()
        .generate_recommendations(1)
        .expect("recommendations");
    assert!(emitted.is_empty());

    let events = harness.event_log().load_events().expect("events");
    let generated: Vec<_> = events
        .iter()
        .filter(|event| event.event_type == EngineEventType::RecommendationsGenerated)
        .collect();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].details["emitted"], 0);
}

#[test]
fn unknown_user_yields_nothing() {
    let harness = IntegrationHarness::new();
    let emitted = harness
        .engine()
        .generate_recommendations(404)
        .expect("recommendations");
    assert!(emitted.is_empty());
}

#[test]
fn recent_validated_signups_trigger_a_new_match_recommendation() {
    let harness = IntegrationHarness::new();
    harness.insert(&visitor(1));
    harness.insert(&exhibitor(2));
    let mut unapproved = exhibitor(3);
    unapproved.status = ProfileStatus::Pending;
    harness.insert(&unapproved);

    let emitted = harness
        .engine()
        .generate_recommendations(1)
        .expect("recommendations");
    assert_eq!(emitted.len(), 1);
    let rec = &emitted[0];
    assert_eq!(rec.kind, RecommendationKind::NewMatch);
    // The pending profile does not count.
    assert_eq!(rec.title, "1 new compatible profiles detected");
    assert_eq!(rec.confidence, 85);
    assert_eq!(rec.expires_at - rec.created_at, Duration::days(3));
}

#[test]
fn repeated_generation_does_not_duplicate_pending_rows() {
    let harness = IntegrationHarness::new();
    let mut user = visitor(1);
    user.interest_themes = tags(&["port_management"]);
    harness.insert(&user);

    let engine = harness.engine();
    let first = engine.generate_recommendations(1).expect("recommendations");
    assert_eq!(first.len(), 1);
    let second = engine.generate_recommendations(1).expect("recommendations");
    assert!(second.is_empty());
    assert_eq!(harness.store().list_for_user(1).expect("stored").len(), 1);
}

#[test]
fn expired_rows_do_not_block_reemission() {
    let now = Utc::now();
    let trend = &StaticTrendCatalog::default().current_trends()[0];

    let mut expired = trend_recommendation(1, trend, now - Duration::days(10), 7);
    expired.read = true;
    let draft = trend_recommendation(1, trend, now, 7);
    let kept = deduplicate_pending(&[expired], vec![draft.clone()], now);
    assert_eq!(kept.len(), 1);

    // An unexpired twin blocks, including for a different owner's draft only
    // when the owner matches.
    let live = trend_recommendation(1, trend, now, 7);
    assert!(deduplicate_pending(&[live.clone()], vec![draft], now).is_empty());
    let other_user = trend_recommendation(2, trend, now, 7);
    assert_eq!(deduplicate_pending(&[live], vec![other_user], now).len(), 1);
}

#[test]
fn mark_read_flags_the_row_and_keeps_it_stored() {
    let harness = IntegrationHarness::new();
    let mut user = visitor(1);
    user.interest_themes = tags(&["port_management"]);
    harness.insert(&user);

    let emitted = harness
        .engine()
        .generate_recommendations(1)
        .expect("recommendations");
    let rec_id = emitted[0].id;

    assert!(harness.store().mark_read(1, rec_id).expect("mark read"));
    let stored = harness.store().list_for_user(1).expect("stored");
    assert_eq!(stored.len(), 1);
    assert!(stored[0].read);

    // Wrong owner or unknown id is a no-op.
    assert!(!harness.store().mark_read(2, rec_id).expect("mark read"));
    assert!(!harness
        .store()
        .mark_read(1, uuid::Uuid::new_v4())
        .expect("mark read"));
}
