//! Collaborative adjustment over the append-only interaction log.
//!
//! Users behaviorally similar to the requester lend confidence to a
//! candidate. The two-hop cohort query and the boost arithmetic are kept as
//! separate operations so each can be tested on its own.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::matching::{CohortStat, InteractionRecord};

/// Boost assigned to candidates with no contributing cohort history.
pub const DEFAULT_BOOST: f64 = 0.5;

/// Two-hop join over the interaction log:
/// hop one collects the targets `user_id` interacted with successfully,
/// hop two collects the other actors whose own targets cover at least
/// `min(2, |hop-one targets|)` of them. All interactions by that cohort are
/// then aggregated per target. Output is ordered by target id.
pub fn cohort_statistics(records: &[InteractionRecord], user_id: i64) -> Vec<CohortStat> {
    let successful_targets: BTreeSet<i64> = records
        .iter()
        .filter(|record| record.actor_id == user_id && record.outcome.is_success())
        .map(|record| record.target_id)
        .collect();
    if successful_targets.is_empty() {
        return Vec::new();
    }
    let required_shared = successful_targets.len().min(2);

    let mut targets_by_actor: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
    for record in records {
        if record.actor_id != user_id {
            targets_by_actor
                .entry(record.actor_id)
                .or_default()
                .insert(record.target_id);
        }
    }
    let cohort: BTreeSet<i64> = targets_by_actor
        .iter()
        .filter(|(_, targets)| {
            targets.intersection(&successful_targets).count() >= required_shared
        })
        .map(|(actor, _)| *actor)
        .collect();
    if cohort.is_empty() {
        return Vec::new();
    }

    let mut grouped: BTreeMap<i64, (f64, usize, f64)> = BTreeMap::new();
    for record in records {
        if cohort.contains(&record.actor_id) {
            let entry = grouped.entry(record.target_id).or_insert((0.0, 0, 0.0));
            entry.0 += f64::from(record.compatibility_score);
            entry.1 += 1;
            entry.2 += record.outcome.indicator();
        }
    }
    grouped
        .into_iter()
        .map(|(target_id, (score_sum, count, success_sum))| CohortStat {
            target_id,
            avg_score: score_sum / count as f64,
            interactions: count,
            avg_success: success_sum / count as f64,
        })
        .collect()
}

/// Confidence boost contributed by one cohort row.
pub fn boost_for(stat: &CohortStat) -> f64 {
    (stat.avg_score / 100.0) * (1.0 + stat.avg_success) * (1.0 + stat.interactions as f64).ln()
}

/// Per-candidate boost: maximum over contributing cohort rows, floored at
/// [`DEFAULT_BOOST`]. Candidates without history get the default.
pub fn collaborative_boosts(stats: &[CohortStat], candidates: &[i64]) -> BTreeMap<i64, f64> {
    let mut boosts = BTreeMap::new();
    for candidate in candidates {
        let mut boost = DEFAULT_BOOST;
        for stat in stats.iter().filter(|stat| stat.target_id == *candidate) {
            boost = boost.max(boost_for(stat));
        }
        boosts.insert(*candidate, boost);
    }
    boosts
}

/// Applies the boost to an accepted base score:
/// `min(100, floor(base × (1 + boost × 0.1)))`.
pub fn adjusted_score(base: u8, boost: f64) -> u8 {
    (f64::from(base) * (1.0 + boost * 0.1)).floor().min(100.0) as u8
}
