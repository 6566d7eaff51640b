//! Topical trend detection.
//!
//! The default source is a fixed catalog of current port-industry trends;
//! anything smarter can be plugged in behind [`TrendSource`].

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::Utc;

use crate::models::recommendation::TrendRecord;

/// Supplies the ranked trends driving trend-based recommendations.
pub trait TrendSource: Send + Sync {
    /// Current trends sorted by strength descending, with fresh detection
    /// timestamps.
    fn current_trends(&self) -> Vec<TrendRecord>;
}

/// One catalog entry: a trend minus its detection timestamp.
#[derive(Debug, Clone)]
pub struct TrendSeed {
    pub topic: String,
    pub strength: f64,
    pub sectors: BTreeSet<String>,
    pub description: String,
    pub growth_label: String,
}

impl TrendSeed {
    pub fn new(
        topic: impl Into<String>,
        strength: f64,
        sectors: &[&str],
        description: impl Into<String>,
        growth_label: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            strength,
            sectors: sectors.iter().map(|s| (*s).to_string()).collect(),
            description: description.into(),
            growth_label: growth_label.into(),
        }
    }
}

/// Fixed trend catalog.
#[derive(Debug, Clone)]
pub struct StaticTrendCatalog {
    seeds: Vec<TrendSeed>,
}

impl StaticTrendCatalog {
    pub fn new(seeds: Vec<TrendSeed>) -> Self {
        Self { seeds }
    }
}

impl Default for StaticTrendCatalog {
    fn default() -> Self {
        Self::new(vec![
            TrendSeed::new(
                "AI in port operations",
                0.85,
                &["digitalization", "port_management"],
                "Growing adoption of artificial intelligence for optimizing port operations",
                "+45%",
            ),
            TrendSeed::new(
                "Offshore renewable energy",
                0.78,
                &["green_energy", "maritime_tech"],
                "Expansion of offshore wind projects and green hydrogen solutions",
                "+32%",
            ),
            TrendSeed::new(
                "Terminal automation",
                0.72,
                &["port_equipment", "digitalization"],
                "Heavy investment in automated container terminal projects",
                "+28%",
            ),
            TrendSeed::new(
                "Sustainability and decarbonization",
                0.68,
                &["green_energy", "regulations"],
                "New environmental regulations and the shift to green solutions",
                "+25%",
            ),
        ])
    }
}

impl TrendSource for StaticTrendCatalog {
    fn current_trends(&self) -> Vec<TrendRecord> {
        let now = Utc::now();
        let mut trends: Vec<TrendRecord> = self
            .seeds
            .iter()
            .map(|seed| TrendRecord {
                topic: seed.topic.clone(),
                strength: seed.strength,
                sectors: seed.sectors.clone(),
                description: seed.description.clone(),
                growth_label: seed.growth_label.clone(),
                detected_at: now,
            })
            .collect();
        trends.sort_by(|a, b| {
            b.strength
                .partial_cmp(&a.strength)
                .unwrap_or(Ordering::Equal)
        });
        trends
    }
}
