//! File-backed reference storage adapter.
//!
//! Profiles live in one JSON array; interactions and recommendations are
//! JSONL appends. All encoding and decoding of stored rows happens here —
//! the engine only ever sees domain types. Profile decoding is tolerant per
//! field: a malformed tag list degrades to an empty default instead of
//! failing the row, and a row without a usable id is skipped, so one corrupt
//! entry can never abort a whole candidate batch.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::matching::{CohortStat, InteractionRecord};
use crate::models::profile::{
    apply_profile_changes, Profile, ProfileFieldChange, ProfileStatus, ProfileType,
};
use crate::models::recommendation::ProactiveRecommendation;
use crate::services::collaborative::cohort_statistics;
use crate::storage::{CandidateFilter, InteractionStore, ProfileStore, RecommendationStore};

const PROFILES_FILE: &str = "profiles.json";
const INTERACTIONS_FILE: &str = "interactions.jsonl";
const RECOMMENDATIONS_FILE: &str = "recommendations.jsonl";

pub struct JsonDataStore {
    root: PathBuf,
}

impl JsonDataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn profiles_path(&self) -> PathBuf {
        self.root.join(PROFILES_FILE)
    }

    fn interactions_path(&self) -> PathBuf {
        self.root.join(INTERACTIONS_FILE)
    }

    fn recommendations_path(&self) -> PathBuf {
        self.root.join(RECOMMENDATIONS_FILE)
    }

    /// Inserts or replaces one profile row.
    pub fn upsert_profile(&self, profile: &Profile) -> Result<()> {
        let mut rows = self.load_raw_profiles()?;
        rows.retain(|row| row.get("id").and_then(Value::as_i64) != Some(profile.id));
        rows.push(serde_json::to_value(profile)?);
        self.save_raw_profiles(&rows)
    }

    /// Applies a validated field-change batch to a stored profile. Unknown
    /// field names reject the batch before anything is written.
    pub fn update_profile(
        &self,
        user_id: i64,
        changes: &[ProfileFieldChange],
    ) -> Result<Vec<String>> {
        let mut profile = self
            .get_profile(user_id)?
            .with_context(|| format!("No stored profile for user {user_id}"))?;
        let diff = apply_profile_changes(&mut profile, changes)?;
        self.upsert_profile(&profile)?;
        Ok(diff)
    }

    /// Flags a stored recommendation as read. Returns false when the id is
    /// unknown for that user. The row itself stays stored either way.
    pub fn mark_read(&self, user_id: i64, recommendation_id: Uuid) -> Result<bool> {
        let mut rows: Vec<ProactiveRecommendation> =
            read_jsonl(&self.recommendations_path())?;
        let mut found = false;
        for row in &mut rows {
            if row.user_id == user_id && row.id == recommendation_id {
                row.read = true;
                found = true;
            }
        }
        if found {
            rewrite_jsonl(&self.recommendations_path(), &rows)?;
        }
        Ok(found)
    }

    fn load_raw_profiles(&self) -> Result<Vec<Value>> {
        let path = self.profiles_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile store {:?}", path))?;
        let rows: Vec<Value> = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse profile store {:?}", path))?;
        Ok(rows)
    }

    fn save_raw_profiles(&self, rows: &[Value]) -> Result<()> {
        let path = self.profiles_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create store directory {:?}", dir))?;
        }
        let data = serde_json::to_string_pretty(rows)?;
        fs::write(&path, data)
            .with_context(|| format!("Failed to write profile store {:?}", path))?;
        Ok(())
    }

    fn decoded_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self
            .load_raw_profiles()?
            .iter()
            .filter_map(decode_profile)
            .collect())
    }
}

impl ProfileStore for JsonDataStore {
    fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        Ok(self
            .decoded_profiles()?
            .into_iter()
            .find(|profile| profile.id == user_id))
    }

    fn list_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Profile>> {
        let mut candidates: Vec<Profile> = self
            .decoded_profiles()?
            .into_iter()
            .filter(|profile| {
                profile.id != filter.exclude_user
                    && profile.is_validated()
                    && (filter.match_types.is_empty()
                        || filter.match_types.contains(&profile.profile_type))
                    && (filter.sectors.is_empty()
                        || profile.sectors.intersection(&filter.sectors).next().is_some())
                    && (filter.locations.is_empty()
                        || profile
                            .locations
                            .intersection(&filter.locations)
                            .next()
                            .is_some())
            })
            .collect();
        candidates.sort_by_key(|profile| profile.id);
        if filter.fetch_limit > 0 {
            candidates.truncate(filter.fetch_limit);
        }
        Ok(candidates)
    }

    fn count_recent_profiles(&self, since: Duration, exclude_user: i64) -> Result<usize> {
        let cutoff = Utc::now() - since;
        Ok(self
            .decoded_profiles()?
            .iter()
            .filter(|profile| {
                profile.id != exclude_user
                    && profile.is_validated()
                    && profile.created_at > cutoff
            })
            .count())
    }
}

impl InteractionStore for JsonDataStore {
    fn append(&self, record: &InteractionRecord) -> Result<()> {
        append_jsonl(&self.interactions_path(), record)
    }

    fn query_cohort(&self, user_id: i64) -> Result<Vec<CohortStat>> {
        let records: Vec<InteractionRecord> = read_jsonl(&self.interactions_path())?;
        Ok(cohort_statistics(&records, user_id))
    }
}

impl RecommendationStore for JsonDataStore {
    fn persist(&self, recommendation: &ProactiveRecommendation) -> Result<()> {
        append_jsonl(&self.recommendations_path(), recommendation)
    }

    fn list_for_user(&self, user_id: i64) -> Result<Vec<ProactiveRecommendation>> {
        let rows: Vec<ProactiveRecommendation> = read_jsonl(&self.recommendations_path())?;
        Ok(rows.into_iter().filter(|row| row.user_id == user_id).collect())
    }
}

/// Tolerant per-field decode of one stored profile row. Rows without a
/// numeric id are unusable and skipped; every other field falls back to its
/// empty default when malformed.
fn decode_profile(raw: &Value) -> Option<Profile> {
    let id = raw.get("id")?.as_i64()?;
    let profile_type = decode_field(raw, "profile_type").unwrap_or(ProfileType::Visitor);
    let status = decode_field(raw, "status").unwrap_or(ProfileStatus::Pending);
    let created_at: DateTime<Utc> =
        decode_field(raw, "created_at").unwrap_or(DateTime::<Utc>::MIN_UTC);
    Some(Profile {
        id,
        profile_type,
        status,
        description: string_field(raw, "description"),
        sectors: tag_field(raw, "sectors"),
        products_services: tag_field(raw, "products_services"),
        objectives: tag_field(raw, "objectives"),
        interest_themes: tag_field(raw, "interest_themes"),
        looking_for: tag_field(raw, "looking_for"),
        locations: tag_field(raw, "locations"),
        languages: tag_field(raw, "languages"),
        certifications: tag_field(raw, "certifications"),
        company_size: string_field(raw, "company_size"),
        meeting_availability: string_field(raw, "meeting_availability"),
        created_at,
    })
}

fn decode_field<T: DeserializeOwned>(raw: &Value, key: &str) -> Option<T> {
    raw.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn tag_field(raw: &Value, key: &str) -> BTreeSet<String> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let mut rows = Vec::new();
    for line in data.lines().filter(|line| !line.trim().is_empty()) {
        let row = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse stored row in {:?}", path))?;
        rows.push(row);
    }
    Ok(rows)
}

fn append_jsonl<T: Serialize>(path: &Path, row: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create store directory {:?}", dir))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {:?}", path))?;
    file.write_all(serde_json::to_string(row)?.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

fn rewrite_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut data = String::new();
    for row in rows {
        data.push_str(&serde_json::to_string(row)?);
        data.push('\n');
    }
    fs::write(path, data).with_context(|| format!("Failed to rewrite {:?}", path))?;
    Ok(())
}
