//! Participant profiles and the explicit field-update contract.
//!
//! Tag collections are modeled as sets: duplicates collapse and ordering is
//! irrelevant. Encoding them into flat storage rows is the storage adapter's
//! concern, never the engine's.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participant categories at the event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    Visitor,
    Exhibitor,
    Partner,
}

/// Registration status as maintained by the admin approval workflow.
/// Only validated profiles take part in matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Validated,
    Pending,
    Rejected,
}

impl Default for ProfileStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A participant's declared attributes and free-text description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub profile_type: ProfileType,
    #[serde(default)]
    pub status: ProfileStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sectors: BTreeSet<String>,
    #[serde(default)]
    pub products_services: BTreeSet<String>,
    #[serde(default)]
    pub objectives: BTreeSet<String>,
    #[serde(default)]
    pub interest_themes: BTreeSet<String>,
    #[serde(default)]
    pub looking_for: BTreeSet<String>,
    #[serde(default)]
    pub locations: BTreeSet<String>,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub certifications: BTreeSet<String>,
    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub meeting_availability: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Empty validated profile, mostly useful as a fixture base.
    pub fn new(id: i64, profile_type: ProfileType) -> Self {
        Self {
            id,
            profile_type,
            status: ProfileStatus::Validated,
            description: String::new(),
            sectors: BTreeSet::new(),
            products_services: BTreeSet::new(),
            objectives: BTreeSet::new(),
            interest_themes: BTreeSet::new(),
            looking_for: BTreeSet::new(),
            locations: BTreeSet::new(),
            languages: BTreeSet::new(),
            certifications: BTreeSet::new(),
            company_size: String::new(),
            meeting_availability: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_validated(&self) -> bool {
        self.status == ProfileStatus::Validated
    }
}

/// One field-name-to-value change in a profile update request.
#[derive(Debug, Clone)]
pub struct ProfileFieldChange {
    pub field: String,
    pub value: String,
}

impl ProfileFieldChange {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Applies a batch of field changes, validating every field name against the
/// known schema before anything is written. Unknown names reject the whole
/// batch and leave the profile untouched.
pub fn apply_profile_changes(
    profile: &mut Profile,
    changes: &[ProfileFieldChange],
) -> Result<Vec<String>> {
    for change in changes {
        if !is_known_field(&change.field) {
            bail!("Unsupported profile field '{}'", change.field);
        }
    }
    let mut diff = Vec::new();
    for change in changes {
        match change.field.to_ascii_lowercase().as_str() {
            "description" => {
                profile.description = change.value.clone();
                diff.push("Updated description".into());
            }
            "company_size" => {
                profile.company_size = change.value.clone();
                diff.push("Updated company size".into());
            }
            "meeting_availability" => {
                profile.meeting_availability = change.value.clone();
                diff.push("Updated meeting availability".into());
            }
            "sectors" => {
                profile.sectors = split_tags(&change.value);
                diff.push("Updated sectors".into());
            }
            "products_services" => {
                profile.products_services = split_tags(&change.value);
                diff.push("Updated products and services".into());
            }
            "objectives" => {
                profile.objectives = split_tags(&change.value);
                diff.push("Updated objectives".into());
            }
            "interest_themes" => {
                profile.interest_themes = split_tags(&change.value);
                diff.push("Updated interest themes".into());
            }
            "looking_for" => {
                profile.looking_for = split_tags(&change.value);
                diff.push("Updated looking-for tags".into());
            }
            "locations" => {
                profile.locations = split_tags(&change.value);
                diff.push("Updated locations".into());
            }
            "languages" => {
                profile.languages = split_tags(&change.value);
                diff.push("Updated languages".into());
            }
            "certifications" => {
                profile.certifications = split_tags(&change.value);
                diff.push("Updated certifications".into());
            }
            other => bail!("Unsupported profile field '{other}'"),
        }
    }
    Ok(diff)
}

fn is_known_field(field: &str) -> bool {
    matches!(
        field.to_ascii_lowercase().as_str(),
        "description"
            | "company_size"
            | "meeting_availability"
            | "sectors"
            | "products_services"
            | "objectives"
            | "interest_themes"
            | "looking_for"
            | "locations"
            | "languages"
            | "certifications"
    )
}

fn split_tags(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
