//! Per-user context: profile, preferences, history and feedback

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Relaxation,
    Adventure,
    Family,
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BudgetTier::Low => "low",
            BudgetTier::Mid => "mid",
            BudgetTier::High => "high",
        })
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TravelStyle::Relaxation => "relaxation",
            TravelStyle::Adventure => "adventure",
            TravelStyle::Family => "family",
        })
    }
}

/// Travel profile; every field starts empty/unset
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    /// Favourite activity tags, e.g. `adventure`, `culture`, `food`
    pub activities: Vec<String>,
    pub budget: Option<BudgetTier>,
    pub style: Option<TravelStyle>,
    /// Free-form, e.g. `18-25`
    pub age_group: Option<String>,
    /// Any other profile key a caller chose to store
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Partial profile; only the keys present are merged
///
/// The outer `Option` says whether the key was supplied, the inner one holds
/// its value, so `"budget": null` clears the budget while a missing key
/// leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub activities: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget: Option<Option<BudgetTier>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<Option<TravelStyle>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub age_group: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Only called for keys that are present, so `null` becomes `Some(None)`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Profile {
    /// Overwrite only the fields supplied in `update`
    pub fn merge(&mut self, update: ProfileUpdate) {
        if let Some(activities) = update.activities {
            self.activities = activities.unwrap_or_default();
        }
        if let Some(budget) = update.budget {
            self.budget = budget;
        }
        if let Some(style) = update.style {
            self.style = style;
        }
        if let Some(age_group) = update.age_group {
            self.age_group = age_group;
        }
        self.extra.extend(update.extra);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserRecord {
    pub profile: Profile,
    pub preferences: BTreeMap<String, Value>,
    /// Append-only, insertion order
    pub history: Vec<String>,
    /// Append-only, insertion order
    pub feedback: Vec<String>,
}

impl UserRecord {
    /// Short plain-text summary used to personalise recommendations
    #[must_use]
    pub fn summary(&self) -> String {
        let unset = "not set".to_string();
        let activities = if self.profile.activities.is_empty() {
            unset.clone()
        } else {
            self.profile.activities.join(", ")
        };

        let mut lines = vec![
            "User profile:".to_string(),
            format!("- Activities: {activities}"),
            format!(
                "- Budget: {}",
                self.profile.budget.map_or_else(|| unset.clone(), |b| b.to_string())
            ),
            format!(
                "- Style: {}",
                self.profile.style.map_or_else(|| unset.clone(), |s| s.to_string())
            ),
            format!(
                "- Age group: {}",
                self.profile.age_group.clone().unwrap_or_else(|| unset.clone())
            ),
        ];

        for (key, value) in &self.profile.extra {
            lines.push(format!("- {key}: {value}"));
        }

        if !self.preferences.is_empty() {
            lines.push("Preferences:".to_string());
            for (key, value) in &self.preferences {
                lines.push(format!("- {key}: {value}"));
            }
        }

        lines.push(format!("Past queries: {}", self.history.len()));
        if let Some(last) = self.history.last() {
            lines.push(format!("- Most recent: {last}"));
        }
        lines.push(format!("Feedback entries: {}", self.feedback.len()));

        lines.join("\n")
    }
}
