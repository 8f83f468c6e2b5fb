use super::{Tool, parse_args};
use crate::ConciergeError;
use crate::context::UserContextStore;
use crate::models::ProfileUpdate;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

pub const PROFILE_UPDATED: &str = "✅ Your profile has been updated!";
pub const PREFERENCES_UPDATED: &str = "✅ Your preferences have been updated!";
pub const FEEDBACK_RECEIVED: &str =
    "✅ Thank you for your feedback! It will help us improve your recommendations.";

pub struct ProfileTool {
    store: Arc<UserContextStore>,
}

impl ProfileTool {
    pub fn new(store: Arc<UserContextStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileParams {
    user_id: String,
    profile_updates: ProfileUpdate,
}

#[async_trait]
impl Tool for ProfileTool {
    fn name(&self) -> &str {
        "update_user_profile"
    }

    fn description(&self) -> &str {
        "Save what the user told you about themselves: favourite activities, budget tier, travel style, age group."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "string"},
                "profile_updates": {
                    "type": "object",
                    "properties": {
                        "activities": {"type": "array", "items": {"type": "string"}},
                        "budget": {"type": "string", "enum": ["low", "mid", "high"]},
                        "style": {"type": "string", "enum": ["relaxation", "adventure", "family"]},
                        "age_group": {"type": "string"}
                    },
                    "additionalProperties": true
                }
            },
            "required": ["user_id", "profile_updates"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: ProfileParams = parse_args(args)?;
        info!(user_id = %params.user_id, "Updating user profile");
        self.store
            .update_profile(&params.user_id, params.profile_updates);
        Ok(PROFILE_UPDATED.to_string())
    }
}

pub struct PreferencesTool {
    store: Arc<UserContextStore>,
}

impl PreferencesTool {
    pub fn new(store: Arc<UserContextStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct PreferencesParams {
    user_id: String,
    preferences: BTreeMap<String, Value>,
}

#[async_trait]
impl Tool for PreferencesTool {
    fn name(&self) -> &str {
        "update_user_preferences"
    }

    fn description(&self) -> &str {
        "Save free-form travel preferences such as seat, diet or preferred airlines."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "string"},
                "preferences": {"type": "object", "additionalProperties": true}
            },
            "required": ["user_id", "preferences"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: PreferencesParams = parse_args(args)?;
        info!(user_id = %params.user_id, keys = params.preferences.len(), "Updating user preferences");
        self.store
            .update_preferences(&params.user_id, params.preferences);
        Ok(PREFERENCES_UPDATED.to_string())
    }
}

pub struct FeedbackTool {
    store: Arc<UserContextStore>,
}

impl FeedbackTool {
    pub fn new(store: Arc<UserContextStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct FeedbackParams {
    user_id: String,
    feedback: String,
}

#[async_trait]
impl Tool for FeedbackTool {
    fn name(&self) -> &str {
        "submit_feedback"
    }

    fn description(&self) -> &str {
        "Record the user's feedback on a recommendation."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {"type": "string"},
                "feedback": {"type": "string"}
            },
            "required": ["user_id", "feedback"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: FeedbackParams = parse_args(args)?;
        info!(user_id = %params.user_id, "Recording feedback");
        self.store.add_feedback(&params.user_id, params.feedback);
        Ok(FEEDBACK_RECEIVED.to_string())
    }
}

/// Read-only view of what is known about a user
pub struct UserContextTool {
    store: Arc<UserContextStore>,
}

impl UserContextTool {
    pub fn new(store: Arc<UserContextStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct UserContextParams {
    user_id: String,
}

#[async_trait]
impl Tool for UserContextTool {
    fn name(&self) -> &str {
        "get_user_context"
    }

    fn description(&self) -> &str {
        "Summarise the stored profile, preferences, history and feedback for a user."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"user_id": {"type": "string"}},
            "required": ["user_id"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: UserContextParams = parse_args(args)?;
        Ok(match self.store.snapshot(&params.user_id) {
            Some(record) => record.summary(),
            None => format!("ℹ️ No saved context for user '{}' yet.", params.user_id),
        })
    }
}
