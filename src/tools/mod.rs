//! Tools exposed to the agent layer
//!
//! Every tool takes JSON arguments and produces display-ready text. The
//! registry is the only boundary an agent framework talks to, and it never
//! hands an error back: unknown tools, bad arguments and upstream failures
//! all come out as marker-prefixed strings.

mod advice;
mod trip;
mod user;

pub use advice::{BudgetTool, CultureTool, EventsTool, VisaTool};
pub use trip::{PlacesTool, WeatherTool};
pub use user::{FeedbackTool, PreferencesTool, ProfileTool, UserContextTool};

use crate::config::ConciergeConfig;
use crate::context::UserContextStore;
use crate::geocode::Geocoder;
use crate::places::PlaceFinder;
use crate::weather::WeatherFetcher;
use crate::ConciergeError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Trait for tools that agents can execute
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within a [`ToolRegistry`]
    fn name(&self) -> &str;

    /// Helps the model decide when to call the tool
    fn description(&self) -> &str;

    /// JSON Schema for the arguments object
    fn input_schema(&self) -> Value;

    /// Run the tool. Only argument problems are errors; lookup failures are
    /// already rendered into the returned text.
    async fn call(&self, args: Value) -> Result<String, ConciergeError>;
}

/// Serializable description of a registered tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// One tool call as received from the agent layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invocation {
    /// User on whose behalf the tool runs
    #[serde(default)]
    pub user_id: Option<String>,
    /// The user's natural-language request, recorded in their history
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default = "empty_object")]
    pub arguments: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ConciergeError> {
    serde_json::from_value(args).map_err(|e| ConciergeError::validation(e.to_string()))
}

/// Registry for managing tools
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
    store: Arc<UserContextStore>,
}

impl ToolRegistry {
    /// Empty registry recording history into `store`
    pub fn new(store: Arc<UserContextStore>) -> Self {
        Self {
            tools: BTreeMap::new(),
            store,
        }
    }

    /// Registry with every built-in tool wired to live upstream clients
    pub fn standard(
        config: &ConciergeConfig,
        store: Arc<UserContextStore>,
        geocoder: Arc<dyn Geocoder>,
    ) -> anyhow::Result<Self> {
        let weather = Arc::new(WeatherFetcher::new(&config.weather, Arc::clone(&geocoder))?);
        let places = Arc::new(PlaceFinder::new(&config.places, geocoder)?);

        let mut registry = Self::new(Arc::clone(&store));
        registry.register(Arc::new(WeatherTool::new(weather)));
        registry.register(Arc::new(PlacesTool::new(
            places,
            config.places.default_radius_m,
            config.places.default_limit,
        )));
        registry.register(Arc::new(BudgetTool));
        registry.register(Arc::new(VisaTool));
        registry.register(Arc::new(EventsTool));
        registry.register(Arc::new(CultureTool));
        registry.register(Arc::new(ProfileTool::new(Arc::clone(&store))));
        registry.register(Arc::new(PreferencesTool::new(Arc::clone(&store))));
        registry.register(Arc::new(FeedbackTool::new(Arc::clone(&store))));
        registry.register(Arc::new(UserContextTool::new(store)));
        Ok(registry)
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        if self.tools.insert(tool.name().to_string(), Arc::clone(&tool)).is_some() {
            warn!("Tool '{}' registered twice, keeping the latest", tool.name());
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions sorted by tool name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    pub fn store(&self) -> &Arc<UserContextStore> {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name; always returns display text
    pub async fn invoke(&self, name: &str, args: Value) -> String {
        self.dispatch(
            name,
            Invocation {
                arguments: args,
                ..Invocation::default()
            },
        )
        .await
    }

    /// Run a tool for a user, recording their query first when both are given
    #[instrument(skip(self, invocation), fields(user_id = invocation.user_id.as_deref()))]
    pub async fn dispatch(&self, name: &str, invocation: Invocation) -> String {
        if let (Some(user_id), Some(query)) = (&invocation.user_id, &invocation.query) {
            self.store.add_history(user_id, query.as_str());
        }

        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return format!("❌ Unknown tool '{name}'.");
        };

        debug!("Invoking tool with arguments: {}", invocation.arguments);
        match tool.call(invocation.arguments).await {
            Ok(output) => output,
            Err(ConciergeError::Validation { message }) => {
                warn!("Invalid arguments for tool '{}': {}", name, message);
                format!("❌ Invalid arguments for tool '{name}': {message}")
            }
            Err(err) => format!("❌ {}", err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the text argument"
        }

        fn input_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"text": {"type": "string"}},
                "required": ["text"]
            })
        }

        async fn call(&self, args: Value) -> Result<String, ConciergeError> {
            #[derive(Deserialize)]
            struct Params {
                text: String,
            }
            let params: Params = parse_args(args)?;
            Ok(params.text)
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new(Arc::new(UserContextStore::new()));
        registry.register(Arc::new(Echo));
        registry
    }

    #[tokio::test]
    async fn test_invoke_runs_tool() {
        assert_eq!(registry().invoke("echo", json!({"text": "hi"})).await, "hi");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_text() {
        assert_eq!(
            registry().invoke("teleport", json!({})).await,
            "❌ Unknown tool 'teleport'."
        );
    }

    #[tokio::test]
    async fn test_bad_arguments_are_text() {
        let output = registry().invoke("echo", json!({"txt": "hi"})).await;
        assert!(output.starts_with("❌ Invalid arguments for tool 'echo':"));
        assert!(output.contains("text"));
    }

    #[tokio::test]
    async fn test_dispatch_records_history() {
        let registry = registry();
        registry
            .dispatch(
                "echo",
                Invocation {
                    user_id: Some("u1".into()),
                    query: Some("say hi".into()),
                    arguments: json!({"text": "hi"}),
                },
            )
            .await;
        registry
            .dispatch(
                "echo",
                Invocation {
                    user_id: Some("u1".into()),
                    query: None,
                    arguments: json!({"text": "again"}),
                },
            )
            .await;

        let record = registry.store().snapshot("u1").unwrap();
        assert_eq!(record.history, vec!["say hi".to_string()]);
    }

    #[test]
    fn test_invocation_defaults_to_empty_arguments() {
        let invocation: Invocation = serde_json::from_value(json!({"user_id": "u"})).unwrap();
        assert_eq!(invocation.arguments, json!({}));
        assert!(invocation.query.is_none());
    }

    #[test]
    fn test_definitions_sorted() {
        let mut registry = registry();
        registry.register(Arc::new(BudgetTool));
        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["calculate_budget", "echo"]);
    }
}
