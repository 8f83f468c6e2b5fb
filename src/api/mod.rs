use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    VERSION,
    agents::{self, AgentSpec, ROSTER},
    models::UserRecord,
    tools::{Invocation, ToolDefinition, ToolRegistry},
};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Health {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ToolOutput {
    pub tool: String,
    pub output: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(call_tool))
        .route("/agents", get(list_agents))
        .route("/agents/{name}", get(get_agent))
        .route("/users/{user_id}", get(get_user))
        .with_state(state)
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}

async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    Json(state.registry.definitions())
}

// Always 200: failures are already rendered into `output`.
async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(invocation): Json<Invocation>,
) -> Json<ToolOutput> {
    info!(tool = %name, "Tool call received");
    let output = state.registry.dispatch(&name, invocation).await;
    Json(ToolOutput { tool: name, output })
}

async fn list_agents() -> Json<&'static [AgentSpec]> {
    Json(ROSTER.as_slice())
}

async fn get_agent(Path(name): Path<String>) -> Result<Json<&'static AgentSpec>, StatusCode> {
    agents::find(&name).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserRecord>, StatusCode> {
    state
        .registry
        .store()
        .snapshot(&user_id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
