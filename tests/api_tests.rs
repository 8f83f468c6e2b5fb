//! HTTP tool server routes

mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::Upstream;
use travel_concierge::api::AppState;
use travel_concierge::config::ServerConfig;
use travel_concierge::web;

async fn app() -> Router {
    let (registry, _) = common::registry_for(Arc::new(Upstream::default())).await;
    web::app(AppState::new(Arc::new(registry)), &ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    let body = body.to_string();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], travel_concierge::VERSION);
}

#[tokio::test]
async fn test_list_tools() {
    let app = app().await;
    let (status, body) = send(&app, get("/api/tools")).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 10);
    assert!(names.contains(&"get_weather_forecast"));
    assert!(names.contains(&"submit_feedback"));
    assert!(body[0]["input_schema"]["properties"].is_object());
}

#[tokio::test]
async fn test_call_tool() {
    let app = app().await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/tools/check_visa_requirement",
            json!({"arguments": {"nationality": "US", "destination": "France"}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"], "check_visa_requirement");
    assert_eq!(
        body["output"],
        "No visa required for US citizens visiting France for up to 90 days."
    );
}

#[tokio::test]
async fn test_unknown_tool_is_still_ok() {
    let app = app().await;
    let (status, body) = send(
        &app,
        post_json("/api/tools/book_flight", json!({"arguments": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "❌ Unknown tool 'book_flight'.");
}

#[tokio::test]
async fn test_bad_arguments_are_rendered() {
    let app = app().await;
    let (status, body) = send(
        &app,
        post_json("/api/tools/calculate_budget", json!({"arguments": {"days": 3}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["output"]
            .as_str()
            .unwrap()
            .starts_with("❌ Invalid arguments for tool 'calculate_budget':")
    );
}

#[tokio::test]
async fn test_user_context_round_trip() {
    let app = app().await;

    let (status, _) = send(&app, get("/api/users/traveler-1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(
        &app,
        post_json(
            "/api/tools/update_user_profile",
            json!({
                "user_id": "traveler-1",
                "query": "I love hiking and I'm on a budget",
                "arguments": {
                    "user_id": "traveler-1",
                    "profile_updates": {"activities": ["adventure"], "budget": "low"}
                }
            }),
        ),
    )
    .await;
    assert_eq!(body["output"], "✅ Your profile has been updated!");

    send(
        &app,
        post_json(
            "/api/tools/submit_feedback",
            json!({"arguments": {"user_id": "traveler-1", "feedback": "great ideas"}}),
        ),
    )
    .await;

    let (status, user) = send(&app, get("/api/users/traveler-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["profile"]["activities"], json!(["adventure"]));
    assert_eq!(user["profile"]["budget"], "low");
    assert_eq!(user["profile"]["style"], Value::Null);
    assert_eq!(user["history"], json!(["I love hiking and I'm on a budget"]));
    assert_eq!(user["feedback"], json!(["great ideas"]));
}

#[tokio::test]
async fn test_agents() {
    let app = app().await;
    let (status, body) = send(&app, get("/api/agents")).await;
    assert_eq!(status, StatusCode::OK);

    let agents = body.as_array().unwrap();
    assert_eq!(agents.len(), 10);
    assert_eq!(agents[0]["name"], "travel_planner_main");
    assert_eq!(agents[0]["tools"], json!([]));
    assert_eq!(agents[0]["delegates"], json!(["travel_inspiration_agent"]));
    assert_eq!(agents[1]["name"], "travel_inspiration_agent");
    assert_eq!(agents[1]["tools"], json!(["submit_feedback"]));
    assert_eq!(agents[1]["delegates"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_single_agent() {
    let app = app().await;

    let (status, agent) = send(&app, get("/api/agents/weather_agent")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(agent["name"], "weather_agent");
    assert_eq!(agent["tools"], json!(["get_weather_forecast", "submit_feedback"]));

    let (status, _) = send(&app, get("/api/agents/pilot_agent")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = app().await;
    let feedback = "x".repeat(128 * 1024);
    let (status, _) = send(
        &app,
        post_json(
            "/api/tools/submit_feedback",
            json!({"arguments": {"user_id": "u", "feedback": feedback}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
