//! Sub-agent roster
//!
//! Which agent owns which tools. Prompts and delegation live in the agent
//! framework; this is only the wiring table it reads.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AgentSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Tools the agent may call directly
    pub tools: &'static [&'static str],
    /// Agents the agent may hand work to
    pub delegates: &'static [&'static str],
}

pub const ROOT_AGENT: &str = "travel_planner_main";

pub const INSPIRATION_AGENT: &str = "travel_inspiration_agent";

const SUB_AGENTS: [&str; 7] = [
    "news_agent",
    "places_agent",
    "weather_agent",
    "budget_agent",
    "visa_agent",
    "local_events_agent",
    "language_culture_agent",
];

pub static ROSTER: [AgentSpec; 10] = [
    AgentSpec {
        name: ROOT_AGENT,
        description: "A user-centric travel planning assistant that delivers personalized, actionable trip recommendations and insights.",
        tools: &[],
        delegates: &[INSPIRATION_AGENT],
    },
    AgentSpec {
        name: INSPIRATION_AGENT,
        description: "Inspires users with travel ideas and routes each question to the right specialist.",
        tools: &["submit_feedback"],
        delegates: &SUB_AGENTS,
    },
    AgentSpec {
        name: "news_agent",
        description: "Suggests destinations from current travel news and trends.",
        tools: &["submit_feedback"],
        delegates: &[],
    },
    AgentSpec {
        name: "places_agent",
        description: "Finds restaurants, cafes, shops and attractions near a location.",
        tools: &["find_nearby_places_open", "submit_feedback"],
        delegates: &[],
    },
    AgentSpec {
        name: "weather_agent",
        description: "Reports the weather forecast for a destination.",
        tools: &["get_weather_forecast", "submit_feedback"],
        delegates: &[],
    },
    AgentSpec {
        name: "budget_agent",
        description: "Estimates trip costs for flights, hotels, food and transport.",
        tools: &["calculate_budget"],
        delegates: &[],
    },
    AgentSpec {
        name: "visa_agent",
        description: "Answers visa requirement questions for a nationality and destination.",
        tools: &["check_visa_requirement"],
        delegates: &[],
    },
    AgentSpec {
        name: "local_events_agent",
        description: "Lists festivals, concerts and markets happening at a destination.",
        tools: &["find_local_events"],
        delegates: &[],
    },
    AgentSpec {
        name: "language_culture_agent",
        description: "Shares basic phrases, etiquette and tipping customs.",
        tools: &["get_language_culture_tips"],
        delegates: &[],
    },
    AgentSpec {
        name: "profile_builder_agent",
        description: "Learns about the user and stores their profile and preferences.",
        tools: &[
            "update_user_profile",
            "update_user_preferences",
            "get_user_context",
        ],
        delegates: &[],
    },
];

/// Look up an agent by name
pub fn find(name: &str) -> Option<&'static AgentSpec> {
    ROSTER.iter().find(|agent| agent.name == name)
}
