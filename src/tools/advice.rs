use super::{Tool, parse_args};
use crate::ConciergeError;
use crate::advisors;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

pub struct BudgetTool;

#[derive(Debug, Deserialize)]
struct BudgetParams {
    destination: String,
    days: u32,
    #[serde(default = "default_travelers")]
    travelers: u32,
}

fn default_travelers() -> u32 {
    1
}

#[async_trait]
impl Tool for BudgetTool {
    fn name(&self) -> &str {
        "calculate_budget"
    }

    fn description(&self) -> &str {
        "Estimate total trip cost (flights, hotels, food, local transport) in USD."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string"},
                "days": {"type": "integer", "minimum": 1},
                "travelers": {"type": "integer", "minimum": 1, "default": 1}
            },
            "required": ["destination", "days"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: BudgetParams = parse_args(args)?;
        Ok(advisors::calculate_budget(
            &params.destination,
            params.days,
            params.travelers,
        ))
    }
}

pub struct VisaTool;

#[derive(Debug, Deserialize)]
struct VisaParams {
    nationality: String,
    destination: String,
}

#[async_trait]
impl Tool for VisaTool {
    fn name(&self) -> &str {
        "check_visa_requirement"
    }

    fn description(&self) -> &str {
        "Check whether a traveler of the given nationality needs a visa for a destination."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "nationality": {"type": "string", "description": "e.g. 'US'"},
                "destination": {"type": "string", "description": "e.g. 'France'"}
            },
            "required": ["nationality", "destination"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: VisaParams = parse_args(args)?;
        Ok(advisors::check_visa_requirement(
            &params.nationality,
            &params.destination,
        ))
    }
}

pub struct EventsTool;

#[derive(Debug, Deserialize)]
struct EventsParams {
    destination: String,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[async_trait]
impl Tool for EventsTool {
    fn name(&self) -> &str {
        "find_local_events"
    }

    fn description(&self) -> &str {
        "List upcoming local events (festivals, concerts, markets) at a destination."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string"},
                "start_date": {"type": "string", "description": "YYYY-MM-DD"},
                "end_date": {"type": "string", "description": "YYYY-MM-DD"}
            },
            "required": ["destination"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: EventsParams = parse_args(args)?;
        Ok(advisors::find_local_events(
            &params.destination,
            params.start_date.as_deref(),
            params.end_date.as_deref(),
        ))
    }
}

pub struct CultureTool;

#[derive(Debug, Deserialize)]
struct CultureParams {
    destination: String,
    language: Option<String>,
}

#[async_trait]
impl Tool for CultureTool {
    fn name(&self) -> &str {
        "get_language_culture_tips"
    }

    fn description(&self) -> &str {
        "Give basic phrases, etiquette and tipping customs for a destination."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string"},
                "language": {"type": "string"}
            },
            "required": ["destination"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ConciergeError> {
        let params: CultureParams = parse_args(args)?;
        Ok(advisors::get_language_culture_tips(
            &params.destination,
            params.language.as_deref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_budget_travelers_default() {
        let output = BudgetTool
            .call(json!({"destination": "Lisbon", "days": 2}))
            .await
            .unwrap();
        assert!(output.starts_with("Estimated budget for 1 traveler(s) to Lisbon for 2 days:"));
        assert!(output.contains("- Total: $820 (estimate)"));
    }

    #[tokio::test]
    async fn test_budget_missing_days_is_invalid() {
        let err = BudgetTool
            .call(json!({"destination": "Lisbon"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ConciergeError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_visa_tool() {
        let output = VisaTool
            .call(json!({"nationality": "us", "destination": "France"}))
            .await
            .unwrap();
        assert!(output.starts_with("No visa required"));
    }

    #[tokio::test]
    async fn test_events_and_culture_tools() {
        let events = EventsTool
            .call(json!({"destination": "Vienna", "start_date": "2026-07-10"}))
            .await
            .unwrap();
        assert!(events.starts_with("Upcoming events in Vienna:"));

        let tips = CultureTool
            .call(json!({"destination": "Vienna"}))
            .await
            .unwrap();
        assert!(tips.starts_with("Language & culture tips for Vienna:"));
    }
}
