use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing::info;

use travel_concierge::api::AppState;
use travel_concierge::{
    ConciergeConfig, NominatimGeocoder, ToolRegistry, UserContextStore, telemetry, web,
};

#[derive(Parser, Debug)]
#[command(name = "travel-concierge")]
#[command(version, about = "Travel assistant tools: weather, places, budget, visa, events and culture")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP tool server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Daily weather forecast
    Weather {
        location: String,
        #[arg(short, long, default_value_t = 1)]
        days: u32,
    },
    /// Places matching a keyword near a location
    Places {
        query: String,
        location: String,
        /// Search radius in meters
        #[arg(short, long)]
        radius: Option<u32>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Trip cost estimate
    Budget {
        destination: String,
        days: u32,
        #[arg(short, long, default_value_t = 1)]
        travelers: u32,
    },
    /// Visa requirements
    Visa {
        nationality: String,
        destination: String,
    },
    /// Upcoming local events
    Events {
        destination: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Language and culture tips
    Culture {
        destination: String,
        #[arg(long)]
        language: Option<String>,
    },
    /// List tool definitions as JSON
    Tools,
}

impl Command {
    /// Tool name and arguments for one-shot commands
    fn tool_call(&self) -> Option<(&'static str, Value)> {
        let call = match self {
            Command::Serve { .. } | Command::Tools => return None,
            Command::Weather { location, days } => (
                "get_weather_forecast",
                json!({"location": location, "days": days}),
            ),
            Command::Places {
                query,
                location,
                radius,
                limit,
            } => (
                "find_nearby_places_open",
                json!({"query": query, "location": location, "radius": radius, "limit": limit}),
            ),
            Command::Budget {
                destination,
                days,
                travelers,
            } => (
                "calculate_budget",
                json!({"destination": destination, "days": days, "travelers": travelers}),
            ),
            Command::Visa {
                nationality,
                destination,
            } => (
                "check_visa_requirement",
                json!({"nationality": nationality, "destination": destination}),
            ),
            Command::Events {
                destination,
                start,
                end,
            } => (
                "find_local_events",
                json!({"destination": destination, "start_date": start, "end_date": end}),
            ),
            Command::Culture {
                destination,
                language,
            } => (
                "get_language_culture_tips",
                json!({"destination": destination, "language": language}),
            ),
        };
        Some(call)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConciergeConfig::load_from_path(cli.config.clone())?;
    let _telemetry = telemetry::init(&config.logging, cli.verbose)?;

    let store = Arc::new(UserContextStore::new());
    let geocoder = Arc::new(NominatimGeocoder::new(&config.geocoding)?);
    let registry = Arc::new(ToolRegistry::standard(&config, store, geocoder)?);

    match &cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = *port;
            }
            info!("Starting travel-concierge v{}", travel_concierge::VERSION);
            web::run(&config.server, AppState::new(registry)).await?;
        }
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        }
        command => {
            if let Some((name, args)) = command.tool_call() {
                println!("{}", registry.invoke(name, args).await);
            }
        }
    }

    Ok(())
}
