//! HTTP front door for FlightDesk.
//!
//! Exposes `POST /chat`, which runs one planner loop per message, and
//! `GET /health`. Built on Axum.

pub mod sessions;

use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::JsonRejection;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, header},
    response::Json,
    routing::{get, post},
};
use flightdesk_agent::PlannerLoop;
use flightdesk_backend::BackendClient;
use flightdesk_config::AppConfig;
use flightdesk_core::PlannerStep;
use flightdesk_planner::ChatReactPlanner;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

pub use sessions::{SESSION_HEADER, SessionRegistry};

/// Text returned when a request carries no message.
pub const EMPTY_MESSAGE_REPLY: &str = "Please provide a message.";

/// Shared application state for the front door.
pub struct GatewayState {
    pub agent: PlannerLoop,
    pub sessions: SessionRegistry,
}

pub type SharedState = Arc<GatewayState>;

/// Wire the backend client, the six operations and the configured planner
/// into a planner loop.
pub fn build_planner_loop(config: &AppConfig) -> Result<PlannerLoop, Box<dyn std::error::Error>> {
    let backend = Arc::new(BackendClient::from_config(&config.backend)?);
    let registry = Arc::new(flightdesk_operations::default_registry(backend));
    let planner = Arc::new(ChatReactPlanner::from_config(&config.planner)?);

    info!(
        backend = %config.backend.base_url,
        planner = %config.planner.name,
        model = %config.planner.model,
        operations = registry.len(),
        "Planner loop assembled"
    );

    Ok(PlannerLoop::new(planner, registry).with_max_steps(config.agent.max_steps))
}

/// Build the Axum router with all front-door routes.
///
/// Layers: CORS limited to `allowed_origins`, a 1 MB body limit and HTTP
/// trace logging.
pub fn build_router(state: SharedState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors_layer(allowed_origins))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-session-id"),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Start the front door HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let state = Arc::new(GatewayState {
        agent: build_planner_loop(&config)?,
        sessions: SessionRegistry::new(config.gateway.session_mode),
    });
    info!(addr = %addr, session_mode = ?state.sessions.mode(), "Front door starting");

    let app = build_router(state, &config.gateway.allowed_origins);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

/// Either a finished run or a plain text reply.
#[derive(Serialize)]
#[serde(untagged)]
enum ChatReply {
    Run(RunSummary),
    Text(String),
}

#[derive(Serialize)]
struct RunSummary {
    input: String,
    output: String,
    steps: Vec<PlannerStep>,
    iterations: u32,
}

#[derive(Serialize)]
struct ChatResponse {
    response: ChatReply,
}

impl ChatResponse {
    fn text(text: impl Into<String>) -> Json<Self> {
        Json(Self {
            response: ChatReply::Text(text.into()),
        })
    }
}

async fn chat_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    let message = match payload {
        Ok(Json(ChatRequest { message: Some(m) })) if !m.is_empty() => m,
        Ok(_) => return ChatResponse::text(EMPTY_MESSAGE_REPLY),
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable chat request");
            return ChatResponse::text(EMPTY_MESSAGE_REPLY);
        }
    };

    let request_id = uuid::Uuid::new_v4();
    let client_id = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok());
    let session = state.sessions.resolve(client_id);

    info!(%request_id, message_len = message.len(), "Chat message received");

    match state.agent.run(&message, &session).await {
        Ok(outcome) => {
            info!(
                %request_id,
                iterations = outcome.iterations,
                stopped_at_limit = outcome.stopped_at_limit,
                "Chat request completed"
            );
            Json(ChatResponse {
                response: ChatReply::Run(RunSummary {
                    input: message,
                    output: outcome.answer,
                    steps: outcome.steps,
                    iterations: outcome.iterations,
                }),
            })
        }
        Err(e) => {
            error!(%request_id, error = %e, "Planner loop failed");
            ChatResponse::text(format!("Error: {e}"))
        }
    }
}
