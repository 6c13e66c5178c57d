use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::auth;
use super::error::ApiError;
use crate::agent::{DialogueController, persona};
use crate::config::VibescoutConfig;
use crate::oracle;
use crate::profile::ProfileStore;
use crate::retrieval::HttpRecordStore;
use crate::session::SessionRegistry;
use crate::types::TurnOutcome;

pub struct AppState {
    pub token: Option<String>,
    pub controller: DialogueController,
    pub registry: SessionRegistry,
    pub profiles: Arc<ProfileStore>,
}

pub async fn run(config: VibescoutConfig, token: Option<String>) -> anyhow::Result<()> {
    let is_loopback = config.gateway.bind == "127.0.0.1" || config.gateway.bind == "::1";

    if !is_loopback && token.is_none() {
        anyhow::bail!(
            "Auth token required when binding to non-loopback address. \
             Set --token or VIBESCOUT_TOKEN env var."
        );
    }

    let oracle = oracle::from_config(&config.oracle)?;
    let store = Arc::new(HttpRecordStore::new(&config.retrieval)?);
    let profiles = Arc::new(ProfileStore::open(&config.profiles.path)?);

    let controller = DialogueController::new(
        oracle,
        store,
        Arc::clone(&profiles),
        &config.dialogue,
        &config.retrieval,
    );

    let origin = config
        .gateway
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| {
            anyhow::anyhow!(
                "invalid gateway.allowed_origin '{}': {e}",
                config.gateway.allowed_origin
            )
        })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let addr = format!("{}:{}", config.gateway.bind, config.gateway.port);

    let state = Arc::new(AppState {
        token,
        controller,
        registry: SessionRegistry::new(),
        profiles,
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/chat", post(chat))
        .route("/reset", post(reset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("vibescout gateway listening on {addr}");
    if is_loopback {
        info!("bound to loopback — local access only");
    } else {
        warn!("bound to {addr} — ensure auth token is set");
    }

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.registry.count().await,
        "users": state.profiles.count().await,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub email: String,
    pub display_name: String,
    pub taste_summary: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    auth::require(&state.token, &headers)?;

    if !req.email.contains('@') {
        return Err(ApiError::BadRequest("valid email required".into()));
    }

    let profile = state
        .profiles
        .register(&req.email, &req.password, req.display_name.as_deref())
        .await?;

    Ok(Json(AuthResponse {
        status: "success",
        email: req.email,
        display_name: profile.display_name,
        taste_summary: profile.taste_summary,
    }))
}

async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    auth::require(&state.token, &headers)?;

    let profile = state.profiles.verify(&req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        status: "success",
        email: req.email,
        display_name: profile.display_name,
        taste_summary: profile.taste_summary,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    pub email: Option<String>,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>,
) -> Result<Json<TurnOutcome>, ApiError> {
    auth::require(&state.token, &headers)?;

    // The identity only counts when the email is actually registered.
    let identity = match &req.email {
        Some(email) if state.profiles.contains(email).await => Some(email.clone()),
        _ => None,
    };

    // Read at session creation only; later turns reuse the transcript.
    let profile_context = match &identity {
        Some(email) => state
            .profiles
            .taste_summary(email)
            .await
            .filter(|s| !s.is_empty())
            .map(|summary| persona::profile_context(&summary)),
        None => None,
    };

    let persona_text = persona::base_persona(&state.controller.rules().search_token);
    let session = state
        .registry
        .get_or_create(&req.session_id, persona_text, profile_context)
        .await;

    // Holding the per-session lock for the whole turn serializes
    // concurrent requests carrying the same session identifier.
    let mut session = session.lock().await;
    let outcome = state
        .controller
        .take_turn(&mut session, &req.message, identity.as_deref())
        .await?;

    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub session_id: String,
}

async fn reset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ResetRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth::require(&state.token, &headers)?;

    state.registry.reset(&req.session_id).await;
    Ok(Json(serde_json::json!({ "status": "reset" })))
}
