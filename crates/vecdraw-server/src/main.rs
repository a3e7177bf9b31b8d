//! VecDraw Server
//!
//! Hosts one editing session per room and accepts operation batches from
//! external callers (scripts, assistants, other services). Pushed batches
//! wait in the room's mailbox until the next poll tick applies them.
//!
//! ## Endpoints
//!
//! ```text
//! POST /mcp/push_ops        {"room_id": "abc123", "ops": [{"op": "addRect", ...}]}
//! POST /rooms/new           -> {"room_id": "..."}
//! GET  /rooms/{room}/shapes -> JSON shape list
//! GET  /rooms/{room}/svg    -> SVG export (?width=&height=)
//! GET  /health
//! ```

mod config;
mod error;
mod state;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use config::ServerConfig;
use error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use state::AppState;
use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use vecdraw_core::{commands, generate_room_id};

const DEFAULT_SVG_WIDTH: u32 = 800;
const DEFAULT_SVG_HEIGHT: u32 = 600;

/// Body of `POST /mcp/push_ops`.
#[derive(Debug, Deserialize)]
pub struct PushOpsRequest {
    pub room_id: String,
    #[serde(default)]
    pub ops: Vec<Value>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PushOpsResponse {
    pub queued: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NewRoomResponse {
    pub room_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SvgParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vecdraw_server=info,vecdraw_core=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let state = Arc::new(AppState::new());
    let poller = spawn_poll_task(Arc::clone(&state), config.poll_interval);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("VecDraw server listening on {}", config.addr);
    info!("Draining room mailboxes every {:?}", config.poll_interval);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.abort();
    info!("VecDraw server stopped");
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/mcp/push_ops", post(push_ops))
        .route("/rooms/new", post(new_room))
        .route("/rooms/{room}/shapes", get(room_shapes))
        .route("/rooms/{room}/svg", get(room_svg))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Drain every room's mailbox on a fixed cadence.
fn spawn_poll_task(state: Arc<AppState>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(e) = state.drain_all() {
                warn!("Poll tick failed: {}", e);
            }
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Index page
async fn index() -> &'static str {
    "VecDraw Server - push operation batches to /mcp/push_ops"
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// Queue a batch for a room. The batch is validated here so a bad push is
/// rejected to its sender instead of being dropped at the next poll.
async fn push_ops(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PushOpsRequest>,
) -> Result<Json<PushOpsResponse>, ApiError> {
    let room = body.room_id.trim();
    if room.is_empty() {
        return Err(ApiError::EmptyRoom);
    }
    if body.ops.is_empty() {
        return Ok(Json(PushOpsResponse { queued: 0 }));
    }
    commands::parse_ops(&body.ops)?;
    let queued = state.queue().push(room, body.ops)?;
    info!("Queued {} ops for room {}", queued, room);
    Ok(Json(PushOpsResponse { queued }))
}

async fn new_room() -> Json<NewRoomResponse> {
    Json(NewRoomResponse {
        room_id: generate_room_id(),
    })
}

async fn room_shapes(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let body = state.with_session(&room, |canvas| canvas.to_json())??;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

async fn room_svg(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Query(params): Query<SvgParams>,
) -> Result<impl IntoResponse, ApiError> {
    let width = params.width.unwrap_or(DEFAULT_SVG_WIDTH);
    let height = params.height.unwrap_or(DEFAULT_SVG_HEIGHT);
    let body = state.with_session(&room, |canvas| canvas.to_svg(width, height))?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], body))
}
