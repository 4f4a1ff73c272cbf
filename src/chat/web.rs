//! Browser chat widget.
//!
//! Serves a single chat page plus a small JSON API. Every browser session
//! gets its own history, keyed by a UUID the page keeps in `sessionStorage`.
//! Requests for the same session are serialized by that session's lock;
//! different sessions proceed independently.
//!
//! Sessions are held in memory. Idle sessions are dropped when a new one
//! starts, and past a fixed count the least recently used one is evicted.

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::engine::ChatEngine;
use super::history::ChatHistory;

const PAGE: &str = include_str!("page.html");

/// Sessions unused for this long are dropped.
const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);
const MAX_SESSIONS: usize = 1000;

type SessionHistory = Arc<tokio::sync::Mutex<ChatHistory>>;
type ApiError = (StatusCode, Json<Value>);

struct SessionEntry {
    history: SessionHistory,
    last_used: Instant,
}

/// Shared state for the widget's handlers.
#[derive(Clone)]
pub struct ChatServerState {
    engine: ChatEngine,
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl ChatServerState {
    pub fn new(engine: ChatEngine) -> Self {
        Self::with_limits(engine, SESSION_IDLE_TIMEOUT, MAX_SESSIONS)
    }

    /// Like [`ChatServerState::new`] with a custom idle timeout and session cap.
    pub fn with_limits(engine: ChatEngine, idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            engine,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the session's history, starting a new session if needed.
    fn session(&self, id: Uuid) -> SessionHistory {
        let now = Instant::now();
        let mut sessions = self.lock_sessions();
        if let Some(entry) = sessions.get_mut(&id) {
            entry.last_used = now;
            return Arc::clone(&entry.history);
        }

        let idle_timeout = self.idle_timeout;
        sessions.retain(|_, entry| now.duration_since(entry.last_used) < idle_timeout);
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::debug!(session_id = %oldest, "evicted least recently used chat session");
        }

        let history = SessionHistory::default();
        sessions.insert(
            id,
            SessionEntry {
                history: Arc::clone(&history),
                last_used: now,
            },
        );
        tracing::debug!(session_id = %id, sessions = sessions.len(), "chat session started");
        history
    }

    fn existing_session(&self, id: Uuid) -> Option<SessionHistory> {
        let mut sessions = self.lock_sessions();
        let entry = sessions.get_mut(&id)?;
        entry.last_used = Instant::now();
        Some(Arc::clone(&entry.history))
    }

    fn remove_session(&self, id: Uuid) -> bool {
        self.lock_sessions().remove(&id).is_some()
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    session_id: Option<Uuid>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ClearRequest {
    session_id: Uuid,
}

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({"error": message.into()})))
}

async fn index() -> Html<&'static str> {
    Html(PAGE)
}

async fn health(State(state): State<ChatServerState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.engine.model(),
    }))
}

/// `POST /api/chat`: answer a message within its session.
async fn chat(
    State(state): State<ChatServerState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) =
        body.map_err(|e| error(StatusCode::BAD_REQUEST, format!("invalid request: {e}")))?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "message must not be empty"));
    }

    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
    let session = state.session(session_id);
    let mut history = session.lock().await;

    let reply = state
        .engine
        .reply(&mut history, message)
        .await
        .map_err(|e| {
            tracing::warn!(%session_id, error = %e, "chat generation failed");
            error(StatusCode::BAD_GATEWAY, format!("generation failed: {e:#}"))
        })?;

    Ok(Json(json!({
        "session_id": session_id,
        "reply": reply,
        "history": *history,
    })))
}

/// `POST /api/clear`: forget a session and its turns. Unknown sessions are
/// already empty, so this always succeeds.
async fn clear(
    State(state): State<ChatServerState>,
    body: Result<Json<ClearRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) =
        body.map_err(|e| error(StatusCode::BAD_REQUEST, format!("invalid request: {e}")))?;

    if state.remove_session(request.session_id) {
        tracing::debug!(session_id = %request.session_id, "chat session cleared");
    }

    Ok(Json(json!({
        "session_id": request.session_id,
        "history": [],
    })))
}

async fn history(
    State(state): State<ChatServerState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let session = state
        .existing_session(session_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "unknown session"))?;
    let history = session.lock().await;

    Ok(Json(json!({
        "session_id": session_id,
        "history": *history,
    })))
}

pub fn build_router(state: ChatServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/clear", post(clear))
        .route("/api/history/{session_id}", get(history))
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}

/// Serves the widget until the process is stopped.
pub async fn serve(state: ChatServerState, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind chat server to {addr}"))?;

    tracing::info!("chat server listening on {addr}");
    crate::status!("Chat widget running at http://{addr} (Ctrl+C to stop)");

    axum::serve(listener, build_router(state))
        .await
        .context("Chat server error")
}
