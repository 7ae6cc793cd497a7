//! HTTP API for question answering.
//!
//! Exposes Sibyl's ask pipeline as a small axum app. Clients post a
//! question plus any candidate answers and get back a map of answer
//! text to confidence score; the retrieval, voting, and ranking all
//! happen behind [`crate::ask::ask`].
//!
//! ## Endpoints
//!
//! - `GET /health` — liveness probe
//! - `POST /ask` — mine the web for evidence and score candidate answers

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use sibyl_rank::{Answer, FilterPipeline};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A question to answer, optionally with candidate answers to score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question in plain natural language.
    pub question: String,
    /// Candidate answers to vote on. When empty, the mined evidence
    /// itself is ranked and returned instead.
    #[serde(default)]
    pub answers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Scored answers for a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Answer text mapped to its confidence score, formatted to two
    /// decimal places. Keys are sorted by answer text; the scores carry
    /// the ranking.
    #[serde(rename = "SortedAnswers")]
    pub sorted_answers: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error payload returned when a request cannot be served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error details.
    pub error: ErrorBody,
}

/// Error details within an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: String,
    /// Error type (e.g. `"retrieval_error"`).
    #[serde(rename = "type")]
    pub error_type: String,
}

use crate::ask::ask;
use crate::config::SibylConfig;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    /// Full service configuration (miner set, limits, ranking knobs).
    config: Arc<SibylConfig>,
    /// Filter pipeline applied to every request.
    pipeline: Arc<FilterPipeline>,
}

// ---------------------------------------------------------------------------
// AskServer
// ---------------------------------------------------------------------------

/// HTTP server wrapping the ask pipeline.
///
/// The server owns its configuration and a default filter pipeline and
/// serves requests from a background tokio task until shut down or
/// dropped.
pub struct AskServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl AskServer {
    /// Start the ask HTTP server.
    ///
    /// Binds to `{config.server.host}:{config.server.port}` (use port
    /// `0` for auto-assign) and begins serving in a background tokio
    /// task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(config: SibylConfig) -> crate::error::Result<Self> {
        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let state = AppState {
            config: Arc::new(config),
            pipeline: Arc::new(sibyl_rank::default_pipeline()),
        };

        let app = Router::new()
            .route("/ask", post(handle_ask))
            .route("/health", get(handle_health))
            .with_state(state);

        let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
            crate::error::SibylError::Server(format!("bind failed on {bind_addr}: {e}"))
        })?;

        let addr = listener.local_addr().map_err(|e| {
            crate::error::SibylError::Server(format!("failed to get local addr: {e}"))
        })?;

        info!("ask server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("ask server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for AskServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Render ranked answers as an answer-text → score map.
///
/// Scores are fixed to two decimal places here and nowhere else;
/// everything upstream of the wire works in raw `f32`.
fn format_scores(answers: &[Answer]) -> BTreeMap<String, String> {
    answers
        .iter()
        .map(|a| (a.text.clone(), format!("{:.2}", a.score)))
        .collect()
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /health` — liveness probe.
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /ask` — mine the web for evidence and score candidate answers.
async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> (axum::http::StatusCode, Json<serde_json::Value>) {
    let request_id = Uuid::new_v4();
    debug!(
        %request_id,
        question = %request.question,
        candidates = request.answers.len(),
        "ask request received"
    );

    let result = ask(
        &request.question,
        &request.answers,
        &state.pipeline,
        &state.config,
    )
    .await;

    let ranked = match result {
        Ok(ranked) => ranked,
        Err(e) => {
            error!(%request_id, "ask request failed: {e}");
            let err = ErrorResponse {
                error: ErrorBody {
                    message: e.to_string(),
                    error_type: "retrieval_error".to_owned(),
                },
            };
            let json = serde_json::to_value(err).unwrap_or_default();
            return (axum::http::StatusCode::BAD_GATEWAY, Json(json));
        }
    };

    debug!(%request_id, ranked = ranked.len(), "ask request served");

    let resp = AskResponse {
        sorted_answers: format_scores(&ranked),
    };
    let json = serde_json::to_value(resp).unwrap_or_default();
    (axum::http::StatusCode::OK, Json(json))
}
