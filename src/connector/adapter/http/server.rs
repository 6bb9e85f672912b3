use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::application::RespondUseCase;
use crate::domain::DomainError;

use super::dto::{ChatRequest, ChatResponse, ErrorResponse};

struct AppState {
    use_case: Arc<RespondUseCase>,
    default_system_prompt: String,
}

/// Stateless HTTP front end for [`RespondUseCase`].
///
/// Clients keep the history and send it back with every turn, mirroring a chat
/// widget that re-renders whatever the server returns.
///
/// `POST /api/chat` answers 400 for a blank `message` without running a turn;
/// any other message gets the prior history plus two entries.
pub struct ChatHttpServer {
    state: Arc<AppState>,
}

impl ChatHttpServer {
    pub fn new(use_case: Arc<RespondUseCase>, default_system_prompt: impl Into<String>) -> Self {
        Self {
            state: Arc::new(AppState {
                use_case,
                default_system_prompt: default_system_prompt.into(),
            }),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/chat", post(chat))
            .route("/api/clear", post(clear))
            .with_state(self.state.clone())
    }

    /// Bind `addr` and serve until Ctrl-C.
    pub async fn serve(&self, addr: SocketAddr) -> Result<(), DomainError> {
        let listener = TcpListener::bind(addr).await?;
        info!("Chat server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
            .await?;

        info!("Chat server stopped");
        Ok(())
    }
}

/// Resolves once `signal` fires. A signal that cannot be installed never
/// resolves, so the server keeps running instead of stopping at once.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Failed to listen for Ctrl-C, graceful shutdown disabled: {e}");
        std::future::pending::<()>().await;
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn chat(State(state): State<Arc<AppState>>, Json(req): Json<ChatRequest>) -> Response {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let system_prompt = req
        .system_prompt
        .as_deref()
        .unwrap_or(&state.default_system_prompt);
    debug!(
        "POST /api/chat ({} prior message(s), search={})",
        req.history.len(),
        req.use_search
    );

    let history = state
        .use_case
        .execute(&req.message, req.history, system_prompt, req.use_search)
        .await;

    Json(ChatResponse { history }).into_response()
}

async fn clear() -> Json<ChatResponse> {
    Json(ChatResponse { history: vec![] })
}
