//! HTTP API for the support chat endpoint.
//!
//! `POST /ask` always responds 200 with an `answer` field; failures are
//! embedded in the payload as user-facing text, never surfaced as transport
//! errors. `GET /` serves the chat page, re-read from disk on every call.

use crate::cli::Output;
use crate::config::Settings;
use crate::conversation::{ConversationHistory, ConversationTurn, Query, Role};
use crate::error::{DestekError, Result};
use crate::service::{request_error_answer, ServiceState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Shared application state.
pub struct AppState {
    service: ServiceState,
    html_path: PathBuf,
}

impl AppState {
    pub fn new(service: ServiceState, html_path: PathBuf) -> Self {
        Self { service, html_path }
    }
}

/// Run the HTTP server.
pub async fn run(
    host: &str,
    port: u16,
    service: ServiceState,
    settings: &Settings,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(service, settings.html_path()));
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Destek API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Chat page", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Ask", "POST /ask");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/ask", post(ask))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

/// One history turn on the wire. The role is kept as a raw string so an
/// unknown role degrades into an in-payload error instead of a 422.
#[derive(Debug, Deserialize)]
pub struct TurnPayload {
    pub role: String,
    pub content: String,
}

/// Body of `POST /ask`: either a bare question or a conversation history
/// whose last turn is the active question.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<TurnPayload>>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Serve the chat page, read from disk on every call.
async fn index_page(State(state): State<Arc<AppState>>) -> axum::response::Response {
    match std::fs::read_to_string(&state.html_path) {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            warn!("Failed to read {}: {}", state.html_path.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Sayfa yüklenemedi.").into_response()
        }
    }
}

/// Answer a question. Always 200 with an `answer` field.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Json<AskResponse> {
    let query = match parse_query(req) {
        Ok(query) => query,
        Err(e) => {
            return Json(AskResponse {
                answer: request_error_answer(&e),
            })
        }
    };

    let answer = state.service.answer(&query).await;
    Json(AskResponse { answer })
}

/// Validate the request body into a query.
fn parse_query(req: AskRequest) -> Result<Query> {
    match (req.question, req.history) {
        (Some(question), None) => {
            if question.trim().is_empty() {
                return Err(DestekError::InvalidInput(
                    "The question is empty".to_string(),
                ));
            }
            Ok(Query::Question(question))
        }
        (None, Some(history)) => {
            let turns = history
                .into_iter()
                .map(|turn| {
                    let role: Role = turn
                        .role
                        .parse()
                        .map_err(DestekError::InvalidInput)?;
                    Ok(ConversationTurn {
                        role,
                        content: turn.content,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Query::History(ConversationHistory::new(turns)?))
        }
        (Some(_), Some(_)) => Err(DestekError::InvalidInput(
            "Send either a question or a history, not both".to_string(),
        )),
        (None, None) => Err(DestekError::InvalidInput(
            "A question or a history is required".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            ServiceState::Failed("No such file or directory (os error 2)".to_string()),
            PathBuf::from("index.html"),
        ))
    }

    #[tokio::test]
    async fn test_failed_state_always_returns_the_setup_error() {
        let state = failed_state();

        let req = AskRequest {
            question: Some("Paket A nedir?".to_string()),
            history: None,
        };
        let Json(first) = ask(State(state.clone()), Json(req)).await;

        let req = AskRequest {
            question: Some("Paket B nedir?".to_string()),
            history: None,
        };
        let Json(second) = ask(State(state), Json(req)).await;

        assert!(first.answer.starts_with("Uygulama başlatılırken bir hata oluştu"));
        assert_eq!(first.answer, second.answer);
    }

    #[tokio::test]
    async fn test_malformed_history_degrades_to_answer_text() {
        let state = failed_state();

        let req = AskRequest {
            question: None,
            history: Some(vec![TurnPayload {
                role: "narrator".to_string(),
                content: "bir varmış bir yokmuş".to_string(),
            }]),
        };
        let Json(resp) = ask(State(state), Json(req)).await;

        assert!(resp.answer.contains("Cevap üretilirken bir hata oluştu"));
        assert!(resp.answer.contains("narrator"));
    }

    #[test]
    fn test_parse_query_variants() {
        let query = parse_query(AskRequest {
            question: Some("fiyat nedir?".to_string()),
            history: None,
        })
        .unwrap();
        assert_eq!(query.question(), "fiyat nedir?");

        let query = parse_query(AskRequest {
            question: None,
            history: Some(vec![
                TurnPayload {
                    role: "user".to_string(),
                    content: "Paket A nedir?".to_string(),
                },
                TurnPayload {
                    role: "model".to_string(),
                    content: "Paket A ... açıklaması".to_string(),
                },
                TurnPayload {
                    role: "user".to_string(),
                    content: "fiyatı ne kadar?".to_string(),
                },
            ]),
        })
        .unwrap();
        assert_eq!(query.question(), "fiyatı ne kadar?");
        assert_eq!(
            query.transcript(),
            "Kullanıcı: Paket A nedir?\nAsistan: Paket A ... açıklaması"
        );

        assert!(parse_query(AskRequest {
            question: None,
            history: None,
        })
        .is_err());

        assert!(parse_query(AskRequest {
            question: Some("soru".to_string()),
            history: Some(vec![]),
        })
        .is_err());
    }
}
