//! HTTP chat gateway for FIFI.
//!
//! Serves the chat page plus a small JSON API:
//! `POST /chat`, `POST /clear` and `GET /health`.
//! The page and its assets under `frontend/` are compiled in with
//! `include_str!`, so `fifi serve` needs no files on disk.
//!
//! Built on Axum.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use fifi_agent::Assistant;
use fifi_config::GatewayConfig;
use fifi_core::message::SessionId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const INDEX_HTML: &str = include_str!("../../../frontend/index.html");
const STYLE_CSS: &str = include_str!("../../../frontend/style.css");
const APP_JS: &str = include_str!("../../../frontend/app.js");

/// Shared application state for the gateway.
pub struct GatewayState {
    pub assistant: Arc<Assistant>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with the chat API and the embedded chat page.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/static/{asset}", get(asset_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/clear", post(clear_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start(
    config: &GatewayConfig,
    assistant: Arc<Assistant>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(Arc::new(GatewayState { assistant }));

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn asset_handler(Path(asset): Path<String>) -> Response {
    let (content_type, body) = match asset.as_str() {
        "style.css" => ("text/css; charset=utf-8", STYLE_CSS),
        "app.js" => ("application/javascript; charset=utf-8", APP_JS),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

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
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

fn session_from(id: Option<String>) -> SessionId {
    id.filter(|s| !s.is_empty())
        .map(SessionId)
        .unwrap_or_default()
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    if payload.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No message provided",
            }),
        )
            .into_response();
    }

    let session = session_from(payload.session_id);
    info!(
        session = %session,
        message_len = payload.message.len(),
        "Chat message received"
    );

    let reply = state.assistant.respond(&session, &payload.message).await;
    Json(ChatResponse { response: reply.text }).into_response()
}

#[derive(Deserialize, Default)]
struct ClearRequest {
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
struct ClearResponse {
    status: &'static str,
}

async fn clear_handler(
    State(state): State<SharedState>,
    payload: Option<Json<ClearRequest>>,
) -> Json<ClearResponse> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let session = session_from(request.session_id);
    let history = state.assistant.history();
    let existed = history.clear(&session).await;
    let sessions = history.session_count().await;
    debug!(
        session = %session,
        existed,
        sessions,
        "Clear requested"
    );
    Json(ClearResponse { status: "cleared" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use fifi_core::error::{FetchError, ProviderError};
    use fifi_core::fetch::PageFetcher;
    use fifi_core::message::Message;
    use fifi_core::provider::{Provider, ProviderRequest, ProviderResponse};
    use fifi_memory::ConversationManager;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Echoes the number of messages it was sent.
    struct CountingProvider;

    #[async_trait::async_trait]
    impl Provider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        async fn complete(
            &self,
            request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse {
                message: Message::assistant(format!("{} messages", request.messages.len())),
                usage: None,
                model: request.model,
            })
        }
    }

    struct NoPages;

    #[async_trait::async_trait]
    impl PageFetcher for NoPages {
        fn name(&self) -> &str {
            "none"
        }

        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError::Empty(url.to_string()))
        }
    }

    fn test_state() -> SharedState {
        let assistant = Assistant::new(
            Arc::new(CountingProvider),
            Arc::new(NoPages),
            Arc::new(ConversationManager::default()),
            Vec::new(),
        );
        Arc::new(GatewayState {
            assistant: Arc::new(assistant),
        })
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    async fn get_uri(app: Router, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn serves_chat_page() {
        let response = get_uri(build_router(test_state()), "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let page = body_text(response).await;
        assert!(page.contains("FIFI"));
        assert!(page.contains("/static/style.css"));
        assert!(page.contains("/static/app.js"));
    }

    #[tokio::test]
    async fn assets_carry_their_content_type() {
        for (uri, expected) in [
            ("/static/style.css", "text/css"),
            ("/static/app.js", "javascript"),
        ] {
            let response = get_uri(build_router(test_state()), uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
            assert!(content_type.contains(expected), "{uri}: {content_type}");
        }

        let script = body_text(get_uri(build_router(test_state()), "/static/app.js").await).await;
        assert!(script.contains("/chat"));
        assert!(script.contains("/clear"));
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found() {
        let response = get_uri(build_router(test_state()), "/static/secrets.txt").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json("/chat", r#"{"message": ""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No message provided");
    }

    #[tokio::test]
    async fn missing_message_is_rejected() {
        let app = build_router(test_state());
        let response = app.oneshot(post_json("/chat", "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_returns_response_and_keeps_history() {
        let state = test_state();

        let first = build_router(state.clone())
            .oneshot(post_json("/chat", r#"{"message": "hello", "session_id": "s1"}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        // system + user
        assert_eq!(body_json(first).await["response"], "2 messages");

        let second = build_router(state.clone())
            .oneshot(post_json("/chat", r#"{"message": "again", "session_id": "s1"}"#))
            .await
            .unwrap();
        // system + previous exchange + user
        assert_eq!(body_json(second).await["response"], "4 messages");
    }

    #[tokio::test]
    async fn session_defaults_to_default() {
        let state = test_state();
        build_router(state.clone())
            .oneshot(post_json("/chat", r#"{"message": "hi"}"#))
            .await
            .unwrap();

        let history = state
            .assistant
            .history()
            .get(&SessionId::default())
            .await
            .unwrap();
        assert_eq!(history.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn clear_empties_session_history() {
        let state = test_state();
        build_router(state.clone())
            .oneshot(post_json("/chat", r#"{"message": "hello", "session_id": "s2"}"#))
            .await
            .unwrap();

        let response = build_router(state.clone())
            .oneshot(post_json("/clear", r#"{"session_id": "s2"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "cleared");

        let after = build_router(state)
            .oneshot(post_json("/chat", r#"{"message": "hello", "session_id": "s2"}"#))
            .await
            .unwrap();
        assert_eq!(body_json(after).await["response"], "2 messages");
    }

    #[tokio::test]
    async fn clear_of_unknown_session_still_succeeds() {
        let app = build_router(test_state());
        let response = app.oneshot(post_json("/clear", "{}")).await.unwrap();
        assert_eq!(body_json(response).await["status"], "cleared");
    }
}
