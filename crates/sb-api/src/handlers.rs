//! HTTP API handlers
//!
//! Request handlers for the conversation endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sb_core::Reply;

use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Reply request payload
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    /// Inbound message text
    pub message: String,
    /// Contact identifier, normally the sender's phone number
    #[serde(default)]
    pub phone: Option<String>,
}

/// Reply response payload
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyResponse {
    pub reply: String,
    /// Present (and true) only on the final reply of a script path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            reply: reply.text,
            complete: reply.complete.then_some(true),
        }
    }
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Reply endpoint - advance the sender's conversation by one step
pub async fn reply(
    State(state): State<AppState>,
    Json(req): Json<ReplyRequest>,
) -> Json<ReplyResponse> {
    debug!("Reply request from {:?}", req.phone);

    let reply = state.handler.handle(req.phone.as_deref(), &req.message).await;
    Json(reply.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::router;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use http::{Request, StatusCode, header};
    use sb_core::conversation::script;
    use sb_core::{
        ContactRecord, ContactSync, ConversationConfig, ConversationHandler, InMemoryStateStore,
        SyncOutcome,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    #[derive(Default)]
    struct CountingSync {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContactSync for CountingSync {
        async fn sync(&self, _record: &ContactRecord) -> SyncOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SyncOutcome::Synced {
                resource_name: None,
            }
        }
    }

    fn app(sync: Arc<CountingSync>) -> axum::Router {
        let handler = ConversationHandler::new(
            Arc::new(InMemoryStateStore::new()),
            sync,
            &ConversationConfig::default(),
        );
        router(AppState {
            handler: Arc::new(handler),
        })
    }

    async fn post_reply(app: &axum::Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/reply")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[test]
    fn test_response_omits_complete_unless_terminal() {
        let prompt = serde_json::to_value(ReplyResponse::from(Reply::prompt("hi"))).unwrap();
        assert_eq!(prompt, json!({"reply": "hi"}));

        let done = serde_json::to_value(ReplyResponse::from(Reply::complete("bye"))).unwrap();
        assert_eq!(done, json!({"reply": "bye", "complete": true}));
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(Arc::default());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_first_message_returns_welcome() {
        let app = app(Arc::default());
        let (status, body) = post_reply(&app, json!({"message": "Hello", "phone": "111"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"reply": script::WELCOME}));
    }

    #[tokio::test]
    async fn test_blossom_purchase_flow() {
        let sync = Arc::new(CountingSync::default());
        let app = app(sync.clone());

        for message in ["Hello", "Blossom", "thembi"] {
            let (status, body) = post_reply(&app, json!({"message": message, "phone": "111"})).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.get("complete").is_none());
        }

        let (status, body) = post_reply(&app, json!({"message": "1", "phone": "111"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"reply": script::BLOSSOM_BUY, "complete": true}));
        assert_eq!(sync.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_phone_is_optional() {
        let app = app(Arc::default());
        let (status, body) = post_reply(&app, json!({"message": "Hello"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], script::WELCOME);

        let (status, body) = post_reply(&app, json!({"message": "tribe", "phone": null})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], script::ASK_NAME);
    }

    #[tokio::test]
    async fn test_missing_message_is_rejected() {
        let app = app(Arc::default());
        let (status, _) = post_reply(&app, json!({"phone": "111"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
