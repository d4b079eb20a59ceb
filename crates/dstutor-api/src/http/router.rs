//! Axum router configuration with middleware.
//!
//! The chat page lives at `/`; JSON routes are under `/api/v1/`.
//! Middleware: tracing. No CORS layer: every route is same-origin only.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}/messages",
            get(handlers::session::get_messages),
        )
        .route("/sessions/{id}/turns", post(handlers::session::post_turn));

    Router::new()
        .route("/", get(handlers::chat::index))
        .route("/chat", post(handlers::chat::submit))
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness plus the number of live sessions.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.config.model.model,
        "sessions": state.controller.session_count().await,
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::http::handlers::chat::{NOTICE_COOKIE, SESSION_COOKIE};
    use dstutor_core::llm::box_provider::BoxLlmProvider;
    use dstutor_core::llm::client::{ModelSettings, ProviderModelClient};
    use dstutor_core::llm::provider::LlmProvider;
    use dstutor_types::config::TutorConfig;
    use dstutor_types::llm::{
        CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
    };

    /// Replies with a fixed text, or fails when `reply` is None.
    struct StubProvider {
        reply: Option<String>,
    }

    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match &self.reply {
                Some(text) => Ok(CompletionResponse {
                    id: "stub-1".to_string(),
                    content: text.clone(),
                    model: request.model.clone(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage::default(),
                }),
                None => Err(LlmError::Provider {
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn test_state(reply: Option<&str>) -> AppState {
        let provider = BoxLlmProvider::new(StubProvider {
            reply: reply.map(str::to_string),
        });
        let config = TutorConfig::default();
        let mut settings = ModelSettings::from(&config.model);
        settings.timeout = Duration::from_secs(5);
        AppState::new(ProviderModelClient::new(provider, settings), config)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    /// Name/value pairs of every Set-Cookie header, values as sent.
    fn set_cookies(response: &axum::response::Response) -> Vec<(String, String)> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|value| {
                let pair = value.to_str().unwrap().split(';').next().unwrap();
                let (name, value) = pair.split_once('=').unwrap();
                (name.to_string(), value.to_string())
            })
            .collect()
    }

    fn cookie_value(response: &axum::response::Response, name: &str) -> Option<String> {
        set_cookies(response)
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn session_cookie(response: &axum::response::Response) -> String {
        cookie_value(response, SESSION_COOKIE).expect("session cookie set")
    }

    fn index_get(cookies: &[(&str, &str)]) -> Request<Body> {
        let header_value = cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        Request::get("/")
            .header(header::COOKIE, header_value)
            .body(Body::empty())
            .unwrap()
    }

    fn chat_post(cookie: Option<&str>, form_body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(id) = cookie {
            builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE}={id}"));
        }
        builder.body(Body::from(form_body.to_string())).unwrap()
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(Some("hi")));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["sessions"], 0);
        assert_eq!(json["model"], "gemini-2.0-flash-exp");
    }

    #[tokio::test]
    async fn test_cross_origin_requests_get_no_cors_grant() {
        let app = build_router(test_state(Some("unused")));

        let preflight = Request::builder()
            .method("OPTIONS")
            .uri("/api/v1/sessions")
            .header(header::ORIGIN, "https://evil.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(preflight).await.unwrap();
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

        let mut request = json_post("/api/v1/sessions", serde_json::json!({}));
        request
            .headers_mut()
            .insert(header::ORIGIN, "https://evil.example".parse().unwrap());
        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_index_starts_session_and_sets_cookie() {
        let app = build_router(test_state(Some("hi")));
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let id = session_cookie(&response);
        let html = body_string(response).await;
        assert!(html.contains("<title>Data Science Tutor</title>"));
        assert!(html.contains(&format!("AI Tutor (Session: {})", &id[..8])));
    }

    #[tokio::test]
    async fn test_index_keeps_known_session() {
        let state = test_state(Some("hi"));
        let id = state.controller.create_session().await;
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, format!("{SESSION_COOKIE}={id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(session_cookie(&response), id.to_string());
    }

    #[tokio::test]
    async fn test_chat_submit_redirects_to_index() {
        let state = test_state(Some("<b>Overfitting</b> is memorising noise & more"));
        let id = state.controller.create_session().await.to_string();
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(chat_post(Some(&id), "message=What+is+overfitting%3F"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(session_cookie(&response), id);
        assert!(cookie_value(&response, NOTICE_COOKIE).is_none());

        let response = app
            .oneshot(index_get(&[(SESSION_COOKIE, &id)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("What is overfitting?"));
        assert!(html.contains("&lt;b&gt;Overfitting&lt;/b&gt; is memorising noise &amp; more"));
        assert!(!html.contains("role=\"alert\""));

        let transcript = state.controller.transcript(id.parse().unwrap()).await;
        assert_eq!(transcript.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_chat_submit_failure_notice_is_flashed_once() {
        let state = test_state(None);
        let id = state.controller.create_session().await.to_string();
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(chat_post(Some(&id), "message=Explain+PCA"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let notice = cookie_value(&response, NOTICE_COOKIE).expect("notice flashed");

        let response = app
            .clone()
            .oneshot(index_get(&[(SESSION_COOKIE, &id), (NOTICE_COOKIE, &notice)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        // The flash cookie is cleared in the same response that shows it.
        assert_eq!(cookie_value(&response, NOTICE_COOKIE).as_deref(), Some(""));
        let html = body_string(response).await;
        assert!(html.contains("Error processing request: provider error: boom"));

        let response = app
            .oneshot(index_get(&[(SESSION_COOKIE, &id)]))
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(!html.contains("Error processing request"));

        let transcript = state.controller.transcript(id.parse().unwrap()).await;
        assert!(transcript.messages.is_empty());
    }

    #[tokio::test]
    async fn test_chat_submit_blank_message_flashes_notice() {
        let state = test_state(Some("unused"));
        let id = state.controller.create_session().await.to_string();
        let app = build_router(state.clone());

        let response = app.oneshot(chat_post(Some(&id), "message=+++")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(cookie_value(&response, NOTICE_COOKIE).is_some());
        let transcript = state.controller.transcript(id.parse().unwrap()).await;
        assert!(transcript.messages.is_empty());
    }

    #[tokio::test]
    async fn test_chat_submit_without_cookie_creates_session() {
        let state = test_state(Some("answer"));
        let app = build_router(state.clone());

        let response = app.oneshot(chat_post(None, "message=hello")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let id = session_cookie(&response);
        let transcript = state.controller.transcript(id.parse().unwrap()).await;
        assert_eq!(transcript.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_api_session_lifecycle() {
        let state = test_state(Some("A p-value is ..."));
        let app = build_router(state);

        let response = app
            .clone()
            .oneshot(json_post("/api/v1/sessions", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let id = json["data"]["session_id"].as_str().unwrap().to_string();
        assert_eq!(json["data"]["short_id"], &id[..8]);

        let response = app
            .clone()
            .oneshot(json_post(
                &format!("/api/v1/sessions/{id}/turns"),
                serde_json::json!({ "message": "What is a p-value?" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["reply"], "A p-value is ...");

        let response = app
            .oneshot(
                Request::get(format!("/api/v1/sessions/{id}/messages"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        let messages = json["data"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_api_turn_blank_message_is_400() {
        let state = test_state(Some("unused"));
        let id = state.controller.create_session().await;
        let app = build_router(state);

        let response = app
            .oneshot(json_post(
                &format!("/api/v1/sessions/{id}/turns"),
                serde_json::json!({ "message": "   " }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_turn_upstream_failure_is_502() {
        let state = test_state(None);
        let id = state.controller.create_session().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(json_post(
                &format!("/api/v1/sessions/{id}/turns"),
                serde_json::json!({ "message": "Explain PCA" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(state.controller.transcript(id).await.messages.is_empty());
    }

    #[tokio::test]
    async fn test_api_turn_unknown_session_is_404() {
        let app = build_router(test_state(Some("unused")));
        let id = dstutor_types::chat::SessionId::new();

        let response = app
            .oneshot(json_post(
                &format!("/api/v1/sessions/{id}/turns"),
                serde_json::json!({ "message": "hi" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_messages_invalid_id_is_400() {
        let app = build_router(test_state(Some("unused")));
        let response = app
            .oneshot(
                Request::get("/api/v1/sessions/not-a-uuid/messages")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_messages_unknown_id_is_empty() {
        let app = build_router(test_state(Some("unused")));
        let id = dstutor_types::chat::SessionId::new();
        let response = app
            .oneshot(
                Request::get(format!("/api/v1/sessions/{id}/messages"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}
