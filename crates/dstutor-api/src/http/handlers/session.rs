//! Session JSON API handlers.
//!
//! Endpoints:
//! - POST /api/v1/sessions                - Create a session
//! - GET  /api/v1/sessions/{id}/messages  - Ordered history of a session
//! - POST /api/v1/sessions/{id}/turns     - Run one turn, return the reply

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dstutor_types::chat::{Message, SessionId};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Response body for a newly created session.
#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
    pub short_id: String,
}

/// Request body for a turn.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub message: String,
}

/// Response body for a completed turn.
#[derive(Debug, Serialize)]
pub struct TurnReply {
    pub reply: String,
}

/// Parse a session id from a path parameter, returning a 400 error on invalid format.
fn parse_session_id(s: &str) -> Result<SessionId, AppError> {
    s.parse::<SessionId>()
        .map_err(|_| AppError::Validation(format!("Invalid session id: {s}")))
}

/// POST /api/v1/sessions - Create a new, empty session.
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<SessionCreated>>) {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = state.controller.create_session().await;

    let elapsed = start.elapsed().as_millis() as u64;
    let body = ApiResponse::success(
        SessionCreated {
            session_id: id,
            short_id: id.short(),
        },
        request_id,
        elapsed,
    )
    .with_link("messages", &format!("/api/v1/sessions/{id}/messages"))
    .with_link("turns", &format!("/api/v1/sessions/{id}/turns"));

    (StatusCode::CREATED, Json(body))
}

/// GET /api/v1/sessions/{id}/messages - Ordered history; empty for unknown ids.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_session_id(&id)?;
    let transcript = state.controller.transcript(id).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        transcript.messages,
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/sessions/{id}/turns - Run one turn.
///
/// 400 for a blank message, 404 for an unknown session, 502 when the model
/// call fails.
pub async fn post_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TurnRequest>,
) -> Result<Json<ApiResponse<TurnReply>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = parse_session_id(&id)?;
    if !state.controller.contains(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }

    let reply = state.controller.turn(id, &body.message).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        TurnReply { reply },
        request_id,
        elapsed,
    )))
}
