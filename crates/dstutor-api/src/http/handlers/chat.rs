//! Browser chat page handlers.
//!
//! Endpoints:
//! - GET  /     - Render the chat page for the cookie's session
//! - POST /chat - Submit the form's message, then redirect to `/`
//!
//! The session id travels in the `dstutor_session` cookie. A missing or
//! unknown id starts a new session. A failed turn's notice is carried to the
//! next GET / in the `dstutor_notice` flash cookie, which is cleared once shown.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use dstutor_types::chat::SessionId;

use crate::http::page;
use crate::state::AppState;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "dstutor_session";

/// Name of the flash cookie carrying a notice to the next page render.
pub const NOTICE_COOKIE: &str = "dstutor_notice";

/// Upper bound on a flashed notice, in characters.
const MAX_NOTICE_CHARS: usize = 512;

/// Form body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

fn session_from_cookie(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

fn with_session_cookie(jar: CookieJar, id: SessionId) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

fn with_notice_cookie(jar: CookieJar, notice: &str) -> CookieJar {
    let notice: String = notice.chars().take(MAX_NOTICE_CHARS).collect();
    jar.add(
        Cookie::build((NOTICE_COOKIE, notice))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// GET / - Render the chat page, consuming any flashed notice.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let id = state
        .controller
        .ensure_session(session_from_cookie(&jar))
        .await;
    let mut transcript = state.controller.transcript(id).await;

    let notice = jar.get(NOTICE_COOKIE).map(|c| c.value().to_string());
    let jar = match notice {
        Some(notice) => {
            transcript = transcript.with_notice(notice);
            jar.remove(Cookie::build(NOTICE_COOKIE).path("/"))
        }
        None => jar,
    };

    (
        with_session_cookie(jar, id),
        Html(page::chat_page(&transcript).into_string()),
    )
}

/// POST /chat - Run one turn, then 303 back to `/`.
///
/// Blocks until the model replies or fails. A failure is flashed as a notice
/// and the history stays unchanged; reloading the page never resubmits.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ChatForm>,
) -> (CookieJar, Redirect) {
    let id = state
        .controller
        .ensure_session(session_from_cookie(&jar))
        .await;
    let transcript = state.controller.submit(id, &form.message).await;

    let mut jar = with_session_cookie(jar, id);
    if let Some(notice) = &transcript.notice {
        jar = with_notice_cookie(jar, notice);
    }
    (jar, Redirect::to("/"))
}
