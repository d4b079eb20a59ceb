//! Server-rendered chat page.
//!
//! One page per session: heading with the short session id, the transcript
//! as chat bubbles, an optional notice, and the input form. All text goes
//! through maud's escaping.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use dstutor_types::chat::{Message, MessageRole, Transcript};

pub const PAGE_TITLE: &str = "Data Science Tutor";
pub const INPUT_PLACEHOLDER: &str = "Ask data science question...";

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; background: #f6f7f9; margin: 0; }
.container { max-width: 760px; margin: 0 auto; padding: 24px 16px 96px; }
h1 { font-size: 1.5rem; margin-bottom: 24px; }
.bubble { border-radius: 10px; padding: 10px 14px; margin: 10px 0; white-space: pre-wrap; }
.bubble.user { background: #e8f0fe; }
.bubble.assistant { background: #fff; border: 1px solid #e1e4e8; }
.role { font-size: 0.75rem; font-weight: 600; color: #57606a; margin-bottom: 4px; }
.notice { background: #fdecea; color: #8a1c12; border-radius: 8px; padding: 10px 14px; margin: 12px 0; }
form { position: fixed; bottom: 0; left: 0; right: 0; background: #f6f7f9; padding: 16px; }
form .row { max-width: 760px; margin: 0 auto; display: flex; gap: 8px; }
input[name=message] { flex: 1; padding: 10px; border: 1px solid #d0d7de; border-radius: 8px; }
button { padding: 10px 18px; border: 0; border-radius: 8px; background: #1f6feb; color: #fff; }
button:disabled { background: #8c959f; }
"#;

// Disable the form while a turn is in flight; the page reloads with the reply.
const SUBMIT_SCRIPT: &str = r#"
document.getElementById('chat-form').addEventListener('submit', function () {
  var button = document.getElementById('send');
  button.disabled = true;
  button.textContent = 'Thinking...';
});
window.scrollTo(0, document.body.scrollHeight);
"#;

/// Render the full chat page for a session.
pub fn chat_page(transcript: &Transcript) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (PAGE_TITLE) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                main class="container" {
                    h1 { "AI Tutor (Session: " (transcript.session_id.short()) ")" }
                    div id="messages" {
                        @for message in &transcript.messages {
                            (bubble(message))
                        }
                    }
                    @if let Some(notice) = &transcript.notice {
                        div class="notice" role="alert" { (notice) }
                    }
                }
                form id="chat-form" method="post" action="/chat" {
                    div class="row" {
                        input type="text" name="message" placeholder=(INPUT_PLACEHOLDER)
                            autocomplete="off" autofocus;
                        button id="send" type="submit" { "Send" }
                    }
                }
                script { (PreEscaped(SUBMIT_SCRIPT)) }
            }
        }
    }
}

fn bubble(message: &Message) -> Markup {
    let (class, label) = match message.role {
        MessageRole::User => ("bubble user", "You"),
        MessageRole::Assistant => ("bubble assistant", "Tutor"),
        MessageRole::System => ("bubble", "System"),
    };
    html! {
        div class=(class) {
            div class="role" { (label) }
            div class="content" { (message.content) }
        }
    }
}
