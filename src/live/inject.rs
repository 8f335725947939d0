// src/live/inject.rs

//! Injection of the reload client into served HTML.

use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::CLIENT_SCRIPT_PATH;

/// Script tag inserted into every HTML page.
pub fn client_script_tag() -> String {
    format!(r#"<script src="{CLIENT_SCRIPT_PATH}"></script>"#)
}

/// Middleware: add the reload client to full (200) HTML responses.
pub async fn inject_reload_client(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    if response.status() != StatusCode::OK || !is_html(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            warn!("failed to buffer HTML response for reload injection: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let injected = inject_script(&bytes, client_script_tag().as_bytes());
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(injected))
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"))
}

/// Insert `script` before the last `</body>`, or append it when there is none.
pub fn inject_script(content: &[u8], script: &[u8]) -> Vec<u8> {
    const PATTERN: &[u8] = b"</body>";

    let mut result = Vec::with_capacity(content.len() + script.len());

    match content
        .windows(PATTERN.len())
        .rposition(|w| w.eq_ignore_ascii_case(PATTERN))
    {
        Some(pos) => {
            result.extend_from_slice(&content[..pos]);
            result.extend_from_slice(script);
            result.extend_from_slice(&content[pos..]);
        }
        None => {
            result.extend_from_slice(content);
            result.extend_from_slice(script);
        }
    }

    result
}
