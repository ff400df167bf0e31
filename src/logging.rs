//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::internal_server_error::InternalServerError;

/// The number of bytes of a request or response body logged at the `info`
/// level. Longer bodies are truncated, and logged in full at the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Form fields whose values are never written to the logs.
const REDACTED_FIELDS: [&str; 2] = ["password", "confirm_password"];

/// Log the request and response for each request.
///
/// The values of password fields in submitted forms are replaced with
/// asterisks before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return InternalServerError::default().into_response();
        }
    };
    let body_text = String::from_utf8_lossy(&body_bytes);

    if parts.method == Method::POST && is_form(&parts.headers) {
        let redacted = REDACTED_FIELDS
            .iter()
            .fold(body_text.to_string(), |text, field| redact_field(&text, field));
        log_request(&parts, &redacted);
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return InternalServerError::default().into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}

fn is_form(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// Replace the value of every `field_name` field in the URL encoded
/// `form_text` with asterisks.
fn redact_field(form_text: &str, field_name: &str) -> String {
    let prefix = format!("{field_name}=");

    form_text
        .split('&')
        .map(|pair| {
            if pair.starts_with(&prefix) {
                format!("{prefix}********")
            } else {
                pair.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// The first [LOG_BODY_LENGTH_LIMIT] bytes of `body`, cut at a character
/// boundary.
fn truncate(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(body.len());

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {}...",
            parts.method,
            parts.uri,
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {}...",
            parts.status,
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware, routing::post};
    use axum_test::TestServer;

    use super::{logging_middleware, redact_field, truncate};

    #[test]
    fn redacts_password_value() {
        let redacted = redact_field("username=alice&password=hunter2&remember_me=on", "password");

        assert_eq!(redacted, "username=alice&password=********&remember_me=on");
    }

    #[test]
    fn does_not_redact_similar_field_names() {
        let redacted = redact_field("new_password=hunter2", "password");

        assert_eq!(redacted, "new_password=hunter2");
    }

    #[test]
    fn truncates_at_char_boundary() {
        let body = "é".repeat(40);

        let truncated = truncate(&body);

        assert!(truncated.len() <= 64);
        assert!(body.starts_with(truncated));
    }

    #[tokio::test]
    async fn passes_body_through_unchanged() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server
            .post("/echo")
            .form(&[("username", "alice"), ("password", "hunter2")])
            .await;

        response.assert_status_ok();
        response.assert_text("username=alice&password=hunter2");
    }
}
