//! Extracts the ID of a wallet, category or transaction from the URL path.

use axum::{
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
    response::Response,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{Error, endpoints};

/// The numeric ID in a path such as `/wallet/{wallet_id}`.
///
/// A missing, non-numeric or out of range ID is treated like a record that
/// does not exist: the user is sent back to the dashboard with an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(rejection) => {
                tracing::debug!("Invalid record ID in {}: {rejection}", parts.uri);
                let jar = PrivateCookieJar::from_headers(&parts.headers, Key::from_ref(state));
                Err(Error::NotFound.into_alert_redirect(jar, endpoints::DASHBOARD))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;

    use crate::{app_state::create_cookie_key, endpoints};

    use super::RecordId;

    fn get_test_server() -> TestServer {
        let app = Router::new()
            .route(
                "/wallet/{wallet_id}",
                get(|RecordId(id): RecordId| async move { id.to_string() }),
            )
            .with_state(create_cookie_key("foobar"));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn extracts_numeric_id() {
        let server = get_test_server();

        let response = server.get("/wallet/42").await;

        response.assert_status_ok();
        response.assert_text("42");
    }

    #[tokio::test]
    async fn invalid_ids_redirect_to_dashboard() {
        let server = get_test_server();

        for path in ["/wallet/abc", "/wallet/99999999999999999999", "/wallet/1.5"] {
            let response = server.get(path).await;

            response.assert_status(StatusCode::SEE_OTHER);
            assert_eq!(
                response.header("location"),
                endpoints::DASHBOARD,
                "{path} should redirect to the dashboard"
            );
        }
    }
}
