//! Helpers for redirect URLs during authentication flows.

use axum::{
    extract::Request,
    http::{Method, Uri},
};
use tracing::error;

use crate::endpoints;

fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(redirect_url);

    path != endpoints::LOG_IN && path != endpoints::LOG_OUT
}

/// Reduce `raw_url` to a local path and query, or `None` if it points
/// elsewhere or back at the log-in flow.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// Build the URL of the log-in page that sends the user back to `request`
/// once they have logged in.
///
/// Only GET requests are returned to, since the form data of other requests
/// is lost across the redirect. Those go to the dashboard instead.
pub fn build_log_in_redirect_url(request: &Request) -> String {
    let redirect_target = if request.method() == Method::GET {
        redirect_target_from_request_uri(request)
    } else {
        None
    };
    let redirect_target = redirect_target.as_deref().unwrap_or(endpoints::DASHBOARD);

    build_log_in_redirect_url_from_target(redirect_target)
        .unwrap_or_else(|| endpoints::LOG_IN.to_owned())
}

pub(super) fn build_log_in_redirect_url_from_target(redirect_target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("redirect_url", redirect_target)]) {
        Ok(param) => Some(format!("{}?{}", endpoints::LOG_IN, param)),
        Err(error) => {
            error!("Could not encode redirect URL {redirect_target}: {error}");
            None
        }
    }
}

fn redirect_target_from_request_uri(request: &Request) -> Option<String> {
    let path_and_query = request.uri().path_and_query()?.as_str();
    normalize_redirect_url(path_and_query)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};

    use crate::endpoints;

    use super::{build_log_in_redirect_url, normalize_redirect_url};

    #[test]
    fn accepts_local_path_with_query() {
        assert_eq!(
            normalize_redirect_url("/dashboard?date_from=2024-01-01"),
            Some("/dashboard?date_from=2024-01-01".to_owned())
        );
    }

    #[test]
    fn rejects_absolute_and_protocol_relative_urls() {
        assert_eq!(normalize_redirect_url("https://evil.example/"), None);
        assert_eq!(normalize_redirect_url("//evil.example/"), None);
        assert_eq!(normalize_redirect_url("dashboard"), None);
    }

    #[test]
    fn rejects_log_in_and_log_out_pages() {
        assert_eq!(normalize_redirect_url(endpoints::LOG_IN), None);
        assert_eq!(normalize_redirect_url("/login?redirect_url=%2F"), None);
        assert_eq!(normalize_redirect_url(endpoints::LOG_OUT), None);
    }

    #[test]
    fn get_request_returns_to_original_page() {
        let request = Request::get("/wallet/3").body(Body::empty()).unwrap();

        let url = build_log_in_redirect_url(&request);

        assert_eq!(url, "/login?redirect_url=%2Fwallet%2F3");
    }

    #[test]
    fn post_request_returns_to_dashboard() {
        let request = Request::post(endpoints::ADD_WALLET)
            .body(Body::empty())
            .unwrap();

        let url = build_log_in_redirect_url(&request);

        assert_eq!(url, "/login?redirect_url=%2Fdashboard");
    }
}
