//! Authentication middleware that validates cookies, extends sessions, and handles redirects.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::SET_COOKIE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use time::Duration;

use crate::{
    AppState, Error,
    alert::{Alert, redirect_with_alert},
    auth::{
        COOKIE_TOKEN, UserID,
        cookie::{extend_auth_cookie_duration_if_needed, get_token_from_cookies},
        redirect::build_log_in_redirect_url,
    },
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// The user making the current request.
///
/// Only available to handlers behind [auth_guard], which places the user ID
/// in the request extensions. Extracting it anywhere else fails with
/// [Error::NotAuthenticated].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    /// The ID of the logged in user.
    pub id: UserID,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserID>()
            .copied()
            .map(|id| CurrentUser { id })
            .ok_or(Error::NotAuthenticated)
    }
}

/// Middleware function that checks for a valid authorization cookie.
///
/// If the cookie is valid, the user ID is placed into the request extensions
/// and the request is executed normally. The session is then extended by the
/// configured cookie duration. Otherwise a redirect to the log-in page is
/// returned that will send the user back to the requested page.
///
/// **Note**: Route handlers can use the extractor [CurrentUser] to receive the user ID.
pub async fn auth_guard(
    State(state): State<AuthState>,
    jar: PrivateCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = match get_token_from_cookies(&jar) {
        Ok(token) => token.user_id,
        Err(_) => {
            let log_in_redirect_url = build_log_in_redirect_url(&request);
            return redirect_with_alert(
                jar,
                &log_in_redirect_url,
                Alert::info("Please log in to access this page."),
            );
        }
    };

    request.extensions_mut().insert(user_id);
    let response = next.run(request).await;

    // The handler ended or replaced the session, e.g. by logging out.
    if sets_token_cookie(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let jar = match extend_auth_cookie_duration_if_needed(jar.clone(), state.cookie_duration) {
        Ok(updated_jar) => updated_jar,
        Err(err) => {
            tracing::error!("Error extending cookie duration: {err:?}. Rolling back cookie jar.");
            jar
        }
    };
    for (key, val) in jar.into_response().headers().iter() {
        if key != SET_COOKIE {
            continue;
        }

        parts.headers.append(key, val.to_owned());
    }

    Response::from_parts(parts, body)
}

fn sets_token_cookie(response: &Response) -> bool {
    let prefix = format!("{COOKIE_TOKEN}=");

    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(&prefix))
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{
        Router,
        extract::State,
        middleware,
        response::Html,
        routing::{get, post},
    };
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key, SameSite},
    };
    use axum_test::TestServer;
    use sha2::Digest;
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        auth::{
            AuthState, COOKIE_TOKEN, CurrentUser, DEFAULT_COOKIE_DURATION, UserID, auth_guard,
            invalidate_auth_cookie, set_auth_cookie,
        },
        endpoints,
    };

    async fn test_handler(current_user: CurrentUser) -> Html<String> {
        Html(format!("<h1>Hello, user {}!</h1>", current_user.id))
    }

    async fn stub_log_out_route(jar: PrivateCookieJar) -> PrivateCookieJar {
        invalidate_auth_cookie(jar)
    }

    async fn stub_log_in_route(
        State(state): State<AuthState>,
        jar: PrivateCookieJar,
    ) -> Result<PrivateCookieJar, Error> {
        set_auth_cookie(jar, UserID::new(1), state.cookie_duration)
    }

    const TEST_LOG_IN_ROUTE_PATH: &str = "/stub_log_in";
    const TEST_LOG_OUT_ROUTE_PATH: &str = "/stub_log_out";
    const TEST_PROTECTED_ROUTE: &str = "/protected";

    fn get_test_server(cookie_duration: Duration) -> TestServer {
        let hash = sha2::Sha512::digest("nafstenoas");
        let state = AuthState {
            cookie_key: Key::from(&hash),
            cookie_duration,
        };

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route(TEST_LOG_OUT_ROUTE_PATH, get(stub_log_out_route))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .route(TEST_LOG_IN_ROUTE_PATH, post(stub_log_in_route))
            .with_state(state.clone());

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_cookie() {
        let server = get_test_server(DEFAULT_COOKIE_DURATION);
        let response = server.post(TEST_LOG_IN_ROUTE_PATH).await;

        response.assert_status_ok();
        let token_cookie = response.cookie(COOKIE_TOKEN);

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(token_cookie)
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Hello, user 1!"));
    }

    #[track_caller]
    fn assert_date_time_close(left: OffsetDateTime, right: OffsetDateTime) {
        assert!(
            (left - right).abs() < Duration::seconds(1),
            "got date time {:?}, want {:?}",
            left,
            right
        );
    }

    #[tokio::test]
    async fn auth_guard_extends_valid_cookie_duration() {
        let server = get_test_server(Duration::seconds(5));
        let response = server.post(TEST_LOG_IN_ROUTE_PATH).await;

        response.assert_status_ok();
        let response_time = OffsetDateTime::now_utc();
        let jar = response.cookies();
        assert_date_time_close(
            jar.get(COOKIE_TOKEN).unwrap().expires_datetime().unwrap(),
            response_time + Duration::seconds(5),
        );

        let response = server.get(TEST_PROTECTED_ROUTE).add_cookies(jar).await;

        let auth_cookie = response.cookie(COOKIE_TOKEN);
        assert_date_time_close(
            auth_cookie.expires_datetime().unwrap(),
            response_time + Duration::seconds(5),
        );
        assert_eq!(auth_cookie.secure(), Some(true));
        assert_eq!(auth_cookie.http_only(), Some(true));
        assert_eq!(auth_cookie.same_site(), Some(SameSite::Strict));
    }

    #[tokio::test]
    async fn get_protected_route_with_no_auth_cookie_redirects_to_log_in() {
        let server = get_test_server(DEFAULT_COOKIE_DURATION);
        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status_see_other();
        let expected_query =
            serde_urlencoded::to_string([("redirect_url", TEST_PROTECTED_ROUTE)]).unwrap();
        let expected_location = format!("{}?{}", endpoints::LOG_IN, expected_query);
        assert_eq!(response.header("location"), expected_location);
    }

    #[tokio::test]
    async fn get_protected_route_with_invalid_auth_cookie_redirects_to_log_in() {
        let server = get_test_server(DEFAULT_COOKIE_DURATION);
        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_cookie(Cookie::build((COOKIE_TOKEN, "FOOBAR")).build())
            .await;

        response.assert_status_see_other();
        let location = response.header("location");
        assert!(
            location
                .to_str()
                .unwrap()
                .starts_with(&format!("{}?", endpoints::LOG_IN)),
            "got location {location:?}"
        );
    }

    #[tokio::test]
    async fn log_out_cookie_is_not_overwritten_by_guard() {
        let server = get_test_server(DEFAULT_COOKIE_DURATION);
        let token_cookie = server.post(TEST_LOG_IN_ROUTE_PATH).await.cookie(COOKIE_TOKEN);

        let response = server
            .get(TEST_LOG_OUT_ROUTE_PATH)
            .add_cookie(token_cookie)
            .await;

        let set_cookie_headers = response.headers().get_all("set-cookie").iter().count();
        assert_eq!(set_cookie_headers, 1, "want only the invalidated token cookie");
        assert_eq!(
            response.cookie(COOKIE_TOKEN).max_age(),
            Some(Duration::ZERO)
        );
    }

    #[tokio::test]
    async fn current_user_rejects_request_without_user_id() {
        use axum::{extract::FromRequestParts, http::Request};

        let (mut parts, _) = Request::get("/").body(()).unwrap().into_parts();

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;

        assert_eq!(result, Err(Error::NotAuthenticated));
    }
}
