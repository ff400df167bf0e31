//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The auth module handles the lower level authentication and cookie auth logic.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    alert::{Alert, redirect_with_alert, take_flash},
    auth::{
        MAX_USERNAME_LENGTH, PasswordHash, User, get_user_by_username, normalize_redirect_url,
        set_auth_cookie,
    },
    db::lock_connection,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, link, log_in_register, password_input, username_input},
};

fn log_in_form(username: &str, error_message: Option<&str>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::LOG_IN)
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            (username_input(username, MAX_USERNAME_LENGTH))
            (password_input(error_message))

            div class="flex items-center gap-x-3"
            {
                input
                    type="checkbox"
                    name="remember_me"
                    id="remember_me"
                    tabindex="0"
                    class="rounded-xs";

                label
                    for="remember_me"
                    class="block text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Keep me logged in for one week"
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                (link(endpoints::REGISTER, "Register here"))
            }
        }
    }
}

fn log_in_page(
    username: &str,
    error_message: Option<&str>,
    redirect_url: Option<&str>,
    alert: Option<&Alert>,
) -> Markup {
    let form = log_in_form(username, error_message, redirect_url);
    let content = log_in_register("Log in to your account", &form);
    base("Log In", alert, &content)
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// The page to return to after logging in.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    redirect_url: Option<String>,
}

/// Display the log-in page.
pub async fn get_log_in_page(jar: PrivateCookieJar, Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let (jar, alert) = take_flash(jar);

    (
        jar,
        log_in_page("", None, redirect_url.as_deref(), alert.as_ref()),
    )
        .into_response()
}

/// How long the auth cookie should last if the user selects "remember me" at log-in.
const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Invalid username or password.";

/// The data submitted by the log-in form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogInData {
    pub username: String,
    pub password: String,
    pub remember_me: Option<String>,
    pub redirect_url: Option<String>,
}

/// A bcrypt hash at the default cost that no submitted password is expected to
/// match. Unknown usernames are checked against it so that they take as long
/// to reject as a wrong password.
const UNKNOWN_USER_PASSWORD_HASH: &str =
    "$2b$12$Gwf0uvxH3L7JLfo0CC/NCOoijK2vQ/wbgP.LeNup8vj6gg31IiFkm";

/// Look up the user called `username`, or `None` if there is no such user.
fn find_user(username: &str, connection: &Connection) -> Result<Option<User>, Error> {
    match get_user_by_username(username.trim(), connection) {
        Ok(user) => Ok(Some(user)),
        Err(Error::NotFound) => Ok(None),
        Err(error) => Err(error),
    }
}

/// Check `password` against `user`'s password hash.
///
/// Must be called without holding the database lock, bcrypt is slow.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if there is no user or the password
/// does not match.
fn authenticate(user: Option<User>, password: &str) -> Result<User, Error> {
    let Some(user) = user else {
        // The result is ignored, only the time spent matters.
        let _ = PasswordHash::new_unchecked(UNKNOWN_USER_PASSWORD_HASH).verify(password);
        return Err(Error::InvalidCredentials);
    };

    match user.password_hash.verify(password) {
        Ok(true) => Ok(user),
        Ok(false) => Err(Error::InvalidCredentials),
        Err(error) => Err(Error::HashingError(error.to_string())),
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the auth cookie set and the client is
/// redirected to the requested page or the dashboard.
/// Otherwise, the form is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();

    let user = lock_connection(&state.db_connection)
        .and_then(|connection| find_user(&user_data.username, &connection))
        .and_then(|user| authenticate(user, &user_data.password));

    let user = match user {
        Ok(user) => user,
        Err(Error::InvalidCredentials) => {
            tracing::debug!("Failed log-in attempt for {:?}", user_data.username);
            return (
                StatusCode::UNAUTHORIZED,
                log_in_page(
                    &user_data.username,
                    Some(INVALID_CREDENTIALS_ERROR_MSG),
                    redirect_url,
                    None,
                ),
            )
                .into_response();
        }
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return error.into_response();
        }
    };

    let cookie_duration = if user_data.remember_me.is_some() {
        REMEMBER_ME_COOKIE_DURATION
    } else {
        state.cookie_duration
    };

    let redirect_url = redirect_url.unwrap_or(endpoints::DASHBOARD);

    match set_auth_cookie(jar, user.id, cookie_duration) {
        Ok(jar) => redirect_with_alert(jar, redirect_url, Alert::success("Logged in successfully.")),
        Err(error) => {
            tracing::error!("Error setting auth cookie: {error}");
            error.into_response()
        }
    }
}
