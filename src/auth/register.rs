//! The registration page for creating a new user account.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::{Alert, redirect_with_alert, take_flash},
    auth::{MAX_USERNAME_LENGTH, PasswordHash, Username, ValidatedPassword, create_user},
    db::lock_connection,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, link, log_in_register, password_input, username_input},
};

fn registration_form(username: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::REGISTER)
            class="space-y-4 md:space-y-6"
        {
            (username_input(username, MAX_USERNAME_LENGTH))
            (password_input(error_message))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Create Account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                (link(endpoints::LOG_IN, "Log in here"))
            }
        }
    }
}

fn register_page(username: &str, error_message: Option<&str>, alert: Option<&Alert>) -> Markup {
    let form = registration_form(username, error_message);
    let content = log_in_register("Create an account", &form);
    base("Register", alert, &content)
}

/// Display the registration page.
pub async fn get_register_page(jar: PrivateCookieJar) -> Response {
    let (jar, alert) = take_flash(jar);

    (jar, register_page("", None, alert.as_ref())).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

/// The data submitted by the registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

/// Create a user account.
///
/// Registering does not log the user in. On success the client is sent to
/// the log-in page, and a taken username sends them back to the
/// registration page, both with a flash alert. Invalid input re-renders the
/// form with the error message.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let (username, password) = match validate(&user_data) {
        Ok(validated) => validated,
        Err(error) => {
            let message = error.to_string();
            return (
                StatusCode::BAD_REQUEST,
                register_page(&user_data.username, Some(&message), None),
            )
                .into_response();
        }
    };

    // Hash before taking the lock, bcrypt is slow on purpose.
    let password_hash = match PasswordHash::new(password, PasswordHash::DEFAULT_COST) {
        Ok(password_hash) => password_hash,
        Err(error) => {
            tracing::error!("Could not hash password: {error}");
            return error.into_response();
        }
    };

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| create_user(username, password_hash, &connection));

    match result {
        Ok(user) => {
            tracing::info!("Registered user {}", user.id);
            redirect_with_alert(
                jar,
                endpoints::LOG_IN,
                Alert::success("Account created, please log in."),
            )
        }
        Err(error @ Error::DuplicateUsername) => {
            error.into_alert_redirect(jar, endpoints::REGISTER)
        }
        Err(error) => error.into_response(),
    }
}

fn validate(user_data: &RegisterForm) -> Result<(Username, ValidatedPassword), Error> {
    let username = Username::new(&user_data.username)?;
    let password = ValidatedPassword::new(&user_data.password)?;

    Ok((username, password))
}
