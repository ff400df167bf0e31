//! Wallet Ledger is a web app for tracking personal income and expenses
//! across wallets and categories.
//!
//! This library provides a web server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod kind;
mod landing;
mod logging;
mod money;
mod name;
mod navigation;
mod not_found;
mod record_id;
mod routing;
mod timezone;
mod transaction;
mod wallet;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{
    PasswordHash, User, UserID, Username, ValidatedPassword, create_user, get_user_by_username,
    update_password,
};
pub use category::{CategoryName, create_category};
pub use db::initialize as initialize_db;
pub use kind::Kind;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use money::Amount;
pub use routing::build_router;
pub use transaction::{NewTransaction, create_transaction};
pub use wallet::{WalletName, create_wallet};

use crate::{
    alert::{Alert, redirect_with_alert},
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// Registration was attempted with a username that belongs to another user.
    #[error("username already exists")]
    DuplicateUsername,

    /// The username and password did not match a registered user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The request did not carry a valid session.
    #[error("not logged in")]
    NotAuthenticated,

    /// The requested record does not exist or is owned by another user.
    ///
    /// Foreign records are reported the same way as missing ones so that
    /// callers cannot probe for the existence of other users' data.
    #[error("the requested resource could not be found")]
    NotFound,

    /// User supplied data failed validation.
    ///
    /// The string is shown to the user, so it should explain how to fix the
    /// problem.
    #[error("{0}")]
    InvalidInput(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The auth cookie could not be created or read.
    #[error("could not set the auth cookie: {0}")]
    CookieError(String),

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An unexpected error occurred when accessing the database.
    #[error("an unexpected error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The lock on the database connection was poisoned.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.username") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            value => {
                tracing::error!("an unhandled SQL error occurred: {}", value);
                Error::SqlError(value)
            }
        }
    }
}

impl Error {
    /// Whether the error was caused by the client rather than the server.
    fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::DuplicateUsername
                | Error::InvalidCredentials
                | Error::NotFound
                | Error::InvalidInput(_)
        )
    }

    /// The message shown to the user in a flash alert.
    fn user_message(&self) -> String {
        match self {
            Error::DuplicateUsername => {
                "That username is already taken, please choose another one.".to_owned()
            }
            Error::InvalidCredentials => "Invalid username or password.".to_owned(),
            Error::NotFound => "That item could not be found.".to_owned(),
            Error::InvalidInput(message) => message.clone(),
            _ => "Something went wrong, please try again later.".to_owned(),
        }
    }

    /// Converts the error into a redirect to `location` that carries an
    /// error alert.
    ///
    /// Errors caused by the server are rendered as the internal server error
    /// page instead, and a missing session redirects to the log-in page.
    pub(crate) fn into_alert_redirect(self, jar: PrivateCookieJar, location: &str) -> Response {
        if !self.is_user_facing() {
            return self.into_response();
        }

        redirect_with_alert(jar, location, Alert::error(self.user_message()))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::NotAuthenticated => Redirect::to(endpoints::LOG_IN).into_response(),
            Error::InvalidInput(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}
