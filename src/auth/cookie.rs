//! Defines functions for handling user authentication with cookies.
//!
//! The session lives in a single private cookie whose value is a JSON
//! serialised [Token].

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    auth::{Token, UserID},
};

pub(crate) const COOKIE_TOKEN: &str = "token";
/// The default duration for which auth cookies are valid.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

/// Add an auth cookie to the cookie jar, indicating that a user is logged in and authenticated.
///
/// Sets the initial expiry of the cookie to `duration` from the current time.
/// You can use [DEFAULT_COOKIE_DURATION] for the default duration.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns a [Error::CookieError] if the token cannot be serialized.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    set_token_cookie(jar, Token::new(user_id, duration))
}

fn set_token_cookie(jar: PrivateCookieJar, token: Token) -> Result<PrivateCookieJar, Error> {
    let expiry = token.expires_at;
    let value =
        serde_json::to_string(&token).map_err(|error| Error::CookieError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_TOKEN, value))
            .path("/")
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Read the session token from `jar`.
///
/// # Errors
///
/// Returns [Error::NotAuthenticated] if the cookie is missing, cannot be
/// decoded or has expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::NotAuthenticated)?;

    let token: Token = serde_json::from_str(cookie.value_trimmed()).map_err(|error| {
        tracing::debug!("Could not decode auth token: {error}");
        Error::NotAuthenticated
    })?;

    if token.is_expired() {
        return Err(Error::NotAuthenticated);
    }

    Ok(token)
}

/// Set the expiry of the auth cookie in `jar` to the latest of UTC now
/// plus `duration` and the cookie's expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns:
/// - [Error::NotAuthenticated] if there is no valid token in the cookie jar.
/// - [Error::CookieError] if extending the cookie by `duration` would overflow the date time.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = get_token_from_cookies(&jar)?;

    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| Error::CookieError("cookie expiry overflowed".to_owned()))?;

    let expires_at = max(token.expires_at, new_expiry);

    set_token_cookie(
        jar,
        Token {
            user_id: token.user_id,
            expires_at,
        },
    )
}
