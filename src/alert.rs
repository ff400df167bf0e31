//! One-shot alert messages that survive a redirect.
//!
//! An alert is stored as JSON in the private "flash" cookie by the handler
//! that performs a mutation. The next page to render takes the alert out of
//! the cookie jar, shows it once and removes the cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

/// The name of the cookie that carries the pending alert.
pub const COOKIE_FLASH: &str = "flash";

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Info,
    Error,
}

/// A message for the user about the outcome of their last action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    pub fn into_html(&self) -> Markup {
        let style = match self.kind {
            AlertKind::Success => {
                "p-4 mb-4 text-sm rounded-lg text-green-800 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400"
            }
            AlertKind::Info => {
                "p-4 mb-4 text-sm rounded-lg text-blue-800 bg-blue-50 \
                dark:bg-gray-800 dark:text-blue-400"
            }
            AlertKind::Error => {
                "p-4 mb-4 text-sm rounded-lg text-red-800 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400"
            }
        };

        html! {
            div role="alert" class=(style) data-alert-kind=(self.kind.as_str())
            {
                (self.message)
            }
        }
    }
}

impl AlertKind {
    fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Info => "info",
            AlertKind::Error => "error",
        }
    }
}

/// Store `alert` in the flash cookie, replacing any pending alert.
pub fn set_flash(jar: PrivateCookieJar, alert: &Alert) -> PrivateCookieJar {
    let value = match serde_json::to_string(alert) {
        Ok(value) => value,
        Err(error) => {
            tracing::error!("Could not serialize alert {alert:?}: {error}");
            return jar;
        }
    };

    jar.add(
        Cookie::build((COOKIE_FLASH, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Remove the pending alert from the cookie jar, if there is one.
///
/// A cookie that cannot be decoded is discarded.
pub fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Alert>) {
    let Some(cookie) = jar.get(COOKIE_FLASH) else {
        return (jar, None);
    };

    let alert = serde_json::from_str(cookie.value_trimmed())
        .inspect_err(|error| tracing::warn!("Discarding malformed flash cookie: {error}"))
        .ok();
    let jar = jar.remove(Cookie::build(COOKIE_FLASH).path("/"));

    (jar, alert)
}

/// Redirect to `location` with `alert` waiting in the flash cookie.
pub fn redirect_with_alert(jar: PrivateCookieJar, location: &str, alert: Alert) -> Response {
    (set_flash(jar, &alert), Redirect::to(location)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_extra::extract::PrivateCookieJar;

    use crate::{app_state::create_cookie_key, test_utils::get_flash};

    use super::{Alert, AlertKind, COOKIE_FLASH, redirect_with_alert, set_flash, take_flash};

    fn get_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(create_cookie_key("foobar"))
    }

    #[test]
    fn take_flash_returns_stored_alert() {
        let jar = set_flash(get_jar(), &Alert::success("Saved."));

        let (jar, alert) = take_flash(jar);

        assert_eq!(alert, Some(Alert::success("Saved.")));
        assert!(jar.get(COOKIE_FLASH).is_none(), "flash should be consumed");
    }

    #[test]
    fn take_flash_on_empty_jar() {
        let (_, alert) = take_flash(get_jar());

        assert_eq!(alert, None);
    }

    #[test]
    fn later_alert_replaces_earlier_one() {
        let jar = set_flash(get_jar(), &Alert::info("first"));
        let jar = set_flash(jar, &Alert::error("second"));

        let (_, alert) = take_flash(jar);

        assert_eq!(alert.map(|alert| alert.kind), Some(AlertKind::Error));
    }

    #[test]
    fn redirect_carries_alert() {
        let key = create_cookie_key("foobar");
        let jar = PrivateCookieJar::new(key.clone());

        let response = redirect_with_alert(jar, "/dashboard", Alert::info("Logged out."));

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_flash(&response, &key), Some(Alert::info("Logged out.")));
    }

    #[test]
    fn renders_message() {
        let markup = Alert::error("Oops").into_html().into_string();

        assert!(markup.contains("Oops"));
        assert!(markup.contains(r#"role="alert""#));
    }
}
