//! Log-out route handler that invalidates the session cookie and redirects users.

use axum::response::Response;
use axum_extra::extract::PrivateCookieJar;

use crate::{
    alert::{Alert, redirect_with_alert},
    auth::invalidate_auth_cookie,
    endpoints,
};

/// Invalidate the auth cookie and redirect the client to the log-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_auth_cookie(jar);

    redirect_with_alert(
        jar,
        endpoints::LOG_IN,
        Alert::info("You have been logged out."),
    )
}
