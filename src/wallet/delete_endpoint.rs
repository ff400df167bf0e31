//! Defines the endpoint for deleting a wallet.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Response,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;

use crate::{
    AppState,
    alert::{Alert, redirect_with_alert},
    auth::CurrentUser,
    db::lock_connection,
    endpoints,
    record_id::RecordId,
    wallet::delete_wallet,
};

/// The state needed to delete a wallet.
#[derive(Debug, Clone)]
pub struct DeleteWalletState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteWalletState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<DeleteWalletState> for Key {
    fn from_ref(state: &DeleteWalletState) -> Self {
        state.cookie_key.clone()
    }
}

/// A route handler for deleting a wallet and its transactions, redirects to
/// the dashboard.
pub async fn delete_wallet_endpoint(
    State(state): State<DeleteWalletState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(wallet_id): RecordId,
) -> Response {
    let deleted = lock_connection(&state.db_connection)
        .and_then(|connection| delete_wallet(wallet_id, current_user.id, &connection));

    match deleted {
        Ok(wallet) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success(format!(
                "Deleted wallet \"{}\" and all of its transactions.",
                wallet.name
            )),
        ),
        Err(error) => {
            tracing::debug!("Could not delete wallet {wallet_id}: {error}");
            error.into_alert_redirect(jar, endpoints::DASHBOARD)
        }
    }
}
