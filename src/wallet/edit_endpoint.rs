//! Defines the endpoint for renaming a wallet.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::{Alert, redirect_with_alert},
    auth::CurrentUser,
    db::lock_connection,
    endpoints,
    record_id::RecordId,
    wallet::{
        WalletName, create_endpoint::WalletForm, edit_page::edit_wallet_view,
        get_wallet, rename_wallet,
    },
};

/// The state needed to rename a wallet.
#[derive(Debug, Clone)]
pub struct EditWalletState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditWalletState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<EditWalletState> for Key {
    fn from_ref(state: &EditWalletState) -> Self {
        state.cookie_key.clone()
    }
}

/// A route handler for renaming a wallet.
///
/// Redirects to the dashboard on success. An invalid name re-renders the
/// edit form with the error, and a wallet the user does not own redirects to
/// the dashboard with an error alert.
pub async fn edit_wallet_endpoint(
    State(state): State<EditWalletState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(wallet_id): RecordId,
    Form(form): Form<WalletForm>,
) -> Response {
    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    if let Err(error) = get_wallet(wallet_id, current_user.id, &connection) {
        tracing::debug!("Could not get wallet {wallet_id} for renaming: {error}");
        return error.into_alert_redirect(jar, endpoints::DASHBOARD);
    }

    let name = match WalletName::new(&form.name) {
        Ok(name) => name,
        Err(Error::InvalidInput(message)) => {
            return (
                StatusCode::BAD_REQUEST,
                edit_wallet_view(wallet_id, &form.name, Some(&message), None),
            )
                .into_response();
        }
        Err(error) => return error.into_response(),
    };

    match rename_wallet(wallet_id, current_user.id, &name, &connection) {
        Ok(()) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success(format!("Renamed wallet to \"{name}\".")),
        ),
        Err(error) => {
            tracing::error!("Could not rename wallet {wallet_id}: {error}");
            error.into_alert_redirect(jar, endpoints::DASHBOARD)
        }
    }
}
