//! Defines the endpoint for creating a new wallet.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::Response,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::{Alert, redirect_with_alert},
    auth::CurrentUser,
    db::lock_connection,
    endpoints,
    wallet::{Wallet, WalletName, create_wallet},
};

/// The state needed to create a wallet.
#[derive(Debug, Clone)]
pub struct CreateWalletState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateWalletState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<CreateWalletState> for Key {
    fn from_ref(state: &CreateWalletState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for creating a wallet.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WalletForm {
    pub name: String,
}

/// A route handler for creating a new wallet, redirects to the dashboard.
pub async fn create_wallet_endpoint(
    State(state): State<CreateWalletState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<WalletForm>,
) -> Response {
    match add_wallet(&form, current_user, &state.db_connection) {
        Ok(wallet) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success(format!("Created wallet \"{}\".", wallet.name)),
        ),
        Err(error) => {
            tracing::debug!("Could not create wallet from {form:?}: {error}");
            error.into_alert_redirect(jar, endpoints::DASHBOARD)
        }
    }
}

fn add_wallet(
    form: &WalletForm,
    current_user: CurrentUser,
    db_connection: &Mutex<Connection>,
) -> Result<Wallet, Error> {
    let name = WalletName::new(&form.name)?;
    let connection = lock_connection(db_connection)?;

    create_wallet(name, current_user.id, &connection)
}
