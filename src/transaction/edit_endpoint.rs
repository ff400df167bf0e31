//! Defines the endpoint for editing a transaction.

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
    transaction::{
        TransactionForm,
        edit_page::{FormOptions, edit_transaction_view},
        get_transaction, update_transaction,
    },
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<EditTransactionState> for Key {
    fn from_ref(state: &EditTransactionState) -> Self {
        state.cookie_key.clone()
    }
}

/// A route handler for overwriting every field of a transaction.
///
/// Redirects to the dashboard on success. Invalid input re-renders the edit
/// form with the error, and a transaction in another user's wallet redirects
/// to the dashboard with an error alert.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(transaction_id): RecordId,
    Form(form): Form<TransactionForm>,
) -> Response {
    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    if let Err(error) = get_transaction(transaction_id, current_user.id, &connection) {
        tracing::debug!("Could not get transaction {transaction_id} for editing: {error}");
        return error.into_alert_redirect(jar, endpoints::DASHBOARD);
    }

    let transaction = match form.validate(current_user.id, &connection) {
        Ok(transaction) => transaction,
        Err(Error::InvalidInput(message)) => {
            let options = match FormOptions::load(current_user.id, &connection) {
                Ok(options) => options,
                Err(error) => return error.into_response(),
            };

            return (
                StatusCode::BAD_REQUEST,
                edit_transaction_view(transaction_id, &form, &options, Some(&message), None),
            )
                .into_response();
        }
        Err(error) => return error.into_response(),
    };

    match update_transaction(transaction_id, current_user.id, &transaction, &connection) {
        Ok(()) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success("Transaction updated."),
        ),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_alert_redirect(jar, endpoints::DASHBOARD)
        }
    }
}
