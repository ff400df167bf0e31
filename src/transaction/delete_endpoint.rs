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
    transaction::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<DeleteTransactionState> for Key {
    fn from_ref(state: &DeleteTransactionState) -> Self {
        state.cookie_key.clone()
    }
}

/// A route handler for deleting a transaction, redirects to the dashboard.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(transaction_id): RecordId,
) -> Response {
    let deleted = lock_connection(&state.db_connection)
        .and_then(|connection| delete_transaction(transaction_id, current_user.id, &connection));

    match deleted {
        Ok(transaction) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success(format!(
                "Deleted {} of {} on {}.",
                transaction.kind, transaction.amount, transaction.date
            )),
        ),
        Err(error) => {
            tracing::debug!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_redirect(jar, endpoints::DASHBOARD)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::{FromRef, State};
    use axum_extra::extract::PrivateCookieJar;
    use time::macros::date;

    use crate::{
        Error,
        alert::AlertKind,
        auth::{CurrentUser, UserID},
        endpoints,
        kind::Kind,
        money::Amount,
        record_id::RecordId,
        test_utils::{assert_redirect, get_flash, get_test_app_state, must_create_user},
        transaction::{NewTransaction, Transaction, create_transaction, get_transaction},
        wallet::{WalletName, create_wallet},
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn setup(state: &DeleteTransactionState) -> (UserID, Transaction) {
        let connection = state.db_connection.lock().unwrap();
        let user_id = must_create_user("alice", &connection);
        let wallet = create_wallet(WalletName::new_unchecked("Cash"), user_id, &connection).unwrap();
        let transaction = create_transaction(
            &NewTransaction {
                wallet_id: wallet.id,
                description: Some("Lunch".to_owned()),
                amount: Amount::parse("12.30").unwrap(),
                date: date!(2024 - 01 - 10),
                kind: Kind::Expense,
                category_id: None,
            },
            &connection,
        )
        .unwrap();

        (user_id, transaction)
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let state = DeleteTransactionState::from_ref(&get_test_app_state());
        let (user_id, transaction) = setup(&state);
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = delete_transaction_endpoint(
            State(state.clone()),
            CurrentUser { id: user_id },
            jar,
            RecordId(transaction.id),
        )
        .await;

        assert_redirect(&response, endpoints::DASHBOARD);
        let alert = get_flash(&response, &state.cookie_key).unwrap();
        assert_eq!(alert.kind, AlertKind::Success);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_transaction(transaction.id, user_id, &connection),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn foreign_transaction_is_not_deleted() {
        let state = DeleteTransactionState::from_ref(&get_test_app_state());
        let (user_id, transaction) = setup(&state);
        let bob = must_create_user("bob", &state.db_connection.lock().unwrap());
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = delete_transaction_endpoint(
            State(state.clone()),
            CurrentUser { id: bob },
            jar,
            RecordId(transaction.id),
        )
        .await;

        assert_redirect(&response, endpoints::DASHBOARD);
        let alert = get_flash(&response, &state.cookie_key).unwrap();
        assert_eq!(alert.kind, AlertKind::Error);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_transaction(transaction.id, user_id, &connection),
            Ok(transaction)
        );
    }
}
