//! Defines the endpoint for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::Response,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::{Alert, redirect_with_alert},
    auth::CurrentUser,
    db::lock_connection,
    endpoints,
    transaction::{Transaction, TransactionForm, create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<CreateTransactionState> for Key {
    fn from_ref(state: &CreateTransactionState) -> Self {
        state.cookie_key.clone()
    }
}

/// A route handler for creating a new transaction, redirects to the dashboard.
///
/// Invalid input is reported in an error alert on the dashboard.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<TransactionForm>,
) -> Response {
    match add_transaction(&form, current_user, &state.db_connection) {
        Ok(transaction) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success(format!(
                "Added {} of {} on {}.",
                transaction.kind, transaction.amount, transaction.date
            )),
        ),
        Err(error) => {
            tracing::debug!("Could not create transaction from {form:?}: {error}");
            error.into_alert_redirect(jar, endpoints::DASHBOARD)
        }
    }
}

fn add_transaction(
    form: &TransactionForm,
    current_user: CurrentUser,
    db_connection: &Mutex<Connection>,
) -> Result<Transaction, Error> {
    let connection = lock_connection(db_connection)?;
    let transaction = form.validate(current_user.id, &connection)?;

    create_transaction(&transaction, &connection)
}

#[cfg(test)]
mod tests {
    use axum::{
        Form,
        extract::{FromRef, State},
    };
    use axum_extra::extract::PrivateCookieJar;
    use time::macros::date;

    use crate::{
        alert::AlertKind,
        auth::{CurrentUser, UserID},
        category::{CategoryId, CategoryName, create_category},
        endpoints,
        kind::Kind,
        money::Amount,
        test_utils::{assert_redirect, get_flash, get_test_app_state, must_create_user},
        transaction::{TransactionForm, TransactionQuery, query_transactions},
        wallet::{WalletId, WalletName, create_wallet},
    };

    use super::{CreateTransactionState, create_transaction_endpoint};

    fn setup(state: &CreateTransactionState) -> (UserID, WalletId, CategoryId) {
        let connection = state.db_connection.lock().unwrap();
        let user_id = must_create_user("alice", &connection);
        let wallet = create_wallet(WalletName::new_unchecked("Cash"), user_id, &connection).unwrap();
        let category = create_category(
            CategoryName::new_unchecked("Salary"),
            Kind::Income,
            user_id,
            &connection,
        )
        .unwrap();

        (user_id, wallet.id, category.id)
    }

    fn form(wallet_id: WalletId, category_id: CategoryId, amount: &str) -> TransactionForm {
        TransactionForm {
            wallet_id: wallet_id.to_string(),
            description: "January pay".to_owned(),
            amount: amount.to_owned(),
            date: "2024-01-05".to_owned(),
            kind: "income".to_owned(),
            category_id: category_id.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_transaction() {
        let state = CreateTransactionState::from_ref(&get_test_app_state());
        let (user_id, wallet_id, category_id) = setup(&state);
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = create_transaction_endpoint(
            State(state.clone()),
            CurrentUser { id: user_id },
            jar,
            Form(form(wallet_id, category_id, "1000")),
        )
        .await;

        assert_redirect(&response, endpoints::DASHBOARD);
        let alert = get_flash(&response, &state.cookie_key).unwrap();
        assert_eq!(alert.kind, AlertKind::Success);
        let connection = state.db_connection.lock().unwrap();
        let rows = query_transactions(user_id, &TransactionQuery::default(), &connection).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, Amount::parse("1000").unwrap());
        assert_eq!(rows[0].date, date!(2024 - 01 - 05));
        assert_eq!(rows[0].kind, Kind::Income);
        assert_eq!(rows[0].category_name.as_deref(), Some("Salary"));
    }

    #[tokio::test]
    async fn invalid_amount_redirects_with_error() {
        let state = CreateTransactionState::from_ref(&get_test_app_state());
        let (user_id, wallet_id, category_id) = setup(&state);
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = create_transaction_endpoint(
            State(state.clone()),
            CurrentUser { id: user_id },
            jar,
            Form(form(wallet_id, category_id, "-5")),
        )
        .await;

        assert_redirect(&response, endpoints::DASHBOARD);
        let alert = get_flash(&response, &state.cookie_key).unwrap();
        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.message, "Amount must be greater than zero.");
        let connection = state.db_connection.lock().unwrap();
        let rows = query_transactions(user_id, &TransactionQuery::default(), &connection).unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn foreign_wallet_is_rejected() {
        let state = CreateTransactionState::from_ref(&get_test_app_state());
        let (alice, wallet_id, _) = setup(&state);
        let (bob, bob_category) = {
            let connection = state.db_connection.lock().unwrap();
            let bob = must_create_user("bob", &connection);
            let category = create_category(
                CategoryName::new_unchecked("Salary"),
                Kind::Income,
                bob,
                &connection,
            )
            .unwrap();
            (bob, category.id)
        };
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = create_transaction_endpoint(
            State(state.clone()),
            CurrentUser { id: bob },
            jar,
            Form(form(wallet_id, bob_category, "10")),
        )
        .await;

        let alert = get_flash(&response, &state.cookie_key).unwrap();
        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.message, "Choose one of your wallets.");
        let connection = state.db_connection.lock().unwrap();
        let rows = query_transactions(alice, &TransactionQuery::default(), &connection).unwrap();
        assert!(rows.is_empty());
    }
}
