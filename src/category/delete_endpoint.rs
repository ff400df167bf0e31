//! Defines the endpoint for deleting a category.

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
    category::delete_category,
    db::lock_connection,
    endpoints,
    record_id::RecordId,
};

/// The state needed to delete a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<DeleteCategoryState> for Key {
    fn from_ref(state: &DeleteCategoryState) -> Self {
        state.cookie_key.clone()
    }
}

/// A route handler for deleting a category, redirects to the dashboard.
///
/// The category's transactions are kept but become uncategorised.
pub async fn delete_category_endpoint(
    State(state): State<DeleteCategoryState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(category_id): RecordId,
) -> Response {
    let deleted = lock_connection(&state.db_connection)
        .and_then(|connection| delete_category(category_id, current_user.id, &connection));

    match deleted {
        Ok(category) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success(format!(
                "Deleted category \"{}\". Its transactions are now uncategorised.",
                category.name
            )),
        ),
        Err(error) => {
            tracing::debug!("Could not delete category {category_id}: {error}");
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
        auth::CurrentUser,
        category::{CategoryName, create_category, get_category},
        endpoints,
        kind::Kind,
        money::Amount,
        record_id::RecordId,
        test_utils::{assert_redirect, get_flash, get_test_app_state, must_create_user},
        transaction::{NewTransaction, create_transaction, get_transaction},
        wallet::{WalletName, create_wallet},
    };

    use super::{DeleteCategoryState, delete_category_endpoint};

    #[tokio::test]
    async fn deleting_category_uncategorises_its_transactions() {
        let state = DeleteCategoryState::from_ref(&get_test_app_state());
        let (user_id, category, transaction) = {
            let connection = state.db_connection.lock().unwrap();
            let user_id = must_create_user("alice", &connection);
            let wallet =
                create_wallet(WalletName::new_unchecked("Cash"), user_id, &connection).unwrap();
            let category = create_category(
                CategoryName::new_unchecked("Groceries"),
                Kind::Expense,
                user_id,
                &connection,
            )
            .unwrap();
            let transaction = create_transaction(
                &NewTransaction {
                    wallet_id: wallet.id,
                    description: Some("Milk".to_owned()),
                    amount: Amount::parse("3.20").unwrap(),
                    date: date!(2024 - 01 - 05),
                    kind: Kind::Expense,
                    category_id: Some(category.id),
                },
                &connection,
            )
            .unwrap();
            (user_id, category, transaction)
        };
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = delete_category_endpoint(
            State(state.clone()),
            CurrentUser { id: user_id },
            jar,
            RecordId(category.id),
        )
        .await;

        assert_redirect(&response, endpoints::DASHBOARD);
        let alert = get_flash(&response, &state.cookie_key).unwrap();
        assert_eq!(alert.kind, AlertKind::Success);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_category(category.id, user_id, &connection),
            Err(Error::NotFound)
        );
        let got = get_transaction(transaction.id, user_id, &connection).unwrap();
        assert_eq!(got.category_id, None);
        assert_eq!(got.amount, transaction.amount);
    }

    #[tokio::test]
    async fn foreign_category_is_not_deleted() {
        let state = DeleteCategoryState::from_ref(&get_test_app_state());
        let (alice, bob, category) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_user("alice", &connection);
            let bob = must_create_user("bob", &connection);
            let category = create_category(
                CategoryName::new_unchecked("Salary"),
                Kind::Income,
                alice,
                &connection,
            )
            .unwrap();
            (alice, bob, category)
        };
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = delete_category_endpoint(
            State(state.clone()),
            CurrentUser { id: bob },
            jar,
            RecordId(category.id),
        )
        .await;

        assert_redirect(&response, endpoints::DASHBOARD);
        let alert = get_flash(&response, &state.cookie_key).unwrap();
        assert_eq!(alert.kind, AlertKind::Error);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_category(category.id, alice, &connection), Ok(category));
    }
}
