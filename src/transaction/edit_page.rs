use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::{Alert, take_flash},
    auth::{CurrentUser, UserID},
    category::{Category, get_categories},
    db::lock_connection,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    record_id::RecordId,
    transaction::{TransactionForm, TransactionId, form::transaction_form_fields, get_transaction},
    wallet::{Wallet, get_wallets},
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<EditTransactionPageState> for Key {
    fn from_ref(state: &EditTransactionPageState) -> Self {
        state.cookie_key.clone()
    }
}

/// The user's wallets and categories for the form drop-downs.
pub(super) struct FormOptions {
    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
}

impl FormOptions {
    pub fn load(user_id: UserID, connection: &Connection) -> Result<Self, Error> {
        Ok(Self {
            wallets: get_wallets(user_id, connection)?,
            categories: get_categories(user_id, connection)?,
        })
    }
}

/// Renders the page for editing a transaction.
///
/// `error_message` is shown above the form fields.
pub(super) fn edit_transaction_view(
    transaction_id: TransactionId,
    form: &TransactionForm,
    options: &FormOptions,
    error_message: Option<&str>,
    alert: Option<&Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION).into_html();
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION, transaction_id);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-xl font-bold" { "Edit Transaction" }

            form method="post" action=(edit_url) class="w-full space-y-4 md:space-y-6"
            {
                @if let Some(error_message) = error_message
                {
                    p class="text-red-500 text-base" { (error_message) }
                }

                (transaction_form_fields(form, &options.wallets, &options.categories))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
            }

            p class="mt-4 text-sm" { (link(endpoints::DASHBOARD, "Back to dashboard")) }
        }
    };

    base("Edit Transaction", alert, &content)
}

/// Renders the page for editing a transaction.
///
/// A transaction that does not exist or is in another user's wallet
/// redirects to the dashboard with an error alert.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(transaction_id): RecordId,
) -> Response {
    let loaded = lock_connection(&state.db_connection).and_then(|connection| {
        let transaction = get_transaction(transaction_id, current_user.id, &connection)?;
        let options = FormOptions::load(current_user.id, &connection)?;
        Ok((transaction, options))
    });

    let (transaction, options) = match loaded {
        Ok(loaded) => loaded,
        Err(error) => {
            tracing::debug!("Could not get transaction {transaction_id} for editing: {error}");
            return error.into_alert_redirect(jar, endpoints::DASHBOARD);
        }
    };

    let (jar, alert) = take_flash(jar);
    let form = TransactionForm::from(&transaction);

    (
        jar,
        edit_transaction_view(transaction.id, &form, &options, None, alert.as_ref()),
    )
        .into_response()
}
