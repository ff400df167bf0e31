use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState,
    alert::{Alert, take_flash},
    auth::CurrentUser,
    db::lock_connection,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, link, name_input},
    navigation::NavBar,
    record_id::RecordId,
    wallet::{WalletId, get_wallet},
};

/// The state needed for the edit wallet page.
#[derive(Debug, Clone)]
pub struct EditWalletPageState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditWalletPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<EditWalletPageState> for Key {
    fn from_ref(state: &EditWalletPageState) -> Self {
        state.cookie_key.clone()
    }
}

/// Renders the page for renaming a wallet.
///
/// `name` is the value shown in the name field and `error_message` is shown
/// below it.
pub(super) fn edit_wallet_view(
    wallet_id: WalletId,
    name: &str,
    error_message: Option<&str>,
    alert: Option<&Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_WALLET).into_html();
    let edit_url = format_endpoint(endpoints::EDIT_WALLET, wallet_id);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-xl font-bold" { "Rename Wallet" }

            form method="post" action=(edit_url) class="w-full space-y-4 md:space-y-6"
            {
                (name_input("name", "Wallet name", name, error_message))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
            }

            p class="mt-4 text-sm" { (link(endpoints::DASHBOARD, "Back to dashboard")) }
        }
    };

    base("Edit Wallet", alert, &content)
}

/// Renders the page for renaming a wallet.
pub async fn get_edit_wallet_page(
    State(state): State<EditWalletPageState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(wallet_id): RecordId,
) -> Response {
    let wallet = lock_connection(&state.db_connection)
        .and_then(|connection| get_wallet(wallet_id, current_user.id, &connection));

    let wallet = match wallet {
        Ok(wallet) => wallet,
        Err(error) => {
            tracing::debug!("Could not get wallet {wallet_id} for editing: {error}");
            return error.into_alert_redirect(jar, endpoints::DASHBOARD);
        }
    };

    let (jar, alert) = take_flash(jar);

    (
        jar,
        edit_wallet_view(wallet.id, wallet.name.as_ref(), None, alert.as_ref()),
    )
        .into_response()
}
