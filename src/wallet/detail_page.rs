//! The page listing every transaction in one wallet.

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
    html::{CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    record_id::RecordId,
    transaction::{
        Totals, TransactionQuery, TransactionRow, query_transactions, totals_summary,
        transactions_table,
    },
    wallet::{Wallet, get_wallet},
};

/// The state needed for the wallet page.
#[derive(Debug, Clone)]
pub struct WalletPageState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for WalletPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<WalletPageState> for Key {
    fn from_ref(state: &WalletPageState) -> Self {
        state.cookie_key.clone()
    }
}

fn wallet_view(wallet: &Wallet, rows: &[TransactionRow], alert: Option<&Alert>) -> Markup {
    let nav_bar = NavBar::new(endpoints::WALLET).into_html();
    let totals = Totals::from_rows(rows);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-4"
            {
                header class="flex justify-between flex-wrap items-end gap-2"
                {
                    h1 class="text-xl font-bold" { (wallet.name) }

                    div class="flex gap-4"
                    {
                        a href=(format_endpoint(endpoints::EDIT_WALLET, wallet.id)) class=(LINK_STYLE)
                        {
                            "Rename"
                        }
                        a href=(endpoints::DASHBOARD) class=(LINK_STYLE) { "Back to dashboard" }
                    }
                }

                section class=(CARD_STYLE) { (totals_summary(&totals)) }

                section class=(CARD_STYLE) { (transactions_table(rows, false)) }
            }
        }
    };

    base(wallet.name.as_ref(), alert, &content)
}

/// Renders a wallet's transactions with its all-time totals.
///
/// A wallet that does not exist or belongs to another user redirects to the
/// dashboard with an error alert.
pub async fn get_wallet_page(
    State(state): State<WalletPageState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(wallet_id): RecordId,
) -> Response {
    let loaded = lock_connection(&state.db_connection).and_then(|connection| {
        let wallet = get_wallet(wallet_id, current_user.id, &connection)?;
        let query = TransactionQuery {
            wallet_id: Some(wallet.id),
            ..Default::default()
        };
        let rows = query_transactions(current_user.id, &query, &connection)?;
        Ok((wallet, rows))
    });

    let (wallet, rows) = match loaded {
        Ok(loaded) => loaded,
        Err(error) => {
            tracing::debug!("Could not get wallet {wallet_id}: {error}");
            return error.into_alert_redirect(jar, endpoints::DASHBOARD);
        }
    };

    let (jar, alert) = take_flash(jar);

    (jar, wallet_view(&wallet, &rows, alert.as_ref())).into_response()
}
