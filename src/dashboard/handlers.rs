//! Dashboard HTTP handler and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - The HTML view function for rendering the dashboard UI
//! - The state used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::{Alert, take_flash},
    auth::CurrentUser,
    dashboard::{
        aggregation::{DashboardData, build_dashboard_data},
        cards::{add_transaction_section, categories_section, wallets_section},
        filters::{DashboardFilter, DashboardQuery},
    },
    db::lock_connection,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base},
    navigation::NavBar,
    timezone::get_local_date,
    transaction::{TransactionForm, totals_summary, transactions_table},
    wallet::Wallet,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub cookie_key: Key,
    /// The database connection for reading the user's records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl FromRef<DashboardState> for Key {
    fn from_ref(state: &DashboardState) -> Self {
        state.cookie_key.clone()
    }
}

/// Display the user's wallets, categories and the transactions matching the
/// date range and wallet filter in the query string.
///
/// A malformed date in the query string redirects back to the unfiltered
/// dashboard with an error alert.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let Some(today) = get_local_date(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let filter = match DashboardFilter::from_query(&query, today) {
        Ok(filter) => filter,
        Err(error) => {
            tracing::debug!("Invalid dashboard filter {query:?}: {error}");
            return error.into_alert_redirect(jar, endpoints::DASHBOARD);
        }
    };

    let data = lock_connection(&state.db_connection)
        .and_then(|connection| build_dashboard_data(current_user.id, &filter, &connection));

    let data = match data {
        Ok(data) => data,
        Err(error) => {
            tracing::error!("Could not load the dashboard: {error}");
            return error.into_response();
        }
    };

    let (jar, alert) = take_flash(jar);
    let transaction_form = TransactionForm::new(today);

    (
        jar,
        dashboard_view(&data, &filter, &transaction_form, alert.as_ref()),
    )
        .into_response()
}

fn filter_form(filter: &DashboardFilter, wallets: &[Wallet]) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::DASHBOARD)
            class="grid grid-cols-1 sm:grid-cols-4 gap-4 items-end"
            id="dashboard-filter"
        {
            div
            {
                label for="date_from" class=(FORM_LABEL_STYLE) { "From" }
                input
                    type="date"
                    name="date_from"
                    id="date_from"
                    value=(filter.date_from)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date_to" class=(FORM_LABEL_STYLE) { "To" }
                input
                    type="date"
                    name="date_to"
                    id="date_to"
                    value=(filter.date_to)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter_wallet_id" class=(FORM_LABEL_STYLE) { "Wallet" }
                select name="wallet_id" id="filter_wallet_id" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[filter.wallet_id.is_none()] { "All wallets" }

                    @for wallet in wallets {
                        option value=(wallet.id) selected[filter.wallet_id == Some(wallet.id)]
                        {
                            (wallet.name)
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }
    }
}

fn dashboard_view(
    data: &DashboardData,
    filter: &DashboardFilter,
    transaction_form: &TransactionForm,
    alert: Option<&Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD).into_html();

    let content = html!(
        (nav_bar)

        main
            id="dashboard-content"
            class="flex flex-col items-center gap-6 px-2 lg:px-6 py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            header class="w-full flex justify-between flex-wrap items-end"
            {
                h1 class="text-2xl font-bold" { "Dashboard" }
                p class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Logged in as " span data-username="true" { (data.username) }
                }
            }

            section class=(CARD_STYLE) id="summary"
            {
                (filter_form(filter, &data.wallets))

                p class="mt-4 mb-2 text-sm text-gray-600 dark:text-gray-400"
                {
                    "Totals from " (filter.date_from) " to " (filter.date_to)
                }

                (totals_summary(&data.totals))
            }

            (wallets_section(&data.wallet_balances))

            div class="w-full grid grid-cols-1 lg:grid-cols-2 gap-6"
            {
                (add_transaction_section(transaction_form, &data.wallets, &data.categories))
                (categories_section(&data.categories))
            }

            section class=(CARD_STYLE) id="transactions"
            {
                h2 class="mb-4 text-lg font-semibold" { "Transactions" }

                (transactions_table(&data.transactions, true))
            }
        }
    );

    base("Dashboard", alert, &content)
}
