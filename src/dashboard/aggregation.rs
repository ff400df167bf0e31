//! Gathers and sums the data shown on the dashboard.

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error,
    auth::{UserID, get_user_by_id},
    category::{Category, get_categories},
    dashboard::filters::DashboardFilter,
    money::cents_to_decimal,
    transaction::{Totals, TransactionRow, query_transactions},
    wallet::{Wallet, WalletId, get_wallets},
};

/// A wallet and the sum of all of its transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletBalance {
    pub id: WalletId,
    pub name: String,
    /// Income minus expense over every transaction in the wallet, ignoring
    /// the dashboard filter.
    pub balance: Decimal,
}

/// Everything the dashboard page renders.
#[derive(Debug)]
pub(super) struct DashboardData {
    pub username: String,
    /// The transactions matching the filter, newest first.
    pub transactions: Vec<TransactionRow>,
    /// The totals over `transactions`.
    pub totals: Totals,
    pub wallet_balances: Vec<WalletBalance>,
    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
}

/// Get the all-time balance of each of `user_id`'s wallets, ordered by name.
///
/// Wallets without transactions have a balance of zero.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_wallet_balances(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<WalletBalance>, Error> {
    connection
        .prepare(
            "SELECT w.id, w.name,
                COALESCE(SUM(CASE WHEN t.kind = 'income' THEN t.amount ELSE -t.amount END), 0)
             FROM wallet w
             LEFT JOIN \"transaction\" t ON t.wallet_id = w.id
             WHERE w.user_id = ?1
             GROUP BY w.id, w.name
             ORDER BY w.name, w.id",
        )?
        .query_map([user_id.as_i64()], |row| {
            Ok(WalletBalance {
                id: row.get(0)?,
                name: row.get(1)?,
                balance: cents_to_decimal(row.get(2)?),
            })
        })?
        .map(|balance_result| balance_result.map_err(Error::from))
        .collect()
}

/// Load the dashboard for `user_id` with `filter` applied.
pub(super) fn build_dashboard_data(
    user_id: UserID,
    filter: &DashboardFilter,
    connection: &Connection,
) -> Result<DashboardData, Error> {
    let user = get_user_by_id(user_id, connection)?;
    let transactions = query_transactions(user_id, &filter.transaction_query(), connection)?;
    let totals = Totals::from_rows(&transactions);

    Ok(DashboardData {
        username: user.username.to_string(),
        transactions,
        totals,
        wallet_balances: get_wallet_balances(user_id, connection)?,
        wallets: get_wallets(user_id, connection)?,
        categories: get_categories(user_id, connection)?,
    })
}
