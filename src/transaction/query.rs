//! Database query helpers for the transaction tables on the dashboard and
//! wallet pages.

use rusqlite::{Connection, ToSql};
use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    auth::UserID,
    kind::Kind,
    money::Amount,
    transaction::TransactionId,
    wallet::WalletId,
};

/// A transaction with the names of its wallet and category, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub wallet_id: WalletId,
    pub wallet_name: String,
    pub description: Option<String>,
    pub amount: Amount,
    pub date: Date,
    pub kind: Kind,
    /// `None` if the transaction is uncategorised.
    pub category_name: Option<String>,
}

/// Which of a user's transactions to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionQuery {
    /// Only include transactions on or after this date.
    pub date_from: Option<Date>,
    /// Only include transactions on or before this date.
    pub date_to: Option<Date>,
    /// Only include transactions in this wallet.
    pub wallet_id: Option<WalletId>,
}

/// Get the transactions in `user_id`'s wallets that match `query`, newest
/// first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn query_transactions(
    user_id: UserID,
    query: &TransactionQuery,
    connection: &Connection,
) -> Result<Vec<TransactionRow>, Error> {
    let mut sql = String::from(
        "SELECT t.id, t.wallet_id, w.name, t.description, t.amount, t.date, t.kind, c.name
         FROM \"transaction\" t
         INNER JOIN wallet w ON w.id = t.wallet_id
         LEFT JOIN category c ON c.id = t.category_id
         WHERE w.user_id = ?",
    );
    let user_id = user_id.as_i64();
    let mut params: Vec<&dyn ToSql> = vec![&user_id];

    if let Some(date_from) = &query.date_from {
        sql.push_str(" AND t.date >= ?");
        params.push(date_from);
    }

    if let Some(date_to) = &query.date_to {
        sql.push_str(" AND t.date <= ?");
        params.push(date_to);
    }

    if let Some(wallet_id) = &query.wallet_id {
        sql.push_str(" AND t.wallet_id = ?");
        params.push(wallet_id);
    }

    // Sort by date, and then ID to keep transaction order stable after updates
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");

    connection
        .prepare(&sql)?
        .query_map(params.as_slice(), |row| {
            Ok(TransactionRow {
                id: row.get(0)?,
                wallet_id: row.get(1)?,
                wallet_name: row.get(2)?,
                description: row.get(3)?,
                amount: row.get(4)?,
                date: row.get(5)?,
                kind: row.get(6)?,
                category_name: row.get(7)?,
            })
        })?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

/// The income, expense and balance of a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    /// Sum the amounts of `rows` by kind.
    pub fn from_rows(rows: &[TransactionRow]) -> Self {
        rows.iter().fold(Self::default(), |mut totals, row| {
            match row.kind {
                Kind::Income => totals.income += row.amount.value(),
                Kind::Expense => totals.expense += row.amount.value(),
            }
            totals
        })
    }

    /// Income minus expense.
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}
