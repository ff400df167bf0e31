//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error, auth::UserID, category::CategoryId, kind::Kind, money::Amount, wallet::WalletId,
};

pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// An event where money either entered or left a wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The wallet the money moved in or out of.
    pub wallet_id: WalletId,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// How much money moved. Always positive, the direction comes from `kind`.
    pub amount: Amount,
    /// When the transaction happened.
    pub date: Date,
    /// Whether money was earned or spent.
    pub kind: Kind,
    /// The category of the transaction, `None` once the category is deleted.
    pub category_id: Option<CategoryId>,
}

/// The validated fields for creating or overwriting a transaction.
///
/// The wallet and category are assumed to belong to the user making the
/// change, see [crate::transaction::TransactionForm::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub wallet_id: WalletId,
    pub description: Option<String>,
    pub amount: Amount,
    pub date: Date,
    pub kind: Kind,
    pub category_id: Option<CategoryId>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// Amounts are stored as integer cents.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                description TEXT,
                amount INTEGER NOT NULL CHECK (amount > 0),
                date TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
                wallet_id INTEGER NOT NULL REFERENCES wallet(id) ON DELETE CASCADE,
                category_id INTEGER REFERENCES category(id) ON DELETE SET NULL
                )",
        (),
    )?;

    // Used by the dashboard and wallet pages.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_wallet_date \
        ON \"transaction\"(wallet_id, date);",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_category \
        ON \"transaction\"(category_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        wallet_id: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        date: row.get(4)?,
        kind: row.get(5)?,
        category_id: row.get(6)?,
    })
}

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the wallet or category does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO \"transaction\" (wallet_id, description, amount, date, kind, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, wallet_id, description, amount, date, kind, category_id",
        )?
        .query_row(
            (
                transaction.wallet_id,
                &transaction.description,
                transaction.amount,
                transaction.date,
                transaction.kind,
                transaction.category_id,
            ),
            map_transaction_row,
        )
        .map_err(map_foreign_key_error)
}

/// Retrieve the transaction `id` if it is in one of `user_id`'s wallets.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by `user_id`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT t.id, t.wallet_id, t.description, t.amount, t.date, t.kind, t.category_id
             FROM \"transaction\" t
             INNER JOIN wallet w ON w.id = t.wallet_id
             WHERE t.id = ?1 AND w.user_id = ?2",
        )?
        .query_one((id, user_id.as_i64()), map_transaction_row)
        .map_err(Error::from)
}

/// Overwrite every field of the transaction `id` in one of `user_id`'s
/// wallets.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by `user_id`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    user_id: UserID,
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE \"transaction\"
             SET wallet_id = ?1, description = ?2, amount = ?3, date = ?4, kind = ?5, category_id = ?6
             WHERE id = ?7 AND wallet_id IN (SELECT id FROM wallet WHERE user_id = ?8)",
            (
                transaction.wallet_id,
                &transaction.description,
                transaction.amount,
                transaction.date,
                transaction.kind,
                transaction.category_id,
                id,
                user_id.as_i64(),
            ),
        )
        .map_err(map_foreign_key_error)?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the transaction `id` in one of `user_id`'s wallets, returning the
/// deleted transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by `user_id`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "DELETE FROM \"transaction\"
             WHERE id = ?1 AND wallet_id IN (SELECT id FROM wallet WHERE user_id = ?2)
             RETURNING id, wallet_id, description, amount, date, kind, category_id",
        )?
        .query_one((id, user_id.as_i64()), map_transaction_row)
        .map_err(Error::from)
}

fn map_foreign_key_error(error: rusqlite::Error) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        ) => Error::NotFound,
        error => error.into(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
