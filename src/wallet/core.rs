use std::fmt::Display;

use rusqlite::{Connection, Row};

use crate::{
    Error,
    auth::UserID,
    name::{MAX_NAME_LENGTH, validate_name},
};

pub type WalletId = i64;

/// The display name of a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletName(String);

impl WalletName {
    /// Trim and validate a wallet name.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if `raw` is blank or longer than
    /// [MAX_NAME_LENGTH] characters.
    pub fn new(raw: &str) -> Result<Self, Error> {
        validate_name(raw, MAX_NAME_LENGTH, "Wallet name").map(Self)
    }

    /// Create a wallet name without validation.
    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl AsRef<str> for WalletName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for WalletName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A named pot of money, e.g. a bank account or cash, owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub id: WalletId,
    pub name: WalletName,
    pub user_id: UserID,
}

pub fn create_wallet_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS wallet (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_wallet_user_id ON wallet(user_id)",
        (),
    )?;

    Ok(())
}

fn map_row_to_wallet(row: &Row) -> Result<Wallet, rusqlite::Error> {
    let id = row.get(0)?;
    let name: String = row.get(1)?;
    let user_id = row.get(2)?;

    Ok(Wallet {
        id,
        name: WalletName::new_unchecked(&name),
        user_id: UserID::new(user_id),
    })
}

/// Create a wallet owned by `user_id`.
pub fn create_wallet(
    name: WalletName,
    user_id: UserID,
    connection: &Connection,
) -> Result<Wallet, Error> {
    connection.execute(
        "INSERT INTO wallet (name, user_id) VALUES (?1, ?2)",
        (name.as_ref(), user_id.as_i64()),
    )?;

    Ok(Wallet {
        id: connection.last_insert_rowid(),
        name,
        user_id,
    })
}

/// Get the wallet `id` if it belongs to `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the wallet does not exist or belongs to
/// another user.
pub fn get_wallet(id: WalletId, user_id: UserID, connection: &Connection) -> Result<Wallet, Error> {
    connection
        .prepare("SELECT id, name, user_id FROM wallet WHERE id = ?1 AND user_id = ?2")?
        .query_one((id, user_id.as_i64()), map_row_to_wallet)
        .map_err(Error::from)
}

/// Get all of the wallets owned by `user_id`, ordered by name.
pub fn get_wallets(user_id: UserID, connection: &Connection) -> Result<Vec<Wallet>, Error> {
    connection
        .prepare("SELECT id, name, user_id FROM wallet WHERE user_id = ?1 ORDER BY name, id")?
        .query_map([user_id.as_i64()], map_row_to_wallet)?
        .map(|maybe_wallet| maybe_wallet.map_err(Error::from))
        .collect()
}

/// Rename the wallet `id` owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the wallet does not exist or belongs to
/// another user.
pub fn rename_wallet(
    id: WalletId,
    user_id: UserID,
    name: &WalletName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE wallet SET name = ?1 WHERE id = ?2 AND user_id = ?3",
        (name.as_ref(), id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the wallet `id` owned by `user_id` along with all of its
/// transactions, returning the deleted wallet.
///
/// # Errors
///
/// Returns [Error::NotFound] if the wallet does not exist or belongs to
/// another user.
pub fn delete_wallet(id: WalletId, user_id: UserID, connection: &Connection) -> Result<Wallet, Error> {
    connection
        .prepare(
            "DELETE FROM wallet WHERE id = ?1 AND user_id = ?2 RETURNING id, name, user_id",
        )?
        .query_one((id, user_id.as_i64()), map_row_to_wallet)
        .map_err(Error::from)
}
