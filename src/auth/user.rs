//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, auth::PasswordHash};

/// The maximum number of characters in a username.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The name a user logs in with.
///
/// Usernames are trimmed, non-empty and at most [MAX_USERNAME_LENGTH] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Validate and create a username.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if `raw` is blank or too long.
    pub fn new(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Username cannot be empty.".to_owned()));
        }

        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(Error::InvalidInput(format!(
                "Username must be at most {MAX_USERNAME_LENGTH} characters."
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Create a username without validation.
    ///
    /// The caller should ensure the string is already trimmed and within the length limit.
    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name the user logs in with.
    pub username: Username,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::DuplicateUsername] if `username` is taken, or
/// [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(
    username: Username,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (username, password) VALUES (?1, ?2)",
        (username.as_ref(), password_hash.as_ref()),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username,
        password_hash,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, db_connection: &Connection) -> Result<User, Error> {
    db_connection
        .prepare("SELECT id, username, password FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Get the user registered with `username`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user has that username.
pub fn get_user_by_username(username: &str, db_connection: &Connection) -> Result<User, Error> {
    db_connection
        .prepare("SELECT id, username, password FROM user WHERE username = :username")?
        .query_row(&[(":username", &username)], map_row)
        .map_err(|error| error.into())
}

/// Replace the password hash of the user `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such user.
pub fn update_password(
    user_id: UserID,
    password_hash: &PasswordHash,
    db_connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = db_connection.execute(
        "UPDATE user SET password = ?1 WHERE id = ?2",
        (password_hash.as_ref(), user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let raw_username: String = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;

    Ok(User {
        id: UserID::new(raw_id),
        username: Username::new_unchecked(&raw_username),
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
    })
}
