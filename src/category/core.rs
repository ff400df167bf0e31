use std::fmt::Display;

use rusqlite::{Connection, Row};

use crate::{
    Error,
    auth::UserID,
    kind::Kind,
    name::{MAX_NAME_LENGTH, validate_name},
};

pub type CategoryId = i64;

/// The display name of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    /// Trim and validate a category name.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if `raw` is blank or longer than
    /// [MAX_NAME_LENGTH] characters.
    pub fn new(raw: &str) -> Result<Self, Error> {
        validate_name(raw, MAX_NAME_LENGTH, "Category name").map(Self)
    }

    /// Create a category name without validation.
    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A label for grouping income or expense transactions, e.g. "Salary" or
/// "Groceries".
///
/// The kind is fixed when the category is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub kind: Kind,
    pub user_id: UserID,
}

pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
            user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id)",
        (),
    )?;

    Ok(())
}

fn map_row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let name: String = row.get(1)?;
    let kind = row.get(2)?;
    let user_id = row.get(3)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&name),
        kind,
        user_id: UserID::new(user_id),
    })
}

/// Create a category owned by `user_id`.
pub fn create_category(
    name: CategoryName,
    kind: Kind,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, kind, user_id) VALUES (?1, ?2, ?3)",
        (name.as_ref(), kind, user_id.as_i64()),
    )?;

    Ok(Category {
        id: connection.last_insert_rowid(),
        name,
        kind,
        user_id,
    })
}

/// Get the category `id` if it belongs to `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the category does not exist or belongs to
/// another user.
pub fn get_category(
    id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT id, name, kind, user_id FROM category WHERE id = ?1 AND user_id = ?2",
        )?
        .query_one((id, user_id.as_i64()), map_row_to_category)
        .map_err(Error::from)
}

/// Get all of the categories owned by `user_id`, ordered by name.
pub fn get_categories(user_id: UserID, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, kind, user_id FROM category WHERE user_id = ?1 ORDER BY name, id",
        )?
        .query_map([user_id.as_i64()], map_row_to_category)?
        .map(|maybe_category| maybe_category.map_err(Error::from))
        .collect()
}

/// Rename the category `id` owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the category does not exist or belongs to
/// another user.
pub fn rename_category(
    id: CategoryId,
    user_id: UserID,
    name: &CategoryName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1 WHERE id = ?2 AND user_id = ?3",
        (name.as_ref(), id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the category `id` owned by `user_id`, returning the deleted
/// category.
///
/// Transactions in the category are kept and become uncategorised.
///
/// # Errors
///
/// Returns [Error::NotFound] if the category does not exist or belongs to
/// another user.
pub fn delete_category(
    id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2 \
            RETURNING id, name, kind, user_id",
        )?
        .query_one((id, user_id.as_i64()), map_row_to_category)
        .map_err(Error::from)
}
