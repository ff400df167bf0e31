use rusqlite::Connection;

use crate::{
    AppState,
    auth::{PasswordHash, UserID, Username, create_user},
};

/// An app state backed by an initialised in-memory database.
#[track_caller]
pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not create in-memory SQLite database");

    AppState::new(connection, "foobar", "Etc/UTC").expect("Could not create app state")
}

#[track_caller]
pub(crate) fn must_create_user(username: &str, connection: &Connection) -> UserID {
    create_user(
        Username::new_unchecked(username),
        PasswordHash::new_unchecked("hunter2"),
        connection,
    )
    .expect("Could not create test user")
    .id
}
