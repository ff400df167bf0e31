//! Defines the endpoint for renaming a category.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::{Alert, redirect_with_alert},
    auth::CurrentUser,
    category::{CategoryName, edit_page::edit_category_view, get_category, rename_category},
    db::lock_connection,
    endpoints,
    record_id::RecordId,
};

/// The state needed to rename a category.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<EditCategoryState> for Key {
    fn from_ref(state: &EditCategoryState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for renaming a category.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenameCategoryForm {
    pub name: String,
}

/// A route handler for renaming a category.
///
/// Redirects to the dashboard on success. An invalid name re-renders the
/// edit form with the error, and a category the user does not own redirects
/// to the dashboard with an error alert.
pub async fn edit_category_endpoint(
    State(state): State<EditCategoryState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(category_id): RecordId,
    Form(form): Form<RenameCategoryForm>,
) -> Response {
    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    let category = match get_category(category_id, current_user.id, &connection) {
        Ok(category) => category,
        Err(error) => {
            tracing::debug!("Could not get category {category_id} for renaming: {error}");
            return error.into_alert_redirect(jar, endpoints::DASHBOARD);
        }
    };

    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(Error::InvalidInput(message)) => {
            return (
                StatusCode::BAD_REQUEST,
                edit_category_view(&category, &form.name, Some(&message), None),
            )
                .into_response();
        }
        Err(error) => return error.into_response(),
    };

    match rename_category(category_id, current_user.id, &name, &connection) {
        Ok(()) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success(format!("Renamed category to \"{name}\".")),
        ),
        Err(error) => {
            tracing::error!("Could not rename category {category_id}: {error}");
            error.into_alert_redirect(jar, endpoints::DASHBOARD)
        }
    }
}
