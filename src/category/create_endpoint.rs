//! Defines the endpoint for creating a new category.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::Response,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::{Alert, redirect_with_alert},
    auth::CurrentUser,
    category::{Category, CategoryName, create_category},
    db::lock_connection,
    endpoints,
    kind::Kind,
};

/// The state needed to create a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<CreateCategoryState> for Key {
    fn from_ref(state: &CreateCategoryState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for creating a category.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
    /// Either "income" or "expense".
    pub kind: String,
}

/// A route handler for creating a new category, redirects to the dashboard.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    Form(form): Form<CategoryForm>,
) -> Response {
    match add_category(&form, current_user, &state.db_connection) {
        Ok(category) => redirect_with_alert(
            jar,
            endpoints::DASHBOARD,
            Alert::success(format!(
                "Created {} category \"{}\".",
                category.kind, category.name
            )),
        ),
        Err(error) => {
            tracing::debug!("Could not create category from {form:?}: {error}");
            error.into_alert_redirect(jar, endpoints::DASHBOARD)
        }
    }
}

fn add_category(
    form: &CategoryForm,
    current_user: CurrentUser,
    db_connection: &Mutex<Connection>,
) -> Result<Category, Error> {
    let name = CategoryName::new(&form.name)?;
    let kind: Kind = form.kind.parse()?;
    let connection = lock_connection(db_connection)?;

    create_category(name, kind, current_user.id, &connection)
}
