use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState,
    alert::{Alert, take_flash},
    auth::CurrentUser,
    category::{Category, get_category},
    db::lock_connection,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, link, name_input},
    navigation::NavBar,
    record_id::RecordId,
};

/// The state needed for the edit category page.
#[derive(Debug, Clone)]
pub struct EditCategoryPageState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<EditCategoryPageState> for Key {
    fn from_ref(state: &EditCategoryPageState) -> Self {
        state.cookie_key.clone()
    }
}

pub(super) fn edit_category_view(
    category: &Category,
    name: &str,
    error_message: Option<&str>,
    alert: Option<&Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_CATEGORY).into_html();
    let edit_url = format_endpoint(endpoints::EDIT_CATEGORY, category.id);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-xl font-bold" { "Rename Category" }

            form method="post" action=(edit_url) class="w-full space-y-4 md:space-y-6"
            {
                (name_input("name", "Category name", name, error_message))

                // The kind is fixed once the category has been created.
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Type: " (category.kind.label())
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
            }

            p class="mt-4 text-sm" { (link(endpoints::DASHBOARD, "Back to dashboard")) }
        }
    };

    base("Edit Category", alert, &content)
}

/// Renders the page for renaming a category.
pub async fn get_edit_category_page(
    State(state): State<EditCategoryPageState>,
    current_user: CurrentUser,
    jar: PrivateCookieJar,
    RecordId(category_id): RecordId,
) -> Response {
    let category = lock_connection(&state.db_connection)
        .and_then(|connection| get_category(category_id, current_user.id, &connection));

    let category = match category {
        Ok(category) => category,
        Err(error) => {
            tracing::debug!("Could not get category {category_id} for editing: {error}");
            return error.into_alert_redirect(jar, endpoints::DASHBOARD);
        }
    };

    let (jar, alert) = take_flash(jar);

    (
        jar,
        edit_category_view(&category, category.name.as_ref(), None, alert.as_ref()),
    )
        .into_response()
}
