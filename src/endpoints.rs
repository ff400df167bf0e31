//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/wallet/{wallet_id}', use [format_endpoint].

/// The root route which shows the landing page or redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page summarising a user's wallets, categories and transactions.
pub const DASHBOARD: &str = "/dashboard";
/// The route for the registration page and form.
pub const REGISTER: &str = "/register";
/// The route for the log-in page and form.
pub const LOG_IN: &str = "/login";
/// The route that ends the current session.
pub const LOG_OUT: &str = "/logout";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for creating a wallet.
pub const ADD_WALLET: &str = "/add_wallet";
/// The route for renaming a wallet.
pub const EDIT_WALLET: &str = "/edit_wallet/{wallet_id}";
/// The route for deleting a wallet and its transactions.
pub const DELETE_WALLET: &str = "/delete_wallet/{wallet_id}";
/// The page listing a single wallet's transactions.
pub const WALLET: &str = "/wallet/{wallet_id}";

/// The route for creating a category.
pub const ADD_CATEGORY: &str = "/add_category";
/// The route for renaming a category.
pub const EDIT_CATEGORY: &str = "/edit_category/{category_id}";
/// The route for deleting a category.
pub const DELETE_CATEGORY: &str = "/delete_category/{category_id}";

/// The route for recording a transaction.
pub const ADD_TRANSACTION: &str = "/add_transaction";
/// The route for editing a transaction.
pub const EDIT_TRANSACTION: &str = "/edit_transaction/{transaction_id}";
/// The route for deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/delete_transaction/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Only the first parameter is replaced. Paths without a parameter are
/// returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.char_indices() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
