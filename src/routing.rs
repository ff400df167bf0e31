//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, get_log_in_page, get_log_out, get_register_page, post_log_in, register_user,
    },
    category::{
        create_category_endpoint, delete_category_endpoint, edit_category_endpoint,
        get_edit_category_page,
    },
    dashboard::get_dashboard_page,
    endpoints,
    landing::get_landing_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page,
    },
    wallet::{
        create_wallet_endpoint, delete_wallet_endpoint, edit_wallet_endpoint,
        get_edit_wallet_page, get_wallet_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_landing_page))
        .route(endpoints::LOG_IN, get(get_log_in_page).post(post_log_in))
        .route(endpoints::REGISTER, get(get_register_page).post(register_user));

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD, get(get_dashboard_page))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::ADD_WALLET, post(create_wallet_endpoint))
        .route(endpoints::WALLET, get(get_wallet_page))
        .route(
            endpoints::EDIT_WALLET,
            get(get_edit_wallet_page).post(edit_wallet_endpoint),
        )
        .route(endpoints::DELETE_WALLET, post(delete_wallet_endpoint))
        .route(endpoints::ADD_CATEGORY, post(create_category_endpoint))
        .route(
            endpoints::EDIT_CATEGORY,
            get(get_edit_category_page).post(edit_category_endpoint),
        )
        .route(endpoints::DELETE_CATEGORY, post(delete_category_endpoint))
        .route(endpoints::ADD_TRANSACTION, post(create_transaction_endpoint))
        .route(
            endpoints::EDIT_TRANSACTION,
            get(get_edit_transaction_page).post(edit_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            post(delete_transaction_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
