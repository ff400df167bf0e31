//! User accounts, sessions and the route guard.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod redirect;
mod register;
mod token;
mod user;

pub(crate) use cookie::{
    COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, get_token_from_cookies, invalidate_auth_cookie,
    set_auth_cookie,
};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{AuthState, CurrentUser, auth_guard};
pub use password::{PasswordHash, ValidatedPassword};
pub(crate) use redirect::normalize_redirect_url;
pub use register::{get_register_page, register_user};
pub(crate) use token::Token;
pub use user::{
    MAX_USERNAME_LENGTH, User, UserID, Username, create_user, create_user_table,
    get_user_by_id, get_user_by_username, update_password,
};
