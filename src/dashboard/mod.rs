//! Dashboard module
//!
//! Provides an overview page with the totals of the user's transactions over
//! a date range, the all-time balance of each wallet and the forms for adding
//! wallets, categories and transactions.

mod aggregation;
mod cards;
mod filters;
mod handlers;

pub use handlers::get_dashboard_page;
