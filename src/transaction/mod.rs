//! Transactions record money moving in or out of a wallet.
//!
//! This module contains:
//! - The `Transaction` model and the database functions for managing transactions
//! - The form used to add and edit transactions, and its validation
//! - The transactions table shown on the dashboard and wallet pages
//! - The route handlers for adding, editing and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod query;
mod view;

pub use core::{
    NewTransaction, Transaction, TransactionId, create_transaction, create_transaction_table,
    delete_transaction, get_transaction, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use form::{TransactionForm, parse_date, transaction_form_fields};
pub use query::{Totals, TransactionQuery, TransactionRow, query_transactions};
pub use view::{totals_summary, transactions_table};
