//! Wallets hold a user's transactions, e.g. "Cash" or "Bank".

mod core;
mod create_endpoint;
mod delete_endpoint;
mod detail_page;
mod edit_endpoint;
mod edit_page;

pub use core::{
    Wallet, WalletId, WalletName, create_wallet, create_wallet_table, delete_wallet, get_wallet,
    get_wallets, rename_wallet,
};
pub use create_endpoint::create_wallet_endpoint;
pub use delete_endpoint::delete_wallet_endpoint;
pub use detail_page::get_wallet_page;
pub use edit_endpoint::edit_wallet_endpoint;
pub use edit_page::get_edit_wallet_page;
