mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;

pub use core::{
    Category, CategoryId, CategoryName, create_category, create_category_table, delete_category,
    get_categories, get_category, rename_category,
};
pub use create_endpoint::create_category_endpoint;
pub use delete_endpoint::delete_category_endpoint;
pub use edit_endpoint::edit_category_endpoint;
pub use edit_page::get_edit_category_page;
