//! HTTP handlers

mod auth;
mod categories;
mod expenses;
mod health;
mod reports;
mod users;

pub use auth::{login, register};
pub use categories::{create_category, delete_category, list_categories, update_category};
pub use expenses::{create_expense, delete_expense, get_expense, list_expenses, update_expense};
pub use health::{health, ready, root};
pub use reports::summary;
pub use users::{get_me, update_me};
