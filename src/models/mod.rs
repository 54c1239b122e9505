mod category;
mod expense;
mod user;

pub use category::{Category, DEFAULT_CATEGORIES};
pub use expense::{format_stored_amount, is_iso_date, Expense, ExpenseFields, ExpenseInput};
pub use user::{Credential, PasswordHash};
