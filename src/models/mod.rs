//! Core data models
//!
//! Categories, budget allocations, transactions and the calendar month they
//! are grouped by.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use budget::Budgets;
pub use category::{Catalog, Category, ExpenseGroup, PAY_YOURSELF_FIRST};
pub use ids::{CategoryId, TransactionId};
pub use money::Money;
pub use month::MonthId;
pub use transaction::{
    PaymentMethod, Transaction, TransactionDraft, TransactionType, TransactionValidationError,
};
