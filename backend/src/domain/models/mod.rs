pub mod category;
pub mod expense;

pub use category::CategoryRecord;
pub use expense::{ExpenseRecord, ExpenseWithCategory};
