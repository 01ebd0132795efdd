//! Loan input data structures, frequency normalization and input persistence

mod data;
pub mod loader;

pub use data::{LoanInputs, LoanParameters, PaymentFrequency};
pub use loader::{load_loans, load_loans_from_reader, LoanRecord};
