//! Loan Amortization - projection engine for loans with prepayment strategies
//!
//! This library provides:
//! - Period-by-period amortization schedules with a 500-period safety cutoff
//! - One-time and recurring prepayments at weekly to yearly frequencies
//! - EMI sizing from a target tenure
//! - Strategy comparison against a no-prepayment baseline
//! - CSV export and JSON persistence of collected inputs

pub mod error;
pub mod loan;
pub mod schedule;
pub mod scenario;

// Re-export commonly used types
pub use error::{LoanError, LoanResult};
pub use loan::{LoanInputs, LoanParameters, PaymentFrequency};
pub use schedule::{
    AmortizationEngine, InsufficientPaymentWarning, PeriodRecord, ScheduleResult, ScheduleSummary,
    compute_emi, compute_schedule,
};
pub use scenario::{ScenarioRunner, PrepaymentStrategy};
