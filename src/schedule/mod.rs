//! Amortization schedule engine, output records, EMI sizing and export

mod engine;
mod records;
mod emi;
pub mod export;

pub use engine::{AmortizationEngine, EngineConfig, compute_schedule, check_payment_sufficiency, MAX_PERIODS};
pub use records::{PeriodRecord, ScheduleResult, ScheduleSummary, InsufficientPaymentWarning, round2};
pub use emi::compute_emi;
pub use export::{write_csv, export_csv};
