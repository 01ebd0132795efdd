//! Schedule output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::loan::PaymentFrequency;

/// Round a monetary amount to cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A single period of the amortization schedule
///
/// Monetary fields are rounded to cents when the record is emitted; the
/// engine carries unrounded values between periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Period index (1-indexed)
    pub period: u32,

    /// Interest charged this period
    pub interest: f64,

    /// Running total of interest through this period
    pub cumulative_interest: f64,

    /// Balance after this period's payment, floored at zero
    pub balance: f64,

    /// Amount actually paid (after the final-period clamp)
    pub payment: f64,

    /// Portion of the payment that reduced principal
    pub principal_paid: f64,
}

/// Raised when the per-period payment does not cover first-period interest
///
/// Advisory only: the schedule is still computed and runs to the period cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsufficientPaymentWarning {
    /// Regular payment plus recurring prepayment, per period
    pub payment: f64,

    /// Interest accrued in period 1
    pub first_period_interest: f64,
}

impl InsufficientPaymentWarning {
    pub fn shortfall(&self) -> f64 {
        self.first_period_interest - self.payment
    }

    pub fn message(&self) -> String {
        format!(
            "Payment of {:.2} per period is {:.2} short of first-period interest of {:.2}; \
             the balance will not amortize",
            self.payment,
            self.shortfall(),
            self.first_period_interest
        )
    }
}

/// Complete result of one schedule computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Frequency the schedule was computed at
    pub frequency: PaymentFrequency,

    /// Balance at period 0, after the one-time prepayment
    pub starting_balance: f64,

    /// Period records in order
    pub records: Vec<PeriodRecord>,

    /// Set when payments cannot cover interest
    pub warning: Option<InsufficientPaymentWarning>,
}

impl ScheduleResult {
    pub fn new(frequency: PaymentFrequency, starting_balance: f64) -> Self {
        Self {
            frequency,
            starting_balance,
            records: Vec::new(),
            warning: None,
        }
    }

    pub fn add_record(&mut self, record: PeriodRecord) {
        self.records.push(record);
    }

    /// Derived totals for display
    pub fn summary(&self) -> ScheduleSummary {
        let payoff_periods = self.records.len() as u32;
        let total_interest = round2(self.records.iter().map(|r| r.interest).sum());
        let total_paid = round2(self.records.iter().map(|r| r.payment).sum());
        let final_balance = self
            .records
            .last()
            .map(|r| r.balance)
            .unwrap_or_else(|| round2(self.starting_balance));
        let payoff_years =
            (payoff_periods as f64 / self.frequency.payments_per_year() as f64 * 10.0).round() / 10.0;

        ScheduleSummary {
            frequency: self.frequency,
            payoff_periods,
            total_interest,
            total_paid,
            payoff_years,
            final_balance,
            paid_off: final_balance <= 0.0,
            insufficient_payment: self.warning.is_some(),
        }
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub frequency: PaymentFrequency,
    pub payoff_periods: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    /// Payoff time in years, one decimal place
    pub payoff_years: f64,
    pub final_balance: f64,
    /// False when the period cutoff was reached with a balance outstanding
    pub paid_off: bool,
    pub insufficient_payment: bool,
}

impl ScheduleSummary {
    /// Human-readable payoff time, e.g. "11.6 years (139 monthly payments)"
    pub fn payoff_duration(&self) -> String {
        let unit = if self.payoff_periods == 1 { "payment" } else { "payments" };
        format!(
            "{:.1} years ({} {} {})",
            self.payoff_years, self.payoff_periods, self.frequency, unit
        )
    }

    /// Date of the last payment when the first period starts after `start`
    pub fn payoff_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        if self.payoff_periods == 0 {
            return Some(start);
        }
        self.frequency.period_date(start, self.payoff_periods)
    }
}
