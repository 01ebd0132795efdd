//! Core amortization engine for period-by-period balance projections

use log::{debug, warn};

use super::records::{round2, InsufficientPaymentWarning, PeriodRecord, ScheduleResult};
use crate::loan::LoanParameters;

/// Hard cap on schedule length
pub const MAX_PERIODS: u32 = 500;

/// Configuration for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of periods after which iteration stops regardless of balance
    pub max_periods: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_periods: MAX_PERIODS,
        }
    }
}

/// Main amortization engine
///
/// Holds no state between calls; every projection starts from the parameters.
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: EngineConfig,
}

impl AmortizationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the schedule for one set of parameters
    pub fn project(&self, params: &LoanParameters) -> ScheduleResult {
        let starting_balance = params.starting_balance();
        let rate = params.rate_per_period();
        let scheduled_payment = params.payment_per_period();

        let mut result = ScheduleResult::new(params.frequency, starting_balance);
        result.warning = check_payment_sufficiency(params);
        if let Some(warning) = &result.warning {
            warn!("{}", warning.message());
        }

        let mut balance = starting_balance;
        // Running total of emitted (rounded) interest, so the column always sums
        let mut cumulative_interest = 0.0;
        let mut period = 0u32;

        // Balances are carried unrounded; rounding happens only on the emitted record
        while balance > 0.0 && period < self.config.max_periods {
            period += 1;

            let interest = balance * rate;

            // Final period: pay only what zeroes the balance
            let final_period = scheduled_payment >= balance + interest;
            let payment = if final_period { balance + interest } else { scheduled_payment };
            let principal_paid = payment - interest;

            balance = if final_period { 0.0 } else { balance - principal_paid };

            let interest_out = round2(interest);
            cumulative_interest += interest_out;

            result.add_record(PeriodRecord {
                period,
                interest: interest_out,
                cumulative_interest: round2(cumulative_interest),
                balance: round2(balance.max(0.0)),
                payment: round2(payment),
                principal_paid: round2(principal_paid),
            });
        }

        if balance > 0.0 && period >= self.config.max_periods {
            debug!(
                "Schedule stopped at the {}-period cutoff with balance {:.2} outstanding",
                self.config.max_periods, balance
            );
        } else {
            debug!("Loan paid off after {} periods", period);
        }

        result
    }
}

/// Compute the schedule records with the default 500-period cutoff
pub fn compute_schedule(params: &LoanParameters) -> Vec<PeriodRecord> {
    AmortizationEngine::default().project(params).records
}

/// Warning when payment plus recurring prepayment falls short of period-1 interest
pub fn check_payment_sufficiency(params: &LoanParameters) -> Option<InsufficientPaymentWarning> {
    let balance = params.starting_balance();
    if balance <= 0.0 {
        return None;
    }

    let first_period_interest = balance * params.rate_per_period();
    let payment = params.payment_per_period();

    if payment < first_period_interest {
        Some(InsufficientPaymentWarning {
            payment,
            first_period_interest,
        })
    } else {
        None
    }
}
