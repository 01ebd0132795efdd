//! Equated monthly installment (EMI) calculation
//!
//! Used to size a regular payment from a target payoff tenure. Independent of
//! the iterative engine and always compounds monthly.

use super::records::round2;

/// Fixed monthly payment that amortizes `principal` over `years`
///
/// # Arguments
/// * `principal` - Amount borrowed
/// * `annual_interest_rate` - Annual rate in percent (9.0 = 9%)
/// * `years` - Tenure in whole years
///
/// # Returns
/// Monthly installment rounded to cents, or 0 for a zero tenure
pub fn compute_emi(principal: f64, annual_interest_rate: f64, years: u32) -> f64 {
    let monthly_rate = annual_interest_rate / 100.0 / 12.0;
    let n = years * 12;

    if n == 0 {
        return 0.0;
    }

    if monthly_rate == 0.0 {
        return round2(principal / n as f64);
    }

    let growth = (1.0 + monthly_rate).powi(n as i32);
    round2(principal * monthly_rate * growth / (growth - 1.0))
}
