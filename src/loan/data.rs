//! Loan data structures: collected inputs and normalized engine parameters

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{LoanError, LoanResult};
use crate::schedule::compute_emi;

/// How often a regular payment is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    /// 52 payments per year
    Weekly,
    /// 26 payments per year
    Biweekly,
    /// 12 payments per year
    Monthly,
    /// 2 payments per year
    Semiannual,
    /// 1 payment per year
    Yearly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 5] = [
        PaymentFrequency::Weekly,
        PaymentFrequency::Biweekly,
        PaymentFrequency::Monthly,
        PaymentFrequency::Semiannual,
        PaymentFrequency::Yearly,
    ];

    /// Number of payment periods in a year
    pub fn payments_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Semiannual => 2,
            PaymentFrequency::Yearly => 1,
        }
    }

    /// Look up a frequency from its payments-per-year count
    pub fn from_payments_per_year(count: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.payments_per_year() == count)
    }

    /// Factor converting a monthly-denominated amount into a per-period amount
    pub fn monthly_to_period_factor(&self) -> f64 {
        12.0 / self.payments_per_year() as f64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Semiannual => "semiannual",
            PaymentFrequency::Yearly => "yearly",
        }
    }

    /// Date on which the given payment period falls, counting from `start`
    ///
    /// Weekly schedules step by 7 days, biweekly by 14; the others use
    /// calendar months so month-end dates clamp the way a lender's calendar does.
    pub fn period_date(&self, start: NaiveDate, period: u32) -> Option<NaiveDate> {
        match self {
            PaymentFrequency::Weekly => start.checked_add_days(Days::new(7 * period as u64)),
            PaymentFrequency::Biweekly => start.checked_add_days(Days::new(14 * period as u64)),
            PaymentFrequency::Monthly => start.checked_add_months(Months::new(period)),
            PaymentFrequency::Semiannual => start.checked_add_months(Months::new(6 * period)),
            PaymentFrequency::Yearly => start.checked_add_months(Months::new(12 * period)),
        }
    }
}

impl Default for PaymentFrequency {
    fn default() -> Self {
        PaymentFrequency::Monthly
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(count) = trimmed.parse::<u32>() {
            return Self::from_payments_per_year(count)
                .ok_or_else(|| LoanError::UnknownFrequency(trimmed.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "weekly" => Ok(PaymentFrequency::Weekly),
            "biweekly" | "bi-weekly" | "fortnightly" => Ok(PaymentFrequency::Biweekly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            "semiannual" | "semi-annual" | "semiannually" => Ok(PaymentFrequency::Semiannual),
            "yearly" | "annual" | "annually" => Ok(PaymentFrequency::Yearly),
            _ => Err(LoanError::UnknownFrequency(trimmed.to_string())),
        }
    }
}

/// Normalized parameters consumed by the amortization engine
///
/// All payment amounts are per period at `frequency`. Build these with
/// [`LoanInputs::normalize`] rather than by hand unless the amounts are
/// already per period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Outstanding balance before any one-time payment
    pub remaining_principal: f64,

    /// Lump sum applied at period 0
    pub one_time_prepayment: f64,

    /// Installment paid every period
    pub regular_payment: f64,

    /// Annual interest rate in percent (6.0 = 6%)
    pub annual_interest_rate: f64,

    /// Extra amount added to every installment
    pub recurring_prepayment: f64,

    /// Payment frequency
    pub frequency: PaymentFrequency,
}

impl LoanParameters {
    pub fn payments_per_year(&self) -> u32 {
        self.frequency.payments_per_year()
    }

    /// Balance at period 0, after the one-time prepayment (never negative)
    pub fn starting_balance(&self) -> f64 {
        (self.remaining_principal - self.one_time_prepayment).max(0.0)
    }

    /// Interest rate applied each period, as a decimal
    pub fn rate_per_period(&self) -> f64 {
        self.annual_interest_rate / 100.0 / self.payments_per_year() as f64
    }

    /// Total amount paid each period before the final-period clamp
    pub fn payment_per_period(&self) -> f64 {
        self.regular_payment + self.recurring_prepayment
    }
}

/// Loan inputs as collected from the user
///
/// `regular_payment` and `recurring_prepayment` are both denominated monthly,
/// whatever the selected frequency. [`LoanInputs::normalize`] converts both to
/// per-period amounts in one step, so the engine never sees a mix of units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    pub remaining_principal: f64,

    #[serde(default)]
    pub one_time_prepayment: f64,

    /// Monthly installment
    pub regular_payment: f64,

    /// Annual interest rate in percent
    pub annual_interest_rate: f64,

    /// Monthly recurring prepayment
    #[serde(default)]
    pub recurring_prepayment: f64,

    #[serde(default)]
    pub frequency: PaymentFrequency,
}

impl LoanInputs {
    pub fn new(
        remaining_principal: f64,
        one_time_prepayment: f64,
        regular_payment: f64,
        annual_interest_rate: f64,
        recurring_prepayment: f64,
        frequency: PaymentFrequency,
    ) -> Self {
        Self {
            remaining_principal,
            one_time_prepayment,
            regular_payment,
            annual_interest_rate,
            recurring_prepayment,
            frequency,
        }
    }

    /// Convert monthly-denominated amounts to per-period engine parameters
    pub fn normalize(&self) -> LoanParameters {
        let factor = self.frequency.monthly_to_period_factor();
        LoanParameters {
            remaining_principal: self.remaining_principal,
            one_time_prepayment: self.one_time_prepayment,
            regular_payment: self.regular_payment * factor,
            annual_interest_rate: self.annual_interest_rate,
            recurring_prepayment: self.recurring_prepayment * factor,
            frequency: self.frequency,
        }
    }

    /// Check amounts are finite and non-negative and the lump sum fits the principal
    pub fn validate(&self) -> LoanResult<()> {
        let amounts = [
            ("remaining_principal", self.remaining_principal),
            ("one_time_prepayment", self.one_time_prepayment),
            ("regular_payment", self.regular_payment),
            ("annual_interest_rate", self.annual_interest_rate),
            ("recurring_prepayment", self.recurring_prepayment),
        ];

        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(LoanError::invalid(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(LoanError::invalid(field, format!("must be non-negative, got {}", value)));
            }
        }

        if self.one_time_prepayment > self.remaining_principal {
            return Err(LoanError::invalid(
                "one_time_prepayment",
                format!(
                    "{:.2} exceeds remaining principal {:.2}",
                    self.one_time_prepayment, self.remaining_principal
                ),
            ));
        }

        Ok(())
    }

    /// Copy with the one-time prepayment capped at the remaining principal
    pub fn clamped(&self) -> Self {
        Self {
            one_time_prepayment: self.one_time_prepayment.min(self.remaining_principal).max(0.0),
            ..self.clone()
        }
    }

    /// Copy whose monthly installment pays off the net principal in `years`
    pub fn with_tenure(&self, years: u32) -> Self {
        let net_principal = (self.remaining_principal - self.one_time_prepayment).max(0.0);
        Self {
            regular_payment: compute_emi(net_principal, self.annual_interest_rate, years),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_inputs() -> LoanInputs {
        LoanInputs::new(100_000.0, 0.0, 1_000.0, 6.0, 200.0, PaymentFrequency::Monthly)
    }

    #[test]
    fn test_payments_per_year() {
        let counts: Vec<u32> = PaymentFrequency::ALL.iter().map(|f| f.payments_per_year()).collect();
        assert_eq!(counts, vec![52, 26, 12, 2, 1]);
        assert_eq!(PaymentFrequency::from_payments_per_year(26), Some(PaymentFrequency::Biweekly));
        assert_eq!(PaymentFrequency::from_payments_per_year(4), None);
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("Weekly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Weekly);
        assert_eq!("bi-weekly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Biweekly);
        assert_eq!("12".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Monthly);
        assert_eq!(" annual ".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Yearly);
        assert!(matches!(
            "quarterly".parse::<PaymentFrequency>(),
            Err(LoanError::UnknownFrequency(_))
        ));
        assert!("4".parse::<PaymentFrequency>().is_err());
    }

    #[test]
    fn test_normalize_scales_both_amounts() {
        let mut inputs = sample_inputs();
        inputs.frequency = PaymentFrequency::Weekly;
        let params = inputs.normalize();

        assert_abs_diff_eq!(params.regular_payment, 1_000.0 * 12.0 / 52.0, epsilon = 1e-9);
        assert_abs_diff_eq!(params.recurring_prepayment, 200.0 * 12.0 / 52.0, epsilon = 1e-9);

        // Annual outlay is unchanged by the frequency switch
        let annual = params.payment_per_period() * 52.0;
        assert_abs_diff_eq!(annual, 1_200.0 * 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_monthly_is_identity() {
        let params = sample_inputs().normalize();
        assert_eq!(params.regular_payment, 1_000.0);
        assert_eq!(params.recurring_prepayment, 200.0);
        assert_abs_diff_eq!(params.rate_per_period(), 0.005, epsilon = 1e-12);
    }

    #[test]
    fn test_starting_balance_never_negative() {
        let mut inputs = sample_inputs();
        inputs.one_time_prepayment = 150_000.0;
        assert_eq!(inputs.normalize().starting_balance(), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(sample_inputs().validate().is_ok());

        let mut negative = sample_inputs();
        negative.regular_payment = -1.0;
        assert!(matches!(
            negative.validate(),
            Err(LoanError::InvalidInput { ref field, .. }) if field == "regular_payment"
        ));

        let mut nan = sample_inputs();
        nan.annual_interest_rate = f64::NAN;
        assert!(nan.validate().is_err());

        let mut oversized = sample_inputs();
        oversized.one_time_prepayment = 100_001.0;
        assert!(oversized.validate().is_err());
        assert!(oversized.clamped().validate().is_ok());
        assert_eq!(oversized.clamped().one_time_prepayment, 100_000.0);
    }

    #[test]
    fn test_with_tenure_uses_net_principal() {
        let mut inputs = sample_inputs();
        inputs.one_time_prepayment = 40_000.0;
        let sized = inputs.with_tenure(10);
        assert_eq!(sized.regular_payment, compute_emi(60_000.0, 6.0, 10));
    }

    #[test]
    fn test_period_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            PaymentFrequency::Monthly.period_date(start, 1),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            PaymentFrequency::Biweekly.period_date(start, 2),
            NaiveDate::from_ymd_opt(2024, 2, 28)
        );
        assert_eq!(
            PaymentFrequency::Yearly.period_date(start, 3),
            NaiveDate::from_ymd_opt(2027, 1, 31)
        );
    }

    #[test]
    fn test_inputs_deserialize_with_defaults() {
        let json = r#"{"remaining_principal": 5000, "regular_payment": 250, "annual_interest_rate": 4.5}"#;
        let inputs: LoanInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.one_time_prepayment, 0.0);
        assert_eq!(inputs.recurring_prepayment, 0.0);
        assert_eq!(inputs.frequency, PaymentFrequency::Monthly);
    }
}
