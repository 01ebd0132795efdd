//! AWS Lambda handler for amortization schedules
//!
//! Accepts collected loan inputs as JSON and returns the schedule, its summary,
//! and optionally a comparison of prepayment strategies.

use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use loan_amortization::scenario::ComparisonReport;
use loan_amortization::{
    InsufficientPaymentWarning, LoanInputs, PeriodRecord, PrepaymentStrategy, ScenarioRunner, ScheduleSummary,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Input for one schedule request
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    #[serde(flatten)]
    pub inputs: LoanInputs,

    /// Size the monthly payment from a payoff tenure instead of using `regular_payment`
    #[serde(default)]
    pub tenure_years: Option<u32>,

    /// Strategies to compare against the no-prepayment baseline
    #[serde(default)]
    pub strategies: Vec<PrepaymentStrategy>,

    /// Return the period records (default: true)
    #[serde(default = "default_include_schedule")]
    pub include_schedule: bool,

    /// Date of period 0, for the projected payoff date
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

fn default_include_schedule() -> bool { true }

/// Output for one schedule request
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub regular_payment: f64,
    pub summary: ScheduleSummary,
    pub payoff_duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<InsufficientPaymentWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonReport>,
    pub schedule: Vec<PeriodRecord>,
    pub execution_time_ms: u64,
}

fn handle(request: ScheduleRequest) -> Result<ScheduleResponse, Error> {
    let start = Instant::now();

    let mut inputs = request.inputs.clamped();
    if let Some(years) = request.tenure_years {
        inputs = inputs.with_tenure(years);
    }
    inputs.validate()?;

    let runner = ScenarioRunner::new();
    let result = runner.run(&inputs.normalize());
    let summary = result.summary();

    let comparison = if request.strategies.is_empty() {
        None
    } else {
        Some(runner.compare(&inputs, &request.strategies))
    };

    Ok(ScheduleResponse {
        regular_payment: inputs.regular_payment,
        summary,
        payoff_duration: summary.payoff_duration(),
        payoff_date: request.start_date.and_then(|d| summary.payoff_date(d)),
        warning: result.warning,
        warning_message: result.warning.map(|w| w.message()),
        comparison,
        schedule: if request.include_schedule { result.records } else { Vec::new() },
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

async fn function_handler(event: LambdaEvent<ScheduleRequest>) -> Result<ScheduleResponse, Error> {
    let LambdaEvent { payload, context } = event;
    info!("Schedule request {}", context.request_id);
    handle(payload)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(function_handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_request_json() {
        let json = r#"{
            "remaining_principal": 100000,
            "regular_payment": 1000,
            "annual_interest_rate": 6,
            "strategies": [{"name": "extra", "recurring_prepayment": 250}],
            "start_date": "2025-01-01"
        }"#;
        let request: ScheduleRequest = serde_json::from_str(json).unwrap();
        let response = handle(request).unwrap();

        assert_eq!(response.summary.payoff_periods, 139);
        assert_eq!(response.schedule.len(), 139);
        assert!(response.warning.is_none());
        assert_eq!(response.payoff_date, NaiveDate::from_ymd_opt(2036, 8, 1));

        let comparison = response.comparison.unwrap();
        assert!(comparison.strategies[0].interest_saved > 0.0);
    }

    #[test]
    fn test_handle_tenure_request() {
        let json = r#"{
            "remaining_principal": 1200000,
            "regular_payment": 0,
            "annual_interest_rate": 9,
            "tenure_years": 20,
            "include_schedule": false
        }"#;
        let request: ScheduleRequest = serde_json::from_str(json).unwrap();
        let response = handle(request).unwrap();

        assert!((response.regular_payment - 10_796.71).abs() < 0.01);
        assert!(response.schedule.is_empty());
        assert!(response.summary.payoff_periods >= 239 && response.summary.payoff_periods <= 241);
    }
}
