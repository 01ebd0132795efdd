//! Scenario runner for comparing prepayment strategies
//!
//! Runs a loan under several prepayment strategies and measures each one
//! against the same loan with no prepayments at all.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::loan::{LoanInputs, LoanParameters};
use crate::schedule::{AmortizationEngine, EngineConfig, ScheduleResult, ScheduleSummary, round2};

/// A prepayment policy applied on top of a loan's regular payment
///
/// Amounts are monthly-denominated, like [`LoanInputs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentStrategy {
    pub name: String,
    #[serde(default)]
    pub one_time_prepayment: f64,
    #[serde(default)]
    pub recurring_prepayment: f64,
}

impl PrepaymentStrategy {
    pub fn new(name: impl Into<String>, one_time_prepayment: f64, recurring_prepayment: f64) -> Self {
        Self {
            name: name.into(),
            one_time_prepayment,
            recurring_prepayment,
        }
    }

    /// Inputs with this strategy's prepayments replacing the loan's own
    pub fn apply(&self, inputs: &LoanInputs) -> LoanInputs {
        LoanInputs {
            one_time_prepayment: self.one_time_prepayment,
            recurring_prepayment: self.recurring_prepayment,
            ..inputs.clone()
        }
        .clamped()
    }
}

/// Outcome of one strategy relative to the no-prepayment baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub strategy: PrepaymentStrategy,
    pub summary: ScheduleSummary,
    /// Baseline total interest minus this strategy's total interest
    pub interest_saved: f64,
    /// Baseline payoff periods minus this strategy's payoff periods
    pub periods_saved: i64,
}

/// Result of comparing strategies for one loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub baseline: ScheduleSummary,
    pub strategies: Vec<StrategyComparison>,
}

impl ComparisonReport {
    /// Strategy with the largest interest saving, if any were run
    pub fn best(&self) -> Option<&StrategyComparison> {
        self.strategies
            .iter()
            .max_by(|a, b| a.interest_saved.total_cmp(&b.interest_saved))
    }
}

/// Runner for batches and strategy comparisons
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: AmortizationEngine,
}

impl ScenarioRunner {
    /// Create runner with the default 500-period cutoff
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a specific engine configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: AmortizationEngine::new(config),
        }
    }

    /// Run a single schedule
    pub fn run(&self, params: &LoanParameters) -> ScheduleResult {
        self.engine.project(params)
    }

    /// Run schedules for many loans in parallel, preserving input order
    pub fn run_batch(&self, loans: &[LoanParameters]) -> Vec<ScheduleResult> {
        loans.par_iter().map(|params| self.engine.project(params)).collect()
    }

    /// Compare strategies against the same loan with no prepayments
    pub fn compare(&self, inputs: &LoanInputs, strategies: &[PrepaymentStrategy]) -> ComparisonReport {
        let baseline_inputs = LoanInputs {
            one_time_prepayment: 0.0,
            recurring_prepayment: 0.0,
            ..inputs.clone()
        };
        let baseline = self.engine.project(&baseline_inputs.normalize()).summary();

        let comparisons: Vec<StrategyComparison> = strategies
            .par_iter()
            .map(|strategy| {
                let summary = self.engine.project(&strategy.apply(inputs).normalize()).summary();
                StrategyComparison {
                    strategy: strategy.clone(),
                    summary,
                    interest_saved: round2(baseline.total_interest - summary.total_interest),
                    periods_saved: baseline.payoff_periods as i64 - summary.payoff_periods as i64,
                }
            })
            .collect();

        info!(
            "Compared {} strategies against a {}-period baseline",
            comparisons.len(),
            baseline.payoff_periods
        );

        ComparisonReport {
            baseline,
            strategies: comparisons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::PaymentFrequency;

    fn test_inputs() -> LoanInputs {
        LoanInputs::new(100_000.0, 0.0, 1_000.0, 6.0, 0.0, PaymentFrequency::Monthly)
    }

    #[test]
    fn test_compare_strategies() {
        let runner = ScenarioRunner::new();
        let strategies = vec![
            PrepaymentStrategy::new("none", 0.0, 0.0),
            PrepaymentStrategy::new("lump", 20_000.0, 0.0),
            PrepaymentStrategy::new("recurring", 0.0, 300.0),
        ];

        let report = runner.compare(&test_inputs(), &strategies);
        assert_eq!(report.baseline.payoff_periods, 139);
        assert_eq!(report.strategies.len(), 3);

        assert_eq!(report.strategies[0].interest_saved, 0.0);
        assert_eq!(report.strategies[0].periods_saved, 0);
        assert!(report.strategies[1].interest_saved > 0.0);
        assert!(report.strategies[2].periods_saved > 0);
        assert!(report.best().unwrap().interest_saved >= report.strategies[1].interest_saved);
    }

    #[test]
    fn test_baseline_ignores_loan_prepayments() {
        let runner = ScenarioRunner::new();
        let mut inputs = test_inputs();
        inputs.recurring_prepayment = 500.0;

        let report = runner.compare(&inputs, &[]);
        assert_eq!(report.baseline.payoff_periods, 139);
        assert!(report.best().is_none());
    }

    #[test]
    fn test_strategy_lump_sum_clamped() {
        let strategy = PrepaymentStrategy::new("all", 250_000.0, 0.0);
        let applied = strategy.apply(&test_inputs());
        assert_eq!(applied.one_time_prepayment, 100_000.0);

        let report = ScenarioRunner::new().compare(&test_inputs(), &[strategy]);
        assert_eq!(report.strategies[0].summary.payoff_periods, 0);
        assert_eq!(report.strategies[0].periods_saved, 139);
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let loans: Vec<LoanParameters> = [50_000.0, 100_000.0, 150_000.0]
            .iter()
            .map(|&principal| {
                LoanInputs::new(principal, 0.0, 1_500.0, 5.0, 0.0, PaymentFrequency::Monthly).normalize()
            })
            .collect();

        let results = runner.run_batch(&loans);
        assert_eq!(results.len(), 3);
        assert!(results[0].records.len() < results[1].records.len());
        assert!(results[1].records.len() < results[2].records.len());
    }
}
