//! Run schedules for every loan in a CSV file
//!
//! Usage: run_batch <loans.csv> [--output batch_summary.csv]

use anyhow::{Context, Result};
use clap::Parser;
use loan_amortization::loan::load_loans;
use loan_amortization::{LoanParameters, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Project amortization schedules for a batch of loans")]
struct Args {
    /// CSV file of loans
    loans: PathBuf,

    /// Summary output path
    #[arg(long, default_value = "batch_summary.csv")]
    output: PathBuf,
}

/// One summary row per loan
#[derive(Debug, Serialize)]
struct SummaryRow {
    #[serde(rename = "LoanId")]
    loan_id: String,
    #[serde(rename = "Periods")]
    periods: u32,
    #[serde(rename = "TotalInterest")]
    total_interest: f64,
    #[serde(rename = "PayoffYears")]
    payoff_years: f64,
    #[serde(rename = "FinalBalance")]
    final_balance: f64,
    #[serde(rename = "PaidOff")]
    paid_off: bool,
    #[serde(rename = "Warning")]
    warning: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading loans from {}...", args.loans.display());

    let loans = load_loans(&args.loans)
        .with_context(|| format!("Failed to load loans from {}", args.loans.display()))?;
    println!("Loaded {} loans in {:?}", loans.len(), start.elapsed());

    let params: Vec<LoanParameters> = loans.iter().map(|l| l.inputs.normalize()).collect();

    println!("Running projections...");
    let proj_start = Instant::now();
    let results = ScenarioRunner::new().run_batch(&params);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut unpaid = 0usize;
    for (loan, result) in loans.iter().zip(&results) {
        let summary = result.summary();
        if !summary.paid_off {
            unpaid += 1;
        }

        writer.serialize(SummaryRow {
            loan_id: loan.loan_id.clone(),
            periods: summary.payoff_periods,
            total_interest: summary.total_interest,
            payoff_years: summary.payoff_years,
            final_balance: summary.final_balance,
            paid_off: summary.paid_off,
            warning: result.warning.map(|w| w.message()).unwrap_or_default(),
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    let total_interest: f64 = results.iter().map(|r| r.summary().total_interest).sum();
    println!("\nBatch Summary:");
    println!("  Loans:          {}", results.len());
    println!("  Total Interest: ${:.2}", total_interest);
    println!("  Not paid off:   {}", unpaid);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
