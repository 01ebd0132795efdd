//! Loan Amortization CLI
//!
//! Command-line interface for computing a single amortization schedule

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use loan_amortization::{
    schedule::export_csv, AmortizationEngine, LoanInputs, PaymentFrequency,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "amortize", version, about = "Project a loan amortization schedule with prepayments")]
struct Cli {
    /// Load collected inputs from a JSON file (flags override loaded values)
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Outstanding principal
    #[arg(long)]
    principal: Option<f64>,

    /// One-time prepayment applied before the first period
    #[arg(long = "one-time")]
    one_time: Option<f64>,

    /// Monthly installment
    #[arg(long)]
    payment: Option<f64>,

    /// Annual interest rate in percent
    #[arg(long)]
    rate: Option<f64>,

    /// Monthly recurring prepayment
    #[arg(long)]
    recurring: Option<f64>,

    /// Payment frequency: weekly, biweekly, monthly, semiannual, yearly
    #[arg(long)]
    frequency: Option<PaymentFrequency>,

    /// Size the monthly installment to pay off the loan in this many years
    #[arg(long = "tenure-years")]
    tenure_years: Option<u32>,

    /// Save the resolved inputs to a JSON file
    #[arg(long = "save-inputs")]
    save_inputs: Option<PathBuf>,

    /// Write the full schedule to a CSV file
    #[arg(long, default_value = "amortization_schedule.csv")]
    output: PathBuf,

    /// Number of rows to print to the console
    #[arg(long, default_value_t = 24)]
    rows: usize,

    /// Date of the loan's period 0, for the projected payoff date (YYYY-MM-DD)
    #[arg(long = "start-date")]
    start_date: Option<NaiveDate>,
}

impl Cli {
    fn resolve_inputs(&self) -> Result<LoanInputs> {
        let mut inputs = match &self.inputs {
            Some(path) => LoanInputs::load_json(path)
                .with_context(|| format!("Failed to load inputs from {}", path.display()))?,
            None => LoanInputs::new(0.0, 0.0, 0.0, 0.0, 0.0, PaymentFrequency::Monthly),
        };

        if let Some(v) = self.principal {
            inputs.remaining_principal = v;
        }
        if let Some(v) = self.one_time {
            inputs.one_time_prepayment = v;
        }
        if let Some(v) = self.payment {
            inputs.regular_payment = v;
        }
        if let Some(v) = self.rate {
            inputs.annual_interest_rate = v;
        }
        if let Some(v) = self.recurring {
            inputs.recurring_prepayment = v;
        }
        if let Some(f) = self.frequency {
            inputs.frequency = f;
        }

        let mut inputs = inputs.clamped();
        if let Some(years) = self.tenure_years {
            inputs = inputs.with_tenure(years);
        }

        inputs.validate()?;
        Ok(inputs)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let inputs = cli.resolve_inputs()?;

    if let Some(path) = &cli.save_inputs {
        inputs
            .save_json(path)
            .with_context(|| format!("Failed to save inputs to {}", path.display()))?;
    }

    println!("Loan Amortization v{}", env!("CARGO_PKG_VERSION"));
    println!("=======================\n");

    let params = inputs.normalize();
    println!("Loan:");
    println!("  Remaining Principal: ${:.2}", inputs.remaining_principal);
    println!("  One-time Prepayment: ${:.2}", inputs.one_time_prepayment);
    println!("  Monthly Payment:     ${:.2}", inputs.regular_payment);
    println!("  Monthly Recurring:   ${:.2}", inputs.recurring_prepayment);
    println!("  Annual Rate:         {:.3}%", inputs.annual_interest_rate);
    println!(
        "  Frequency:           {} ({} per year, ${:.2} per period)",
        params.frequency,
        params.payments_per_year(),
        params.payment_per_period()
    );
    println!();

    let engine = AmortizationEngine::default();
    let result = engine.project(&params);

    if let Some(warning) = &result.warning {
        println!("WARNING: {}\n", warning.message());
    }

    println!("{:>6} {:>12} {:>12} {:>14} {:>16}", "Period", "Payment", "Interest", "CumInterest", "Balance");
    println!("{}", "-".repeat(64));

    for record in result.records.iter().take(cli.rows) {
        println!(
            "{:>6} {:>12.2} {:>12.2} {:>14.2} {:>16.2}",
            record.period, record.payment, record.interest, record.cumulative_interest, record.balance,
        );
    }

    if result.records.len() > cli.rows {
        println!("... ({} more periods)", result.records.len() - cli.rows);
    }

    export_csv(&result.records, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("\nFull schedule written to: {}", cli.output.display());

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Payoff:         {}", summary.payoff_duration());
    println!("  Total Interest: ${:.2}", summary.total_interest);
    println!("  Total Paid:     ${:.2}", summary.total_paid);
    if !summary.paid_off {
        println!(
            "  Balance of ${:.2} still outstanding after the {}-period cutoff",
            summary.final_balance,
            engine.config().max_periods
        );
    }
    if let Some(date) = cli.start_date.and_then(|start| summary.payoff_date(start)) {
        println!("  Payoff Date:    {}", date);
    }

    Ok(())
}
