//! Load loan inputs from CSV batches and persist single input sets as JSON

use super::{LoanInputs, PaymentFrequency};
use crate::error::LoanResult;
use csv::Reader;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Raw CSV row for batch loan files
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "LoanId")]
    loan_id: String,
    #[serde(rename = "RemainingPrincipal")]
    remaining_principal: f64,
    #[serde(rename = "OneTimePrepayment", default)]
    one_time_prepayment: f64,
    #[serde(rename = "MonthlyPayment")]
    monthly_payment: f64,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
    #[serde(rename = "MonthlyRecurringPrepayment", default)]
    monthly_recurring_prepayment: f64,
    #[serde(rename = "Frequency")]
    frequency: String,
}

/// A loan read from a batch file, tagged with its identifier
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRecord {
    pub loan_id: String,
    pub inputs: LoanInputs,
}

impl CsvRow {
    fn to_record(self) -> LoanResult<LoanRecord> {
        let frequency: PaymentFrequency = self.frequency.parse()?;

        let inputs = LoanInputs::new(
            self.remaining_principal,
            self.one_time_prepayment,
            self.monthly_payment,
            self.annual_rate,
            self.monthly_recurring_prepayment,
            frequency,
        );
        inputs.validate()?;

        Ok(LoanRecord {
            loan_id: self.loan_id,
            inputs,
        })
    }
}

/// Load all loans from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> LoanResult<Vec<LoanRecord>> {
    let file = File::open(path.as_ref())?;
    let loans = load_loans_from_reader(file)?;
    debug!("Loaded {} loans from {}", loans.len(), path.as_ref().display());
    Ok(loans)
}

/// Load loans from any reader (e.g., string buffer, request body)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> LoanResult<Vec<LoanRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut loans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        loans.push(row.to_record()?);
    }

    Ok(loans)
}

impl LoanInputs {
    /// Restore previously saved inputs
    pub fn load_json<P: AsRef<Path>>(path: P) -> LoanResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Save inputs so the next session starts from the same values
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> LoanResult<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
