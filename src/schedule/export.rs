//! CSV export of schedule records

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::records::PeriodRecord;
use crate::error::LoanResult;

/// Exported row: the four schedule columns in display order
#[derive(Debug, Serialize)]
struct ExportRow {
    #[serde(rename = "Period")]
    period: u32,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "CumulativeInterest")]
    cumulative_interest: f64,
    #[serde(rename = "Balance")]
    balance: f64,
}

impl From<&PeriodRecord> for ExportRow {
    fn from(record: &PeriodRecord) -> Self {
        Self {
            period: record.period,
            interest: record.interest,
            cumulative_interest: record.cumulative_interest,
            balance: record.balance,
        }
    }
}

pub const CSV_HEADER: [&str; 4] = ["Period", "Interest", "CumulativeInterest", "Balance"];

/// Write records as CSV to any writer
///
/// The header row is written even for an empty schedule.
pub fn write_csv<W: Write>(records: &[PeriodRecord], writer: W) -> LoanResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.serialize(ExportRow::from(record))?;
    }
    wtr.flush()?;

    Ok(())
}

/// Write records as CSV to a file
pub fn export_csv<P: AsRef<Path>>(records: &[PeriodRecord], path: P) -> LoanResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{LoanInputs, PaymentFrequency};
    use crate::schedule::compute_schedule;

    fn export_to_string(records: &[PeriodRecord]) -> String {
        let mut buffer = Vec::new();
        write_csv(records, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_only_for_empty_schedule() {
        assert_eq!(export_to_string(&[]), "Period,Interest,CumulativeInterest,Balance\n");
    }

    #[test]
    fn test_rows_in_sequence_order() {
        let params = LoanInputs::new(12_000.0, 0.0, 1_000.0, 12.0, 0.0, PaymentFrequency::Monthly).normalize();
        let records = compute_schedule(&params);
        let text = export_to_string(&records);

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), records.len());

        for (row, record) in rows.iter().zip(&records) {
            assert_eq!(row[0].parse::<u32>().unwrap(), record.period);
            assert_eq!(row[1].parse::<f64>().unwrap(), record.interest);
            assert_eq!(row[2].parse::<f64>().unwrap(), record.cumulative_interest);
            assert_eq!(row[3].parse::<f64>().unwrap(), record.balance);
        }
    }
}
