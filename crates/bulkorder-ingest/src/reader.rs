//! All-or-nothing ingestion of delimited input.

use crate::error::{IngestError, Result};
use crate::record::{AddressRecord, RawRow};
use crate::validator::validate_row;
use bulkorder_core::Reporter;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Validate already-parsed rows.
///
/// Returns every record in input order, or the rejection of the first invalid
/// row. Nothing is returned for a rejected batch.
pub fn ingest_rows<I>(rows: I, reporter: &dyn Reporter) -> Result<Vec<AddressRecord>>
where
    I: IntoIterator<Item = RawRow>,
{
    collect_records(rows.into_iter().map(Ok), reporter)
}

/// Parse and validate CSV with a header line from any reader.
pub fn ingest_reader<R: Read>(input: R, reporter: &dyn Reporter) -> Result<Vec<AddressRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => return Err(rejected(e.into(), reporter)),
    };

    let rows = reader.into_records().map(|record| -> Result<RawRow> {
        let record = record?;
        Ok(RawRow::new(headers.iter().zip(record.iter())))
    });
    collect_records(rows, reporter)
}

/// Parse and validate a CSV file.
pub fn ingest_file(path: &Path, reporter: &dyn Reporter) -> Result<Vec<AddressRecord>> {
    tracing::debug!("Reading addresses from {}", path.display());
    match File::open(path) {
        Ok(file) => ingest_reader(file, reporter),
        Err(source) => {
            let err = IngestError::Io {
                path: path.display().to_string(),
                source,
            };
            Err(rejected(err, reporter))
        }
    }
}

fn collect_records<I>(rows: I, reporter: &dyn Reporter) -> Result<Vec<AddressRecord>>
where
    I: Iterator<Item = Result<RawRow>>,
{
    let mut records = Vec::new();

    for (index, row) in rows.enumerate() {
        let position = index + 1;
        let outcome = row.and_then(|row| validate_row(&row, position));
        match outcome {
            Ok(record) => records.push(record),
            Err(e) => return Err(rejected(e, reporter)),
        }
    }

    tracing::info!(count = records.len(), "ingestion complete");
    reporter.info(&format!(
        "Found {} valid rows of addresses.",
        records.len()
    ));
    Ok(records)
}

/// Every ingestion error ends the run and is surfaced once, here.
fn rejected(err: IngestError, reporter: &dyn Reporter) -> IngestError {
    tracing::error!(row = err.row(), "ingestion aborted: {err}");
    reporter.failure(&err.to_string());
    err
}
