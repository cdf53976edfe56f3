//! Ingestion of offering records from JSON and CSV sources.
//!
//! This is where upstream payloads are checked: every record needs a course
//! code, a term and an instructor, and every count must be a non-negative
//! integer. Grade symbols the engine does not know are kept but logged.

use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::warn;

use crate::analyzers::grade::GradeBucketKey;
use crate::records::OfferingRecord;

const FIXED_COLUMNS: [&str; 3] = ["course_code", "term", "instructor"];

/// Decodes a JSON array of [`OfferingRecord`]s.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON array of records, a count is
/// negative or fractional, or a record is missing its course, term or
/// instructor.
pub fn parse_offerings_json(bytes: &[u8]) -> Result<Vec<OfferingRecord>> {
    let records: Vec<OfferingRecord> =
        serde_json::from_slice(bytes).context("invalid offering records payload")?;
    for (i, record) in records.iter().enumerate() {
        validate(record).with_context(|| format!("offering record {i}"))?;
    }
    Ok(records)
}

/// Reads offering records from CSV with a header row of
/// `course_code,term,instructor` followed by one column per grade symbol.
///
/// Empty grade cells count as zero.
pub fn parse_offerings_csv<R: Read>(reader: R) -> Result<Vec<OfferingRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    for column in FIXED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("offering CSV is missing the '{column}' column");
        }
    }

    for header in headers.iter().filter(|h| !FIXED_COLUMNS.contains(h)) {
        if header.parse::<GradeBucketKey>().is_err() {
            warn!(column = header, "Unknown grade column, values will not be counted");
        }
    }

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let mut fields = BTreeMap::new();
        let mut grades = BTreeMap::new();

        for (header, value) in headers.iter().zip(row.iter()) {
            let value = value.trim();
            if FIXED_COLUMNS.contains(&header) {
                fields.insert(header, value.to_string());
            } else if !value.is_empty() {
                let count: u64 = value.parse().with_context(|| {
                    format!("row {i}: count '{value}' for '{header}' is not a non-negative integer")
                })?;
                grades.insert(header.to_string(), count);
            }
        }

        let mut take = |column: &str| fields.remove(column).unwrap_or_default();
        let record = OfferingRecord {
            course_code: take("course_code"),
            term: take("term"),
            instructor: take("instructor"),
            grades,
        };
        validate(&record).with_context(|| format!("row {i}"))?;
        records.push(record);
    }

    Ok(records)
}

fn validate(record: &OfferingRecord) -> Result<()> {
    if record.course_code.trim().is_empty() {
        bail!("missing course code");
    }
    if record.term.trim().is_empty() {
        bail!("missing term");
    }
    if record.instructor.trim().is_empty() {
        bail!("missing instructor");
    }
    for symbol in record.grades.keys() {
        if symbol.parse::<GradeBucketKey>().is_err() {
            warn!(
                course_code = %record.course_code,
                term = %record.term,
                symbol = %symbol,
                "Unknown grade symbol, it will not be counted"
            );
        }
    }
    Ok(())
}
