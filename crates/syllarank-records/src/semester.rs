//! Semester/year string normalization.
//!
//! Syllabi carry dates as raw strings like ("Fall", "2014") or
//! ("spring", "09"); this converts them into calendar dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use syllarank_core::{Error, Result};

/// Raw semester/year strings captured for a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterDate {
    pub document_id: i64,
    pub semester: String,
    pub year: String,
    /// Character offset where the date was found in the document.
    pub offset: i64,
}

impl SemesterDate {
    /// Convert the raw semester/year strings into a date, pinned to the
    /// first day of the semester's starting month.
    pub fn date(&self) -> Result<NaiveDate> {
        let year = parse_year(&self.year)?;

        // TODO: "winter" is ambiguous between December of the prior year
        // and January; it currently maps to January like "spring".
        let month = match self.semester.to_lowercase().as_str() {
            "fall" => 9,
            "winter" => 1,
            "spring" => 1,
            "summer" => 6,
            other => {
                return Err(Error::InvalidDate(format!(
                    "Unrecognized semester: {}",
                    other
                )))
            }
        };

        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidDate(format!("Out-of-range year: {}", year)))
    }
}

/// Parse a 4-digit or 2-digit year string. Two-digit years pivot at 69,
/// matching strptime's `%y`.
fn parse_year(year: &str) -> Result<i32> {
    let digits: i32 = year
        .parse()
        .map_err(|_| Error::InvalidDate(format!("Unparseable year: {}", year)))?;

    match year.len() {
        4 => Ok(digits),
        2 => {
            if digits < 69 {
                Ok(2000 + digits)
            } else {
                Ok(1900 + digits)
            }
        }
        _ => Err(Error::InvalidDate(format!("Unparseable year: {}", year))),
    }
}
