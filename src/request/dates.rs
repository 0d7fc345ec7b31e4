//! Normalization of user-supplied dates to the timestamp format the API expects.

use crate::request::error::ValidationError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use log::warn;
use serde::Serialize;

/// Timestamp format of the `startDate`/`endDate` request fields.
pub const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Parses `input` and formats it as `YYYY-MM-DDTHH:MM:SS`.
///
/// Offsets are not converted: `2020-12-01T10:00:00+02:00` becomes `2020-12-01T10:00:00`.
/// Fractional seconds are truncated and a bare date means midnight.
pub fn normalize_date(input: &str) -> Result<String, ValidationError> {
    parse_date(input.trim())
        .map(|dt| dt.format(API_TIMESTAMP_FORMAT).to_string())
        .ok_or_else(|| ValidationError::InvalidDate {
            input: input.to_string(),
        })
}

fn parse_date(input: &str) -> Option<NaiveDateTime> {
    // Full datetime with an offset
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// The JSON body of an observations request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    pub start_date: String,
    pub end_date: String,
}

impl DateFilter {
    /// Validates both dates and builds the filter.
    ///
    /// Every supplied, non-empty date must parse. A filter is only produced when both
    /// ends are present; a one-sided range yields `None`, so the request is sent
    /// without any date restriction.
    pub fn from_bounds(
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Option<Self>, ValidationError> {
        let start_date = start_date
            .filter(|s| !s.trim().is_empty())
            .map(normalize_date)
            .transpose()?;
        let end_date = end_date
            .filter(|s| !s.trim().is_empty())
            .map(normalize_date)
            .transpose()?;

        match (start_date, end_date) {
            (Some(start_date), Some(end_date)) => Ok(Some(Self {
                start_date,
                end_date,
            })),
            (None, None) => Ok(None),
            (start, end) => {
                warn!(
                    "Only one side of the date range was given (start: {:?}, end: {:?}); requesting all observations",
                    start, end
                );
                Ok(None)
            }
        }
    }

    /// Request body for this filter, `{}` when there is none.
    pub fn request_body(filter: Option<&Self>) -> serde_json::Value {
        filter
            .and_then(|f| serde_json::to_value(f).ok())
            .unwrap_or_else(|| serde_json::json!({}))
    }
}
