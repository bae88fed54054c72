//! Request validation
//!
//! Dates arrive from clients as raw path segments and are parsed here before they reach the
//! query engine. Validation depends only on the input string.

use crate::error::ClimateError;
use crate::models::DateRange;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Format accepted for dates in requests.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date.
///
/// Exactly four year digits, two month digits and two day digits are accepted. Dates that are
/// well formed but do not exist in the calendar (e.g. `2017-02-30`) are rejected with the same
/// error.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ClimateError> {
    let invalid = || ClimateError::InvalidDate {
        input: raw.to_string(),
    };
    // chrono is lenient about field widths and signs, so check the shape first.
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

/// Parse an optional inclusive date range.
pub fn parse_date_range(start: &str, end: Option<&str>) -> Result<DateRange, ClimateError> {
    let start = parse_date(start)?;
    let end = end.map(parse_date).transpose()?;
    Ok(DateRange::new(start, end))
}

/// An axum extractor that reads `start` and an optional `end` date from the request path and
/// validates them.
#[derive(Debug, Clone, Copy)]
pub struct DateRangePath(pub DateRange);

#[async_trait]
impl<S> FromRequestParts<S> for DateRangePath
where
    S: Send + Sync,
{
    type Rejection = ClimateError;

    /// Extract a `DateRangePath` from request parts.
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // A segment that does not decode to UTF-8 cannot be a date either.
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "undecodable date path");
                ClimateError::InvalidDate {
                    input: parts.uri.path().to_string(),
                }
            })?;
        let start = params.get("start").map(String::as_str).unwrap_or_default();
        let range = parse_date_range(start, params.get("end").map(String::as_str))?;
        Ok(DateRangePath(range))
    }
}
