//! Date-range filters for the backend's table query.

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Inclusive date range, passed to the backend without interpretation.
///
/// Dates are expected as `YYYY-MM-DD` but are not parsed or validated here;
/// the backend does the filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// From `days` days before `today` through `today`, both inclusive.
    ///
    /// `days = 0` is today only. Saturates at the earliest representable date.
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self::new(
            from.format("%Y-%m-%d").to_string(),
            today.format("%Y-%m-%d").to_string(),
        )
    }

    /// Filter arguments appended after the backend's `where` keyword.
    pub fn backend_filters(&self) -> [String; 2] {
        [
            format!("--time>={}", self.from),
            format!("--time<={}", self.to),
        ]
    }
}
