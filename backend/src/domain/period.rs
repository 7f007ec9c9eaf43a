//! Named reporting periods and their resolution to concrete date ranges.

use chrono::{Datelike, Duration, NaiveDate};

/// A named reporting window. Resolved once at the HTTP boundary from the wire
/// token; only this closed enum travels into the domain layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The current calendar day
    Daily,
    /// Trailing 7-day window ending today (not an ISO calendar week)
    Weekly,
    /// Month to date
    Monthly,
    /// Year to date
    Yearly,
    /// No date filter
    AllTime,
}

impl Period {
    /// Map the wire token to a period.
    ///
    /// Unknown or absent tokens fall back to `AllTime` (no filter) rather
    /// than erroring. Token spellings are kept as existing clients send them.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("diario") => Self::Daily,
            Some("semanal") => Self::Weekly,
            Some("mensal") => Self::Monthly,
            Some("anual") => Self::Yearly,
            _ => Self::AllTime,
        }
    }

    /// Resolve the period to a date range anchored on `now`.
    ///
    /// Pure function of `(self, now)`; no clock access here.
    pub fn resolve(self, now: NaiveDate) -> DateRange {
        match self {
            Self::Daily => DateRange::bounded(now, now),
            Self::Weekly => DateRange::bounded(now - Duration::days(7), now),
            Self::Monthly => {
                let month_start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap();
                DateRange::bounded(month_start, now)
            }
            Self::Yearly => {
                let year_start = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap();
                DateRange::bounded(year_start, now)
            }
            Self::AllTime => DateRange::unbounded(),
        }
    }
}

/// A date window with inclusive bounds; `None` means unbounded on that side.
///
/// Derived per request and discarded afterwards, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether `date` falls inside the window (bounds inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}
