use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Format used for range bounds in backend query strings.
pub const PARAM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A `[from, to]` window of local date-times bounding the displayed data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateRange {
    /// Build a range, rejecting one whose `from` lies after `to`.
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Result<Self> {
        let range = Self::unchecked(from, to);
        range.validate()?;
        Ok(range)
    }

    /// Build a range without checking the bound order.
    pub fn unchecked(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from, to }
    }

    /// The default window: one calendar month ending now, local time.
    pub fn default_ending_now() -> Self {
        Self::default_ending_at(Local::now().naive_local())
    }

    /// The default window ending at `to`.
    pub fn default_ending_at(to: NaiveDateTime) -> Self {
        Self {
            from: month_before(to),
            to,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.from <= self.to
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_ordered() {
            Ok(())
        } else {
            Err(Error::InvertedRange {
                from: self.from.to_string(),
                to: self.to.to_string(),
            })
        }
    }

    /// `from` as a UTC instant for backend query strings.
    pub fn from_param(&self) -> String {
        local_to_param(self.from)
    }

    /// `to` as a UTC instant for backend query strings.
    pub fn to_param(&self) -> String {
        local_to_param(self.to)
    }
}

/// Step back one calendar month, keeping day-of-month and time of day.
///
/// When that day does not exist in the prior month (March 31 has no
/// February 31), the result is clamped to the last day of the prior month
/// at midnight. At the bottom of chrono's calendar, where no prior month
/// exists, the result is the earliest representable date-time.
pub fn month_before(to: NaiveDateTime) -> NaiveDateTime {
    let (year, month) = if to.month() == 1 {
        (to.year() - 1, 12)
    } else {
        (to.year(), to.month() - 1)
    };

    match NaiveDate::from_ymd_opt(year, month, to.day()) {
        Some(date) => date.and_time(to.time()),
        None => last_day_of_month(year, month)
            .map(|date| date.and_time(NaiveTime::MIN))
            .unwrap_or(NaiveDateTime::MIN),
    }
}

/// Last calendar day of `month` in `year`, if chrono can represent it.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
}

/// Render a UTC instant the way browsers print `Date.toISOString()`.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(PARAM_FORMAT).to_string()
}

fn local_to_param(value: NaiveDateTime) -> String {
    // Local times skipped by a DST jump have no mapping; fall back to UTC.
    let instant = Local
        .from_local_datetime(&value)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| value.and_utc());
    format_instant(instant)
}
