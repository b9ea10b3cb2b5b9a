//! Day-equality and human-readable date strings.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that can be bucketed into a wall-clock calendar day.
pub trait DayKey {
    fn calendar_date(&self) -> NaiveDate;
}

impl DayKey for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }
}

impl DayKey for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> DayKey for DateTime<Tz> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: DayKey + ?Sized> DayKey for &T {
    fn calendar_date(&self) -> NaiveDate {
        (**self).calendar_date()
    }
}

/// True when both values fall on the same year, month and day of month.
pub fn is_same_day<A: DayKey, B: DayKey>(a: A, b: B) -> bool {
    let (a, b) = (a.calendar_date(), b.calendar_date());
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// "Sunday, October 18, 2026"
pub fn format_long<D: DayKey>(date: D) -> String {
    date.calendar_date().format("%A, %B %-d, %Y").to_string()
}

/// "Sunday, October 18"
pub fn format_day_heading<D: DayKey>(date: D) -> String {
    date.calendar_date().format("%A, %B %-d").to_string()
}

/// "October 2026". `month` is 1-based; out-of-range values fall back to the bare year.
pub fn format_month_title(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first.format("%B %Y").to_string(),
        None => year.to_string(),
    }
}
