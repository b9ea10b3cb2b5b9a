//! Month grid arithmetic.
//!
//! The grid builder takes a 0-based month index (0 = January) and normalises
//! it with Euclidean division, so `12` is January of the following year and
//! `-1` is December of the previous one. Everything that leaves this module
//! reports months 1-based, the way chrono does.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::format::{format_month_title, is_same_day};
use crate::store::EventStore;

/// Six rows of seven days.
pub const GRID_CELLS: usize = 42;
pub const DAYS_PER_WEEK: usize = 7;

// Comfortably inside chrono's representable range so that the 42-day window
// around the 1st never runs off either end.
const MIN_GRID_YEAR: i32 = -262_000;
const MAX_GRID_YEAR: i32 = 262_000;

/// Resolve `(year, month_index)` into a real year and a 1-based month.
pub fn normalize_month(year: i32, month_index: i32) -> (i32, u32) {
    let year = year.saturating_add(month_index.div_euclid(12)).clamp(MIN_GRID_YEAR, MAX_GRID_YEAR);
    let month = month_index.rem_euclid(12) as u32 + 1;
    (year, month)
}

pub fn first_of_month(year: i32, month_index: i32) -> NaiveDate {
    let (year, month) = normalize_month(year, month_index);
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

/// Grid index of the 1st of the month, 0 = Sunday.
pub fn first_weekday_offset(year: i32, month_index: i32) -> usize {
    first_of_month(year, month_index).weekday().num_days_from_sunday() as usize
}

/// The 42 consecutive dates shown for a month, starting on the Sunday on or
/// before the 1st.
pub fn build_month_grid(year: i32, month_index: i32) -> Vec<NaiveDate> {
    let first = first_of_month(year, month_index);
    let lead = first.weekday().num_days_from_sunday() as u64;
    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    start.iter_days().take(GRID_CELLS).collect()
}

/// The month currently shown, with navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    year: i32,
    month_index: i32,
}

impl MonthCursor {
    pub fn new(year: i32, month_index: i32) -> Self {
        let (year, month) = normalize_month(year, month_index);
        Self { year, month_index: month as i32 - 1 }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0() as i32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month.
    pub fn month(&self) -> u32 {
        self.month_index as u32 + 1
    }

    pub fn month_index(&self) -> i32 {
        self.month_index
    }

    pub fn next(self) -> Self {
        Self::new(self.year, self.month_index + 1)
    }

    pub fn prev(self) -> Self {
        Self::new(self.year, self.month_index - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month()
    }

    pub fn title(&self) -> String {
        format_month_title(self.year, self.month())
    }
}

/// One rendered cell. Derived per render and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub event_count: usize,
}

impl GridDay {
    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub cursor: MonthCursor,
    pub days: Vec<GridDay>,
}

impl MonthView {
    pub fn build<S>(cursor: MonthCursor, today: NaiveDate, selected: NaiveDate, store: &S) -> Self
    where
        S: EventStore + ?Sized,
    {
        let days = build_month_grid(cursor.year(), cursor.month_index())
            .into_iter()
            .map(|date| GridDay {
                date,
                is_current_month: cursor.contains(date),
                is_today: is_same_day(date, today),
                is_selected: is_same_day(date, selected),
                event_count: store.by_day(date).len(),
            })
            .collect();
        Self { cursor, days }
    }

    pub fn title(&self) -> String {
        self.cursor.title()
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridDay]> {
        self.days.chunks(DAYS_PER_WEEK)
    }
}
