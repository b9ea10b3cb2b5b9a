//! Calendar date arithmetic: month grids, day-equality and date formatting.

pub mod format;
pub mod grid;

pub use format::{DayKey, format_day_heading, format_long, format_month_title, is_same_day};
pub use grid::{
    DAYS_PER_WEEK, GRID_CELLS, GridDay, MonthCursor, MonthView, build_month_grid,
    first_of_month, first_weekday_offset, normalize_month,
};
