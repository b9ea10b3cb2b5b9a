//! Plain-text rendering for the terminal.
//!
//! Cell markers in the month grid:
//!
//! ```text
//! [18]   today          <20>   selected day
//! {18}   today, selected (27)   outside the shown month
//!  19*   has events
//! ```

use crate::calendar::{GridDay, MonthView, format_day_heading, format_long};
use crate::event::{CalendarEvent, EventDraft};

const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 5;

fn render_cell(day: &GridDay) -> String {
    use chrono::Datelike;

    let (left, right) = match (day.is_today, day.is_selected, day.is_current_month) {
        (true, true, _) => ('{', '}'),
        (false, true, _) => ('<', '>'),
        (true, false, _) => ('[', ']'),
        (false, false, false) => ('(', ')'),
        (false, false, true) => (' ', ' '),
    };
    let marker = if day.has_events() { '*' } else { ' ' };
    format!("{}{:>2}{}{}", left, day.date.day(), right, marker)
}

pub fn render_month(view: &MonthView) -> String {
    let width = CELL_WIDTH * WEEKDAY_HEADER.len();
    let mut lines = Vec::with_capacity(8);

    lines.push(format!("{:^width$}", view.title(), width = width).trim_end().to_string());
    lines.push(
        WEEKDAY_HEADER
            .iter()
            .map(|name| format!("{:<width$}", name, width = CELL_WIDTH))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );
    for week in view.weeks() {
        lines.push(week.iter().map(render_cell).collect::<String>().trim_end().to_string());
    }
    lines.join("\n")
}

/// First 8 characters of an id, or the whole id when it is shorter.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// One line per event; ids are shortened with [`short_id`].
pub fn render_event_line(event: &CalendarEvent) -> String {
    let short_id = short_id(&event.id);
    let mut line = match event.time_range_display() {
        Some(time) => format!("{}  {}  {}", short_id, time, event.title),
        None => format!("{}  {}", short_id, event.title),
    };
    line.push_str(&format!("  [{}]", event.swatch()));
    if let Some(description) = &event.description {
        line.push_str(&format!("\n          {}", description));
    }
    line
}

pub fn render_day(date: chrono::NaiveDate, events: &[CalendarEvent]) -> String {
    let mut out = format_day_heading(date);
    if events.is_empty() {
        out.push_str("\n  No events scheduled");
    }
    for event in events {
        out.push_str("\n  ");
        out.push_str(&render_event_line(event).replace('\n', "\n  "));
    }
    out
}

pub fn render_draft(draft: &EventDraft) -> String {
    let mut lines = vec![format!("Title: {}", draft.title), format!("Date:  {}", format_long(draft.date))];
    match (&draft.start_time, &draft.end_time) {
        (Some(start), Some(end)) => lines.push(format!("Time:  {} - {}", start, end)),
        (Some(start), None) => lines.push(format!("Time:  {}", start)),
        _ => {}
    }
    if let Some(description) = &draft.description {
        lines.push(format!("About: {}", description));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthCursor;
    use crate::event::Swatch;
    use crate::store::{EventStore, InMemoryEventStore};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_month() {
        let mut store = InMemoryEventStore::new();
        store.add(EventDraft::new("lunch", date(2026, 10, 20)), None);
        store.add(EventDraft::new("early", date(2026, 11, 1)), None);

        let today = date(2026, 10, 18);
        let view = MonthView::build(MonthCursor::containing(today), today, date(2026, 10, 20), &store);
        let rendered = render_month(&view);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0].trim(), "October 2026");
        assert_eq!(lines[1], "Sun  Mon  Tue  Wed  Thu  Fri  Sat");
        assert_eq!(lines[2], "(27) (28) (29) (30)   1    2    3");
        assert_eq!(lines[5], "[18]  19  <20>* 21   22   23   24");
        assert_eq!(lines[7], "( 1)*( 2) ( 3) ( 4) ( 5) ( 6) ( 7)");
    }

    #[test]
    fn test_render_day() {
        let mut store = InMemoryEventStore::new();
        let day = date(2026, 10, 19);
        assert_eq!(render_day(day, &[]), "Monday, October 19\n  No events scheduled");

        let mut draft = EventDraft::new("meeting with John", day);
        draft.start_time = Some("2pm".to_string());
        draft.end_time = Some("3pm".to_string());
        draft.description = Some("quarterly plan".to_string());
        let event = store.add(draft, Some(Swatch::Orange));

        let rendered = render_day(day, &store.by_day(day));
        let short_id = short_id(&event.id);
        assert_eq!(
            rendered,
            format!(
                "Monday, October 19\n  {}  2pm - 3pm  meeting with John  [orange]\n            quarterly plan",
                short_id
            )
        );
    }

    #[test]
    fn test_short_id_counts_characters() {
        assert_eq!(short_id("0f3c9a1e-77b2"), "0f3c9a1e");
        assert_eq!(short_id("ab"), "ab");
        assert_eq!(short_id("ünïcødé-ïd"), "ünïcødé-");
    }

    #[test]
    fn test_render_draft() {
        let mut draft = EventDraft::new("dentist visit", date(2026, 4, 15));
        draft.start_time = Some("10am".to_string());
        assert_eq!(render_draft(&draft), "Title: dentist visit\nDate:  Wednesday, April 15, 2026\nTime:  10am");
    }
}
