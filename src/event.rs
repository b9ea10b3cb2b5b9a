//! Event records shared by the interpreter, the store and the shell.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::parser::time_phrase::parse_time_with_ampm;

/// An unsaved event proposal produced by the interpreter.
///
/// Optional fields stay `None` when nothing was recognised so the
/// confirmation step can apply its own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self { title: title.into(), date, start_time: None, end_time: None, description: None }
    }

    pub fn start_naive_time(&self) -> Option<NaiveTime> {
        self.start_time.as_deref().and_then(to_naive_time)
    }

    pub fn end_naive_time(&self) -> Option<NaiveTime> {
        self.end_time.as_deref().and_then(to_naive_time)
    }
}

/// A stored event. Only the store hands these out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Swatch>,
}

impl CalendarEvent {
    pub fn from_draft(id: String, draft: EventDraft, color: Option<Swatch>) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            color,
        }
    }

    /// "2pm - 3pm", "2pm", or `None` for an untimed event.
    pub fn time_range_display(&self) -> Option<String> {
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => Some(format!("{} - {}", start, end)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }

    pub fn swatch(&self) -> Swatch {
        self.color.unwrap_or_default()
    }
}

fn to_naive_time(spoken: &str) -> Option<NaiveTime> {
    let (hour, minute) = parse_time_with_ampm(spoken)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Colour palette offered when an event is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swatch {
    #[default]
    Purple,
    Orange,
    Green,
    Blue,
    Pink,
}

impl Swatch {
    pub const ALL: [Swatch; 5] =
        [Swatch::Purple, Swatch::Orange, Swatch::Green, Swatch::Blue, Swatch::Pink];

    pub fn hex(self) -> &'static str {
        match self {
            Swatch::Purple => "#8B5CF6",
            Swatch::Orange => "#F97316",
            Swatch::Green => "#10B981",
            Swatch::Blue => "#0EA5E9",
            Swatch::Pink => "#EC4899",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Swatch::Purple => "purple",
            Swatch::Orange => "orange",
            Swatch::Green => "green",
            Swatch::Blue => "blue",
            Swatch::Pink => "pink",
        }
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown colour '{0}' (expected purple, orange, green, blue or pink)")]
pub struct UnknownSwatch(pub String);

impl FromStr for Swatch {
    type Err = UnknownSwatch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Swatch::ALL
            .into_iter()
            .find(|swatch| {
                swatch.name().eq_ignore_ascii_case(wanted) || swatch.hex().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownSwatch(wanted.to_string()))
    }
}
