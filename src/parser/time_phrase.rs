//! Time phrase extraction: "at 2pm", "from 10:30 am to 12pm".

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static TIME_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:at|from)\s+(\d{1,2}(?::\d{2})?\s?(?:am|pm))\b(?:\s+to\s+(\d{1,2}(?::\d{2})?\s?(?:am|pm))\b)?",
    )
    .expect("time phrase pattern")
});

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?(?:\s*([ap])\.?m\.?)?$").expect("clock time pattern")
});

/// The time part of a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePhrase {
    /// Byte range of the whole phrase, including the leading "at"/"from".
    pub span: Range<usize>,
    /// Lowercased as spoken, e.g. "2pm" or "12:30 pm".
    pub start: String,
    pub end: Option<String>,
}

/// Convert 12-hour time to 24-hour format
fn convert_to_24_hour(hour: u32, minute: u32, meridiem: &str) -> (u32, u32) {
    let hour_24 = match (hour, meridiem) {
        (12, "a") => 0,
        (h, "a") => h,
        (12, "p") => 12,
        (h, "p") => h + 12,
        _ => hour,
    };
    (hour_24, minute)
}

/// Parse a time string like "8pm" or "10:30 a.m." into 24-hour `(hour, minute)`.
///
/// Without a meridiem the value is read as a 24-hour clock time. With one,
/// the hour must be between 1 and 12.
pub fn parse_time_with_ampm(time_str: &str) -> Option<(u32, u32)> {
    let caps = CLOCK_TIME.captures(time_str.trim())?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if minute >= 60 {
        return None;
    }

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(meridiem) if (1..=12).contains(&hour) => Some(convert_to_24_hour(hour, minute, &meridiem)),
        Some(_) => None,
        None if hour < 24 => Some((hour, minute)),
        None => None,
    }
}

/// Find the first time phrase whose start time is a real clock time.
///
/// An impossible end time ("from 2pm to 13pm") is dropped but the phrase is
/// still consumed.
pub fn extract_time_phrase(text: &str) -> Option<TimePhrase> {
    for caps in TIME_PHRASE.captures_iter(text) {
        let (Some(whole), Some(start)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if parse_time_with_ampm(start.as_str()).is_none() {
            debug!("Ignoring impossible time '{}'", start.as_str());
            continue;
        }

        let end = caps.get(2).map(|m| m.as_str()).and_then(|end| {
            if parse_time_with_ampm(end).is_some() {
                Some(end.to_lowercase())
            } else {
                debug!("Ignoring impossible end time '{}'", end);
                None
            }
        });

        return Some(TimePhrase {
            span: whole.range(),
            start: start.as_str().to_lowercase(),
            end,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("8pm", Some((20, 0)))]
    #[test_case("8:30pm", Some((20, 30)))]
    #[test_case("10:00 PM", Some((22, 0)))]
    #[test_case("8am", Some((8, 0)))]
    #[test_case("12pm", Some((12, 0)))]
    #[test_case("12am", Some((0, 0)))]
    #[test_case("7 a.m.", Some((7, 0)))]
    #[test_case("23:45", Some((23, 45)))]
    #[test_case("13pm", None)]
    #[test_case("0am", None)]
    #[test_case("9:75am", None)]
    #[test_case("invalid", None)]
    fn test_time_parsing(input: &str, expected: Option<(u32, u32)>) {
        assert_eq!(parse_time_with_ampm(input), expected);
    }

    #[test]
    fn test_single_time() {
        let text = "Add meeting with John tomorrow at 2pm";
        let phrase = extract_time_phrase(text).unwrap();
        assert_eq!(&text[phrase.span.clone()], "at 2pm");
        assert_eq!(phrase.start, "2pm");
        assert_eq!(phrase.end, None);
    }

    #[test]
    fn test_time_range() {
        let text = "Workshop today from 10:30 AM to 12pm please";
        let phrase = extract_time_phrase(text).unwrap();
        assert_eq!(&text[phrase.span.clone()], "from 10:30 AM to 12pm");
        assert_eq!(phrase.start, "10:30 am");
        assert_eq!(phrase.end.as_deref(), Some("12pm"));
    }

    #[test]
    fn test_skips_impossible_times() {
        let text = "call at 13pm or at 4pm";
        let phrase = extract_time_phrase(text).unwrap();
        assert_eq!(phrase.start, "4pm");

        let phrase = extract_time_phrase("review from 2pm to 14pm").unwrap();
        assert_eq!(phrase.start, "2pm");
        assert_eq!(phrase.end, None);
    }

    #[test]
    fn test_requires_meridiem_and_word_boundary() {
        assert_eq!(extract_time_phrase("lunch at 12 today"), None);
        assert_eq!(extract_time_phrase("chat at 3pmish"), None);
        assert_eq!(extract_time_phrase("flat 5pm"), None);
    }
}
