//! Ordered date rules for the interpreter.
//!
//! Each rule pairs a pattern with a resolver. The interpreter tries them in
//! order and the first pattern that matches decides the date, so adding a
//! new phrasing means adding a rule, not touching title cleanup.

use chrono::{Datelike, Days, Month, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

use crate::config::{InterpreterConfig, NextWeekdayPolicy};

/// Turns a match into a date, given "today". `None` means the phrase matched
/// but names no representable date.
pub type DateResolver = fn(&Captures<'_>, NaiveDate, &InterpreterConfig) -> Option<NaiveDate>;

const TRIGGER: &str = r"(?:\b(?:on|for|at)\s+)";
const WEEKDAYS: &str = "sunday|monday|tuesday|wednesday|thursday|friday|saturday";
const MONTHS: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

#[derive(Clone)]
pub struct DateRule {
    name: &'static str,
    pattern: Regex,
    resolve: DateResolver,
}

impl DateRule {
    /// `pattern` is compiled case-insensitively.
    pub fn new(name: &'static str, pattern: &str, resolve: DateResolver) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("(?i){}", pattern))?;
        Ok(Self { name, pattern, resolve })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.pattern.captures(text)
    }

    pub fn resolve(
        &self,
        caps: &Captures<'_>,
        today: NaiveDate,
        config: &InterpreterConfig,
    ) -> Option<NaiveDate> {
        (self.resolve)(caps, today, config)
    }
}

impl fmt::Debug for DateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

static DEFAULT_RULES: Lazy<Vec<DateRule>> = Lazy::new(|| {
    let rules: [(&'static str, String, DateResolver); 4] = [
        ("tomorrow", format!(r"{}?\btomorrow\b", TRIGGER), resolve_tomorrow),
        ("today", format!(r"{}?\btoday\b", TRIGGER), resolve_today),
        (
            "weekday",
            // A bare weekday needs a trigger word; "next"/"this" is enough on its own.
            format!(r"(?:{}(?:(next|this)\s+)?|\b(next|this)\s+)({})\b", TRIGGER, WEEKDAYS),
            resolve_weekday,
        ),
        (
            "month_day",
            format!(r"{}?\b({})\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}})\b)?", TRIGGER, MONTHS),
            resolve_month_day,
        ),
    ];

    rules
        .into_iter()
        .map(|(name, pattern, resolve)| {
            DateRule::new(name, &pattern, resolve).expect("built-in date rule pattern")
        })
        .collect()
});

/// The built-in chain: tomorrow, today, weekday, month + day.
pub fn default_date_rules() -> Vec<DateRule> {
    DEFAULT_RULES.clone()
}

fn resolve_tomorrow(_: &Captures<'_>, today: NaiveDate, _: &InterpreterConfig) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(1))
}

fn resolve_today(_: &Captures<'_>, today: NaiveDate, _: &InterpreterConfig) -> Option<NaiveDate> {
    Some(today)
}

fn resolve_weekday(
    caps: &Captures<'_>,
    today: NaiveDate,
    config: &InterpreterConfig,
) -> Option<NaiveDate> {
    let target: Weekday = caps.get(3)?.as_str().parse().ok()?;
    let qualifier = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().to_ascii_lowercase());
    let days = days_until(today.weekday(), target, qualifier.as_deref(), config.next_weekday);
    today.checked_add_days(Days::new(days))
}

/// `(target + 7 - current) % 7`, except that "next" skips today under
/// [`NextWeekdayPolicy::SkipToday`].
pub fn days_until(
    current: Weekday,
    target: Weekday,
    qualifier: Option<&str>,
    policy: NextWeekdayPolicy,
) -> u64 {
    let offset = (target.num_days_from_sunday() + 7 - current.num_days_from_sunday()) % 7;
    match (offset, qualifier, policy) {
        (0, Some("next"), NextWeekdayPolicy::SkipToday) => 7,
        _ => u64::from(offset),
    }
}

fn resolve_month_day(
    caps: &Captures<'_>,
    today: NaiveDate,
    _: &InterpreterConfig,
) -> Option<NaiveDate> {
    let month: Month = caps.get(1)?.as_str().parse().ok()?;
    let day: i64 = caps.get(2)?.as_str().parse().ok()?;
    let year = match caps.get(3) {
        Some(year) => year.as_str().parse().ok()?,
        None => today.year(),
    };

    // Day numbers past the end of the month roll into the next one.
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    first.checked_add_signed(chrono::Duration::days(day - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn first_match(text: &str) -> Option<(String, String)> {
        default_date_rules().into_iter().find_map(|rule| {
            rule.captures(text).map(|caps| (rule.name().to_string(), caps[0].to_string()))
        })
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = default_date_rules().iter().map(DateRule::name).collect();
        assert_eq!(names, ["tomorrow", "today", "weekday", "month_day"]);
    }

    #[test_case("lunch tomorrow", "tomorrow", "tomorrow")]
    #[test_case("lunch on tomorrow", "tomorrow", "on tomorrow")]
    #[test_case("call mom for today", "today", "for today")]
    #[test_case("gym on Friday", "weekday", "on Friday")]
    #[test_case("gym next friday", "weekday", "next friday")]
    #[test_case("gym on this Friday", "weekday", "on this Friday")]
    #[test_case("dentist on April 15th", "month_day", "on April 15th")]
    #[test_case("launch march 3, 2027", "month_day", "march 3, 2027")]
    #[test_case("party December 31 2026", "month_day", "December 31 2026")]
    fn test_matches(text: &str, rule: &str, phrase: &str) {
        assert_eq!(first_match(text), Some((rule.to_string(), phrase.to_string())));
    }

    #[test_case("friday drinks")]
    #[test_case("todays agenda")]
    #[test_case("may the fourth")]
    #[test_case("just some random text")]
    fn test_no_match(text: &str) {
        assert_eq!(first_match(text), None);
    }

    #[test]
    fn test_days_until() {
        use Weekday::*;
        let include = NextWeekdayPolicy::IncludeToday;
        let skip = NextWeekdayPolicy::SkipToday;
        assert_eq!(days_until(Sun, Mon, Some("next"), include), 1);
        assert_eq!(days_until(Mon, Sun, None, include), 6);
        assert_eq!(days_until(Mon, Mon, Some("next"), include), 0);
        assert_eq!(days_until(Mon, Mon, Some("next"), skip), 7);
        assert_eq!(days_until(Mon, Mon, Some("this"), skip), 0);
        assert_eq!(days_until(Mon, Mon, None, skip), 0);
    }

    #[test]
    fn test_month_day_rollover_and_year() {
        let rules = default_date_rules();
        let month_day = rules.iter().find(|r| r.name() == "month_day").unwrap();
        let config = InterpreterConfig::default();
        let today = date(2026, 10, 18);

        let resolve = |text: &str| {
            let caps = month_day.captures(text).unwrap();
            month_day.resolve(&caps, today, &config)
        };
        assert_eq!(resolve("april 15th"), Some(date(2026, 4, 15)));
        assert_eq!(resolve("april 31"), Some(date(2026, 5, 1)));
        assert_eq!(resolve("march 0"), Some(date(2026, 2, 28)));
        assert_eq!(resolve("february 29, 2028"), Some(date(2028, 2, 29)));
    }
}
