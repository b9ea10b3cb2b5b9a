//! Voice phrase interpreter.
//!
//! Turns a finished transcript such as "Add meeting with John tomorrow at
//! 2pm" into an [`EventDraft`]. Matching is case-insensitive and the
//! original casing is kept in the title.
//!
//! The work happens in three independent passes over the sanitised text:
//!
//! 1. the first matching [`DateRule`] fixes the date (required),
//! 2. [`time_phrase::extract_time_phrase`] finds an optional time or range,
//! 3. a trailing "about ..." after either phrase becomes the description.
//!
//! Whatever is left, minus the command verb, is the title.

pub mod date_rules;
pub mod time_phrase;
pub mod title;
pub mod utils;

use chrono::{Local, NaiveDate};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use crate::config::{EmptyTitlePolicy, InterpreterConfig};
use crate::event::EventDraft;
pub use date_rules::{DateResolver, DateRule, default_date_rules};
pub use time_phrase::{TimePhrase, extract_time_phrase, parse_time_with_ampm};

static ABOUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\babout\b").expect("about pattern"));

/// Why a transcript produced no draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no date phrase found")]
    NoDate,
    #[error("'{0}' does not name a calendar date")]
    InvalidDate(String),
    #[error("nothing is left for a title once the date and time are removed")]
    EmptyTitle,
}

impl ParseError {
    /// True for the hard failures where no date could be recognised.
    pub fn is_unparsed(&self) -> bool {
        !matches!(self, ParseError::EmptyTitle)
    }
}

/// The date phrase that won, with its resolved date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub rule: &'static str,
    pub span: Range<usize>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct Interpreter {
    rules: Vec<DateRule>,
    config: InterpreterConfig,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(InterpreterConfig::default())
    }
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self::with_rules(default_date_rules(), config)
    }

    /// Use a custom rule chain. Rules are tried in the order given.
    pub fn with_rules(rules: Vec<DateRule>, config: InterpreterConfig) -> Self {
        Self { rules, config }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: DateRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[DateRule] {
        &self.rules
    }

    /// Interpret `transcript` relative to the local calendar date.
    pub fn parse(&self, transcript: &str) -> Result<EventDraft, ParseError> {
        self.parse_on(transcript, Local::now().date_naive())
    }

    /// Interpret `transcript` with `today` fixed by the caller.
    pub fn parse_on(&self, transcript: &str, today: NaiveDate) -> Result<EventDraft, ParseError> {
        let text = utils::sanitize_user_input(transcript);
        debug!("Interpreting transcript: '{}'", text);

        let date_match = self.match_date(&text, today)?;
        let time = extract_time_phrase(&text);

        let mut spans = vec![date_match.span.clone()];
        if let Some(time) = &time {
            spans.push(time.span.clone());
        }
        let description = extract_description(&text, &spans);
        if let Some((span, _)) = &description {
            spans.push(span.clone());
        }

        let mut title = title::clean_title(&text, &spans);
        if title.is_empty() {
            match self.config.empty_title {
                EmptyTitlePolicy::Reject => return Err(ParseError::EmptyTitle),
                EmptyTitlePolicy::Placeholder => {
                    debug!("Empty title, using placeholder '{}'", self.config.placeholder_title);
                    title = self.config.placeholder_title.clone();
                }
            }
        }

        let (start_time, end_time) = match time {
            Some(TimePhrase { start, end, .. }) => (Some(start), end),
            None => (None, None),
        };

        let draft = EventDraft {
            title,
            date: date_match.date,
            start_time,
            end_time,
            description: description.map(|(_, text)| text),
        };
        debug!("Interpreted draft: {:?}", draft);
        Ok(draft)
    }

    /// Run the rule chain. The first rule whose pattern matches decides.
    pub fn match_date(&self, text: &str, today: NaiveDate) -> Result<DateMatch, ParseError> {
        for rule in &self.rules {
            let Some(caps) = rule.captures(text) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };
            debug!("Date rule '{}' matched '{}'", rule.name(), whole.as_str());

            return match rule.resolve(&caps, today, &self.config) {
                Some(date) => Ok(DateMatch { rule: rule.name(), span: whole.range(), date }),
                None => Err(ParseError::InvalidDate(whole.as_str().trim().to_string())),
            };
        }
        Err(ParseError::NoDate)
    }
}

/// Interpret `transcript` with the default rules and settings.
pub fn parse_voice_input(transcript: &str) -> Result<EventDraft, ParseError> {
    Interpreter::default().parse(transcript)
}

/// "about <topic>" following the date or time phrase. The topic runs up to
/// the next recognised phrase or the end of the transcript.
fn extract_description(text: &str, spans: &[Range<usize>]) -> Option<(Range<usize>, String)> {
    let anchor = spans.iter().map(|s| s.end).min()?;
    let about = ABOUT.find_iter(text).find(|m| m.start() >= anchor)?;
    let end = spans
        .iter()
        .map(|s| s.start)
        .filter(|&start| start > about.start())
        .min()
        .unwrap_or(text.len());

    let topic = text
        .get(about.end()..end)?
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '!' | '?'));
    if topic.is_empty() {
        return None;
    }
    Some((about.start()..end, topic.to_string()))
}
