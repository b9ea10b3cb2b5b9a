//! Title cleanup once the date, time and description phrases are known.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static LEADING_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:add|schedule|create|put)\b(?:\s+an?\b)?").expect("leading verb pattern")
});

// The generic noun only goes when a naming word follows it; in
// "meeting with John" it is part of the title.
static NAMED_EVENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:an?|the)\s+)?(?:event|meeting|appointment|reminder)\s+(?:called|titled|named)\b")
        .expect("named event pattern")
});

// A generic noun on its own says nothing about the event.
static BARE_NOUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:an?|the)\s+)?(?:event|meeting|appointment|reminder)s?$").expect("bare noun pattern")
});

/// Replace each byte range of `text` with a single space. Overlapping ranges
/// are merged first.
pub fn remove_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut spans: Vec<Range<usize>> = spans.iter().filter(|s| !s.is_empty()).cloned().collect();
    spans.sort_by_key(|s| s.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in merged {
        let (start, end) = (span.start.min(text.len()), span.end.min(text.len()));
        if let Some(kept) = text.get(cursor..start) {
            out.push_str(kept);
        }
        out.push(' ');
        cursor = cursor.max(end);
    }
    if let Some(rest) = text.get(cursor..) {
        out.push_str(rest);
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trim_edges(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '!' | '?'))
}

/// Strip the command verb ("add", "schedule a", ...) and a generic
/// "event called" lead-in. A generic noun with nothing else left becomes
/// empty.
pub fn strip_filler_prefix(text: &str) -> &str {
    let text = trim_edges(text);
    let text = match LEADING_VERB.find(text) {
        Some(m) => text[m.end()..].trim_start(),
        None => text,
    };
    let text = match NAMED_EVENT.find(text) {
        Some(m) => text[m.end()..].trim_start(),
        None => text,
    };
    if BARE_NOUN.is_match(trim_edges(text)) {
        return "";
    }
    text
}

/// The title left after removing `spans` from the transcript. May be empty.
pub fn clean_title(text: &str, spans: &[Range<usize>]) -> String {
    let remaining = collapse_whitespace(&remove_spans(text, spans));
    trim_edges(strip_filler_prefix(&remaining)).to_string()
}
