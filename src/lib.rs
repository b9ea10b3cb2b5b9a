pub mod calendar;
pub mod cli;
pub mod config;
pub mod event;
pub mod parser;
pub mod render;
pub mod shell;
pub mod store;

use env_logger::Env;

/// Initialise `env_logger` with a `timestamp [LEVEL] message` format.
/// `RUST_LOG` overrides `default_filter`.
pub fn init_logger(default_filter: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use calendar::{MonthCursor, MonthView, build_month_grid, format_long, is_same_day};
pub use config::Config;
pub use event::{CalendarEvent, EventDraft, Swatch};
pub use parser::{Interpreter, ParseError, parse_voice_input};
pub use store::{EventStore, InMemoryEventStore, SharedEventStore, StoreError};
