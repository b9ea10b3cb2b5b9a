//! Interactive terminal session.
//!
//! [`Session`] owns the event store, the interpreter and the view state (the
//! visible month and the selected day). [`run_shell`] wires it to a
//! `rustyline` prompt: plain lines are transcripts, lines starting with `:`
//! are commands.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{debug, error, info};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::calendar::{MonthCursor, MonthView};
use crate::config::Config;
use crate::event::{CalendarEvent, EventDraft, Swatch, UnknownSwatch};
use crate::parser::utils::preprocess_input;
use crate::parser::{Interpreter, ParseError};
use crate::render::{render_day, render_draft, render_event_line, render_month, short_id};
use crate::store::{EventStore, InMemoryEventStore, StoreError};

pub const EXAMPLE_PHRASE: &str = "Add meeting with John tomorrow at 2pm";

const HELP: &str = "\
Say or type an event, e.g. \"Add meeting with John tomorrow at 2pm\".

Commands:
  :month                 Show the current month
  :next / :prev          Move one month forward / back
  :today                 Jump to today
  :select <date>         Select a day (2026-10-20, tomorrow, next friday, ...)
  :day                   List events on the selected day
  :events                List every event
  :delete <id>           Delete an event (any unique id prefix)
  :rename <id> <title>   Change an event's title
  :color <id> <colour>   purple, orange, green, blue or pink
  :help                  Show this help
  :quit                  Leave";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("unknown command ':{0}', type :help for a list")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("could not understand the date '{0}'")]
    InvalidDate(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Swatch(#[from] UnknownSwatch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Month,
    Next,
    Prev,
    Today,
    Select(String),
    Day,
    Events,
    Delete(String),
    Rename { id: String, title: String },
    Color { id: String, swatch: Swatch },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Command(Command),
    Transcript(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Split a prompt line into a command or a transcript.
pub fn parse_input(line: &str) -> Result<Input, ShellError> {
    let line = line.trim();
    let Some(command_line) = line.strip_prefix(':') else {
        return Ok(if line.is_empty() { Input::Empty } else { Input::Transcript(line.to_string()) });
    };

    let (name, rest) = match command_line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command_line, ""),
    };
    let name = preprocess_input(name);

    let command = match name.as_str() {
        "month" | "m" => Command::Month,
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "today" | "t" => Command::Today,
        "day" | "d" => Command::Day,
        "events" | "ls" => Command::Events,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "select" | "s" => {
            if rest.is_empty() {
                return Err(ShellError::Usage(":select <date>"));
            }
            Command::Select(rest.to_string())
        }
        "delete" | "rm" => {
            if rest.is_empty() {
                return Err(ShellError::Usage(":delete <id>"));
            }
            Command::Delete(rest.to_string())
        }
        "rename" => match rest.split_once(char::is_whitespace) {
            Some((id, title)) if !title.trim().is_empty() => {
                Command::Rename { id: id.to_string(), title: title.trim().to_string() }
            }
            _ => return Err(ShellError::Usage(":rename <id> <title>")),
        },
        "color" | "colour" => match rest.split_once(char::is_whitespace) {
            Some((id, swatch)) => Command::Color { id: id.to_string(), swatch: swatch.parse()? },
            None => return Err(ShellError::Usage(":color <id> <colour>")),
        },
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };
    Ok(Input::Command(command))
}

/// Empty answers count as yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(preprocess_input(answer).as_str(), "" | "y" | "yes")
}

pub struct Session<S: EventStore> {
    store: S,
    interpreter: Interpreter,
    today: NaiveDate,
    cursor: MonthCursor,
    selected: NaiveDate,
    default_color: Option<Swatch>,
}

impl Session<InMemoryEventStore> {
    pub fn from_config(config: &Config, today: NaiveDate) -> Self {
        Session::new(
            InMemoryEventStore::new(),
            Interpreter::new(config.interpreter.clone()),
            today,
            config.calendar.default_color,
        )
    }
}

impl<S: EventStore> Session<S> {
    pub fn new(store: S, interpreter: Interpreter, today: NaiveDate, default_color: Option<Swatch>) -> Self {
        Self {
            store,
            interpreter,
            today,
            cursor: MonthCursor::containing(today),
            selected: today,
            default_color,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Keep "today" current across midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn interpret(&self, transcript: &str) -> Result<EventDraft, ParseError> {
        self.interpreter.parse_on(transcript, self.today)
    }

    /// Store a confirmed draft and bring its day into view.
    pub fn save(&mut self, draft: EventDraft, color: Option<Swatch>) -> CalendarEvent {
        let event = self.store.add(draft, color.or(self.default_color));
        self.selected = event.date;
        self.cursor = MonthCursor::containing(event.date);
        event
    }

    pub fn month_view(&self) -> MonthView {
        MonthView::build(self.cursor, self.today, self.selected, &self.store)
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, ShellError> {
        debug!("Executing shell command {:?}", command);
        let output = match command {
            Command::Month => render_month(&self.month_view()),
            Command::Next => {
                self.cursor = self.cursor.next();
                render_month(&self.month_view())
            }
            Command::Prev => {
                self.cursor = self.cursor.prev();
                render_month(&self.month_view())
            }
            Command::Today => {
                self.cursor = MonthCursor::containing(self.today);
                self.selected = self.today;
                render_month(&self.month_view())
            }
            Command::Select(text) => {
                let date = self.resolve_date(&text)?;
                self.selected = date;
                self.cursor = MonthCursor::containing(date);
                format!("{}\n\n{}", render_month(&self.month_view()), self.render_selected_day())
            }
            Command::Day => self.render_selected_day(),
            Command::Events => {
                let events = self.store.all();
                if events.is_empty() {
                    "No events".to_string()
                } else {
                    events
                        .iter()
                        .map(|event| format!("{}  {}", event.date, render_event_line(event)))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Command::Delete(prefix) => {
                let id = self.store.resolve_id(&prefix)?;
                match self.store.remove(&id) {
                    Some(event) => format!("Deleted '{}'", event.title),
                    None => return Err(StoreError::NotFound(id).into()),
                }
            }
            Command::Rename { id, title } => {
                let mut event = self.find(&id)?;
                event.title = title;
                let message = format!("Renamed to '{}'", event.title);
                self.store.update(event)?;
                message
            }
            Command::Color { id, swatch } => {
                let mut event = self.find(&id)?;
                event.color = Some(swatch);
                let message = format!("'{}' is now {}", event.title, swatch);
                self.store.update(event)?;
                message
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Output(output))
    }

    fn find(&self, prefix: &str) -> Result<CalendarEvent, ShellError> {
        let id = self.store.resolve_id(prefix)?;
        self.store.get(&id).ok_or_else(|| StoreError::NotFound(id).into())
    }

    /// ISO dates, or any phrase the interpreter's date rules understand.
    fn resolve_date(&self, text: &str) -> Result<NaiveDate, ShellError> {
        if let Ok(date) = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
            return Ok(date);
        }
        self.interpreter
            .match_date(text, self.today)
            .map(|found| found.date)
            .map_err(|_| ShellError::InvalidDate(text.trim().to_string()))
    }

    fn render_selected_day(&self) -> String {
        render_day(self.selected, &self.store.by_day(self.selected))
    }
}

/// Message shown for a transcript that produced no draft.
pub fn describe_parse_error(err: &ParseError) -> String {
    if err.is_unparsed() {
        format!("Could not understand ({}). Try saying something like \"{}\"", err, EXAMPLE_PHRASE)
    } else {
        format!("Heard a date but no title ({}). Try \"{}\"", err, EXAMPLE_PHRASE)
    }
}

pub fn describe_saved(event: &CalendarEvent) -> String {
    format!("Saved '{}' ({})", event.title, short_id(&event.id))
}

/// Run the interactive prompt until `:quit`, Ctrl-C or Ctrl-D.
pub fn run_shell(config: &Config) -> Result<()> {
    info!("Starting voicecal shell");
    let mut session = Session::from_config(config, Local::now().date_naive());
    let mut rl = DefaultEditor::new()?;

    println!("Welcome to voicecal! Type :help for commands.");
    println!("Example: {}", EXAMPLE_PHRASE);
    println!();
    println!("{}", render_month(&session.month_view()));

    loop {
        let line = match rl.readline("voicecal> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                error!("Failed to read input: {:?}", err);
                break;
            }
        };
        let _ = rl.add_history_entry(line.as_str());
        session.set_today(Local::now().date_naive());

        match parse_input(&line) {
            Ok(Input::Empty) => {}
            Ok(Input::Command(command)) => match session.execute(command) {
                Ok(Outcome::Output(output)) => println!("{}", output),
                Ok(Outcome::Quit) => break,
                Err(err) => println!("{}", err),
            },
            Ok(Input::Transcript(transcript)) => {
                if let Err(err) = confirm_transcript(&mut rl, &mut session, &transcript) {
                    error!("Failed to handle transcript: {:?}", err);
                }
            }
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}

fn confirm_transcript<S: EventStore>(
    rl: &mut DefaultEditor,
    session: &mut Session<S>,
    transcript: &str,
) -> Result<()> {
    let draft = match session.interpret(transcript) {
        Ok(draft) => draft,
        Err(err) => {
            println!("{}", describe_parse_error(&err));
            return Ok(());
        }
    };

    println!("{}", render_draft(&draft));
    if !is_affirmative(&rl.readline("Save this event? [Y/n] ")?) {
        println!("Discarded");
        return Ok(());
    }

    let color = loop {
        let answer = rl.readline("Colour (purple, orange, green, blue, pink) [default]: ")?;
        if answer.trim().is_empty() {
            break None;
        }
        match answer.parse::<Swatch>() {
            Ok(swatch) => break Some(swatch),
            Err(err) => println!("{}", err),
        }
    };

    let event = session.save(draft, color);
    println!("{}", describe_saved(&event));
    println!("{}", render_month(&session.month_view()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> Session<InMemoryEventStore> {
        Session::from_config(&Config::default(), date(2026, 10, 18))
    }

    fn output(outcome: Outcome) -> String {
        match outcome {
            Outcome::Output(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   "), Ok(Input::Empty));
        assert_eq!(
            parse_input(" Add lunch today "),
            Ok(Input::Transcript("Add lunch today".to_string()))
        );
        assert_eq!(parse_input(":NEXT"), Ok(Input::Command(Command::Next)));
        assert_eq!(
            parse_input(":select next friday"),
            Ok(Input::Command(Command::Select("next friday".to_string())))
        );
        assert_eq!(
            parse_input(":rename ab12 Team lunch"),
            Ok(Input::Command(Command::Rename { id: "ab12".to_string(), title: "Team lunch".to_string() }))
        );
        assert_eq!(
            parse_input(":color ab12 green"),
            Ok(Input::Command(Command::Color { id: "ab12".to_string(), swatch: Swatch::Green }))
        );
        assert_eq!(parse_input(":rename ab12"), Err(ShellError::Usage(":rename <id> <title>")));
        assert!(matches!(parse_input(":color ab12 teal"), Err(ShellError::Swatch(_))));
        assert_eq!(parse_input(":fly"), Err(ShellError::UnknownCommand("fly".to_string())));
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative(""));
        assert!(is_affirmative(" Yes "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("nope"));
    }

    #[test]
    fn test_save_confirmed_draft() {
        let mut session = Session::new(
            InMemoryEventStore::new(),
            Interpreter::default(),
            date(2026, 10, 18),
            Some(Swatch::Blue),
        );
        let draft = session.interpret("Add dentist visit on November 3rd at 10am").unwrap();
        let event = session.save(draft, None);

        assert_eq!(event.color, Some(Swatch::Blue));
        assert_eq!(session.selected(), date(2026, 11, 3));
        assert_eq!(session.cursor(), MonthCursor::new(2026, 10));
        assert_eq!(session.store().by_day(date(2026, 11, 3)), vec![event.clone()]);

        let day = output(session.execute(Command::Day).unwrap());
        assert!(day.starts_with("Tuesday, November 3"));
        assert!(day.contains("10am  dentist visit  [blue]"));

        let overridden = session.save(EventDraft::new("party", date(2026, 11, 3)), Some(Swatch::Pink));
        assert_eq!(overridden.color, Some(Swatch::Pink));
    }

    #[test]
    fn test_navigation_crosses_years() {
        let mut session = Session::from_config(&Config::default(), date(2026, 12, 31));
        let next = output(session.execute(Command::Next).unwrap());
        assert!(next.contains("January 2027"));
        session.execute(Command::Prev).unwrap();
        session.execute(Command::Prev).unwrap();
        assert_eq!(session.cursor(), MonthCursor::new(2026, 10));

        let today = output(session.execute(Command::Today).unwrap());
        assert!(today.contains("December 2026"));
        assert!(today.contains("{31}"));
    }

    #[test]
    fn test_select_accepts_phrases() {
        let mut session = session();
        let out = output(session.execute(Command::Select("next friday".to_string())).unwrap());
        assert_eq!(session.selected(), date(2026, 10, 23));
        assert!(out.contains("Friday, October 23"));
        assert!(out.contains("No events scheduled"));

        session.execute(Command::Select("2027-01-05".to_string())).unwrap();
        assert_eq!(session.cursor(), MonthCursor::new(2027, 0));

        assert_eq!(
            session.execute(Command::Select("someday".to_string())),
            Err(ShellError::InvalidDate("someday".to_string()))
        );
    }

    #[test]
    fn test_edit_commands_use_id_prefixes() {
        let mut session = session();
        let event = session.save(EventDraft::new("lunch", date(2026, 10, 20)), None);
        let prefix = event.id[..6].to_string();

        let renamed = output(
            session
                .execute(Command::Rename { id: prefix.clone(), title: "team lunch".to_string() })
                .unwrap(),
        );
        assert_eq!(renamed, "Renamed to 'team lunch'");
        session.execute(Command::Color { id: prefix.clone(), swatch: Swatch::Orange }).unwrap();

        let stored = session.store().get(&event.id).unwrap();
        assert_eq!(stored.title, "team lunch");
        assert_eq!(stored.color, Some(Swatch::Orange));

        let listed = output(session.execute(Command::Events).unwrap());
        assert!(listed.starts_with("2026-10-20  "));

        let deleted = output(session.execute(Command::Delete(prefix.clone())).unwrap());
        assert_eq!(deleted, "Deleted 'team lunch'");
        assert_eq!(
            session.execute(Command::Delete(prefix.clone())),
            Err(ShellError::Store(StoreError::NotFound(prefix)))
        );
        assert_eq!(output(session.execute(Command::Events).unwrap()), "No events");
    }

    #[test]
    fn test_quit_and_help() {
        let mut session = session();
        assert_eq!(session.execute(Command::Quit), Ok(Outcome::Quit));
        assert!(output(session.execute(Command::Help).unwrap()).contains(":select <date>"));
    }

    #[test]
    fn test_describe_saved_with_short_ids() {
        let short = CalendarEvent::from_draft("e1".to_string(), EventDraft::new("gym", date(2026, 10, 18)), None);
        assert_eq!(describe_saved(&short), "Saved 'gym' (e1)");

        let wide = CalendarEvent::from_draft("日本語のイベントID".to_string(), EventDraft::new("お茶", date(2026, 10, 18)), None);
        assert_eq!(describe_saved(&wide), "Saved 'お茶' (日本語のイベント)");
    }

    #[test]
    fn test_describe_parse_error() {
        assert!(describe_parse_error(&ParseError::NoDate).starts_with("Could not understand"));
        assert!(describe_parse_error(&ParseError::EmptyTitle).starts_with("Heard a date"));
    }
}
