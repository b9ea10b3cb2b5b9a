//! Event storage.
//!
//! [`EventStore`] is the capability the shell and the month view depend on.
//! [`InMemoryEventStore`] keeps events in insertion order for the lifetime of
//! the process; [`SharedEventStore`] puts one behind a lock for callers on
//! several threads.

use chrono::NaiveDate;
use log::{info, warn};
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use crate::calendar::is_same_day;
use crate::event::{CalendarEvent, EventDraft, Swatch};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no event with id '{0}'")]
    NotFound(String),
    #[error("id prefix '{0}' matches more than one event")]
    AmbiguousId(String),
}

pub trait EventStore {
    /// Store a confirmed draft under a fresh id.
    fn add(&mut self, draft: EventDraft, color: Option<Swatch>) -> CalendarEvent;

    /// Replace the event with the same id. The store is left untouched when
    /// the id is unknown.
    fn update(&mut self, event: CalendarEvent) -> Result<(), StoreError>;

    /// Delete by id. Removing an unknown id is not an error.
    fn remove(&mut self, id: &str) -> Option<CalendarEvent>;

    /// Events on `date`, in insertion order.
    fn by_day(&self, date: NaiveDate) -> Vec<CalendarEvent>;

    fn get(&self, id: &str) -> Option<CalendarEvent>;

    fn all(&self) -> Vec<CalendarEvent>;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a full id or a unique prefix of one.
    fn resolve_id(&self, prefix: &str) -> Result<String, StoreError> {
        let prefix = prefix.trim();
        if let Some(event) = self.get(prefix) {
            return Ok(event.id);
        }
        let mut candidates = self.all().into_iter().filter(|e| !prefix.is_empty() && e.id.starts_with(prefix));
        match (candidates.next(), candidates.next()) {
            (Some(event), None) => Ok(event.id),
            (Some(_), Some(_)) => Err(StoreError::AmbiguousId(prefix.to_string())),
            (None, _) => Err(StoreError::NotFound(prefix.to_string())),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    events: Vec<CalendarEvent>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryEventStore {
    fn add(&mut self, draft: EventDraft, color: Option<Swatch>) -> CalendarEvent {
        let event = CalendarEvent::from_draft(Uuid::new_v4().to_string(), draft, color);
        info!("Added event '{}' on {} ({})", event.title, event.date, event.id);
        self.events.push(event.clone());
        event
    }

    fn update(&mut self, event: CalendarEvent) -> Result<(), StoreError> {
        match self.events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => {
                info!("Updated event {}", event.id);
                *existing = event;
                Ok(())
            }
            None => {
                warn!("Ignoring update for unknown event {}", event.id);
                Err(StoreError::NotFound(event.id))
            }
        }
    }

    fn remove(&mut self, id: &str) -> Option<CalendarEvent> {
        let index = self.events.iter().position(|event| event.id == id)?;
        info!("Removed event {}", id);
        Some(self.events.remove(index))
    }

    fn by_day(&self, date: NaiveDate) -> Vec<CalendarEvent> {
        self.events.iter().filter(|event| is_same_day(event.date, date)).cloned().collect()
    }

    fn get(&self, id: &str) -> Option<CalendarEvent> {
        self.events.iter().find(|event| event.id == id).cloned()
    }

    fn all(&self) -> Vec<CalendarEvent> {
        self.events.clone()
    }

    fn len(&self) -> usize {
        self.events.len()
    }
}

/// A cloneable handle to one store, safe to use from several threads.
/// Mutations hold the write lock; reads return snapshots.
#[derive(Debug, Default, Clone)]
pub struct SharedEventStore {
    inner: Arc<RwLock<InMemoryEventStore>>,
}

impl SharedEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&InMemoryEventStore) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut InMemoryEventStore) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl EventStore for SharedEventStore {
    fn add(&mut self, draft: EventDraft, color: Option<Swatch>) -> CalendarEvent {
        self.write(|store| store.add(draft, color))
    }

    fn update(&mut self, event: CalendarEvent) -> Result<(), StoreError> {
        self.write(|store| store.update(event))
    }

    fn remove(&mut self, id: &str) -> Option<CalendarEvent> {
        self.write(|store| store.remove(id))
    }

    fn by_day(&self, date: NaiveDate) -> Vec<CalendarEvent> {
        self.read(|store| store.by_day(date))
    }

    fn get(&self, id: &str) -> Option<CalendarEvent> {
        self.read(|store| store.get(id))
    }

    fn all(&self) -> Vec<CalendarEvent> {
        self.read(|store| store.all())
    }

    fn len(&self) -> usize {
        self.read(|store| store.len())
    }
}
