use std::{
    fmt::{Debug, Display},
    io::Error,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Utc};

use crate::{asserted_short_name, prelude::*};

/// What happened on either side of the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
    Produced(T),
    Consumed(T),
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub role: Role,
    pub time: DateTime<Utc>,
    pub event: Event<T>,
}
impl<T: Debug> Display for Entry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{:?}", self.time.format("%H:%M:%S%.6f"), self.role, self.event)
    }
}

/// Keeps every event in memory in the order the callbacks were invoked.
///
/// Used to verify that the sequence leaving the queue is exactly the sequence that entered it.
#[derive(Debug)]
pub struct StoreCallback<T: Value> {
    entries: Mutex<Vec<Entry<T>>>,
}
impl<T: Value> Default for StoreCallback<T> {
    fn default() -> Self {
        Self { entries: Mutex::new(Vec::new()) }
    }
}
impl<T: Value> StoreCallback<T> {
    pub fn new_ref() -> Arc<Self> {
        Arc::new(Self::default())
    }
    pub fn len(&self) -> usize {
        self.lock().len()
    }
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
    pub fn entries(&self) -> Vec<Entry<T>> {
        self.lock().clone()
    }
    /// Values in the order they were pushed
    pub fn produced(&self) -> Vec<T> {
        self.lock()
            .iter()
            .filter_map(|entry| match &entry.event {
                Event::Produced(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }
    /// Values in the order they were popped
    pub fn consumed(&self) -> Vec<T> {
        self.lock()
            .iter()
            .filter_map(|entry| match &entry.event {
                Event::Consumed(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }
    /// Roles that reported [Event::Cancelled] or [Event::Failed]
    pub fn stopped(&self) -> Vec<(Role, Event<T>)> {
        self.lock()
            .iter()
            .filter(|entry| matches!(entry.event, Event::Cancelled | Event::Failed(_)))
            .map(|entry| (entry.role, entry.event.clone()))
            .collect()
    }

    fn push(&self, role: Role, event: Event<T>) {
        self.lock().push(Entry { role, time: Utc::now(), event });
    }
    fn lock(&self) -> MutexGuard<'_, Vec<Entry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
impl<T: Value> Display for StoreCallback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}, len: {}>", asserted_short_name!("StoreCallback", Self), short_type_name::<T>(), self.len())
    }
}
impl<T: Value> CallbackStop for StoreCallback<T> {
    fn on_cancelled(&self, role: Role) {
        self.push(role, Event::Cancelled);
    }
    fn on_failed(&self, role: Role, e: &Error) {
        self.push(role, Event::Failed(e.to_string()));
    }
}
impl<T: Value> CallbackProduce<T> for StoreCallback<T> {
    #[inline(always)]
    fn on_produced(&self, value: &T) {
        self.push(Role::Producer, Event::Produced(value.clone()));
    }
}
impl<T: Value> CallbackConsume<T> for StoreCallback<T> {
    #[inline(always)]
    fn on_consumed(&self, value: &T) {
        self.push(Role::Consumer, Event::Consumed(value.clone()));
    }
}
impl<T: Value> CallbackProduceConsume<T> for StoreCallback<T> {}
