use std::{
    collections::VecDeque,
    fmt::{Debug, Display},
    io::{Error, ErrorKind},
    num::NonZeroUsize,
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use log::{log_enabled, trace, Level};

use super::{
    cancel::{CancelToken, Interrupt},
    PopStatus, PushStatus,
};
use crate::asserted_short_name;

/// Capacity used by [BoundedQueue::default]
pub const DEFAULT_CAPACITY: usize = 32;

/// Fixed capacity FIFO shared between a producing and a consuming thread.
///
/// All access goes through a single [Mutex]. Producers park on `not_full` while the queue holds `capacity` items,
/// consumers park on `not_empty` while it holds none. Every state change wakes all waiters on the complementary
/// condition and each waiter re-checks its predicate before proceeding.
///
/// Blocking calls take a [CancelToken]. For a parked thread to observe cancellation the queue has to be attached
/// to that token via [CancelToken::attach], otherwise the token is only checked when the thread wakes for other reasons.
///
/// # Example
/// ```
/// use pcq_core::prelude::*;
/// use std::num::NonZeroUsize;
///
/// let queue = BoundedQueue::<i32>::new_ref(NonZeroUsize::new(2).unwrap());
/// let token = CancelToken::new();
/// token.attach(queue.clone());
///
/// queue.push(5, &token).unwrap().unwrap_completed();
/// queue.push(-3, &token).unwrap().unwrap_completed();
/// assert!(queue.try_push(1000).unwrap().is_wouldblock());
///
/// assert_eq!(queue.pop(&token).unwrap().unwrap_completed(), 5);
/// assert_eq!(queue.pop(&token).unwrap().unwrap_completed(), -3);
/// ```
#[derive(Debug)]
pub struct BoundedQueue<T> {
    capacity: NonZeroUsize,
    items: Mutex<VecDeque<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}
impl<T> BoundedQueue<T> {
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity.get())),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }
    pub fn new_ref(capacity: NonZeroUsize) -> Arc<Self> {
        Arc::new(Self::with_capacity(capacity))
    }
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Appends `value` at the tail, blocking while the queue is full.
    ///
    /// Returns [PushStatus::Cancelled] with the value handed back if the token is cancelled before space becomes available.
    pub fn push(&self, value: T, token: &CancelToken) -> Result<PushStatus<T>, Error> {
        self.push_until(value, token, None)
    }
    /// Same as [Self::push] but gives up with [PushStatus::WouldBlock] once `timeout` elapsed.
    ///
    /// A `timeout` too large to be represented as a deadline waits like [Self::push].
    pub fn push_timeout(&self, value: T, token: &CancelToken, timeout: Duration) -> Result<PushStatus<T>, Error> {
        self.push_until(value, token, Instant::now().checked_add(timeout))
    }
    /// Appends `value` only if there is space right now.
    pub fn try_push(&self, value: T) -> Result<PushStatus<T>, Error> {
        let mut items = self.lock()?;
        if items.len() >= self.capacity.get() {
            return Ok(PushStatus::WouldBlock(value));
        }
        items.push_back(value);
        drop(items);
        self.not_empty.notify_all();
        Ok(PushStatus::Completed)
    }

    /// Removes and returns the head value, blocking while the queue is empty.
    ///
    /// Returns [PopStatus::Cancelled] if the token is cancelled before a value becomes available.
    pub fn pop(&self, token: &CancelToken) -> Result<PopStatus<T>, Error> {
        self.pop_until(token, None)
    }
    /// Same as [Self::pop] but gives up with [PopStatus::WouldBlock] once `timeout` elapsed.
    ///
    /// A `timeout` too large to be represented as a deadline waits like [Self::pop].
    pub fn pop_timeout(&self, token: &CancelToken, timeout: Duration) -> Result<PopStatus<T>, Error> {
        self.pop_until(token, Instant::now().checked_add(timeout))
    }
    /// Removes the head value only if there is one right now.
    pub fn try_pop(&self) -> Result<PopStatus<T>, Error> {
        let mut items = self.lock()?;
        match items.pop_front() {
            Some(value) => {
                drop(items);
                self.not_full.notify_all();
                Ok(PopStatus::Completed(value))
            }
            None => Ok(PopStatus::WouldBlock),
        }
    }

    fn push_until(&self, value: T, token: &CancelToken, deadline: Option<Instant>) -> Result<PushStatus<T>, Error> {
        let mut items = self.lock()?;
        loop {
            if token.is_cancelled() {
                return Ok(PushStatus::Cancelled(value));
            }
            if items.len() < self.capacity.get() {
                break;
            }
            if log_enabled!(Level::Trace) {
                trace!("{} full, producer waiting", asserted_short_name!("BoundedQueue", Self));
            }
            items = match deadline {
                None => self.not_full.wait(items).map_err(poisoned)?,
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(PushStatus::WouldBlock(value));
                    }
                    self.not_full.wait_timeout(items, deadline - now).map_err(poisoned)?.0
                }
            };
        }
        items.push_back(value);
        drop(items);
        self.not_empty.notify_all();
        Ok(PushStatus::Completed)
    }

    fn pop_until(&self, token: &CancelToken, deadline: Option<Instant>) -> Result<PopStatus<T>, Error> {
        let mut items = self.lock()?;
        let value = loop {
            if token.is_cancelled() {
                return Ok(PopStatus::Cancelled);
            }
            if let Some(value) = items.pop_front() {
                break value;
            }
            if log_enabled!(Level::Trace) {
                trace!("{} empty, consumer waiting", asserted_short_name!("BoundedQueue", Self));
            }
            items = match deadline {
                None => self.not_empty.wait(items).map_err(poisoned)?,
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(PopStatus::WouldBlock);
                    }
                    self.not_empty.wait_timeout(items, deadline - now).map_err(poisoned)?.0
                }
            };
        };
        drop(items);
        self.not_full.notify_all();
        Ok(PopStatus::Completed(value))
    }

    #[inline(always)]
    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<T>>, Error> {
        self.items.lock().map_err(poisoned)
    }
}
impl<T> Default for BoundedQueue<T> {
    /// Creates a new [BoundedQueue] with a capacity of [DEFAULT_CAPACITY]
    fn default() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CAPACITY).expect("DEFAULT_CAPACITY is non zero"))
    }
}
impl<T: Debug + Send> Interrupt for BoundedQueue<T> {
    fn interrupt(&self) {
        // taken so that a waiter between its token check and its wait cannot miss the notification
        let _items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }
}
impl<T> Display for BoundedQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<len: {}, capacity: {}>", asserted_short_name!("BoundedQueue", Self), self.len(), self.capacity())
    }
}

fn poisoned<G>(e: PoisonError<G>) -> Error {
    Error::new(ErrorKind::Other, format!("BoundedQueue lock poisoned: {}", e))
}
