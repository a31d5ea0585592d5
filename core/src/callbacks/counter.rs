use std::{
    fmt::Display,
    io::Error,
    sync::{
        atomic::{AtomicUsize, Ordering::Relaxed},
        Arc,
    },
};

use crate::{asserted_short_name, fmt_num, prelude::*};

#[derive(Debug)]
pub struct CounterCallback<T: Value> {
    produced: AtomicUsize,
    consumed: AtomicUsize,
    cancelled: AtomicUsize,
    failed: AtomicUsize,
    p1: std::marker::PhantomData<T>,
}
impl<T: Value> Default for CounterCallback<T> {
    fn default() -> Self {
        Self {
            produced: Default::default(),
            consumed: Default::default(),
            cancelled: Default::default(),
            failed: Default::default(),
            p1: std::marker::PhantomData,
        }
    }
}

impl<T: Value> CounterCallback<T> {
    pub fn new_ref() -> Arc<Self> {
        Arc::new(Self::default())
    }
    #[inline(always)]
    pub fn produced_count(&self) -> usize {
        self.produced.load(Relaxed)
    }
    #[inline(always)]
    pub fn consumed_count(&self) -> usize {
        self.consumed.load(Relaxed)
    }
    #[inline(always)]
    pub fn cancelled_count(&self) -> usize {
        self.cancelled.load(Relaxed)
    }
    #[inline(always)]
    pub fn failed_count(&self) -> usize {
        self.failed.load(Relaxed)
    }
}

impl<T: Value> Display for CounterCallback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}<produced: {}, consumed: {}, cancelled: {}, failed: {}>",
            asserted_short_name!("CounterCallback", Self),
            fmt_num!(self.produced_count()),
            fmt_num!(self.consumed_count()),
            self.cancelled_count(),
            self.failed_count(),
        )
    }
}

#[allow(unused_variables)]
impl<T: Value> CallbackStop for CounterCallback<T> {
    fn on_cancelled(&self, role: Role) {
        self.cancelled.fetch_add(1, Relaxed);
    }
    fn on_failed(&self, role: Role, e: &Error) {
        self.failed.fetch_add(1, Relaxed);
    }
}
#[allow(unused_variables)]
impl<T: Value> CallbackProduce<T> for CounterCallback<T> {
    fn on_produced(&self, value: &T) {
        self.produced.fetch_add(1, Relaxed);
    }
}
#[allow(unused_variables)]
impl<T: Value> CallbackConsume<T> for CounterCallback<T> {
    fn on_consumed(&self, value: &T) {
        self.consumed.fetch_add(1, Relaxed);
    }
}
impl<T: Value> CallbackProduceConsume<T> for CounterCallback<T> {}
