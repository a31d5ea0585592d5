use std::{
    fmt::Display,
    io::Error,
    sync::Arc,
};

use log::{error, info, log, log_enabled, Level};

use crate::{asserted_short_name, prelude::*};

#[derive(Debug, Clone)]
pub struct LoggerCallback<T: Value> {
    level_produce: Level,
    level_consume: Level,
    phantom: std::marker::PhantomData<T>,
}
impl<T: Value> Default for LoggerCallback<T> {
    fn default() -> Self {
        Self {
            level_produce: Level::Info,
            level_consume: Level::Info,
            phantom: std::marker::PhantomData,
        }
    }
}

impl<T: Value> LoggerCallback<T> {
    pub fn with_level(level_produce: Level, level_consume: Level) -> Self {
        Self {
            level_produce,
            level_consume,
            phantom: std::marker::PhantomData,
        }
    }
    pub fn with_level_ref(level_produce: Level, level_consume: Level) -> Arc<Self> {
        Arc::new(Self::with_level(level_produce, level_consume))
    }
    pub fn new_ref() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl<T: Value> Display for LoggerCallback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<produce: {}, consume: {}>", asserted_short_name!("LoggerCallback", Self), self.level_produce, self.level_consume)
    }
}

impl<T: Value> CallbackStop for LoggerCallback<T> {
    fn on_cancelled(&self, role: Role) {
        if log_enabled!(Level::Info) {
            info!("{}::on_cancelled {}", asserted_short_name!("LoggerCallback", Self), role);
        }
    }
    fn on_failed(&self, role: Role, e: &Error) {
        error!("{}::on_failed {}, error: {}", asserted_short_name!("LoggerCallback", Self), role, e);
    }
}
impl<T: Value> CallbackProduce<T> for LoggerCallback<T> {
    fn on_produced(&self, value: &T) {
        if !log_enabled!(self.level_produce) {
            return;
        }
        log!(self.level_produce, "{}::on_produced {:?}", asserted_short_name!("LoggerCallback", Self), value);
    }
}
impl<T: Value> CallbackConsume<T> for LoggerCallback<T> {
    fn on_consumed(&self, value: &T) {
        if !log_enabled!(self.level_consume) {
            return;
        }
        log!(self.level_consume, "{}::on_consumed {:?}", asserted_short_name!("LoggerCallback", Self), value);
    }
}
impl<T: Value> CallbackProduceConsume<T> for LoggerCallback<T> {}
