use std::{
    fmt::{Debug, Display},
    io::Error,
};

use crate::core::Role;

pub mod chain;
pub mod console;
pub mod counter;
pub mod devnull;
pub mod logger;
pub mod store;

/// Bound shared by every value that flows through the queue and its callbacks
pub trait Value: Debug + Display + Clone + Send + Sync + 'static {}
impl<T: Debug + Display + Clone + Send + Sync + 'static> Value for T {}

#[allow(unused_variables)]
pub trait CallbackStop: Display + Debug + Send + Sync + 'static {
    /// Will be called once when a worker observes cancellation and leaves its loop.
    fn on_cancelled(&self, role: Role) {}
    /// Will be called once when a worker terminates due to an unexpected error.
    fn on_failed(&self, role: Role, e: &Error) {}
}

pub trait CallbackProduce<T: Value>: CallbackStop {
    /// Will be called after the value is appended to the queue.
    fn on_produced(&self, value: &T);
}

pub trait CallbackConsume<T: Value>: CallbackStop {
    /// Will be called after the value is removed from the queue.
    fn on_consumed(&self, value: &T);
}

pub trait CallbackProduceConsume<T: Value>: CallbackProduce<T> + CallbackConsume<T> {}
