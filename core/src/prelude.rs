pub use crate::core::cancel::{CancelToken, Interrupt};
pub use crate::core::queue::{BoundedQueue, DEFAULT_CAPACITY};
pub use crate::core::{PopStatus, PushStatus, Role};

// callbacks
// // traits
pub use crate::callbacks::{CallbackConsume, CallbackProduce, CallbackProduceConsume, CallbackStop, Value};

// // implementations
pub use crate::callbacks::chain::{Chain, ChainCallback};
pub use crate::callbacks::console::ConsoleCallback;
pub use crate::callbacks::counter::CounterCallback;
pub use crate::callbacks::devnull::DevNullCallback;
pub use crate::callbacks::logger::LoggerCallback;
pub use crate::callbacks::store::{Entry, Event, StoreCallback};

pub use crate::{asserted_short_name, core::macros::short_type_name};
