pub use crate::core::{Worker, WorkerExit};

pub use crate::supervisor::{RunningSupervisor, Supervisor, SupervisorConfig, SupervisorReport};
pub use crate::worker::{consumer::ConsumerLoop, producer::ProducerLoop};

pub use pcq_core::prelude::{
    BoundedQueue, CallbackConsume, CallbackProduce, CallbackProduceConsume, CallbackStop, CancelToken, ChainCallback, ConsoleCallback, CounterCallback, DevNullCallback, LoggerCallback, PopStatus, PushStatus, Role, StoreCallback, Value, DEFAULT_CAPACITY,
};
