use std::{
    fmt::Display,
    io::{Error, ErrorKind},
    num::NonZeroUsize,
    sync::Arc,
    thread::JoinHandle,
    time::Duration,
};

use log::{info, log_enabled, warn, Level};
use pcq_core::{asserted_short_name, prelude::*};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    core::{Worker, WorkerExit},
    worker::{consumer::ConsumerLoop, producer::ProducerLoop},
};

/// Settings of a [Supervisor] run
///
/// # Defaults
/// * `capacity` - [DEFAULT_CAPACITY]
/// * `interval` - one second between iterations of each loop
/// * `seed` - `None`, the producer is seeded from OS entropy
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisorConfig {
    pub capacity: NonZeroUsize,
    pub interval: Duration,
    pub seed: Option<u64>,
}
impl SupervisorConfig {
    pub fn with_capacity(self, capacity: NonZeroUsize) -> Self {
        Self { capacity, ..self }
    }
    pub fn with_interval(self, interval: Duration) -> Self {
        Self { interval, ..self }
    }
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed: Some(seed), ..self }
    }
}
impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::new(DEFAULT_CAPACITY).expect("DEFAULT_CAPACITY is non zero"),
            interval: Duration::from_secs(1),
            seed: None,
        }
    }
}

/// Owns the shared queue and the cancellation token, runs one [ProducerLoop] and one [ConsumerLoop] on their own threads.
///
/// # Example
/// ```
/// use pcq_blocking::prelude::*;
/// use std::time::Duration;
///
/// let config = SupervisorConfig::default().with_interval(Duration::from_millis(1)).with_seed(42);
/// let counter = CounterCallback::new_ref();
/// let running = Supervisor::new(config, counter.clone()).start().unwrap();
///
/// while counter.consumed_count() < 10 {}
/// running.cancel();
/// let report = running.join();
/// assert!(report.is_cancelled());
/// ```
#[derive(Debug)]
pub struct Supervisor<C: CallbackProduceConsume<i32>> {
    config: SupervisorConfig,
    queue: Arc<BoundedQueue<i32>>,
    token: CancelToken,
    callback: Arc<C>,
}
impl<C: CallbackProduceConsume<i32>> Supervisor<C> {
    pub fn new(config: SupervisorConfig, callback: Arc<C>) -> Self {
        let queue = BoundedQueue::new_ref(config.capacity);
        let token = CancelToken::new();
        token.attach(queue.clone());
        Self { config, queue, token, callback }
    }
    pub fn queue(&self) -> &Arc<BoundedQueue<i32>> {
        &self.queue
    }
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Spawns both loops. If the consumer thread cannot be spawned the producer is cancelled and joined before the error is returned.
    pub fn start(self) -> Result<RunningSupervisor, Error> {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let producer = ProducerLoop::new(self.queue.clone(), self.token.clone(), rng, self.config.interval, self.callback.clone());
        let consumer = ConsumerLoop::new(self.queue.clone(), self.token.clone(), self.config.interval, self.callback.clone());
        if log_enabled!(Level::Info) {
            info!("{} starting {} and {}", self, producer, consumer);
        }

        let producer = producer.spawn("pcq-producer")?;
        let consumer = match consumer.spawn("pcq-consumer") {
            Ok(consumer) => consumer,
            Err(e) => {
                self.token.cancel();
                let exit = join_worker(producer, Role::Producer);
                warn!("{} failed to spawn consumer: {}, producer exit: {}", self, e, exit);
                return Err(e);
            }
        };
        Ok(RunningSupervisor { queue: self.queue, token: self.token, producer, consumer })
    }

    /// Installs a SIGINT/SIGTERM handler that cancels both loops, starts them and blocks until both have stopped.
    ///
    /// The handler can only be installed once per process.
    pub fn run_until_signal(self) -> Result<SupervisorReport, Error> {
        let token = self.cancel_token();
        ctrlc::set_handler(move || {
            println!("Shutdown initiated. Stopping threads...");
            token.cancel();
        })
        .map_err(|e| Error::new(ErrorKind::Other, format!("failed to install termination handler: {}", e)))?;

        Ok(self.start()?.join())
    }
}
impl<C: CallbackProduceConsume<i32>> Display for Supervisor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}, {}, {}>", asserted_short_name!("Supervisor", Self), self.queue, self.token, self.callback)
    }
}

/// Handle to a started [Supervisor]
#[derive(Debug)]
pub struct RunningSupervisor {
    queue: Arc<BoundedQueue<i32>>,
    token: CancelToken,
    producer: JoinHandle<WorkerExit>,
    consumer: JoinHandle<WorkerExit>,
}
impl RunningSupervisor {
    pub fn queue(&self) -> &Arc<BoundedQueue<i32>> {
        &self.queue
    }
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }
    pub fn cancel(&self) {
        self.token.cancel();
    }
    /// Waits for both loops to stop. Does not cancel, a loop that failed leaves the other running until the token is cancelled.
    pub fn join(self) -> SupervisorReport {
        let producer = join_worker(self.producer, Role::Producer);
        let consumer = join_worker(self.consumer, Role::Consumer);
        let report = SupervisorReport { producer, consumer };
        if log_enabled!(Level::Info) {
            info!("{} joined, {}", asserted_short_name!("RunningSupervisor", Self), report);
        }
        report
    }
}

fn join_worker(jh: JoinHandle<WorkerExit>, role: Role) -> WorkerExit {
    jh.join().unwrap_or_else(|_| WorkerExit::Failed(Error::new(ErrorKind::Other, format!("{} thread panicked", role))))
}

/// How each loop of a [RunningSupervisor] ended
#[derive(Debug)]
pub struct SupervisorReport {
    pub producer: WorkerExit,
    pub consumer: WorkerExit,
}
impl SupervisorReport {
    /// `true` if both loops stopped due to cancellation
    pub fn is_cancelled(&self) -> bool {
        self.producer.is_cancelled() && self.consumer.is_cancelled()
    }
}
impl Display for SupervisorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<producer: {}, consumer: {}>", asserted_short_name!("SupervisorReport", Self), self.producer, self.consumer)
    }
}
