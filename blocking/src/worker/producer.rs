use std::{
    fmt::{Debug, Display},
    io::{Error, ErrorKind},
    sync::Arc,
    time::Duration,
};

use log::{debug, log_enabled, Level};
use pcq_core::{asserted_short_name, prelude::*};
use rand::RngCore;

use crate::core::Worker;

/// Generates pseudo-random `i32` values and pushes them into a shared [BoundedQueue], sleeping `interval` between pushes.
///
/// # Example
/// ```
/// use pcq_blocking::prelude::*;
/// use rand::{rngs::StdRng, SeedableRng};
/// use std::{num::NonZeroUsize, time::Duration};
///
/// let queue = BoundedQueue::<i32>::new_ref(NonZeroUsize::new(2).unwrap());
/// let token = CancelToken::new();
/// let producer = ProducerLoop::new(queue.clone(), token.clone(), StdRng::seed_from_u64(1), Duration::ZERO, DevNullCallback::new_ref());
///
/// let jh = producer.spawn("doctest-producer").unwrap();
/// while !queue.is_full() {}
/// token.cancel();
/// assert_eq!(jh.join().unwrap().unwrap_cancelled(), 2);
/// ```
#[derive(Debug)]
pub struct ProducerLoop<R: RngCore + Debug + Send + 'static, C: CallbackProduce<i32>> {
    queue: Arc<BoundedQueue<i32>>,
    token: CancelToken,
    rng: R,
    interval: Duration,
    callback: Arc<C>,
}
impl<R: RngCore + Debug + Send + 'static, C: CallbackProduce<i32>> ProducerLoop<R, C> {
    /// Attaches `queue` to `token` so that a push blocked on a full queue is released by [CancelToken::cancel]
    pub fn new(queue: Arc<BoundedQueue<i32>>, token: CancelToken, rng: R, interval: Duration, callback: Arc<C>) -> Self {
        token.attach(queue.clone());
        Self { queue, token, rng, interval, callback }
    }

    fn generate(&mut self) -> Result<i32, Error> {
        let mut bytes = [0_u8; 4];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| Error::new(ErrorKind::Other, format!("value generation failed: {}", e)))?;
        Ok(i32::from_le_bytes(bytes))
    }
    fn fail(&self, e: Error) -> Error {
        self.callback.on_failed(Role::Producer, &e);
        e
    }
}
impl<R: RngCore + Debug + Send + 'static, C: CallbackProduce<i32>> Worker for ProducerLoop<R, C> {
    fn role(&self) -> Role {
        Role::Producer
    }
    fn run(&mut self) -> Result<usize, Error> {
        let mut produced = 0_usize;
        while !self.token.is_cancelled() {
            let value = self.generate().map_err(|e| self.fail(e))?;

            match self.queue.push(value, &self.token).map_err(|e| self.fail(e))? {
                PushStatus::Completed => {
                    produced += 1;
                    self.callback.on_produced(&value);
                }
                PushStatus::Cancelled(value) => {
                    if log_enabled!(Level::Debug) {
                        debug!("{} cancelled while blocked, dropping value: {}", self, value);
                    }
                    break;
                }
                PushStatus::WouldBlock(value) => {
                    let e = Error::new(ErrorKind::Other, format!("blocking push returned WouldBlock for value: {}", value));
                    return Err(self.fail(e));
                }
            }

            if self.token.sleep(self.interval) {
                break;
            }
        }
        self.callback.on_cancelled(Role::Producer);
        Ok(produced)
    }
}
impl<R: RngCore + Debug + Send + 'static, C: CallbackProduce<i32>> Display for ProducerLoop<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}, interval: {:?}, {}>", asserted_short_name!("ProducerLoop", Self), self.queue, self.interval, self.callback)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use log::info;
    use more_asserts::assert_lt;
    use pcq_core::unittest::setup;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Instant;

    #[derive(Debug)]
    struct ExhaustedRng;
    impl RngCore for ExhaustedRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.try_fill_bytes(dest).unwrap()
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy exhausted"))
        }
    }

    fn expected_values(seed: u64, n: usize) -> Vec<i32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let mut bytes = [0_u8; 4];
                rng.fill_bytes(&mut bytes);
                i32::from_le_bytes(bytes)
            })
            .collect()
    }

    #[test]
    fn test_producer_fills_queue_then_cancels_while_blocked() {
        setup::log::configure_level(log::LevelFilter::Info);
        let queue = BoundedQueue::<i32>::default();
        let queue = Arc::new(queue);
        let token = CancelToken::new();
        let store = StoreCallback::new_ref();

        let producer = ProducerLoop::new(queue.clone(), token.clone(), StdRng::seed_from_u64(7), Duration::ZERO, store.clone());
        info!("producer: {}", producer);
        let jh = producer.spawn("unittest-producer").unwrap();

        let start = Instant::now();
        while !queue.is_full() {
            assert_lt!(start.elapsed(), Duration::from_secs(5));
        }
        // give the producer time to block on the full queue
        std::thread::sleep(Duration::from_millis(50));
        assert!(!jh.is_finished());

        let start = Instant::now();
        token.cancel();
        let produced = jh.join().unwrap().unwrap_cancelled();
        assert_lt!(start.elapsed(), Duration::from_secs(1));

        assert_eq!(produced, DEFAULT_CAPACITY);
        assert_eq!(queue.len(), DEFAULT_CAPACITY);
        assert_eq!(store.produced(), expected_values(7, DEFAULT_CAPACITY));
        assert_eq!(store.stopped(), vec![(Role::Producer, Event::Cancelled)]);

        let drained = (0..DEFAULT_CAPACITY).map(|_| queue.try_pop().unwrap().unwrap_completed()).collect::<Vec<_>>();
        assert_eq!(drained, store.produced());
    }

    #[test]
    fn test_producer_cancel_while_sleeping() {
        setup::log::configure_level(log::LevelFilter::Info);
        let queue = BoundedQueue::<i32>::new_ref(setup::data::capacity(4));
        let token = CancelToken::new();
        let counter = CounterCallback::new_ref();

        let producer = ProducerLoop::new(queue.clone(), token.clone(), StdRng::seed_from_u64(1), Duration::from_secs(30), counter.clone());
        let jh = producer.spawn("unittest-producer").unwrap();

        let start = Instant::now();
        while queue.is_empty() {
            assert_lt!(start.elapsed(), Duration::from_secs(5));
        }
        token.cancel();
        assert_eq!(jh.join().unwrap().unwrap_cancelled(), 1);
        assert_lt!(start.elapsed(), Duration::from_secs(5));
        info!("counter: {}", counter);
        assert_eq!(counter.produced_count(), 1);
        assert_eq!(counter.cancelled_count(), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_producer_cancelled_before_start() {
        setup::log::configure_level(log::LevelFilter::Info);
        let queue = BoundedQueue::<i32>::new_ref(setup::data::capacity(4));
        let token = CancelToken::new();
        token.cancel();

        let mut producer = ProducerLoop::new(queue.clone(), token, StdRng::seed_from_u64(1), Duration::ZERO, CounterCallback::new_ref());
        assert_eq!(producer.run().unwrap(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_producer_generation_failure() {
        setup::log::configure_level(log::LevelFilter::Info);
        let queue = BoundedQueue::<i32>::new_ref(setup::data::capacity(4));
        let token = CancelToken::new();
        let store = StoreCallback::new_ref();

        let producer = ProducerLoop::new(queue.clone(), token.clone(), ExhaustedRng, Duration::ZERO, store.clone());
        let e = producer.spawn("unittest-producer").unwrap().join().unwrap().unwrap_failed();
        info!("e: {}", e);
        assert_eq!(e.kind(), ErrorKind::Other);
        assert!(e.to_string().contains("entropy exhausted"));

        assert!(queue.is_empty());
        assert!(!token.is_cancelled());
        assert_eq!(store.stopped(), vec![(Role::Producer, Event::Failed(e.to_string()))]);
    }
}
