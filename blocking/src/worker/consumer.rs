use std::{
    fmt::Display,
    io::{Error, ErrorKind},
    sync::Arc,
    time::Duration,
};

use pcq_core::{asserted_short_name, prelude::*};

use crate::core::Worker;

/// Pops values from a shared [BoundedQueue] and hands each to [CallbackConsume::on_consumed], sleeping `interval` between pops.
#[derive(Debug)]
pub struct ConsumerLoop<T: Value, C: CallbackConsume<T>> {
    queue: Arc<BoundedQueue<T>>,
    token: CancelToken,
    interval: Duration,
    callback: Arc<C>,
}
impl<T: Value, C: CallbackConsume<T>> ConsumerLoop<T, C> {
    /// Attaches `queue` to `token` so that a pop blocked on an empty queue is released by [CancelToken::cancel]
    pub fn new(queue: Arc<BoundedQueue<T>>, token: CancelToken, interval: Duration, callback: Arc<C>) -> Self {
        token.attach(queue.clone());
        Self { queue, token, interval, callback }
    }
    fn fail(&self, e: Error) -> Error {
        self.callback.on_failed(Role::Consumer, &e);
        e
    }
}
impl<T: Value, C: CallbackConsume<T>> Worker for ConsumerLoop<T, C> {
    fn role(&self) -> Role {
        Role::Consumer
    }
    fn run(&mut self) -> Result<usize, Error> {
        let mut consumed = 0_usize;
        while !self.token.is_cancelled() {
            match self.queue.pop(&self.token).map_err(|e| self.fail(e))? {
                PopStatus::Completed(value) => {
                    consumed += 1;
                    self.callback.on_consumed(&value);
                }
                PopStatus::Cancelled => break,
                PopStatus::WouldBlock => return Err(self.fail(Error::new(ErrorKind::Other, "blocking pop returned WouldBlock"))),
            }

            if self.token.sleep(self.interval) {
                break;
            }
        }
        self.callback.on_cancelled(Role::Consumer);
        Ok(consumed)
    }
}
impl<T: Value, C: CallbackConsume<T>> Display for ConsumerLoop<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}, interval: {:?}, {}>", asserted_short_name!("ConsumerLoop", Self), self.queue, self.interval, self.callback)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use log::info;
    use more_asserts::assert_lt;
    use pcq_core::unittest::setup;
    use std::{thread::sleep, time::Instant};

    #[test]
    fn test_consumer_drains_in_order_then_cancels_while_blocked() {
        setup::log::configure_level(log::LevelFilter::Info);
        let queue = BoundedQueue::<i32>::new_ref(setup::data::capacity(DEFAULT_CAPACITY));
        let token = CancelToken::new();
        for value in [5, -3, 1000] {
            queue.try_push(value).unwrap().unwrap_completed();
        }
        let store = StoreCallback::new_ref();

        let consumer = ConsumerLoop::new(queue.clone(), token.clone(), Duration::ZERO, store.clone());
        info!("consumer: {}", consumer);
        let jh = consumer.spawn("unittest-consumer").unwrap();

        let start = Instant::now();
        while store.consumed().len() < 3 {
            assert_lt!(start.elapsed(), Duration::from_secs(5));
        }
        // consumer is now parked on the empty queue
        sleep(Duration::from_millis(50));
        assert!(!jh.is_finished());

        let start = Instant::now();
        token.cancel();
        assert_eq!(jh.join().unwrap().unwrap_cancelled(), 3);
        assert_lt!(start.elapsed(), Duration::from_secs(1));

        assert_eq!(store.consumed(), vec![5, -3, 1000]);
        assert_eq!(store.stopped(), vec![(Role::Consumer, Event::Cancelled)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_consumer_receives_value_pushed_after_start() {
        setup::log::configure_level(log::LevelFilter::Info);
        let queue = BoundedQueue::<i32>::new_ref(setup::data::capacity(2));
        let token = CancelToken::new();
        let counter = CounterCallback::new_ref();

        let jh = ConsumerLoop::new(queue.clone(), token.clone(), Duration::ZERO, counter.clone()).spawn("unittest-consumer").unwrap();
        sleep(Duration::from_millis(50));
        assert_eq!(counter.consumed_count(), 0);

        for value in setup::data::sample_values() {
            queue.push(value, &token).unwrap().unwrap_completed();
        }
        let start = Instant::now();
        while counter.consumed_count() < setup::data::sample_values().len() {
            assert_lt!(start.elapsed(), Duration::from_secs(5));
        }
        token.cancel();
        assert_eq!(jh.join().unwrap().unwrap_cancelled(), setup::data::sample_values().len());
        info!("counter: {}", counter);
        assert_eq!(counter.cancelled_count(), 1);
        assert_eq!(counter.failed_count(), 0);
    }
}
