use std::{
    fmt::Display,
    io::Error,
    sync::Arc,
};

use crate::{asserted_short_name, prelude::*};

pub type Chain<T> = Vec<Arc<dyn CallbackProduceConsume<T>>>;

/// Fans every event out to each callback of the chain, in order.
#[derive(Debug)]
pub struct ChainCallback<T: Value> {
    chain: Chain<T>,
}

impl<T: Value> ChainCallback<T> {
    pub fn new(chain: Chain<T>) -> Self {
        Self { chain }
    }
    pub fn new_ref(chain: Chain<T>) -> Arc<Self> {
        Arc::new(Self::new(chain))
    }
}
impl<T: Value> Display for ChainCallback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}<{}, [{}]>",
            asserted_short_name!("ChainCallback", Self),
            self.chain.len(),
            self.chain.iter().map(|c| format!("{}", c)).collect::<Vec<_>>().join(", ")
        )
    }
}
impl<T: Value> CallbackStop for ChainCallback<T> {
    fn on_cancelled(&self, role: Role) {
        for callback in self.chain.iter() {
            callback.on_cancelled(role);
        }
    }
    fn on_failed(&self, role: Role, e: &Error) {
        for callback in self.chain.iter() {
            callback.on_failed(role, e);
        }
    }
}
impl<T: Value> CallbackProduce<T> for ChainCallback<T> {
    fn on_produced(&self, value: &T) {
        for callback in self.chain.iter() {
            callback.on_produced(value);
        }
    }
}
impl<T: Value> CallbackConsume<T> for ChainCallback<T> {
    fn on_consumed(&self, value: &T) {
        for callback in self.chain.iter() {
            callback.on_consumed(value);
        }
    }
}
impl<T: Value> CallbackProduceConsume<T> for ChainCallback<T> {}

#[cfg(test)]
mod test {

    use super::Chain;
    use crate::prelude::*;
    use crate::unittest::setup;
    use log::info;
    use std::sync::Arc;

    #[test]
    fn test_callback() {
        setup::log::configure();
        let counter = CounterCallback::<i32>::new_ref();
        let store = StoreCallback::<i32>::new_ref();

        let chain: Chain<i32> = vec![
            LoggerCallback::<i32>::new_ref() as Arc<dyn CallbackProduceConsume<i32>>,
            DevNullCallback::<i32>::new_ref(),
            counter.clone(),
            store.clone(),
        ];
        let clbk = ChainCallback::new(chain);

        for value in [5, -3] {
            clbk.on_produced(&value);
        }
        clbk.on_consumed(&5);
        clbk.on_cancelled(Role::Consumer);
        info!("clbk: {}", clbk);
        assert_eq!(counter.produced_count(), 2);
        assert_eq!(counter.consumed_count(), 1);
        assert_eq!(counter.cancelled_count(), 1);
        assert_eq!(counter.failed_count(), 0);
        assert_eq!(store.produced(), vec![5, -3]);
        assert_eq!(store.consumed(), vec![5]);
    }
}
