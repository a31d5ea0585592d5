use std::{
    fmt::Display,
    sync::Arc,
};

use crate::{asserted_short_name, prelude::*};

#[derive(Debug, Clone)]
pub struct DevNullCallback<T: Value> {
    phantom: std::marker::PhantomData<T>,
}
impl<T: Value> Default for DevNullCallback<T> {
    fn default() -> Self {
        Self { phantom: std::marker::PhantomData }
    }
}

impl<T: Value> DevNullCallback<T> {
    pub fn new_ref() -> Arc<Self> {
        Self::default().into()
    }
}

impl<T: Value> Display for DevNullCallback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", asserted_short_name!("DevNullCallback", Self))
    }
}
impl<T: Value> CallbackStop for DevNullCallback<T> {}
impl<T: Value> CallbackProduce<T> for DevNullCallback<T> {
    #[allow(unused_variables)]
    #[inline(always)]
    fn on_produced(&self, value: &T) {}
}
impl<T: Value> CallbackConsume<T> for DevNullCallback<T> {
    #[allow(unused_variables)]
    #[inline(always)]
    fn on_consumed(&self, value: &T) {}
}
impl<T: Value> CallbackProduceConsume<T> for DevNullCallback<T> {}
