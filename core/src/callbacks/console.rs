use std::{
    fmt::Display,
    io::Error,
    sync::Arc,
};

use crate::{asserted_short_name, prelude::*};

/// Writes one line per transferred value to stdout and one line per cancellation or failure to stderr.
///
/// This is the observable output of the `pcq` binary, e.g.
/// ```text
/// Producer produced 1804289383
/// Consumer consumed 1804289383
/// SOURCE=Consumer; TYPE=Consumption Error; MESSAGE=cancelled
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleCallback<T: Value> {
    phantom: std::marker::PhantomData<T>,
}
impl<T: Value> Default for ConsoleCallback<T> {
    fn default() -> Self {
        Self { phantom: std::marker::PhantomData }
    }
}
impl<T: Value> ConsoleCallback<T> {
    pub fn new_ref() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

pub fn transfer_line<T: Display>(role: Role, value: &T) -> String {
    match role {
        Role::Producer => format!("{} produced {}", role, value),
        Role::Consumer => format!("{} consumed {}", role, value),
    }
}
pub fn cancelled_line(role: Role) -> String {
    let kind = match role {
        Role::Producer => "Production Error",
        Role::Consumer => "Consumption Error",
    };
    format!("SOURCE={}; TYPE={}; MESSAGE=cancelled", role, kind)
}
pub fn failed_line(role: Role, e: &Error) -> String {
    format!("SOURCE={}; TYPE=Unexpected Error; MESSAGE={}", role, e)
}

impl<T: Value> Display for ConsoleCallback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", asserted_short_name!("ConsoleCallback", Self))
    }
}
impl<T: Value> CallbackStop for ConsoleCallback<T> {
    fn on_cancelled(&self, role: Role) {
        eprintln!("{}", cancelled_line(role));
    }
    fn on_failed(&self, role: Role, e: &Error) {
        eprintln!("{}", failed_line(role, e));
    }
}
impl<T: Value> CallbackProduce<T> for ConsoleCallback<T> {
    fn on_produced(&self, value: &T) {
        println!("{}", transfer_line(Role::Producer, value));
    }
}
impl<T: Value> CallbackConsume<T> for ConsoleCallback<T> {
    fn on_consumed(&self, value: &T) {
        println!("{}", transfer_line(Role::Consumer, value));
    }
}
impl<T: Value> CallbackProduceConsume<T> for ConsoleCallback<T> {}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_lines() {
        assert_eq!(transfer_line(Role::Producer, &-3), "Producer produced -3");
        assert_eq!(transfer_line(Role::Consumer, &1000), "Consumer consumed 1000");
        assert_eq!(cancelled_line(Role::Producer), "SOURCE=Producer; TYPE=Production Error; MESSAGE=cancelled");
        assert_eq!(cancelled_line(Role::Consumer), "SOURCE=Consumer; TYPE=Consumption Error; MESSAGE=cancelled");
        let e = Error::new(ErrorKind::Other, "rng exhausted");
        assert_eq!(failed_line(Role::Producer, &e), "SOURCE=Producer; TYPE=Unexpected Error; MESSAGE=rng exhausted");
    }

    #[test]
    fn test_callback() {
        let clbk = ConsoleCallback::<i32>::new_ref();
        clbk.on_produced(&5);
        clbk.on_consumed(&5);
        clbk.on_cancelled(Role::Consumer);
        assert_eq!(format!("{}", clbk), "ConsoleCallback");
    }
}
