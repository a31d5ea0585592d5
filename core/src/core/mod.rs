pub mod cancel;
pub mod macros;
pub mod queue;

use std::fmt::Display;

// ---- Push ----

/// Represents the outcome of a push operation on a [queue::BoundedQueue]
///
/// # Variants
/// * [PushStatus::Completed] - indicates that the value was appended at the tail
/// * [PushStatus::WouldBlock(T)] - indicates that the queue stayed full, the value is handed back
/// * [PushStatus::Cancelled(T)] - indicates that the token was cancelled before space became available, the value is handed back
#[derive(Debug, PartialEq)]
pub enum PushStatus<T> {
    Completed,
    WouldBlock(T),
    Cancelled(T),
}
impl<T> PushStatus<T> {
    /// Unwraps to [()] if the variant is [PushStatus::Completed], otherwise panics
    pub fn unwrap_completed(self) {
        match self {
            PushStatus::Completed => (),
            PushStatus::WouldBlock(_) => panic!("PushStatus::WouldBlock"),
            PushStatus::Cancelled(_) => panic!("PushStatus::Cancelled"),
        }
    }
    pub fn is_completed(&self) -> bool {
        matches!(self, PushStatus::Completed)
    }
    pub fn is_wouldblock(&self) -> bool {
        matches!(self, PushStatus::WouldBlock(_))
    }
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PushStatus::Cancelled(_))
    }
}

// ---- Pop ----

/// Represents the outcome of a pop operation on a [queue::BoundedQueue]
///
/// # Variants
/// * [PopStatus::Completed(T)] - indicates that the head value was removed and is returned
/// * [PopStatus::WouldBlock] - indicates that the queue stayed empty
/// * [PopStatus::Cancelled] - indicates that the token was cancelled before a value became available
#[derive(Debug, PartialEq)]
pub enum PopStatus<T> {
    Completed(T),
    WouldBlock,
    Cancelled,
}
impl<T> PopStatus<T> {
    /// Unwraps into `T` if the variant is [PopStatus::Completed], otherwise panics
    pub fn unwrap_completed(self) -> T {
        match self {
            PopStatus::Completed(t) => t,
            PopStatus::WouldBlock => panic!("PopStatus::WouldBlock"),
            PopStatus::Cancelled => panic!("PopStatus::Cancelled"),
        }
    }
    pub fn is_completed(&self) -> bool {
        matches!(self, PopStatus::Completed(_))
    }
    pub fn is_wouldblock(&self) -> bool {
        matches!(self, PopStatus::WouldBlock)
    }
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PopStatus::Cancelled)
    }
}

// ---- Role ----

/// Side of the queue a worker operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Producer,
    Consumer,
}
impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Producer => write!(f, "Producer"),
            Role::Consumer => write!(f, "Consumer"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status() {
        let push = PushStatus::Cancelled(7);
        assert!(push.is_cancelled());
        assert!(!push.is_completed());
        assert_eq!(push, PushStatus::Cancelled(7));
        PushStatus::<i32>::Completed.unwrap_completed();

        let pop = PopStatus::Completed(-3);
        assert!(pop.is_completed());
        assert_eq!(pop.unwrap_completed(), -3);
        assert!(PopStatus::<i32>::WouldBlock.is_wouldblock());

        assert_eq!(format!("{}", Role::Producer), "Producer");
        assert_eq!(format!("{}", Role::Consumer), "Consumer");
    }

    #[test]
    #[should_panic(expected = "PopStatus::Cancelled")]
    fn test_pop_unwrap_cancelled() {
        PopStatus::<i32>::Cancelled.unwrap_completed();
    }
}
