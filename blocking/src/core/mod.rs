use std::{
    fmt::Display,
    io::Error,
    thread::{Builder, JoinHandle},
};

use log::{info, log_enabled, warn, Level};
use pcq_core::prelude::Role;

// ----- Exit -----

/// Represents how a [Worker] left its run loop
///
/// # Variants
/// * [WorkerExit::Cancelled] - the worker observed cancellation, `transferred` counts completed pushes or pops
/// * [WorkerExit::Failed] - the worker terminated on an unexpected error, it is not retried
#[derive(Debug)]
pub enum WorkerExit {
    Cancelled { transferred: usize },
    Failed(Error),
}
impl WorkerExit {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WorkerExit::Cancelled { .. })
    }
    pub fn is_failed(&self) -> bool {
        matches!(self, WorkerExit::Failed(_))
    }
    /// Unwraps into the transferred count if the variant is [WorkerExit::Cancelled], otherwise panics
    pub fn unwrap_cancelled(self) -> usize {
        match self {
            WorkerExit::Cancelled { transferred } => transferred,
            WorkerExit::Failed(e) => panic!("WorkerExit::Failed({})", e),
        }
    }
    /// Unwraps into the error if the variant is [WorkerExit::Failed], otherwise panics
    pub fn unwrap_failed(self) -> Error {
        match self {
            WorkerExit::Failed(e) => e,
            WorkerExit::Cancelled { transferred } => panic!("WorkerExit::Cancelled {{ transferred: {} }}", transferred),
        }
    }
}
impl From<Result<usize, Error>> for WorkerExit {
    fn from(res: Result<usize, Error>) -> Self {
        match res {
            Ok(transferred) => WorkerExit::Cancelled { transferred },
            Err(e) => WorkerExit::Failed(e),
        }
    }
}
impl Display for WorkerExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerExit::Cancelled { transferred } => write!(f, "Cancelled(transferred: {})", transferred),
            WorkerExit::Failed(e) => write!(f, "Failed({})", e),
        }
    }
}

// ----- Worker -----

pub trait Worker: Display + Send + Sized + 'static {
    fn role(&self) -> Role;

    /// Runs until cancelled or until an unexpected error.
    ///
    /// Returns the number of values transferred when cancelled, a failure is reported to the callback before it is returned.
    fn run(&mut self) -> Result<usize, Error>;

    /// Runs [Self::run] on a new named thread, the join handle yields how the worker ended.
    fn spawn(mut self, name: &str) -> Result<JoinHandle<WorkerExit>, Error> {
        Builder::new().name(name.to_owned()).spawn(move || {
            if log_enabled!(Level::Info) {
                info!("{} starting {}", self.role(), self);
            }
            let exit = WorkerExit::from(self.run());
            match exit {
                WorkerExit::Cancelled { .. } => {
                    if log_enabled!(Level::Info) {
                        info!("{} stopped {}", self.role(), exit);
                    }
                }
                WorkerExit::Failed(_) => warn!("{} stopped {}, {}", self.role(), exit, self),
            }
            exit
        })
    }
}
