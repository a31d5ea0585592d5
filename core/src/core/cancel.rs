use std::{
    fmt::{Debug, Display},
    sync::{
        atomic::{AtomicBool, Ordering::SeqCst},
        Arc, Condvar, Mutex, PoisonError,
    },
    time::{Duration, Instant},
};

use log::{debug, log_enabled, Level};

use crate::asserted_short_name;

/// Implemented by blocking primitives that can park a thread and must release it once a [CancelToken] is cancelled.
pub trait Interrupt: Debug + Send + Sync {
    /// Wakes every thread blocked inside `self` so that it re-checks its token.
    fn interrupt(&self);
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    sleep_lock: Mutex<()>,
    sleep_cvar: Condvar,
    attached: Mutex<Vec<Arc<dyn Interrupt>>>,
}

/// Cooperative cancellation signal shared between a supervisor and its workers.
///
/// Clones share the same state. Cancelling is one way and idempotent, it wakes
/// every [CancelToken::sleep] and interrupts every target registered with [CancelToken::attach].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}
impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }
    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(SeqCst)
    }
    /// Returns `true` if this call flipped the token, `false` if it was already cancelled
    pub fn cancel(&self) -> bool {
        if self.inner.cancelled.swap(true, SeqCst) {
            return false;
        }
        if log_enabled!(Level::Debug) {
            debug!("{} cancelled, interrupting {} attached target(s)", self, self.attached_count());
        }
        {
            // sleepers check the flag while holding this lock, so they are either about to see it or already waiting
            let _guard = self.inner.sleep_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.inner.sleep_cvar.notify_all();
        }
        let attached = self.inner.attached.lock().unwrap_or_else(PoisonError::into_inner).clone();
        for target in attached.iter() {
            target.interrupt();
        }
        true
    }
    /// Registers `target` to be interrupted on [CancelToken::cancel]. A target attached to an already cancelled token is interrupted right away.
    /// Attaching the same target twice is a no op.
    pub fn attach(&self, target: Arc<dyn Interrupt>) {
        {
            let mut attached = self.inner.attached.lock().unwrap_or_else(PoisonError::into_inner);
            let addr = Arc::as_ptr(&target) as *const ();
            if !attached.iter().any(|existing| Arc::as_ptr(existing) as *const () == addr) {
                attached.push(target.clone());
            }
        }
        if self.is_cancelled() {
            target.interrupt();
        }
    }
    pub fn attached_count(&self) -> usize {
        self.inner.attached.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
    /// Blocks for up to `timeout` and returns `true` as soon as the token is cancelled, `false` if the full timeout elapsed.
    ///
    /// A `timeout` past the representable [Instant] range, e.g. [Duration::MAX], only ends on cancellation.
    pub fn sleep(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut guard = self.inner.sleep_lock.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if self.is_cancelled() {
                return true;
            }
            guard = match deadline {
                // unrepresentable deadline, sleep until cancelled
                None => self.inner.sleep_cvar.wait(guard).unwrap_or_else(PoisonError::into_inner),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    match self.inner.sleep_cvar.wait_timeout(guard, deadline - now) {
                        Ok((guard, _)) => guard,
                        Err(poisoned) => poisoned.into_inner().0,
                    }
                }
            };
        }
    }
}
impl Display for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<cancelled: {}>", asserted_short_name!("CancelToken", Self), self.is_cancelled())
    }
}
