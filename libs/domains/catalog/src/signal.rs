//! Cooperative cancellation for a single call.
//!
//! A [`CallGuard`] lives as long as the call's transport side (the response
//! future or stream). Dropping it, or calling [`CallGuard::cancel`], flips
//! every [`CallSignal`] cloned from it. Long-running work polls
//! [`CallSignal::check`] between units of work.

use std::time::{Duration, Instant};
use tokio::sync::watch;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone)]
pub struct CallSignal {
    cancelled: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

impl CallSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self {
            cancelled: rx,
            deadline: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// `Canceled` once the guard fired, `DeadlineExceeded` once the deadline passed.
    pub fn check(&self) -> CatalogResult<()> {
        if self.is_cancelled() {
            return Err(CatalogError::Canceled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(CatalogError::DeadlineExceeded);
        }
        Ok(())
    }
}

/// Owning side of a [`CallSignal`]. Fires on drop.
#[derive(Debug)]
pub struct CallGuard {
    tx: watch::Sender<bool>,
}

impl CallGuard {
    /// New guard and signal; `timeout` is measured from now.
    pub fn new(timeout: Option<Duration>) -> (Self, CallSignal) {
        let (tx, rx) = watch::channel(false);
        let signal = CallSignal {
            cancelled: rx,
            deadline: timeout.and_then(|t| Instant::now().checked_add(t)),
        };
        (Self { tx }, signal)
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}
