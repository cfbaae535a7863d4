//! Completion handle returned by non-blocking reductions

use crate::error::{Error, Result};
use crate::runtime::{Event, EventStatus};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub(crate) type Slot<T> = Arc<Mutex<Option<Result<T>>>>;

/// Pending result of [`reduce_1d_async`](super::reduce_1d_async).
///
/// The result scalar becomes valid once [`event`](Self::event) resolves.
/// Further work can be chained by passing a clone of that event as a
/// dependency.
#[derive(Debug)]
pub struct ReductionHandle<T> {
    event: Event,
    slot: Slot<T>,
}

impl<T> ReductionHandle<T> {
    pub(crate) fn new(event: Event) -> (Self, Slot<T>) {
        let slot: Slot<T> = Arc::new(Mutex::new(None));
        (
            Self {
                event,
                slot: slot.clone(),
            },
            slot,
        )
    }

    /// Completion event of this reduction
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Current status of the reduction
    pub fn status(&self) -> EventStatus {
        self.event.status()
    }

    /// Returns true once the reduction has completed or failed
    pub fn is_complete(&self) -> bool {
        self.event.is_terminal()
    }

    /// Block until the reduction finishes and return its result
    pub fn wait(self) -> Result<T> {
        // the outcome lives in the slot; the event only signals readiness
        let _ = self.event.wait();
        self.take()
    }

    /// Return the result if the reduction has finished, or the handle back
    /// if it is still pending or executing.
    pub fn try_wait(self) -> std::result::Result<Result<T>, Self> {
        if self.is_complete() {
            Ok(self.take())
        } else {
            Err(self)
        }
    }

    /// Wait at most `timeout`; on timeout the handle is returned unchanged.
    pub fn wait_timeout(self, timeout: Duration) -> std::result::Result<Result<T>, Self> {
        match self.event.wait_timeout(timeout) {
            Some(_) => Ok(self.take()),
            None => Err(self),
        }
    }

    fn take(self) -> Result<T> {
        self.slot.lock().take().unwrap_or_else(|| {
            Err(Error::Internal(format!(
                "reduction {} settled without a result",
                self.event.id()
            )))
        })
    }
}
