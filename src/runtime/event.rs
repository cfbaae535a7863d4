//! Completion handles for dependency-chained execution
//!
//! An [`Event`] represents "work X is done". Every reduction accepts a
//! [`DependencySet`] of events that must complete before it starts, and the
//! non-blocking entry point hands back its own event so further work can
//! depend on it.
//!
//! ```text
//!            start()             complete()
//! Pending ───────────▶ Executing ───────────▶ Completed
//!    │                     │
//!    └──── fail() ─────────┴──── fail() ────▶ Failed
//! ```
//!
//! `Completed` and `Failed` are terminal: later transitions are ignored.

use crate::error::{Error, Result};
use parking_lot::{Condvar, Mutex};
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

/// Observable state of an [`Event`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventStatus {
    /// Dependencies not yet satisfied, work not started
    Pending,
    /// Work is running
    Executing,
    /// Work finished successfully
    Completed,
    /// Work (or one of its dependencies) failed
    Failed,
}

#[derive(Debug)]
enum State {
    Pending,
    Executing,
    Completed,
    Failed(String),
}

#[derive(Debug)]
struct Inner {
    id: u64,
    state: Mutex<State>,
    cond: Condvar,
}

/// Shared completion handle.
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Clone, Debug)]
pub struct Event {
    inner: Arc<Inner>,
}

impl Event {
    /// Create a pending event
    pub fn new() -> Self {
        Self::with_state(State::Pending)
    }

    /// Create an event that has already completed
    pub fn completed() -> Self {
        Self::with_state(State::Completed)
    }

    /// Create an event that has already failed
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::with_state(State::Failed(reason.into()))
    }

    fn with_state(state: State) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed),
                state: Mutex::new(state),
                cond: Condvar::new(),
            }),
        }
    }

    /// Process-unique id, used in error messages
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Current status
    pub fn status(&self) -> EventStatus {
        match *self.inner.state.lock() {
            State::Pending => EventStatus::Pending,
            State::Executing => EventStatus::Executing,
            State::Completed => EventStatus::Completed,
            State::Failed(_) => EventStatus::Failed,
        }
    }

    /// Returns true once the event has completed or failed
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status(),
            EventStatus::Completed | EventStatus::Failed
        )
    }

    /// Move `Pending -> Executing`. Returns false from any other state.
    pub fn start(&self) -> bool {
        let mut state = self.inner.state.lock();
        if !matches!(*state, State::Pending) {
            return false;
        }
        *state = State::Executing;
        self.inner.cond.notify_all();
        true
    }

    /// Mark the event completed. Returns false if it was already terminal.
    pub fn complete(&self) -> bool {
        self.settle(State::Completed)
    }

    /// Mark the event failed. Returns false if it was already terminal.
    pub fn fail(&self, reason: impl Into<String>) -> bool {
        self.settle(State::Failed(reason.into()))
    }

    fn settle(&self, next: State) -> bool {
        let mut state = self.inner.state.lock();
        if matches!(*state, State::Completed | State::Failed(_)) {
            return false;
        }
        *state = next;
        self.inner.cond.notify_all();
        true
    }

    /// Block until the event is terminal.
    ///
    /// Returns `DependencyFailed` if the event failed.
    pub fn wait(&self) -> Result<()> {
        let mut state = self.inner.state.lock();
        loop {
            if let Some(outcome) = self.outcome(&state) {
                return outcome;
            }
            self.inner.cond.wait(&mut state);
        }
    }

    /// Block until the event is terminal or `timeout` elapses.
    ///
    /// Returns `None` on timeout. The event itself is unaffected.
    /// A timeout too large to represent as a deadline waits without one.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<()>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.inner.state.lock();
        loop {
            if let Some(outcome) = self.outcome(&state) {
                return Some(outcome);
            }
            match deadline {
                Some(deadline) => {
                    if self.inner.cond.wait_until(&mut state, deadline).timed_out() {
                        return self.outcome(&state);
                    }
                }
                None => self.inner.cond.wait(&mut state),
            }
        }
    }

    fn outcome(&self, state: &State) -> Option<Result<()>> {
        match state {
            State::Completed => Some(Ok(())),
            State::Failed(reason) => Some(Err(Error::DependencyFailed {
                event: self.inner.id,
                reason: reason.clone(),
            })),
            State::Pending | State::Executing => None,
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered set of events a piece of work must wait for
#[derive(Clone, Debug, Default)]
pub struct DependencySet {
    events: SmallVec<[Event; 4]>,
}

impl DependencySet {
    /// Empty dependency set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of dependencies
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if there is nothing to wait for
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over the dependencies in order
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Wait for every dependency to complete.
    ///
    /// Dependencies that have already failed are reported without blocking
    /// on earlier pending ones; otherwise events are awaited in order and
    /// the first failure is returned.
    pub fn wait_all(&self) -> Result<()> {
        if let Some(failed) = self
            .events
            .iter()
            .find(|e| e.status() == EventStatus::Failed)
        {
            return failed.wait();
        }
        for event in &self.events {
            event.wait()?;
        }
        Ok(())
    }
}

impl From<&[Event]> for DependencySet {
    fn from(events: &[Event]) -> Self {
        events.iter().cloned().collect()
    }
}

impl From<Vec<Event>> for DependencySet {
    fn from(events: Vec<Event>) -> Self {
        events.into_iter().collect()
    }
}

impl FromIterator<Event> for DependencySet {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<Event> for DependencySet {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_state_machine() {
        let event = Event::new();
        assert_eq!(event.status(), EventStatus::Pending);
        assert!(event.start());
        assert!(!event.start());
        assert_eq!(event.status(), EventStatus::Executing);
        assert!(event.complete());
        assert!(!event.fail("too late"));
        assert_eq!(event.status(), EventStatus::Completed);
        assert!(event.wait().is_ok());
    }

    #[test]
    fn test_pending_straight_to_failed() {
        let event = Event::new();
        assert!(event.fail("upstream device error"));
        assert!(!event.start());
        match event.wait() {
            Err(Error::DependencyFailed { event: id, reason }) => {
                assert_eq!(id, event.id());
                assert_eq!(reason, "upstream device error");
            }
            other => panic!("expected DependencyFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_wait_across_threads() {
        let event = Event::new();
        let signal = event.clone();
        let worker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            signal.complete();
        });
        event.wait().unwrap();
        worker.join().unwrap();
        assert!(event.is_terminal());
    }

    #[test]
    fn test_wait_timeout_leaves_event_pending() {
        let event = Event::new();
        assert!(event.wait_timeout(Duration::from_millis(5)).is_none());
        assert_eq!(event.status(), EventStatus::Pending);
        event.complete();
        assert!(matches!(
            event.wait_timeout(Duration::from_millis(5)),
            Some(Ok(()))
        ));
    }

    #[test]
    fn test_wait_timeout_unbounded_duration() {
        assert!(matches!(
            Event::completed().wait_timeout(Duration::MAX),
            Some(Ok(()))
        ));

        let event = Event::new();
        let signal = event.clone();
        let worker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            signal.fail("aborted");
        });
        assert!(matches!(
            event.wait_timeout(Duration::MAX),
            Some(Err(Error::DependencyFailed { .. }))
        ));
        worker.join().unwrap();
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Event::new();
        let b = Event::new();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn test_dependency_set_reports_failure_without_blocking() {
        // the pending event is never completed; wait_all must not block on it
        let deps: DependencySet = vec![Event::new(), Event::failed("boom")].into();
        let err = deps.wait_all().unwrap_err();
        assert!(matches!(err, Error::DependencyFailed { .. }));
    }

    #[test]
    fn test_dependency_set_all_complete() {
        let mut deps = DependencySet::new();
        assert!(deps.is_empty());
        deps.push(Event::completed());
        deps.extend([Event::completed(), Event::completed()]);
        assert_eq!(deps.len(), 3);
        deps.wait_all().unwrap();
    }
}
