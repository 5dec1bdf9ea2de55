//! Caller-supplied cancellation and deadline for a single call.
//!
//! A `Context` is cheap to clone; clones share one cancellation flag, so a
//! context handed to a call on one thread can be cancelled from another.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Why a context is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context canceled")]
    Cancelled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Debug, Clone, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never done unless cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// `None` while the context is live. Cancellation is reported ahead of an
    /// expired deadline.
    pub fn err(&self) -> Option<ContextError> {
        if self.cancelled.load(Ordering::SeqCst) {
            return Some(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Time left before the deadline; zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_never_done() {
        let ctx = Context::background();
        assert_eq!(ctx.err(), None);
        assert_eq!(ctx.remaining(), None);
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let ctx = Context::background();
        let handle = ctx.clone();
        handle.cancel();
        assert_eq!(ctx.err(), Some(ContextError::Cancelled));
    }

    #[test]
    fn past_deadline_is_exceeded() {
        let ctx = Context::with_deadline(Instant::now() - Duration::from_millis(1));
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn cancellation_wins_over_deadline() {
        let ctx = Context::with_deadline(Instant::now() - Duration::from_millis(1));
        ctx.cancel();
        assert_eq!(ctx.err(), Some(ContextError::Cancelled));
    }

    #[test]
    fn future_deadline_is_live() {
        let ctx = Context::with_timeout(Duration::from_secs(60));
        assert_eq!(ctx.err(), None);
        assert!(ctx.remaining().unwrap() > Duration::from_secs(30));
    }
}
