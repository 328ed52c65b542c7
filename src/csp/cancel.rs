//! Cooperative cancellation and time limits.
//!
//! Search drivers poll a [`SearchGuard`] once per node. A search that is
//! stopped returns [`SearchResult::Interrupted`](super::SearchResult)
//! promptly and never reports a partial assignment as a solution.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cloneable flag that asks a running search to stop.
///
/// Clones share the same flag, so one clone may be handed to another
/// thread (or a Ctrl-C handler) while the search holds the other.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Why a search stopped before finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The token was cancelled.
    Cancelled,
    /// The time limit elapsed.
    TimeLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Cancelled => write!(f, "cancelled"),
            StopReason::TimeLimit => write!(f, "time limit reached"),
        }
    }
}

/// Combines a cancellation token with an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct SearchGuard {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl SearchGuard {
    /// A guard that never stops the search.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// A guard polling `token`.
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Adds a time limit counted from now.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Instant::now().checked_add(limit);
        self
    }

    /// Returns the reason to stop, if any. Cancellation wins over the deadline.
    #[inline]
    pub fn check(&self) -> Option<StopReason> {
        if self.token.is_cancelled() {
            return Some(StopReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(StopReason::TimeLimit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_clones_share_flag() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!token.is_cancelled());
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_guard_continues_when_clear() {
        let guard = SearchGuard::new(CancellationToken::new());
        assert_eq!(guard.check(), None);
        assert_eq!(SearchGuard::unlimited().check(), None);
    }

    #[test]
    fn test_guard_reports_cancellation() {
        let token = CancellationToken::new();
        let guard = SearchGuard::new(token.clone()).with_time_limit(Duration::ZERO);
        token.cancel();
        assert_eq!(guard.check(), Some(StopReason::Cancelled));
    }

    #[test]
    fn test_guard_reports_time_limit() {
        let guard = SearchGuard::unlimited().with_time_limit(Duration::ZERO);
        assert_eq!(guard.check(), Some(StopReason::TimeLimit));

        let guard = SearchGuard::unlimited().with_time_limit(Duration::from_secs(3600));
        assert_eq!(guard.check(), None);
    }
}
