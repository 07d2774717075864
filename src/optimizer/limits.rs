//! Solve limits: wall-clock budget and cooperative cancellation.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared flag that asks a running solve to stop.
///
/// Clones share the same flag, so one can be handed to the solve and the
/// other kept by whoever decides to cancel.
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
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Limits applied to a single solve.
///
/// With no limits the optimizer runs to completion on the calling thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveLimits {
    /// Maximum wall-clock time for the solve.
    pub time_limit: Option<Duration>,
    /// Cancellation token polled while waiting.
    #[serde(skip)]
    pub cancel: Option<CancellationToken>,
}

impl SolveLimits {
    /// No limits.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Whether any limit is set.
    pub fn is_bounded(&self) -> bool {
        self.time_limit.is_some() || self.cancel.is_some()
    }

    /// Whether the attached token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}
