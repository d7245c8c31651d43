//! Time source for `exp` handling.

use chrono::Utc;
use std::sync::Arc;

/// Supplies the current time as Unix seconds (UTC).
///
/// Implementations must be thread-safe (Send + Sync).
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch
    fn now(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}
