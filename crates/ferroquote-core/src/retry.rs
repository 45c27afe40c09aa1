//! Bounded retry with a fixed delay between attempts.

use std::time::Duration;

/// Default number of calls made before a download is given up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause between two failed attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Blocking pause used between attempts.
///
/// Injected so tests can run the retry loop without real delays.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Configuration for the retry loop around provider calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of calls, including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay slept after every failed attempt except the last.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    pub const fn effective_attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }
}

/// Last error of a retry loop that ran out of attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Run `operation` until it succeeds or the policy's attempt limit is hit.
///
/// The closure receives the 1-based attempt number. The sleeper is called
/// between attempts only, never after the final failure.
pub fn retry_blocking<T, E, F>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut operation: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Result<T, E>,
{
    let max_attempts = policy.effective_attempts();
    let mut attempt = 1;

    loop {
        match operation(attempt) {
            Ok(value) => return Ok(value),
            Err(error) if attempt >= max_attempts => {
                return Err(RetryExhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }
            Err(_) => {
                sleeper.sleep(policy.delay);
                attempt += 1;
            }
        }
    }
}
