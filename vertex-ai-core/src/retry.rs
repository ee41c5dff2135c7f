//! # Retry Policy
//!
//! The method wrapper layers a retry loop around every transport attempt. A
//! [`RetryPolicy`] names the error kinds worth retrying, the exponential
//! backoff schedule, and an overall deadline across attempts. Methods default
//! to no retry; callers opt in per call.
//!
//! Each attempt is additionally bounded by the per-attempt timeout resolved by
//! the method wrapper. A timeout of zero fails before the transport is ever
//! invoked.

use crate::error::{Error, ErrorKind};
use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

/// Decides which failures are retried and how long to wait between attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Error kinds that trigger another attempt. Empty disables retries.
    pub retry_kinds: Vec<ErrorKind>,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: f64,
    /// Overall deadline across attempts, including backoff sleeps.
    pub deadline: Option<Duration>,
}

impl RetryPolicy {
    /// No retries. The per-method default for every generated RPC.
    pub fn disabled() -> Self {
        Self {
            retry_kinds: Vec::new(),
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
            multiplier: 2.0,
            deadline: None,
        }
    }

    /// Retries transient transport failures with the standard schedule.
    pub fn transient() -> Self {
        Self {
            retry_kinds: vec![ErrorKind::TransientTransport],
            ..Self::disabled()
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_backoff(mut self, initial: Duration, max: Duration, multiplier: f64) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self.multiplier = multiplier;
        self
    }

    pub fn with_retry_on(mut self, kind: ErrorKind) -> Self {
        if !self.retry_kinds.contains(&kind) {
            self.retry_kinds.push(kind);
        }
        self
    }

    pub fn should_retry(&self, error: &Error) -> bool {
        self.retry_kinds.contains(&error.kind())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Bounded exponential backoff schedule. Jitter is applied by the retry loop,
/// not here; the LRO poller consumes the schedule unjittered.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    max: Duration,
    multiplier: f64,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration, multiplier: f64) -> Self {
        Self {
            next: initial.min(max),
            max,
            multiplier,
        }
    }

    /// Returns the current delay and advances the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let current = self.next;
        self.next = self.next.mul_f64(self.multiplier).min(self.max);
        current
    }
}

impl From<&RetryPolicy> for Backoff {
    fn from(policy: &RetryPolicy) -> Self {
        Backoff::new(policy.initial_backoff, policy.max_backoff, policy.multiplier)
    }
}

fn jittered(delay: Duration) -> Duration {
    delay.mul_f64(rand::rng().random_range(0.0..1.0))
}

/// Runs `attempt` under `policy`, bounding each attempt by
/// `per_attempt_timeout`. Every attempt sees an identical request; the
/// closure is responsible for cloning whatever state it sends.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    per_attempt_timeout: Option<Duration>,
    mut attempt: F,
) -> Result<T, Error>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    if per_attempt_timeout == Some(Duration::ZERO) {
        return Err(Error::deadline_exceeded(
            "timeout of 0s elapsed before the first attempt",
        ));
    }

    let started = Instant::now();
    let mut backoff = Backoff::from(policy);
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let outcome = match per_attempt_timeout {
            Some(limit) => match tokio::time::timeout(limit, attempt(attempts)).await {
                Ok(result) => result,
                Err(_) => Err(Error::deadline_exceeded(format!(
                    "attempt {attempts} exceeded the {limit:?} timeout"
                ))),
            },
            None => attempt(attempts).await,
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(error) if policy.should_retry(&error) => {
                let delay = jittered(backoff.next_delay());
                if let Some(deadline) = policy.deadline
                    && started.elapsed() + delay > deadline
                {
                    return Err(Error::deadline_exceeded(format!(
                        "retry deadline of {deadline:?} exhausted after {attempts} attempts; \
                         last error: {error}"
                    )));
                }
                tracing::debug!(attempt = attempts, delay_ms = delay.as_millis() as u64, %error, "retrying");
                tokio::time::sleep(delay).await;
            }
            Err(error) => return Err(error),
        }
    }
}
