//! # Long-Running Operations
//!
//! RPCs that start server-side work return an operation handle instead of
//! their final result. An [`OperationFuture`] wraps that handle together with
//! the operations sub-client's get/cancel callables and resolves to the
//! typed result:
//!
//! * [`OperationFuture::result`] polls on a bounded exponential schedule
//!   until the operation reaches a terminal state or the caller's deadline
//!   elapses;
//! * [`OperationFuture::cancel`] issues the server-side cancel and returns —
//!   best effort, the terminal state is authoritative;
//! * [`OperationFuture::metadata`] decodes the typed progress snapshot.
//!
//! A handle that is already terminal resolves without a single poll.

use crate::error::Error;
use crate::options::Metadata;
use crate::retry::Backoff;
use futures_util::future::BoxFuture;
use std::marker::PhantomData;
use std::time::Duration;
use tokio::time::Instant;

/// gRPC status code for a cancelled operation.
const CANCELLED_CODE: i32 = 1;

/// Read-only view of an operation handle. The facade's `Operation` record
/// implements this; the wrapper never needs the concrete message type.
pub trait OperationState: Clone + Send + 'static {
    fn name(&self) -> &str;
    fn is_done(&self) -> bool;
    /// Terminal error status `(code, message)`, when the operation failed.
    fn error_status(&self) -> Option<(i32, String)>;
    /// Packed response payload `(type_url, value)`.
    fn response_any(&self) -> Option<(&str, &[u8])>;
    /// Packed progress metadata `(type_url, value)`.
    fn metadata_any(&self) -> Option<(&str, &[u8])>;
}

/// Polling cadence for [`OperationFuture::result`].
#[derive(Debug, Clone, PartialEq)]
pub struct PollingPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Bounds each individual get-operation call.
    pub per_poll_timeout: Duration,
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(45),
            multiplier: 2.0,
            per_poll_timeout: Duration::from_secs(5),
        }
    }
}

/// Re-fetches the operation by name.
pub type GetOperationCall<Op> =
    Box<dyn FnMut(String, Metadata) -> BoxFuture<'static, Result<Op, Error>> + Send>;

/// Issues the server-side cancel for the operation.
pub type CancelOperationCall =
    Box<dyn FnMut(String, Metadata) -> BoxFuture<'static, Result<(), Error>> + Send>;

/// A future over the typed result of a long-running operation.
///
/// `R` is the expected response record, `M` the expected metadata record.
pub struct OperationFuture<Op: OperationState, R, M> {
    latest: Op,
    get_call: GetOperationCall<Op>,
    cancel_call: CancelOperationCall,
    polling: PollingPolicy,
    metadata: Metadata,
    _payload: PhantomData<fn() -> (R, M)>,
}

impl<Op, R, M> OperationFuture<Op, R, M>
where
    Op: OperationState,
    R: prost::Message + prost::Name + Default,
    M: prost::Message + prost::Name + Default,
{
    pub fn new(
        initial: Op,
        get_call: GetOperationCall<Op>,
        cancel_call: CancelOperationCall,
        polling: PollingPolicy,
        metadata: Metadata,
    ) -> Self {
        Self {
            latest: initial,
            get_call,
            cancel_call,
            polling,
            metadata,
            _payload: PhantomData,
        }
    }

    /// Server-assigned operation name.
    pub fn name(&self) -> &str {
        self.latest.name()
    }

    /// Whether the latest snapshot is terminal. Non-blocking; call
    /// [`refresh`](Self::refresh) to observe server-side progress.
    pub fn done(&self) -> bool {
        self.latest.is_done()
    }

    /// The latest observed handle.
    pub fn latest(&self) -> &Op {
        &self.latest
    }

    /// Typed progress metadata from the latest snapshot.
    pub fn metadata(&self) -> Result<Option<M>, Error> {
        self.latest
            .metadata_any()
            .map(|(type_url, value)| decode_payload(type_url, value))
            .transpose()
    }

    /// Re-fetches the operation once, bounded by the per-poll timeout.
    pub async fn refresh(&mut self) -> Result<&Op, Error> {
        let name = self.latest.name().to_string();
        let fetch = (self.get_call)(name.clone(), self.metadata.clone());
        self.latest = tokio::time::timeout(self.polling.per_poll_timeout, fetch)
            .await
            .map_err(|_| {
                Error::deadline_exceeded(format!(
                    "polling operation '{name}' exceeded the {:?} per-poll timeout",
                    self.polling.per_poll_timeout
                ))
            })??;
        Ok(&self.latest)
    }

    /// Requests server-side cancellation and returns. The operation may
    /// still complete; inspect the terminal state through
    /// [`result`](Self::result).
    pub async fn cancel(&mut self) -> Result<(), Error> {
        let name = self.latest.name().to_string();
        tracing::debug!(operation = %name, "requesting cancellation");
        (self.cancel_call)(name, self.metadata.clone()).await
    }

    /// Polls until the operation is terminal, then decodes the payload.
    ///
    /// `timeout` bounds the whole wait; exhausting it fails with
    /// `deadline-exceeded` while the server-side operation keeps running.
    pub async fn result(mut self, timeout: Option<Duration>) -> Result<R, Error> {
        let deadline = timeout.map(|t| Instant::now() + t);
        let mut schedule = Backoff::new(
            self.polling.initial_delay,
            self.polling.max_delay,
            self.polling.multiplier,
        );

        while !self.latest.is_done() {
            let delay = schedule.next_delay();
            if let Some(deadline) = deadline
                && Instant::now() + delay >= deadline
            {
                return Err(Error::deadline_exceeded(format!(
                    "operation '{}' did not reach a terminal state in time",
                    self.latest.name()
                )));
            }
            tokio::time::sleep(delay).await;
            self.refresh().await?;
        }

        self.into_result()
    }

    fn into_result(self) -> Result<R, Error> {
        if let Some((code, message)) = self.latest.error_status() {
            if code == CANCELLED_CODE {
                return Err(Error::cancelled(format!(
                    "operation '{}' was cancelled: {message}",
                    self.latest.name()
                )));
            }
            return Err(Error::OperationFailed { code, message });
        }

        match self.latest.response_any() {
            Some((type_url, value)) => decode_payload(type_url, value),
            // Terminal without a payload: the declared response is empty.
            None => Ok(R::default()),
        }
    }
}

impl<Op: OperationState, R, M> std::fmt::Debug for OperationFuture<Op, R, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationFuture")
            .field("name", &self.latest.name())
            .field("done", &self.latest.is_done())
            .finish()
    }
}

/// Decodes a packed payload, verifying the type URL when one is present.
fn decode_payload<P: prost::Message + prost::Name + Default>(
    type_url: &str,
    value: &[u8],
) -> Result<P, Error> {
    let expected = P::full_name();
    if !type_url.is_empty() && type_url.rsplit('/').next() != Some(expected.as_str()) {
        return Err(Error::codec(format!(
            "operation payload has type '{type_url}', expected '{expected}'"
        )));
    }
    P::decode(value).map_err(|e| Error::codec(format!("failed to decode '{expected}': {e}")))
}
