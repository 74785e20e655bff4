//! Caller-controlled cancellation and deadlines for provider I/O.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{FxError, FxResult};

/// Per-request context handed to every provider call.
///
/// Providers do not add timeouts or retries of their own; the only limits on
/// an outbound call are the ones carried here.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no deadline and a fresh cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an existing cancellation token, e.g. a process shutdown token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run `fut` until it completes, the token is cancelled or the deadline
    /// passes, whichever happens first. `what` names the operation in errors.
    pub async fn run<F>(&self, what: &str, fut: F) -> FxResult<F::Output>
    where
        F: Future,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(FxError::Cancelled(what.to_string())),
            _ = deadline => Err(FxError::DeadlineExceeded(what.to_string())),
            out = fut => Ok(out),
        }
    }
}
