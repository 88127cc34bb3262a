// ABOUTME: Bounded, cancellable polling of long-running operations.
// ABOUTME: One status call per attempt, with a fixed wait between attempts.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::error::DeployError;
use crate::config::PollConfig;
use crate::provider::{Operation, OperationOps};
use crate::types::OperationName;

/// How long to wait between status calls, and for how long overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` polls until the operation finishes.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollConfig::default().into()
    }
}

impl From<PollConfig> for PollPolicy {
    fn from(config: PollConfig) -> Self {
        Self {
            interval: config.interval,
            timeout: config.timeout,
        }
    }
}

/// Poll `name` until it is done, the deadline passes, or `cancel` fires.
///
/// A finished operation carrying an error payload fails with that payload.
pub async fn wait_for_operation<R: OperationOps + ?Sized>(
    provider: &R,
    name: &OperationName,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> Result<Operation, DeployError> {
    let deadline = policy.timeout.map(|timeout| Instant::now() + timeout);
    let mut attempt: u32 = 0;

    loop {
        let operation = provider.get_operation(name).await?;
        attempt += 1;

        if operation.done {
            tracing::debug!(operation = %name, attempt, "Operation finished");
            return match operation.error {
                Some(error) => Err(DeployError::OperationFailed(error)),
                None => Ok(operation),
            };
        }

        let mut wake = Instant::now() + policy.interval;
        if let (Some(deadline), Some(timeout)) = (deadline, policy.timeout) {
            if Instant::now() >= deadline {
                return Err(DeployError::OperationTimeout {
                    operation: name.to_string(),
                    timeout,
                });
            }
            wake = wake.min(deadline);
        }

        tracing::debug!(operation = %name, attempt, "Operation still running");

        tokio::select! {
            _ = cancel.cancelled() => {
                return Err(DeployError::Cancelled { operation: name.to_string() });
            }
            _ = tokio::time::sleep_until(wake) => {}
        }
    }
}
