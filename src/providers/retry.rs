//! Bounded retry for transient provider failures.

use std::{future::Future, time::Duration};

use tokio::time::sleep;

use crate::lib::errors::ProviderError;

const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// How many extra attempts a provider call may make after a transient failure.
///
/// `max_retries == 0` means a single attempt with errors propagated unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }

    pub fn none() -> Self {
        Self::new(0)
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Run `attempt` until it succeeds, fails permanently, or retries run out.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut retries = 0;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && retries < self.max_retries => {
                    retries += 1;
                    tracing::warn!(
                        target: "mcp_discovery::providers",
                        provider = err.provider(),
                        error = %err,
                        retry = retries,
                        max_retries = self.max_retries,
                        "Transient provider failure, retrying"
                    );
                    sleep(self.base_delay * retries).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
