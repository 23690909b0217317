//! Delay scheduler abstraction

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the provisioning flow between reconciliation passes.
///
/// Implementations must suspend cooperatively: concurrent work in the
/// process, such as a progress spinner, keeps running during the wait.
/// Tests inject a recording no-op implementation to reconcile without real
/// time.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the current flow for `duration`, then resume.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_uses_the_runtime_timer() {
        let start = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_secs(3)).await;
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }
}
