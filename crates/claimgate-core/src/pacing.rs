//! Inter-case pacing policies.
//!
//! The evaluation runner pauses between cases to respect external model
//! rate limits. The policy is injectable so tests run with `NoPacing`.

use std::time::Duration;

use async_trait::async_trait;

/// Trait for inter-case pacing backends.
#[async_trait]
pub trait PacingPolicy: Send + Sync {
    /// Pause before the next model invocation. Called strictly between
    /// case N's completion and case N+1's invocation.
    async fn pause(&self);
}

/// Fixed delay between consecutive model invocations.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The conventional production setting: 500ms between calls.
    pub fn standard() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl PacingPolicy for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// No pacing; for tests and offline replay backends.
#[derive(Debug, Clone, Default)]
pub struct NoPacing;

#[async_trait]
impl PacingPolicy for NoPacing {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_sleeps_for_configured_duration() {
        let policy = FixedDelay::new(Duration::from_millis(500));
        let before = tokio::time::Instant::now();
        policy.pause().await;
        assert!(before.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn no_pacing_returns_immediately() {
        NoPacing.pause().await;
    }
}
