//! Bounded retry with monotonically increasing backoff

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::TerminalFailure;
use shared::ProviderFailure;

/// Run `op` up to `max_attempts` times, sleeping `base_delay * k` after
/// the k-th failed attempt.
///
/// Only retryable failures re-enter the loop; a non-retryable failure is
/// terminal immediately. The returned `TerminalFailure` carries the last
/// underlying cause and is expected during degraded operation — callers
/// proceed to fallback rather than aborting.
pub async fn execute_with_backoff<T, F, Fut>(
    mut op: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T, TerminalFailure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderFailure>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(failure) => {
                if !failure.is_retryable() || attempt >= max_attempts {
                    return Err(TerminalFailure {
                        attempts: attempt,
                        last: failure,
                    });
                }

                let delay = base_delay * attempt;
                warn!(
                    "⏳ Provider attempt {}/{} failed ({}), retrying in {}ms",
                    attempt,
                    max_attempts,
                    failure,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
