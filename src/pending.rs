use std::time::Duration;

use tokio::sync::oneshot;
use tracing::debug;

/// Runs `work` after an optional cosmetic delay. Returns `None` when `cancel`
/// fires before the delay elapses, in which case `work` never runs.
pub async fn simulate<T, F>(delay: Duration, cancel: oneshot::Receiver<()>, work: F) -> Option<T>
where
    F: FnOnce() -> T,
{
    if delay.is_zero() {
        return Some(work());
    }

    tokio::select! {
        _ = tokio::time::sleep(delay) => Some(work()),
        result = cancel => {
            if result.is_ok() {
                debug!(delay_ms = delay.as_millis() as u64, "pending work cancelled");
                None
            } else {
                // sender dropped without cancelling
                tokio::time::sleep(delay).await;
                Some(work())
            }
        }
    }
}
