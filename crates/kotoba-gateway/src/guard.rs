//! Deadline guard for provider calls.
//!
//! The provider call and a timer race; whichever finishes first decides the
//! outcome. When the timer wins the provider future is dropped. Nothing is
//! sent upstream, so the provider may still finish the work on its side.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The provider did not answer before the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("provider did not respond within {0:?}")]
pub struct DeadlineExceeded(pub Duration);

/// Run `call` with a deadline.
///
/// # Errors
///
/// Returns `DeadlineExceeded` if `deadline` elapses before `call` completes.
pub async fn race<F, T>(deadline: Duration, call: F) -> Result<T, DeadlineExceeded>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| DeadlineExceeded(deadline))
}
