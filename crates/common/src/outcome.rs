//! Panic-capturing outcome adapters
//!
//! Converts a computation that may panic into a value-level [`Outcome`], so
//! call sites branch on a `Result` instead of wrapping everything in
//! `catch_unwind` themselves. Three input forms are supported, matching how
//! callers actually hold work: a zero-argument closure, an already-pending
//! future, and a zero-argument closure that produces a future. A plain value
//! is treated as already resolved via [`resolved`].
//!
//! Each adapter introduces at most one suspension point (the awaited future)
//! and imposes no concurrency control of its own. None of them panic outward:
//! every failure is communicated through the error branch.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use thiserror::Error;

/// Outcome of a captured computation: the value, or the captured failure.
pub type Outcome<T> = Result<T, Caught>;

/// Failure captured from a panicking computation.
///
/// Carries the panic message when the payload was a string (the payload of
/// `panic!("...")` and friends); other payload types are opaque.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Caught {
    message: String,
}

impl Caught {
    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        // panic! with a literal yields &'static str, with a format string a String
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with non-string payload".to_string()
        };
        Self { message }
    }

    /// The captured panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Run a zero-argument computation, capturing an unwind as a value.
///
/// Returns `Ok` with the computed value, or `Err` carrying the panic message.
pub fn capture<T, F>(f: F) -> Outcome<T>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Caught::from_panic)
}

/// Await an already-pending computation, capturing a panic during polling.
pub async fn capture_async<F>(future: F) -> Outcome<F::Output>
where
    F: Future,
{
    AssertUnwindSafe(future).catch_unwind().await.map_err(Caught::from_panic)
}

/// Invoke a zero-argument function producing a future, then await it.
///
/// A panic in the call itself and a panic while the future is polled are
/// captured the same way.
pub async fn capture_with<F, Fut>(f: F) -> Outcome<Fut::Output>
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    match capture(f) {
        Ok(future) => capture_async(future).await,
        Err(caught) => Err(caught),
    }
}

/// Wrap a plain, already-resolved value.
pub fn resolved<T>(value: T) -> Outcome<T> {
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::future;

    use super::*;

    #[test]
    fn capture_returns_value_when_nothing_panics() {
        let result = capture(|| 42);
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn capture_converts_panic_into_error() {
        let result: Outcome<i32> = capture(|| panic!("boom"));
        let caught = result.unwrap_err();
        assert_eq!(caught.message(), "boom");
    }

    #[test]
    fn capture_preserves_formatted_panic_message() {
        let result: Outcome<()> = capture(|| panic!("failed after {} tries", 3));
        assert_eq!(result.unwrap_err().message(), "failed after 3 tries");
    }

    #[test]
    fn resolved_wraps_plain_value() {
        assert_eq!(resolved(7), Ok(7));
    }

    #[tokio::test]
    async fn capture_async_awaits_pending_computation() {
        let result = capture_async(future::ready(7)).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn capture_async_converts_panic_during_poll() {
        let result: Outcome<i32> = capture_async(async { panic!("boom") }).await;
        assert_eq!(result.unwrap_err().message(), "boom");
    }

    #[tokio::test]
    async fn capture_with_resolves_function_returning_future() {
        let result = capture_with(|| async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn capture_with_converts_panic_in_the_call_itself() {
        let result: Outcome<i32> =
            capture_with(|| -> future::Ready<i32> { panic!("boom") }).await;
        assert_eq!(result.unwrap_err().message(), "boom");
    }

    #[tokio::test]
    async fn exactly_one_branch_is_ever_populated() {
        // Result makes the invariant structural; spot-check both branches.
        let ok = capture_with(|| async { "value" }).await;
        assert!(ok.is_ok());
        let err: Outcome<&str> = capture_with(|| async { panic!("boom") }).await;
        assert!(err.is_err());
    }
}
