//! Isolated hook invocation.
//!
//! Each hook runs on its own task so a panic unwinds that task only. The
//! caller waits on the join handle under a timeout. When the bound is
//! exceeded the task is aborted and the caller waits, again bounded, until
//! the task has actually stopped. A hook that blocks its thread only
//! observes the abort once it yields, so it may outlive that second wait.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{HookError, HookResult};

/// Run `hook` on a spawned task, bounded by `limit`.
pub(crate) async fn run_hook<F>(limit: Duration, hook: F) -> HookResult
where
    F: Future<Output = HookResult> + Send + 'static,
{
    let mut handle = tokio::spawn(hook);

    match timeout(limit, &mut handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) if e.is_panic() => Err(HookError::Panicked(panic_message(&*e.into_panic()))),
        Ok(Err(e)) => Err(HookError::Failed(e.to_string())),
        Err(_) => {
            abort_and_wait(handle, limit).await;
            Err(HookError::TimedOut {
                timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            })
        },
    }
}

/// Abort a timed-out hook and wait up to `grace` for its task to stop.
async fn abort_and_wait(mut handle: JoinHandle<HookResult>, grace: Duration) {
    handle.abort();
    match timeout(grace, &mut handle).await {
        Ok(Err(e)) if e.is_cancelled() => debug!("Timed-out hook cancelled"),
        Ok(_) => debug!("Timed-out hook finished before the abort took effect"),
        Err(_) => warn!(
            grace_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX),
            "Timed-out hook is still running after abort; it may overlap later hooks"
        ),
    }
}

/// Run a synchronous constructor, turning a panic into its message.
pub(crate) fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|p| panic_message(&*p))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_owned()
    }
}
