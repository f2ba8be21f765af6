//! Selection executor: runs a command's action and reports a typed outcome.
//!
//! Actions are either synchronous closures or closures returning a future.
//! [`execute`] invokes the action at call time and hands back a
//! [`PendingOutcome`] that owns nothing from the palette, so the palette stays
//! usable while an action is still running.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures::future::{self, BoxFuture, FutureExt};
use tracing::debug;

use crate::{ActionError, Command};

/// What an action reports when it finishes.
pub type ActionResult = Result<(), ActionError>;

/// Synchronous action body.
type SyncFn = dyn Fn() -> ActionResult + Send + Sync;
/// Asynchronous action body; each call yields a fresh future.
type AsyncFn = dyn Fn() -> BoxFuture<'static, ActionResult> + Send + Sync;

/// How an action is invoked.
#[derive(Clone)]
enum Invoke {
    /// Runs to completion inside `execute`.
    Sync(Arc<SyncFn>),
    /// Created inside `execute`, driven by whoever awaits the outcome.
    Async(Arc<AsyncFn>),
}

/// A zero-argument operation attached to a command.
#[derive(Clone)]
pub struct Action {
    /// The wrapped body.
    invoke: Invoke,
}

impl Action {
    /// Wrap a synchronous closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> ActionResult + Send + Sync + 'static,
    {
        Self {
            invoke: Invoke::Sync(Arc::new(f)),
        }
    }

    /// Wrap a closure that returns a future.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        Self {
            invoke: Invoke::Async(Arc::new(move || f().boxed())),
        }
    }

    /// An action that does nothing and always succeeds.
    pub fn noop() -> Self {
        Self::new(|| Ok(()))
    }

    /// True when the action completes asynchronously.
    pub fn is_async(&self) -> bool {
        matches!(self.invoke, Invoke::Async(_))
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.invoke {
            Invoke::Sync(_) => "sync",
            Invoke::Async(_) => "async",
        };
        write!(f, "Action({})", kind)
    }
}

/// Result of executing a command.
#[derive(Debug)]
pub enum Outcome {
    /// The action ran and succeeded.
    Completed,
    /// The action ran and failed.
    Failed(ActionError),
    /// The command was disabled; the action was not invoked.
    Skipped,
}

impl Outcome {
    /// True for [`Outcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// True for [`Outcome::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// True for [`Outcome::Skipped`].
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Convert into a `Result`, keeping the action's error. `Skipped` is `Ok`.
    pub fn into_result(self) -> ActionResult {
        match self {
            Self::Failed(e) => Err(e),
            Self::Completed | Self::Skipped => Ok(()),
        }
    }
}

impl From<ActionResult> for Outcome {
    fn from(r: ActionResult) -> Self {
        match r {
            Ok(()) => Self::Completed,
            Err(e) => Self::Failed(e),
        }
    }
}

/// The eventual [`Outcome`] of an executed command.
///
/// Await it, or spawn it on a runtime, to observe failures.
#[must_use = "action failures are only observable through the outcome"]
pub struct PendingOutcome {
    /// Resolves once the action finishes.
    inner: BoxFuture<'static, Outcome>,
}

impl PendingOutcome {
    /// An outcome that is already known.
    pub fn ready(outcome: Outcome) -> Self {
        Self {
            inner: future::ready(outcome).boxed(),
        }
    }
}

impl fmt::Debug for PendingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PendingOutcome")
    }
}

impl Future for PendingOutcome {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Outcome> {
        self.inner.poll_unpin(cx)
    }
}

/// Trace a finished action under its command id. Failures stay in the
/// outcome for the host to report.
fn report(id: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Failed(e) => debug!(id, error = %e, "action_failed"),
        Outcome::Completed => debug!(id, "action_completed"),
        Outcome::Skipped => {}
    }
}

/// Execute `command`.
///
/// Disabled commands are skipped without invoking the action. A synchronous
/// action runs before this returns; an asynchronous one is created here and
/// runs when the returned outcome is awaited.
pub fn execute(command: &Command) -> PendingOutcome {
    if command.disabled {
        debug!(id = %command.id, "execute_skipped_disabled");
        return PendingOutcome::ready(Outcome::Skipped);
    }
    debug!(id = %command.id, is_async = command.action.is_async(), "execute");
    match &command.action.invoke {
        Invoke::Sync(f) => {
            let outcome = Outcome::from(f());
            report(&command.id, &outcome);
            PendingOutcome::ready(outcome)
        }
        Invoke::Async(f) => {
            let fut = f();
            let id = command.id.clone();
            PendingOutcome {
                inner: async move {
                    let outcome = Outcome::from(fut.await);
                    report(&id, &outcome);
                    outcome
                }
                .boxed(),
            }
        }
    }
}
