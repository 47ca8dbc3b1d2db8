//! Cancellation scope for actor and effect tasks.
//!
//! A [`Scope`] owns a shutdown signal. Tasks spawned through it race their
//! future against the signal and stop at the next await point once it fires.
//! Dropping the scope fires the signal, so a machine's lifetime is tied to the
//! value that owns its scope.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Owner of a group of cancellable tasks.
#[derive(Debug, Default)]
pub struct Scope {
    token: CancellationToken,
}

impl Scope {
    /// Root scope.
    pub fn new() -> Self {
        Self { token: CancellationToken::new() }
    }

    /// Scope cancelled with `self` or any ancestor, or on its own.
    pub fn child(&self) -> Self {
        Self { token: self.token.child_token() }
    }

    /// Spawn `fut` on the current tokio runtime, cancelled with this scope.
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {},
                () = fut => {},
            }
        });
    }

    /// Fire the shutdown signal. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once this scope or an ancestor has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.cancel();
    }
}
