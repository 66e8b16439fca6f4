use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Lifetime of one screen instance.
///
/// Every request a screen issues runs through [`ScreenScope::run`]. Once the
/// scope is disposed, pending and later results are dropped instead of being
/// applied to state that no longer belongs to a visible screen. Dropping the
/// scope disposes it.
#[derive(Debug, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

/// Cloneable handle used by navigation to dispose a screen that is busy
/// awaiting a response.
#[derive(Debug, Clone)]
pub struct DisposeHandle {
    token: CancellationToken,
}

impl DisposeHandle {
    pub fn dispose(&self) {
        self.token.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> DisposeHandle {
        DisposeHandle {
            token: self.token.clone(),
        }
    }

    pub fn dispose(&self) {
        self.token.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Awaits `future` unless the scope is disposed first. `None` means the
    /// result must be discarded.
    pub async fn run<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        if self.is_disposed() {
            return None;
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = future => {
                if self.is_disposed() {
                    None
                } else {
                    Some(output)
                }
            }
        }
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
