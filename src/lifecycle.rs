//! Process lifecycle: wait for SIGINT/SIGTERM, drain the server for a bounded
//! window, then close the datastore.

use crate::error::ShutdownError;
use crate::store::UserStore;
use std::future::{Future, IntoFuture};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    ShuttingDown,
    Terminated,
}

/// Shared handle on the process lifecycle. Cloning shares the same token and phase.
#[derive(Clone)]
pub struct Lifecycle {
    token: CancellationToken,
    phase: Arc<watch::Sender<Phase>>,
    drain: Duration,
}

impl Lifecycle {
    pub fn new(drain: Duration) -> Self {
        let (phase, _) = watch::channel(Phase::Running);
        Lifecycle {
            token: CancellationToken::new(),
            phase: Arc::new(phase),
            drain,
        }
    }

    /// Cancelled once shutdown begins. Hand a clone to anything that should stop with the process.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Move to `ShuttingDown` and broadcast cancellation. Later calls are no-ops.
    pub fn begin_shutdown(&self) {
        let changed = self.phase.send_if_modified(|phase| {
            if *phase == Phase::Running {
                *phase = Phase::ShuttingDown;
                true
            } else {
                false
            }
        });
        if changed {
            tracing::info!(drain = ?self.drain, "shutting down");
            self.token.cancel();
        }
    }

    /// Spawn the background task that turns the first termination signal into `begin_shutdown`.
    pub fn spawn_signal_listener(&self) -> JoinHandle<()> {
        let lifecycle = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                received = wait_for_signal() => match received {
                    Ok(signal) => {
                        tracing::info!(signal, "received termination signal");
                        lifecycle.begin_shutdown();
                    }
                    Err(e) => tracing::error!(error = %e, "failed to install signal handlers"),
                },
                _ = lifecycle.token.cancelled() => {}
            }
        })
    }

    /// Drive `server` until it finishes or shutdown begins, give it at most the
    /// drain window to finish in-flight work, then close `store`.
    ///
    /// The server future should stop accepting connections once `token()` is
    /// cancelled (e.g. via axum's `with_graceful_shutdown`).
    pub async fn run<S>(&self, server: S, store: &dyn UserStore) -> Result<(), ShutdownError>
    where
        S: IntoFuture<Output = io::Result<()>>,
    {
        let served = self.serve_with_drain(server.into_future()).await;
        // The server may have stopped on its own (e.g. a listener error).
        self.begin_shutdown();

        if let Err(e) = store.close().await {
            tracing::error!(error = %e, "failed to close datastore");
            return Err(ShutdownError::Close(e));
        }
        self.phase.send_replace(Phase::Terminated);
        tracing::info!("shutdown complete");
        served.map_err(ShutdownError::Serve)
    }

    async fn serve_with_drain<F>(&self, server: F) -> io::Result<()>
    where
        F: Future<Output = io::Result<()>>,
    {
        tokio::pin!(server);
        tokio::select! {
            res = &mut server => res,
            _ = self.token.cancelled() => {
                match tokio::time::timeout(self.drain, &mut server).await {
                    Ok(res) => res,
                    Err(_) => {
                        tracing::warn!(drain = ?self.drain, "drain window elapsed; abandoning in-flight requests");
                        Ok(())
                    }
                }
            }
        }
    }
}

/// Resolve on SIGINT or SIGTERM (Ctrl+C off unix), naming the signal received.
pub async fn wait_for_signal() -> io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            _ = interrupt.recv() => Ok("SIGINT"),
            _ = terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok("ctrl-c")
    }
}
