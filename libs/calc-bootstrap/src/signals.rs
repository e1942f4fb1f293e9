//! Process shutdown triggers.
//!
//! A service stops on Ctrl+C everywhere and on SIGTERM under unix. The
//! watcher turns the first of those into a cancelled [`CancellationToken`],
//! which the serve loop observes to drain and return.

use std::fmt;
use std::future::Future;

use anyhow::Result;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// The signal that ended the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    CtrlC,
    #[cfg(unix)]
    Sigterm,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CtrlC => f.write_str("SIGINT"),
            #[cfg(unix)]
            Self::Sigterm => f.write_str("SIGTERM"),
        }
    }
}

/// Resolve once the process is asked to stop.
///
/// # Errors
/// Fails when a signal handler cannot be registered with the OS.
pub async fn wait_for_shutdown() -> Result<ShutdownSignal> {
    let received = tokio::select! {
        res = interrupt() => res?,
        res = terminate() => res?,
    };
    tracing::info!(signal = %received, "stop requested, draining");
    Ok(received)
}

/// Cancel `cancel` when the process is asked to stop.
///
/// If the handlers cannot be registered the watcher falls back to plain
/// Ctrl+C; the token is cancelled either way once the wait returns.
pub fn spawn_shutdown_watcher(cancel: CancellationToken) {
    tokio::spawn(cancel_when(wait_for_shutdown(), cancel));
}

async fn cancel_when<F>(waiter: F, cancel: CancellationToken)
where
    F: Future<Output = Result<ShutdownSignal>>,
{
    if let Err(e) = waiter.await {
        tracing::warn!(error = %e, "signal handlers unavailable, waiting for Ctrl+C only");
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C listener failed, stopping now");
        }
    }
    cancel.cancel();
}

async fn interrupt() -> Result<ShutdownSignal> {
    signal::ctrl_c().await.inspect_err(|e| {
        tracing::error!(error = %e, "cannot listen for Ctrl+C");
    })?;
    Ok(ShutdownSignal::CtrlC)
}

#[cfg(unix)]
async fn terminate() -> Result<ShutdownSignal> {
    use signal::unix::{SignalKind, signal as unix_signal};

    let mut sigterm = unix_signal(SignalKind::terminate()).inspect_err(|e| {
        tracing::error!(error = %e, "cannot register SIGTERM handler");
    })?;
    sigterm.recv().await;
    Ok(ShutdownSignal::Sigterm)
}

#[cfg(not(unix))]
async fn terminate() -> Result<ShutdownSignal> {
    std::future::pending().await
}
