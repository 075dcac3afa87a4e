// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process signals that stop `pluginhub serve`.
//!
//! The gateway watches the returned token and drains in-flight requests once
//! it is cancelled.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// The signal that ended the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    Interrupt,
    Terminate,
}

impl StopSignal {
    fn name(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Spawn a task that cancels the returned token on SIGINT or SIGTERM.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        let received = wait_for_stop().await;
        info!(signal = received.name(), "stopping pluginhub");
        trigger.cancel();
    });

    token
}

#[cfg(unix)]
async fn wait_for_stop() -> StopSignal {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("SIGTERM handler unavailable, only Ctrl+C stops the service: {e}");
            let _ = tokio::signal::ctrl_c().await;
            return StopSignal::Interrupt;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => StopSignal::Interrupt,
        _ = terminate.recv() => StopSignal::Terminate,
    }
}

#[cfg(not(unix))]
async fn wait_for_stop() -> StopSignal {
    let _ = tokio::signal::ctrl_c().await;
    StopSignal::Interrupt
}
