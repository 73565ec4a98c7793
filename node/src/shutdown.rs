//! Cancellation for the engine loops.
//!
//! A single controller fans one shutdown signal out to every subscriber via a
//! `tokio::sync::broadcast` channel. Each loop holds a receiver and puts it
//! first in its `select!`, so cancellation wins over pending work.

use tokio::signal;
use tokio::sync::broadcast;

/// Coordinates shutdown of both engine loops.
pub struct ShutdownController {
    tx: broadcast::Sender<()>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Get a receiver that resolves when shutdown is triggered.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger shutdown programmatically.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Wait for SIGTERM or SIGINT, then trigger shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("received SIGINT, shutting down"); }
            _ = terminate => { tracing::info!("received SIGTERM, shutting down"); }
        }

        self.trigger();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_subscriber() {
        let controller = ShutdownController::new();
        let mut rx = controller.subscribe();
        controller.trigger();
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn both_loops_would_be_notified() {
        let controller = ShutdownController::new();
        let mut consensus_rx = controller.subscribe();
        let mut packer_rx = controller.subscribe();
        controller.trigger();
        assert!(consensus_rx.recv().await.is_ok());
        assert!(packer_rx.recv().await.is_ok());
    }
}
