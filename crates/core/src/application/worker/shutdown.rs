// Worker Shutdown Token

use tokio::sync::watch;

/// Process-wide shutdown signal, observed by queue waits
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for shutdown signal
    ///
    /// Resolves immediately if shutdown was already requested. A dropped
    /// sender counts as a shutdown request.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}

/// Shutdown sender
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Signal shutdown to every token
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }

    /// Another token bound to this sender
    pub fn token(&self) -> ShutdownToken {
        ShutdownToken {
            rx: self.tx.subscribe(),
        }
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_after_shutdown_returns_immediately() {
        let (tx, mut token) = shutdown_channel();
        tx.shutdown();

        assert!(token.is_shutdown());
        tokio::time::timeout(Duration::from_millis(100), token.wait())
            .await
            .expect("already-fired shutdown must not block");
    }

    #[tokio::test]
    async fn test_late_token_sees_shutdown() {
        let (tx, _token) = shutdown_channel();
        tx.shutdown();

        assert!(tx.token().is_shutdown());
    }
}
