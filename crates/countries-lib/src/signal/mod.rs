use tokio_util::sync::CancellationToken;

/// Handles graceful shutdown by intercepting SIGINT (Ctrl+C) and SIGTERM signals.
///
/// Uses a `CancellationToken` to broadcast shutdown to all listeners.
/// Spawn `listen()` as a background task, then await `token().cancelled()`
/// wherever the proxy server needs to stop.
pub struct SignalHandler {
    token: CancellationToken,
}

impl SignalHandler {
    /// Create a new signal handler with a fresh cancellation token.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Returns a clone of the cancellation token for sharing with subsystems.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Listens for SIGINT or SIGTERM and cancels the token when received.
    pub async fn listen(&self) {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT, shutting down...");
            }
            _ = Self::sigterm() => {
                tracing::info!("Received SIGTERM, shutting down...");
            }
        }
        self.token.cancel();
    }

    #[cfg(unix)]
    async fn sigterm() {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    async fn sigterm() {
        std::future::pending::<()>().await;
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_uncancelled_token() {
        let handler = SignalHandler::new();
        assert!(!handler.token().is_cancelled());
    }

    #[test]
    fn test_token_clones_share_state() {
        let handler = SignalHandler::new();
        let t1 = handler.token();
        let t2 = handler.token();

        handler.token.cancel();
        assert!(t1.is_cancelled());
        assert!(t2.is_cancelled());
    }
}
