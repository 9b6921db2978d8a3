//! Startup orchestration.

use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for startup operations.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the HTTP listener described by the config.
pub async fn bind_listener(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(address = %address, "Listening on port {}", config.port);
    Ok(listener)
}
