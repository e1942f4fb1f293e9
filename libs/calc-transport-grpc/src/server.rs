//! gRPC server hosting over TCP.
//!
//! Binding and serving are split so callers can learn the bound address
//! (useful with ephemeral ports) before the serve loop starts, and so a bind
//! failure surfaces as its own error before anything is served.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::service::Routes;
use tonic::transport::Server;

/// Startup and serve-loop failures of a hosted gRPC server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to listen on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to resolve bound address")]
    LocalAddr(#[source] std::io::Error),

    #[error("failed to serve gRPC")]
    Serve(#[from] tonic::transport::Error),
}

/// Listener configuration for a gRPC server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrpcServerConfig {
    pub listen_addr: SocketAddr,
}

impl GrpcServerConfig {
    #[must_use]
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self { listen_addr }
    }
}

/// A TCP listener that is bound and ready to serve gRPC routes.
#[derive(Debug)]
pub struct BoundGrpcServer {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl BoundGrpcServer {
    /// Bind the configured TCP address.
    ///
    /// # Errors
    /// Returns [`ServerError::Bind`] if the address is in use or cannot be
    /// bound, and [`ServerError::LocalAddr`] if the bound address cannot be read.
    pub async fn bind(cfg: &GrpcServerConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(cfg.listen_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: cfg.listen_addr,
                source,
            })?;
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

        tracing::debug!(%local_addr, requested = %cfg.listen_addr, "gRPC listener bound");
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Address the listener is actually bound to.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Client endpoint URI for the bound address, e.g. `http://127.0.0.1:50055`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Serve `routes` until `cancel` fires.
    ///
    /// In-flight requests are drained before this returns.
    ///
    /// # Errors
    /// Returns [`ServerError::Serve`] if the tonic serve loop fails.
    pub async fn serve(self, routes: Routes, cancel: CancellationToken) -> Result<(), ServerError> {
        let bound_addr = self.local_addr;
        tracing::info!(%bound_addr, transport = "tcp", "gRPC server listening");

        let incoming = TcpListenerStream::new(self.listener);
        Server::builder()
            .add_routes(routes)
            .serve_with_incoming_shutdown(incoming, async move {
                cancel.cancelled().await;
            })
            .await?;

        tracing::info!(%bound_addr, "gRPC server stopped");
        Ok(())
    }
}
