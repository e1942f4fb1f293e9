//! Modulus module definition
//!
//! Builds the gRPC routes for the modulus backend and hosts them on the fixed
//! calculator port.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;

use calc_transport_grpc::{BoundGrpcServer, GrpcServerConfig, ServerError};
use calculator_sdk::{CalculatorServer, MODULUS_PORT, SERVICE_NAME};
use tokio_util::sync::CancellationToken;
use tonic::service::{Routes, RoutesBuilder};

use crate::api::grpc::CalculatorServiceImpl;
use crate::domain::ModulusService;

/// All interfaces, port 50055.
pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, MODULUS_PORT));

/// Listener configuration used by the `modulus-server` binary.
#[must_use]
pub fn default_server_config() -> GrpcServerConfig {
    GrpcServerConfig::new(DEFAULT_LISTEN_ADDR)
}

/// Modulus module.
///
/// Exposes [`ModulusService`] as the `calculator.Calculator` gRPC service.
#[derive(Debug, Clone, Default)]
pub struct ModulusModule {
    service: Arc<ModulusService>,
}

impl ModulusModule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// gRPC routes serving the calculator schema.
    #[must_use]
    pub fn routes(&self) -> Routes {
        let svc = CalculatorServer::new(CalculatorServiceImpl::new(Arc::clone(&self.service)));

        let mut routes = RoutesBuilder::default();
        routes.add_service(svc);
        tracing::debug!(service = SERVICE_NAME, "registered gRPC service");
        routes.routes()
    }

    /// Serve on an already bound listener until `cancel` fires.
    ///
    /// # Errors
    /// Returns [`ServerError::Serve`] if the serve loop fails.
    pub async fn serve(
        &self,
        server: BoundGrpcServer,
        cancel: CancellationToken,
    ) -> Result<(), ServerError> {
        server.serve(self.routes(), cancel).await
    }
}
