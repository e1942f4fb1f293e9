//! gRPC implementation of `CalculatorClientV1`

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use calc_transport_grpc::client::{GrpcClientConfig, connect_with_retry};
use calc_transport_grpc::rpc_retry::{RpcRetryConfig, call_with_retry};
use tonic::Status;
use tonic::transport::Channel;

use crate::api::{CalculatorClientV1, CalculatorError};
use crate::proto::TwoNumbers;
use crate::proto::calculator_client::CalculatorClient;

/// gRPC client for a calculator backend.
///
/// Cheap to clone; clones share the underlying HTTP/2 channel.
#[derive(Clone)]
pub struct CalculatorGrpcClient {
    inner: CalculatorClient<Channel>,
    retry: Arc<RpcRetryConfig>,
}

impl CalculatorGrpcClient {
    /// Connect using the default client configuration.
    ///
    /// # Errors
    /// Returns an error if the endpoint cannot be reached after retries.
    pub async fn connect(uri: impl Into<String>) -> Result<Self> {
        Self::connect_with_config(uri, &GrpcClientConfig::new("calculator")).await
    }

    /// Connect with explicit timeouts and retry settings.
    ///
    /// # Errors
    /// Returns an error if the endpoint cannot be reached after retries.
    pub async fn connect_with_config(uri: impl Into<String>, cfg: &GrpcClientConfig) -> Result<Self> {
        let channel: Channel = connect_with_retry(uri, cfg).await?;
        Ok(Self {
            inner: CalculatorClient::new(channel),
            retry: Arc::new(RpcRetryConfig::from(cfg)),
        })
    }
}

fn client_error(op: &'static str, status: Status) -> CalculatorError {
    let err = CalculatorError::from(status);
    tracing::debug!(op, error = %err, "calculator call failed");
    err
}

#[async_trait]
impl CalculatorClientV1 for CalculatorGrpcClient {
    async fn modulus(&self, a: f64, b: f64) -> Result<f64, CalculatorError> {
        let mut client = self.inner.clone();

        let reply = call_with_retry(
            &mut client,
            Arc::clone(&self.retry),
            TwoNumbers { a, b },
            |c, req| {
                let mut c = c.clone();
                async move { c.modulus(req).await.map(tonic::Response::into_inner) }
            },
            "calculator.modulus",
        )
        .await
        .map_err(|status| client_error("calculator.modulus", status))?;

        Ok(reply.result)
    }
}
