//! Calculator client API trait and errors

use async_trait::async_trait;
use tonic::{Code, Status};

/// Client-side contract of a modulus backend.
#[async_trait]
pub trait CalculatorClientV1: Send + Sync {
    /// Truncated integer remainder of `a` by `b`; `0` when `b` truncates to zero.
    async fn modulus(&self, a: f64, b: f64) -> Result<f64, CalculatorError>;
}

/// Error type for calculator client operations
#[derive(thiserror::Error, Debug)]
pub enum CalculatorError {
    #[error("gRPC transport error: {0}")]
    Transport(String),

    #[error("not implemented: {0}")]
    Unimplemented(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<Status> for CalculatorError {
    fn from(status: Status) -> Self {
        let message = status.message().to_owned();
        match status.code() {
            Code::Unimplemented => Self::Unimplemented(message),
            Code::Unavailable | Code::DeadlineExceeded => Self::Transport(message),
            _ => Self::Internal(message),
        }
    }
}
