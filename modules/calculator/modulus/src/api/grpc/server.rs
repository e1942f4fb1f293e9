//! gRPC server implementation of `calculator.Calculator`
//!
//! Every schema method is routed through the domain [`CalculatorOps`] set, so
//! methods a backend does not implement answer `UNIMPLEMENTED`.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use calculator_sdk::{Calculator, Number, TwoNumbers};

use crate::domain::{CalculatorOpError, CalculatorOps, Operands, Operation};

impl From<CalculatorOpError> for Status {
    fn from(err: CalculatorOpError) -> Self {
        match err {
            CalculatorOpError::Unimplemented { .. } => Status::unimplemented(err.to_string()),
        }
    }
}

/// gRPC service that wraps a domain operation set.
pub struct CalculatorServiceImpl<S> {
    ops: Arc<S>,
}

impl<S> Clone for CalculatorServiceImpl<S> {
    fn clone(&self) -> Self {
        Self {
            ops: Arc::clone(&self.ops),
        }
    }
}

impl<S: CalculatorOps> CalculatorServiceImpl<S> {
    pub fn new(ops: Arc<S>) -> Self {
        Self { ops }
    }

    fn dispatch(
        &self,
        operation: Operation,
        request: Request<TwoNumbers>,
    ) -> Result<Response<Number>, Status> {
        let TwoNumbers { a, b } = request.into_inner();

        match self.ops.apply(operation, Operands::new(a, b)) {
            Ok(result) => Ok(Response::new(Number { result })),
            Err(err) => {
                tracing::debug!(%operation, error = %err, "rejecting calculator call");
                Err(err.into())
            }
        }
    }
}

#[tonic::async_trait]
impl<S: CalculatorOps> Calculator for CalculatorServiceImpl<S> {
    async fn add(&self, request: Request<TwoNumbers>) -> Result<Response<Number>, Status> {
        self.dispatch(Operation::Add, request)
    }

    async fn subtract(&self, request: Request<TwoNumbers>) -> Result<Response<Number>, Status> {
        self.dispatch(Operation::Subtract, request)
    }

    async fn multiply(&self, request: Request<TwoNumbers>) -> Result<Response<Number>, Status> {
        self.dispatch(Operation::Multiply, request)
    }

    async fn divide(&self, request: Request<TwoNumbers>) -> Result<Response<Number>, Status> {
        self.dispatch(Operation::Divide, request)
    }

    async fn modulus(&self, request: Request<TwoNumbers>) -> Result<Response<Number>, Status> {
        self.dispatch(Operation::Modulus, request)
    }

    async fn exponentiate(
        &self,
        request: Request<TwoNumbers>,
    ) -> Result<Response<Number>, Status> {
        self.dispatch(Operation::Exponentiate, request)
    }
}
