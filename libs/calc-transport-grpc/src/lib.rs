#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! gRPC transport for calculator services.
//!
//! - [`server`] binds a TCP listener and hosts tonic routes until cancelled.
//! - [`client`] builds client channels with timeouts, keepalive and connect retries.
//! - [`rpc_retry`] retries idempotent unary calls on transient failures.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod rpc_retry;
pub mod server;

pub use server::{BoundGrpcServer, GrpcServerConfig, ServerError};
