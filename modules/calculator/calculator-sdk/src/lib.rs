//! Calculator SDK
//!
//! Everything needed to talk to (or implement) a calculator backend:
//! - `calculator.proto` stubs (`proto`), re-exported for server implementations
//! - Client API trait (`CalculatorClientV1`) and error type (`CalculatorError`)
//! - gRPC client (`CalculatorGrpcClient`)
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::{CalculatorClientV1, CalculatorGrpcClient, modulus_endpoint};
//!
//! let client = CalculatorGrpcClient::connect(modulus_endpoint("127.0.0.1")).await?;
//! let rem = client.modulus(10.0, 3.0).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT AND TYPES ===
mod api;
pub use api::{CalculatorClientV1, CalculatorError};

// === GRPC CLIENT ===
mod client;
pub use client::CalculatorGrpcClient;

// === GRPC PROTO STUBS ===
/// Generated protobuf types for the `calculator.Calculator` service
#[allow(clippy::all, clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("calculator");
}

pub use proto::calculator_server::{Calculator, CalculatorServer};
pub use proto::{Number, TwoNumbers};

/// Fully qualified gRPC service name.
pub const SERVICE_NAME: &str = "calculator.Calculator";

/// TCP port the modulus backend listens on.
pub const MODULUS_PORT: u16 = 50055;

/// Endpoint URI of a modulus backend on `host`.
#[must_use]
pub fn modulus_endpoint(host: &str) -> String {
    format!("http://{host}:{MODULUS_PORT}")
}
