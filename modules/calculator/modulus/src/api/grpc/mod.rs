//! gRPC API layer for the modulus backend

pub mod server;

pub use server::CalculatorServiceImpl;
