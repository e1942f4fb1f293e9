#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Modulus backend of the calculator
//!
//! Answers `calculator.Calculator/Modulus` with the truncated integer
//! remainder of its operands; every other method of the schema answers
//! `UNIMPLEMENTED`.
//!
//! ## Architecture
//!
//! - `domain/ops.rs` - Calculator operation set with unimplemented defaults
//! - `domain/service.rs` - Modulus business logic
//! - `api/grpc/server.rs` - gRPC server adapter
//! - `module.rs` - Routes, listener defaults and serving

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === MODULE DEFINITION ===
mod module;
pub use module::{DEFAULT_LISTEN_ADDR, ModulusModule, default_server_config};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
