//! Domain layer for the modulus backend
//!
//! `ops` declares the full calculator operation set; `service` implements the
//! subset this backend supports.

pub mod ops;
pub mod service;

pub use ops::{CalculatorOpError, CalculatorOps, Operands, Operation};
pub use service::ModulusService;
