//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic on behalf of callers.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
