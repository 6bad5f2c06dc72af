//! Infrastructure layer: shared cache, quotient sources and DI container
//!
//! This layer feeds the navigator and wires it up from settings.

pub mod cache;
pub mod di;
pub mod error;
pub mod quotients;

pub use cache::{CacheStats, NodeCache};
pub use error::{InfraError, InfraResult};
pub use quotients::{Expansion, QuotientSource, Sqrt};
