//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::Node;

/// Domain errors represent violations of the tree's algebraic rules.
/// These are independent of configuration and I/O concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("value {value} outside tree range [{left}, {right}]")]
    RangeViolation { value: Node, left: Node, right: Node },

    #[error("invalid tree configuration: left {left} must be less than right {right}")]
    InvalidConfiguration { left: Node, right: Node },

    #[error("unknown tree configuration: {0}")]
    UnknownConfiguration(String),

    #[error("negative fraction component: {numerator}/{denominator}")]
    NegativeComponent {
        numerator: String,
        denominator: String,
    },

    #[error("indeterminate fraction 0/0")]
    Indeterminate,

    #[error("invalid node: {0}")]
    InvalidNode(String),

    #[error("search for {target} exceeded {limit} steps")]
    StepLimitExceeded { target: Node, limit: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
