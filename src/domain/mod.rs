//! Domain layer: node model and tree algebra
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod bounds;
pub mod codec;
pub mod error;
pub mod mediant;
pub mod node;

pub use arena::{MediantArena, NodeData, TreeNode};
pub use bounds::{TreeConfig, TreeKind};
pub use codec::{decode, encode, Move, MoveMatrix};
pub use error::{DomainError, DomainResult};
pub use mediant::{are_neighbors, child_of, mediant, minus, other_parent};
pub use node::{Fraction, Node, Value};
