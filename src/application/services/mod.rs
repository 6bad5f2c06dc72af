//! Application services
//!
//! The navigator is a concrete struct bound to one tree configuration. The
//! enumeration helpers are free functions it delegates to.

mod enumeration;
mod navigator;

pub use enumeration::{
    calkin_wilf, descendants_of, numeric_sequence, sequence_between, tree_rows, CalkinWilf,
    SternDiatomic,
};
pub use navigator::{default_search_range, Navigator};
