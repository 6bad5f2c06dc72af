//! Navigation of the Stern-Brocot and Farey mediant trees over exact rationals.
//!
//! Layers, innermost first: `domain` (nodes, mediants, codec), `application`
//! (the navigator and enumerations), `infrastructure` (cache, quotient
//! sources, wiring) and `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::services::Navigator;
pub use domain::{Node, TreeConfig, TreeKind};
