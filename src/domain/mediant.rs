//! Mediant algebra: the binary operation that grows the tree

use num_bigint::BigInt;
use num_traits::{One, Signed};

use crate::domain::error::DomainResult;
use crate::domain::node::Node;

/// The mediant `(m+m')/(n+n')`, with infinity read as 1/0.
pub fn mediant(a: &Node, b: &Node) -> Node {
    let (m, n) = a.components();
    let (m2, n2) = b.components();
    Node::from_components(m + m2, n + n2)
}

/// Farey-neighbor test: `|m·n' − n·m'| = 1`.
///
/// Exactly the pairs that sit next to each other at some depth of the tree.
pub fn are_neighbors(a: &Node, b: &Node) -> bool {
    determinant(a, b).abs().is_one()
}

/// `m·n' − n·m'`, negative when `a < b`.
pub fn determinant(a: &Node, b: &Node) -> BigInt {
    let (m, n) = a.components();
    let (m2, n2) = b.components();
    m * n2 - n * m2
}

/// Component-wise distance `(|m−m'|, |n−n'|)`.
///
/// Undoes a mediant: `minus(mediant(a, b), a) == b`.
pub fn minus(a: &Node, b: &Node) -> DomainResult<Node> {
    let (m, n) = a.components();
    let (m2, n2) = b.components();
    Node::new((m - m2).abs(), (n - n2).abs())
}

/// Mediant child of two nodes; under `strict`, only when they are neighbors.
pub fn child_of(a: &Node, b: &Node, strict: bool) -> Option<Node> {
    if strict && !are_neighbors(a, b) {
        return None;
    }
    Some(mediant(a, b))
}

/// Recover the other parent of `child` given one of its parents.
pub fn other_parent(child: &Node, parent: &Node) -> DomainResult<Node> {
    minus(child, parent)
}
