//! Bounded enumeration of tree levels
//!
//! Every level is built from the one before by taking mediants of adjacent
//! nodes. Adjacent pairs are independent, so each level is computed with
//! rayon.

use std::collections::VecDeque;

use itertools::Itertools;
use num_bigint::BigInt;
use num_traits::One;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::domain::{are_neighbors, mediant, Node};

/// Mediants of every adjacent pair, in order.
fn adjacent_mediants(row: &[Node]) -> Vec<Node> {
    row.par_windows(2).map(|w| mediant(&w[0], &w[1])).collect()
}

/// All nodes of depth ≤ `depth` between `first` and `last`, both included.
///
/// Ascending when `first < last`; `2^depth + 1` nodes.
#[instrument(level = "debug", skip_all, fields(depth = depth, first = %first, last = %last))]
pub fn sequence_between(depth: usize, first: &Node, last: &Node) -> Vec<Node> {
    let mut row = vec![first.clone(), last.clone()];
    for _ in 0..depth {
        let mids = adjacent_mediants(&row);
        row = row.into_iter().interleave(mids).collect();
    }
    debug!(len = row.len(), "sequence built");
    row
}

/// Descendants of a parent pair down to `depth` levels, parents excluded.
///
/// Under `strict`, a pair that are not Farey neighbors have no descendants
/// and the result is empty.
pub fn descendants_of(p1: &Node, p2: &Node, depth: usize, strict: bool) -> Vec<Node> {
    if strict && !are_neighbors(p1, p2) {
        debug!(%p1, %p2, "not a neighbor pair");
        return Vec::new();
    }
    let (low, high) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
    let mut all = sequence_between(depth, low, high);
    all.pop();
    all.remove(0);
    all
}

/// Level-by-level rows: row 0 holds the two boundaries, row `i` the nodes
/// first introduced at depth `i`.
#[instrument(level = "debug", skip_all, fields(depth = depth))]
pub fn tree_rows(left: &Node, right: &Node, depth: usize) -> Vec<Vec<Node>> {
    if depth == 0 {
        return Vec::new();
    }
    let mut all = vec![left.clone(), right.clone()];
    let mut rows = vec![all.clone()];
    for _ in 1..depth {
        let row = adjacent_mediants(&all);
        all = all.into_iter().interleave(row.iter().cloned()).collect();
        rows.push(row);
    }
    rows
}

/// Stern's diatomic sequence 1, 1, 2, 1, 3, 2, 3, 1, 4, …
///
/// Numerators of the Calkin-Wilf enumeration; infinite.
#[derive(Debug, Clone)]
pub struct SternDiatomic {
    backing: VecDeque<BigInt>,
}

impl SternDiatomic {
    pub fn new() -> Self {
        Self {
            backing: VecDeque::from([BigInt::one(), BigInt::one()]),
        }
    }
}

impl Default for SternDiatomic {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SternDiatomic {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        let current = self.backing.pop_front()?;
        let next = self.backing.front()?.clone();
        self.backing.push_back(&current + &next);
        self.backing.push_back(next);
        Some(current)
    }
}

/// A fresh diatomic sequence; separate calls share no state.
pub fn numeric_sequence() -> SternDiatomic {
    SternDiatomic::new()
}

/// Every positive rational exactly once: 1/1, 1/2, 2/1, 1/3, 3/2, 2/3, 3/1, …
#[derive(Debug, Clone)]
pub struct CalkinWilf {
    terms: SternDiatomic,
    previous: Option<BigInt>,
}

impl Iterator for CalkinWilf {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let numerator = match self.previous.take() {
            Some(n) => n,
            None => self.terms.next()?,
        };
        let denominator = self.terms.next()?;
        self.previous = Some(denominator.clone());
        Some(Node::from_components(numerator, denominator))
    }
}

pub fn calkin_wilf() -> CalkinWilf {
    CalkinWilf {
        terms: SternDiatomic::new(),
        previous: None,
    }
}
