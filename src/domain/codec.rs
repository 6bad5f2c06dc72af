//! L/R path codec.
//!
//! A node's position below the root 1/1 is written as a string of left/right
//! moves. Encoding runs Euclid's subtraction algorithm on `(m, n)`; decoding
//! multiplies the unimodular move matrices back together.

use std::fmt;
use std::iter;
use std::ops::Mul;

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};

use crate::domain::node::Node;

/// A single step down the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
}

impl Move {
    /// `L`, `l`, `0` move left; `R`, `r`, `1` move right; anything else is noise.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' | 'l' | '0' => Some(Move::Left),
            'R' | 'r' | '1' => Some(Move::Right),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }

    /// `[[1,1],[0,1]]` for left, `[[1,0],[1,1]]` for right.
    pub fn matrix(self) -> MoveMatrix {
        match self {
            Move::Left => MoveMatrix::new(1, 1, 0, 1),
            Move::Right => MoveMatrix::new(1, 0, 1, 1),
        }
    }
}

/// 2×2 integer matrix `[[a, b], [c, d]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveMatrix {
    a: BigInt,
    b: BigInt,
    c: BigInt,
    d: BigInt,
}

impl MoveMatrix {
    pub fn new(
        a: impl Into<BigInt>,
        b: impl Into<BigInt>,
        c: impl Into<BigInt>,
        d: impl Into<BigInt>,
    ) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            d: d.into(),
        }
    }

    pub fn identity() -> Self {
        Self::new(1, 0, 0, 1)
    }

    /// Right-multiply by one move matrix without a full product.
    pub fn then(self, mv: Move) -> Self {
        let Self { a, b, c, d } = self;
        match mv {
            Move::Left => {
                let b = &a + b;
                let d = &c + d;
                Self { a, b, c, d }
            }
            Move::Right => {
                let a = a + &b;
                let c = c + &d;
                Self { a, b, c, d }
            }
        }
    }

    pub fn determinant(&self) -> BigInt {
        &self.a * &self.d - &self.b * &self.c
    }

    /// Node at the end of the path: second-row sum over first-row sum.
    pub fn node(&self) -> Node {
        Node::from_components(&self.c + &self.d, &self.a + &self.b)
    }
}

impl Mul for &MoveMatrix {
    type Output = MoveMatrix;

    fn mul(self, rhs: &MoveMatrix) -> MoveMatrix {
        MoveMatrix {
            a: &self.a * &rhs.a + &self.b * &rhs.c,
            b: &self.a * &rhs.b + &self.b * &rhs.d,
            c: &self.c * &rhs.a + &self.d * &rhs.c,
            d: &self.c * &rhs.b + &self.d * &rhs.d,
        }
    }
}

impl fmt::Display for MoveMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}, {}], [{}, {}]]", self.a, self.b, self.c, self.d)
    }
}

/// Encode a node as its L/R path from 1/1, stopping after `limit` moves.
///
/// Returns `None` for 0/1 and 1/0, which have no finite path from the root;
/// 1/1 itself encodes to the empty string.
pub fn encode(node: &Node, limit: Option<usize>) -> Option<String> {
    if node.is_zero() || node.is_infinite() {
        return None;
    }
    let (mut m, mut n) = node.components();
    let mut budget = limit.unwrap_or(usize::MAX);
    let mut path = String::new();

    while m != n && budget > 0 {
        // a whole run of equal moves at once: k = (larger - 1) / smaller
        let (mv, larger, smaller) = if m < n {
            (Move::Left, &mut n, &m)
        } else {
            (Move::Right, &mut m, &n)
        };
        let run = (&*larger - BigInt::one()) / smaller;
        let steps = run.to_usize().map_or(budget, |r| r.min(budget));
        if steps == 0 {
            break;
        }
        *larger -= smaller * BigInt::from(steps);
        path.extend(iter::repeat(mv.symbol()).take(steps));
        budget -= steps;
    }
    Some(path)
}

/// Decode an L/R path (unknown characters are skipped) into its node.
pub fn decode(path: &str) -> Node {
    matrix_of(path).node()
}

/// Accumulated move matrix of a path.
pub fn matrix_of(path: &str) -> MoveMatrix {
    path.chars()
        .filter_map(Move::from_char)
        .fold(MoveMatrix::identity(), MoveMatrix::then)
}

/// Depth below 1/1, i.e. the length of the full encoding, without building it.
pub fn path_len(node: &Node) -> Option<BigInt> {
    if node.is_zero() || node.is_infinite() {
        return None;
    }
    let (mut m, mut n) = node.components();
    let mut total = BigInt::zero();
    while m != n {
        if m < n {
            let run = (&n - BigInt::one()) / &m;
            n -= &m * &run;
            total += run;
        } else {
            let run = (&m - BigInt::one()) / &n;
            m -= &n * &run;
            total += run;
        }
    }
    Some(total)
}
