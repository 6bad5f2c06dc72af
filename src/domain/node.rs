//! Tree nodes: non-negative fractions plus the infinity sentinel

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::{DomainError, DomainResult};

/// Components of a finite node. The denominator is always positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }
}

/// A node of the mediant tree.
///
/// Finite nodes share their components behind an `Arc`, so clones are cheap
/// and a cache can hand out one canonical instance per value. Equality,
/// ordering and hashing all go through the value: `2/4 == 1/2`.
#[derive(Debug, Clone)]
pub enum Node {
    Finite(Arc<Fraction>),
    /// The sentinel 1/0, greater than every finite node.
    Infinite,
}

/// Exact value of a node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Finite(BigRational),
    Infinite,
}

impl Node {
    /// Build a node from a numerator/denominator pair.
    ///
    /// The pair is taken as given (callers hand in reduced fractions). Any
    /// `k/0` with `k > 0` is the infinity node.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> DomainResult<Self> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if numerator.is_negative() || denominator.is_negative() {
            return Err(DomainError::NegativeComponent {
                numerator: numerator.to_string(),
                denominator: denominator.to_string(),
            });
        }
        if numerator.is_zero() && denominator.is_zero() {
            return Err(DomainError::Indeterminate);
        }
        Ok(Self::from_components(numerator, denominator))
    }

    /// Components are known to be non-negative and not both zero.
    pub(crate) fn from_components(numerator: BigInt, denominator: BigInt) -> Self {
        if denominator.is_zero() {
            Node::Infinite
        } else {
            Node::Finite(Arc::new(Fraction {
                numerator,
                denominator,
            }))
        }
    }

    /// Build a node from an exact rational (already in lowest terms).
    pub fn from_ratio(ratio: &BigRational) -> DomainResult<Self> {
        Self::new(ratio.numer().clone(), ratio.denom().clone())
    }

    pub fn zero() -> Self {
        Self::from_components(BigInt::zero(), BigInt::one())
    }

    pub fn one() -> Self {
        Self::from_components(BigInt::one(), BigInt::one())
    }

    pub fn infinity() -> Self {
        Node::Infinite
    }

    pub fn integer(value: impl Into<BigInt>) -> DomainResult<Self> {
        Self::new(value, 1)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Node::Infinite)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Node::Finite(f) if f.numerator.is_zero())
    }

    /// Numerator, with infinity read as 1/0.
    pub fn numerator(&self) -> BigInt {
        match self {
            Node::Finite(f) => f.numerator.clone(),
            Node::Infinite => BigInt::one(),
        }
    }

    /// Denominator, with infinity read as 1/0.
    pub fn denominator(&self) -> BigInt {
        match self {
            Node::Finite(f) => f.denominator.clone(),
            Node::Infinite => BigInt::zero(),
        }
    }

    pub fn components(&self) -> (BigInt, BigInt) {
        (self.numerator(), self.denominator())
    }

    pub fn value(&self) -> Value {
        match self {
            Node::Finite(f) => Value::Finite(BigRational::new(
                f.numerator.clone(),
                f.denominator.clone(),
            )),
            Node::Infinite => Value::Infinite,
        }
    }

    /// Nearest `f64`, for display only.
    pub fn approximate(&self) -> f64 {
        match self.value() {
            Value::Finite(r) => r.to_f64().unwrap_or(f64::NAN),
            Value::Infinite => f64::INFINITY,
        }
    }

    /// True when both nodes are the very same allocation (or both infinity).
    pub fn same_instance(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Finite(a), Node::Finite(b)) => Arc::ptr_eq(a, b),
            (Node::Infinite, Node::Infinite) => true,
            _ => false,
        }
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Node::Infinite, Node::Infinite) => Ordering::Equal,
            (Node::Infinite, Node::Finite(_)) => Ordering::Greater,
            (Node::Finite(_), Node::Infinite) => Ordering::Less,
            // denominators are positive, so cross-multiplying keeps the order
            (Node::Finite(a), Node::Finite(b)) => {
                (&a.numerator * &b.denominator).cmp(&(&b.numerator * &a.denominator))
            }
        }
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Finite(frac) => write!(f, "{}/{}", frac.numerator, frac.denominator),
            Node::Infinite => write!(f, "1/0"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Finite(r) => write!(f, "{}", r),
            Value::Infinite => write!(f, "∞"),
        }
    }
}

impl FromStr for Node {
    type Err = DomainError;

    /// Accepts `m/n`, a bare integer `m`, or `inf`/`∞`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if matches!(s.to_ascii_lowercase().as_str(), "inf" | "infinity" | "∞") {
            return Ok(Node::Infinite);
        }
        let parse = |part: &str| {
            part.trim()
                .parse::<BigInt>()
                .map_err(|_| DomainError::InvalidNode(s.to_string()))
        };
        match s.split_once('/') {
            Some((m, n)) => Node::new(parse(m)?, parse(n)?),
            None => Node::new(parse(s)?, BigInt::one()),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
