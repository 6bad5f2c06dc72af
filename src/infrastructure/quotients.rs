//! Continued-fraction quotient sources
//!
//! The navigator consumes partial quotients; these adapters produce them for
//! exact rationals, IEEE doubles and square roots of integers.

use num_bigint::BigInt;
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::domain::Node;
use crate::infrastructure::{InfraError, InfraResult};

/// `[integer_part; quotients…]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub integer_part: BigInt,
    pub quotients: Vec<BigInt>,
}

impl Expansion {
    /// Convergent after the integer part and the first `count` quotients.
    pub fn convergent(&self, count: usize) -> BigRational {
        let mut value = BigRational::from_integer(BigInt::zero());
        let mut terms = self.quotients.iter().take(count).rev().peekable();
        if terms.peek().is_none() {
            return BigRational::from_integer(self.integer_part.clone());
        }
        for q in terms {
            value = (BigRational::from_integer(q.clone()) + value).recip();
        }
        BigRational::from_integer(self.integer_part.clone()) + value
    }
}

/// Anything that can expand itself as a simple continued fraction.
pub trait QuotientSource {
    /// Integer part plus at most `limit` partial quotients.
    fn expansion(&self, limit: usize) -> InfraResult<Expansion>;
}

impl QuotientSource for BigRational {
    fn expansion(&self, limit: usize) -> InfraResult<Expansion> {
        if self.is_negative() {
            return Err(InfraError::InvalidSource {
                message: format!("negative value {}", self),
            });
        }
        let integer_part = self.floor().to_integer();
        let mut rest = self - BigRational::from_integer(integer_part.clone());
        let mut quotients = Vec::new();
        while !rest.is_zero() && quotients.len() < limit {
            let inverted = rest.recip();
            let q = inverted.floor().to_integer();
            rest = inverted - BigRational::from_integer(q.clone());
            quotients.push(q);
        }
        Ok(Expansion {
            integer_part,
            quotients,
        })
    }
}

impl QuotientSource for Node {
    fn expansion(&self, limit: usize) -> InfraResult<Expansion> {
        if self.is_infinite() {
            return Err(InfraError::InvalidSource {
                message: "infinity has no continued fraction".to_string(),
            });
        }
        BigRational::new(self.numerator(), self.denominator()).expansion(limit)
    }
}

/// Expands the exact binary value of the double.
impl QuotientSource for f64 {
    fn expansion(&self, limit: usize) -> InfraResult<Expansion> {
        if !self.is_finite() || *self < 0.0 {
            return Err(InfraError::InvalidSource {
                message: format!("{} is not a finite non-negative number", self),
            });
        }
        let exact = BigRational::from_float(*self).ok_or_else(|| InfraError::InvalidSource {
            message: format!("cannot convert {}", self),
        })?;
        exact.expansion(limit)
    }
}

/// Square root of a non-negative integer; periodic and infinite unless `n`
/// is a perfect square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sqrt(pub BigInt);

impl QuotientSource for Sqrt {
    fn expansion(&self, limit: usize) -> InfraResult<Expansion> {
        let n = &self.0;
        if n.is_negative() {
            return Err(InfraError::InvalidSource {
                message: format!("square root of negative {}", n),
            });
        }
        let a0 = n.sqrt();
        let mut quotients = Vec::new();
        if &a0 * &a0 == *n {
            return Ok(Expansion {
                integer_part: a0,
                quotients,
            });
        }
        // m_{k+1} = d_k a_k − m_k, d_{k+1} = (n − m_{k+1}²) / d_k, a_{k+1} = ⌊(a0 + m_{k+1}) / d_{k+1}⌋
        let mut m = BigInt::zero();
        let mut d = BigInt::one();
        let mut a = a0.clone();
        while quotients.len() < limit {
            m = &d * &a - &m;
            d = (n - &m * &m) / &d;
            a = (&a0 + &m) / &d;
            quotients.push(a.clone());
        }
        Ok(Expansion {
            integer_part: a0,
            quotients,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn given_rational_when_expanding_then_finite_quotients() {
        let x = BigRational::new(BigInt::from(355), BigInt::from(113));
        let exp = x.expansion(10).unwrap();
        assert_eq!(exp.integer_part, BigInt::from(3));
        assert_eq!(exp.quotients, big(&[7, 16]));
        assert_eq!(exp.convergent(2), x);
    }

    #[test]
    fn given_sqrt_when_expanding_then_periodic() {
        let exp = Sqrt(BigInt::from(7)).expansion(8).unwrap();
        assert_eq!(exp.integer_part, BigInt::from(2));
        assert_eq!(exp.quotients, big(&[1, 1, 1, 4, 1, 1, 1, 4]));
        let square = Sqrt(BigInt::from(49)).expansion(8).unwrap();
        assert!(square.quotients.is_empty());
        assert_eq!(square.integer_part, BigInt::from(7));
    }

    #[test]
    fn given_double_when_expanding_then_leading_terms_match() {
        let exp = 2f64.sqrt().expansion(6).unwrap();
        assert_eq!(exp.integer_part, BigInt::one());
        assert_eq!(exp.quotients, big(&[2, 2, 2, 2, 2, 2]));
        assert!(f64::NAN.expansion(3).is_err());
        assert!((-1.5f64).expansion(3).is_err());
    }

    #[test]
    fn given_node_when_expanding_then_uses_exact_value() {
        let exp = Node::new(11, 10).unwrap().expansion(5).unwrap();
        assert_eq!(exp.integer_part, BigInt::one());
        assert_eq!(exp.quotients, big(&[10]));
        assert!(Node::infinity().expansion(5).is_err());
    }
}
