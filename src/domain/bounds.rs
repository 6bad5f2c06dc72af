//! Tree configurations: the boundary pair a navigator searches between

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

/// Known tree configurations, resolved once at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeKind {
    /// Whole tree: 0/1 .. 1/0
    SternBrocot,
    /// Unit interval: 0/1 .. 1/1
    Farey,
    /// One octave: 1/1 .. 2/1
    OctaveReduced,
    Custom(Node, Node),
}

impl TreeKind {
    pub fn resolve(&self) -> DomainResult<TreeConfig> {
        match self {
            TreeKind::SternBrocot => TreeConfig::new(Node::zero(), Node::infinity()),
            TreeKind::Farey => TreeConfig::new(Node::zero(), Node::one()),
            TreeKind::OctaveReduced => TreeConfig::new(Node::one(), Node::integer(2)?),
            TreeKind::Custom(left, right) => TreeConfig::new(left.clone(), right.clone()),
        }
    }
}

impl FromStr for TreeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stern-brocot" | "sternbrocot" | "sb" => Ok(TreeKind::SternBrocot),
            "farey" | "unit" => Ok(TreeKind::Farey),
            "octave" | "octave-reduced" => Ok(TreeKind::OctaveReduced),
            other => Err(DomainError::UnknownConfiguration(other.to_string())),
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::SternBrocot => write!(f, "stern-brocot"),
            TreeKind::Farey => write!(f, "farey"),
            TreeKind::OctaveReduced => write!(f, "octave-reduced"),
            TreeKind::Custom(left, right) => write!(f, "custom({}, {})", left, right),
        }
    }
}

/// Ordered boundary pair `left < right`; the legal range is `[left, right]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    left: Node,
    right: Node,
}

impl TreeConfig {
    pub fn new(left: Node, right: Node) -> DomainResult<Self> {
        if left >= right {
            return Err(DomainError::InvalidConfiguration { left, right });
        }
        Ok(Self { left, right })
    }

    pub fn stern_brocot() -> Self {
        Self {
            left: Node::zero(),
            right: Node::infinity(),
        }
    }

    pub fn farey() -> Self {
        Self {
            left: Node::zero(),
            right: Node::one(),
        }
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> &Node {
        &self.right
    }

    pub fn in_range(&self, value: &Node) -> bool {
        &self.left <= value && value <= &self.right
    }

    pub fn validate(&self, value: &Node) -> DomainResult<()> {
        if self.in_range(value) {
            Ok(())
        } else {
            Err(DomainError::RangeViolation {
                value: value.clone(),
                left: self.left.clone(),
                right: self.right.clone(),
            })
        }
    }

    /// The boundary equal to `value`, if any.
    pub fn boundary(&self, value: &Node) -> Option<&Node> {
        if value == &self.left {
            Some(&self.left)
        } else if value == &self.right {
            Some(&self.right)
        } else {
            None
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::stern_brocot()
    }
}

impl fmt::Display for TreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}
