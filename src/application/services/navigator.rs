//! Navigation engine
//!
//! Locates targets inside one tree configuration: binary search by mediants,
//! parents and shared ancestors, continued-fraction guided descent and Farey
//! neighbor search.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tracing::{debug, instrument, trace};

use crate::application::services::enumeration::{sequence_between, tree_rows};
use crate::application::ApplicationResult;
use crate::domain::{are_neighbors, mediant, DomainError, MediantArena, Node, TreeConfig};
use crate::infrastructure::cache::NodeCache;

/// Outcome of a binary search.
enum Descent {
    /// The target is one of the configuration's boundaries.
    Boundary(Node),
    Reached {
        visited: Vec<Node>,
        low: Node,
        high: Node,
        steps: usize,
    },
}

/// Searches and enumerates one tree configuration.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    config: TreeConfig,
    cache: Option<Arc<NodeCache>>,
    max_steps: Option<usize>,
}

impl Navigator {
    /// Create a navigator over `config` with no cache and no step guard.
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            cache: None,
            max_steps: None,
        }
    }

    /// Canonicalize every produced node through `cache`.
    pub fn with_cache(mut self, cache: Arc<NodeCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Fail searches that take more than `limit` mediant steps.
    pub fn with_max_steps(mut self, limit: usize) -> Self {
        self.max_steps = Some(limit);
        self
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    fn emit(&self, node: Node) -> Node {
        match &self.cache {
            Some(cache) => cache.intern(node),
            None => node,
        }
    }

    fn check_budget(&self, steps: usize, target: &Node) -> ApplicationResult<()> {
        match self.max_steps {
            Some(limit) if steps >= limit => Err(DomainError::StepLimitExceeded {
                target: target.clone(),
                limit,
            }
            .into()),
            _ => Ok(()),
        }
    }

    fn descend(&self, target: &Node, collect: bool) -> ApplicationResult<Descent> {
        self.config.validate(target)?;
        if let Some(boundary) = self.config.boundary(target) {
            return Ok(Descent::Boundary(self.emit(boundary.clone())));
        }

        let mut low = self.config.left().clone();
        let mut high = self.config.right().clone();
        let mut visited = Vec::new();
        let mut steps = 0;

        loop {
            self.check_budget(steps, target)?;
            let m = self.emit(mediant(&low, &high));
            steps += 1;
            trace!(step = steps, mediant = %m, "descend");
            if collect {
                visited.push(m.clone());
            }
            match m.cmp(target) {
                Ordering::Less => low = m,
                Ordering::Greater => high = m,
                Ordering::Equal => break,
            }
        }

        Ok(Descent::Reached {
            visited,
            low,
            high,
            steps,
        })
    }

    /// Boundaries followed by every mediant visited on the way to `target`.
    ///
    /// A boundary target yields just that boundary.
    #[instrument(level = "debug", skip_all, fields(target = %target))]
    pub fn path_to(&self, target: &Node) -> ApplicationResult<Vec<Node>> {
        match self.descend(target, true)? {
            Descent::Boundary(node) => Ok(vec![node]),
            Descent::Reached { visited, .. } => {
                let mut path = Vec::with_capacity(visited.len() + 2);
                path.push(self.emit(self.config.left().clone()));
                path.push(self.emit(self.config.right().clone()));
                path.extend(visited);
                debug!(len = path.len(), "path found");
                Ok(path)
            }
        }
    }

    /// The two nodes whose mediant is `target`, lower first.
    ///
    /// `None` when the target is a boundary, which has no parents.
    #[instrument(level = "debug", skip_all, fields(target = %target))]
    pub fn parents_of(&self, target: &Node) -> ApplicationResult<Option<(Node, Node)>> {
        match self.descend(target, false)? {
            Descent::Boundary(_) => Ok(None),
            Descent::Reached { low, high, .. } => Ok(Some((low, high))),
        }
    }

    /// Nodes on both paths, in path order.
    #[instrument(level = "debug", skip_all, fields(first = %first, second = %second))]
    pub fn common_ancestors(&self, first: &Node, second: &Node) -> ApplicationResult<Vec<Node>> {
        let path = self.path_to(first)?;
        let other: HashSet<Node> = self.path_to(second)?.into_iter().collect();
        Ok(path.into_iter().filter(|n| other.contains(n)).collect())
    }

    /// Mediant steps needed to reach `target`; 0 for a boundary.
    pub fn depth_of(&self, target: &Node) -> ApplicationResult<usize> {
        match self.descend(target, false)? {
            Descent::Boundary(_) => Ok(0),
            Descent::Reached { steps, .. } => Ok(steps),
        }
    }

    /// Descend by continued-fraction quotients instead of comparisons.
    ///
    /// The walk starts on the segment `[a0/1, (a0+1)/1]` given by the integer
    /// part and consumes at most `limit` of the remaining quotients `a1, a2, …`.
    /// Each quotient is a run of mediant steps toward the same side, so the
    /// output matches `path_to` over that segment while doing no comparisons.
    /// Stops early once `target` is produced; a short `limit` returns the
    /// truncated walk, which is the only finite way to approach an
    /// irrational value.
    ///
    /// Only the target is range checked. A target equal to a boundary of the
    /// configuration yields just that boundary. When the floor segment is not
    /// inside the configuration (a custom segment, or `2/1` on the octave
    /// tree) the walk falls back to `path_to` of the last consumed
    /// convergent, cut at `target` if it shows up on the way.
    #[instrument(level = "debug", skip(self, quotients, target), fields(quotients = quotients.len()))]
    pub fn quotient_walk(
        &self,
        integer_part: &BigInt,
        quotients: &[BigInt],
        target: Option<&Node>,
        limit: usize,
    ) -> ApplicationResult<Vec<Node>> {
        let lo = Node::integer(integer_part.clone())?;
        let hi = Node::integer(integer_part + BigInt::one())?;
        if let Some(t) = target {
            self.config.validate(t)?;
            if let Some(boundary) = self.config.boundary(t) {
                return Ok(vec![self.emit(boundary.clone())]);
            }
        }

        if !(self.config.in_range(&lo) && self.config.in_range(&hi)) {
            let consumed = &quotients[..quotients.len().min(limit)];
            let goal = convergent(integer_part, consumed)?;
            debug!(goal = %goal, "floor segment outside configuration");
            let mut path = self.path_to(&goal)?;
            if let Some(pos) = target.and_then(|t| path.iter().position(|n| n == t)) {
                path.truncate(pos + 1);
            }
            return Ok(path);
        }

        if let Some(t) = target {
            if t == &lo || t == &hi {
                let boundary = if t == &lo { lo } else { hi };
                return Ok(vec![self.emit(boundary)]);
            }
        }

        let mut held = self.emit(lo);
        let mut moving = self.emit(hi);
        let mut walk = vec![held.clone(), moving.clone()];
        let mut steps = 0;

        for (i, q) in quotients.iter().take(limit).enumerate() {
            // the first step of a1 lands on hi, which is already emitted
            let run = if i == 0 { q - BigInt::one() } else { q.clone() };
            let mut done = BigInt::zero();
            while done < run {
                self.check_budget(steps, target.unwrap_or(&moving))?;
                moving = self.emit(mediant(&held, &moving));
                steps += 1;
                trace!(step = steps, node = %moving, "walk");
                walk.push(moving.clone());
                if target == Some(&moving) {
                    debug!(len = walk.len(), "walk reached target");
                    return Ok(walk);
                }
                done += 1;
            }
            std::mem::swap(&mut held, &mut moving);
        }
        debug!(len = walk.len(), "walk exhausted quotients");
        Ok(walk)
    }

    /// Farey neighbors found by probing `value ± 1/(i·n)` for `i` in `1..range`.
    ///
    /// Results come in probe order. No range check: any finite node works,
    /// and infinity has none. Without `search_range` the probe count comes
    /// from [`default_search_range`] and never exceeds
    /// [`MAX_DEFAULT_SEARCH_RANGE`].
    #[instrument(level = "debug", skip_all, fields(node = %node, range = ?search_range))]
    pub fn neighbors_of(&self, node: &Node, search_range: Option<u64>) -> Vec<Node> {
        let Node::Finite(frac) = node else {
            return Vec::new();
        };
        let range = search_range.unwrap_or_else(|| default_search_range(frac.numerator()));
        let value = BigRational::new(frac.numerator().clone(), frac.denominator().clone());
        debug!(range, "probing neighbors");

        let mut found = Vec::new();
        for i in 1..range {
            let step = BigRational::new(BigInt::one(), frac.denominator() * BigInt::from(i));
            for probe in [&value + &step, &value - &step] {
                if probe.is_negative() {
                    continue;
                }
                if let Ok(candidate) = Node::from_ratio(&probe) {
                    if are_neighbors(node, &candidate) {
                        found.push(self.emit(candidate));
                    }
                }
            }
        }
        found
    }

    /// Boundaries plus every node down to `depth`, ascending.
    pub fn sequence(&self, depth: usize) -> Vec<Node> {
        sequence_between(depth, self.config.left(), self.config.right())
            .into_iter()
            .map(|n| self.emit(n))
            .collect()
    }

    /// Rows of newly introduced nodes per depth, row 0 being the boundaries.
    pub fn tree(&self, depth: usize) -> Vec<Vec<Node>> {
        tree_rows(self.config.left(), self.config.right(), depth)
            .into_iter()
            .map(|row| row.into_iter().map(|n| self.emit(n)).collect())
            .collect()
    }

    /// The first `depth` levels below the boundaries as an arena tree.
    pub fn subtree(&self, depth: usize) -> MediantArena {
        MediantArena::build(self.config.left(), self.config.right(), depth)
    }
}

/// `[a0; a1, …, ak]` folded into a single node.
fn convergent(integer_part: &BigInt, quotients: &[BigInt]) -> ApplicationResult<Node> {
    let (mut h, mut h_prev) = (integer_part.clone(), BigInt::one());
    let (mut k, mut k_prev) = (BigInt::one(), BigInt::zero());
    for a in quotients {
        let h_next = a * &h + &h_prev;
        h_prev = std::mem::replace(&mut h, h_next);
        let k_next = a * &k + &k_prev;
        k_prev = std::mem::replace(&mut k, k_next);
    }
    Ok(Node::new(h, k)?)
}

/// Ceiling on the derived probe count; an explicit range is not capped.
pub const MAX_DEFAULT_SEARCH_RANGE: u64 = 10_000_000;

/// `10^(floor(log10 |m|) + 2)`, with zero counted as one digit, capped at
/// [`MAX_DEFAULT_SEARCH_RANGE`] so numerators of six or more digits do not
/// turn into billions of probes.
pub fn default_search_range(numerator: &BigInt) -> u64 {
    let digits = numerator.abs().to_string().len() as u32;
    match 10u64.checked_pow(digits + 1) {
        Some(range) if range <= MAX_DEFAULT_SEARCH_RANGE => range,
        _ => MAX_DEFAULT_SEARCH_RANGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeKind;

    fn node(m: i64, n: i64) -> Node {
        Node::new(m, n).unwrap()
    }

    fn nodes(pairs: &[(i64, i64)]) -> Vec<Node> {
        pairs.iter().map(|&(m, n)| node(m, n)).collect()
    }

    fn big(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn given_eleven_tenths_when_finding_path_then_full_ancestor_chain() {
        let nav = Navigator::new(TreeConfig::stern_brocot());
        let path = nav.path_to(&node(11, 10)).unwrap();
        assert_eq!(
            path,
            nodes(&[
                (0, 1),
                (1, 0),
                (1, 1),
                (2, 1),
                (3, 2),
                (4, 3),
                (5, 4),
                (6, 5),
                (7, 6),
                (8, 7),
                (9, 8),
                (10, 9),
                (11, 10)
            ])
        );
        assert_eq!(nav.depth_of(&node(11, 10)).unwrap(), 11);
    }

    #[test]
    fn given_boundary_when_finding_path_then_depth_zero() {
        let nav = Navigator::new(TreeConfig::farey());
        assert_eq!(nav.path_to(&node(1, 1)).unwrap(), nodes(&[(1, 1)]));
        assert_eq!(nav.parents_of(&node(0, 1)).unwrap(), None);
        assert_eq!(nav.depth_of(&node(0, 1)).unwrap(), 0);
    }

    #[test]
    fn given_target_when_finding_parents_then_last_low_and_high() {
        let nav = Navigator::new(TreeConfig::stern_brocot());
        assert_eq!(
            nav.parents_of(&node(11, 10)).unwrap(),
            Some((node(1, 1), node(10, 9)))
        );
        assert_eq!(
            nav.parents_of(&node(3, 5)).unwrap(),
            Some((node(1, 2), node(2, 3)))
        );
    }

    #[test]
    fn given_out_of_range_target_when_searching_then_range_violation() {
        let nav = Navigator::new(TreeKind::OctaveReduced.resolve().unwrap());
        let err = nav.path_to(&node(5, 2)).unwrap_err();
        assert!(matches!(
            err,
            crate::application::ApplicationError::Domain(DomainError::RangeViolation { .. })
        ));
        assert!(nav.parents_of(&node(1, 2)).is_err());
    }

    #[test]
    fn given_two_targets_when_intersecting_paths_then_shared_prefix() {
        let nav = Navigator::new(TreeConfig::stern_brocot());
        let common = nav.common_ancestors(&node(3, 4), &node(3, 5)).unwrap();
        assert_eq!(common, nodes(&[(0, 1), (1, 0), (1, 1), (1, 2), (2, 3)]));
    }

    #[test]
    fn given_step_guard_when_search_runs_long_then_fails() {
        let nav = Navigator::new(TreeConfig::stern_brocot()).with_max_steps(5);
        assert!(nav.path_to(&node(3, 2)).is_ok());
        let err = nav.path_to(&node(11, 10)).unwrap_err();
        assert!(err.to_string().contains("exceeded 5 steps"));
    }

    #[test]
    fn given_rational_quotients_when_walking_then_matches_binary_search() {
        // 11/10 = [1; 10]
        let nav = Navigator::new(TreeConfig::stern_brocot());
        let walk = nav
            .quotient_walk(&BigInt::one(), &big(&[10]), Some(&node(11, 10)), 8)
            .unwrap();
        let octave = Navigator::new(TreeKind::OctaveReduced.resolve().unwrap());
        assert_eq!(walk, octave.path_to(&node(11, 10)).unwrap());
    }

    #[test]
    fn given_sqrt_two_quotients_when_walking_with_limit_then_truncated_convergents() {
        // √2 = [1; 2, 2, 2, …]
        let nav = Navigator::new(TreeConfig::stern_brocot());
        let walk = nav
            .quotient_walk(&BigInt::one(), &big(&[2, 2, 2, 2]), None, 3)
            .unwrap();
        assert_eq!(
            walk,
            nodes(&[(1, 1), (2, 1), (3, 2), (4, 3), (7, 5), (10, 7), (17, 12)])
        );
    }

    #[test]
    fn given_convergent_outside_config_when_walking_then_range_violation() {
        // [1; 2] = 3/2 is beyond the Farey segment
        let nav = Navigator::new(TreeConfig::farey());
        assert!(nav.quotient_walk(&BigInt::one(), &big(&[2]), None, 4).is_err());
        let walk = nav
            .quotient_walk(&BigInt::zero(), &big(&[3]), Some(&node(1, 3)), 4)
            .unwrap();
        assert_eq!(walk, nodes(&[(0, 1), (1, 1), (1, 2), (1, 3)]));
    }

    #[test]
    fn given_half_when_probing_neighbors_then_probe_order() {
        let nav = Navigator::new(TreeConfig::stern_brocot());
        let found = nav.neighbors_of(&node(1, 2), Some(5));
        assert_eq!(found, nodes(&[(1, 1), (0, 1), (2, 3), (1, 3)]));
        assert!(nav.neighbors_of(&Node::infinity(), Some(5)).is_empty());
    }

    #[test]
    fn given_numerator_when_computing_default_range_then_scales_with_digits() {
        assert_eq!(default_search_range(&BigInt::from(5)), 100);
        assert_eq!(default_search_range(&BigInt::from(42)), 1_000);
        assert_eq!(default_search_range(&BigInt::zero()), 100);
    }

    #[test]
    fn given_long_numerator_when_computing_default_range_then_capped() {
        assert_eq!(default_search_range(&BigInt::from(12_345)), 1_000_000);
        assert_eq!(default_search_range(&BigInt::from(123_456)), MAX_DEFAULT_SEARCH_RANGE);
        assert_eq!(default_search_range(&BigInt::from(123_456_789)), MAX_DEFAULT_SEARCH_RANGE);
        let huge: BigInt = "12345678901234567890123".parse().unwrap();
        assert_eq!(default_search_range(&huge), MAX_DEFAULT_SEARCH_RANGE);
    }

    #[test]
    fn given_target_on_config_boundary_when_walking_then_boundary_only() {
        // 1/1 = [1;] on Farey, 2/1 = [2;] on the octave tree
        let farey = Navigator::new(TreeConfig::farey());
        let walk = farey.quotient_walk(&BigInt::one(), &[], Some(&node(1, 1)), 64);
        assert_eq!(walk.unwrap(), nodes(&[(1, 1)]));

        let octave = Navigator::new(TreeKind::OctaveReduced.resolve().unwrap());
        let walk = octave.quotient_walk(&BigInt::from(2), &[], Some(&node(2, 1)), 64);
        assert_eq!(walk.unwrap(), nodes(&[(2, 1)]));
    }

    #[test]
    fn given_custom_segment_when_walking_then_follows_path_to() {
        // 3/8 = [0; 2, 1, 2]
        let nav = Navigator::new(TreeConfig::new(node(1, 3), node(1, 2)).unwrap());
        let quotients = big(&[2, 1, 2]);
        let walk = nav
            .quotient_walk(&BigInt::zero(), &quotients, Some(&node(3, 8)), 64)
            .unwrap();
        assert_eq!(walk, nodes(&[(1, 3), (1, 2), (2, 5), (3, 8)]));
        assert_eq!(walk, nav.path_to(&node(3, 8)).unwrap());

        // without a target the walk ends on the convergent [0; 2, 1, 2]
        let open = nav.quotient_walk(&BigInt::zero(), &quotients, None, 3).unwrap();
        assert_eq!(open, walk);
    }

    #[test]
    fn given_cache_when_searching_twice_then_identical_instances() {
        let cache = Arc::new(NodeCache::new());
        let nav = Navigator::new(TreeConfig::stern_brocot()).with_cache(cache.clone());
        let first = nav.path_to(&node(5, 3)).unwrap();
        let second = nav.path_to(&node(5, 3)).unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert!(a.same_instance(b));
        }
        assert_eq!(cache.len(), first.len());
    }
}
