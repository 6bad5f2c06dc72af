//! Shared node cache
//!
//! Canonicalizes nodes by value so every lookup of a fraction returns the
//! same allocation. Safe to share between threads through an `Arc`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use num_bigint::BigInt;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::domain::{DomainResult, Node, Value};

/// Counters reported by [`NodeCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
pub struct NodeCache {
    nodes: RwLock<HashMap<Value, Node>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl NodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical instance for `node`'s value, inserting `node` if unseen.
    ///
    /// Racing inserts of one value resolve under the write lock, so only one
    /// instance ever lands in the cache.
    pub fn intern(&self, node: Node) -> Node {
        let key = node.value();
        if let Some(found) = self.nodes.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return found.clone();
        }

        let mut nodes = self.nodes.write();
        match nodes.entry(key) {
            Entry::Occupied(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(node = %node, "cache insert");
                entry.insert(node).clone()
            }
        }
    }

    /// Intern the fraction `numerator/denominator`.
    pub fn lookup(
        &self,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> DomainResult<Node> {
        Ok(self.intern(Node::new(numerator, denominator)?))
    }

    pub fn get(&self, value: &Value) -> Option<Node> {
        self.nodes.read().get(value).cloned()
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.nodes.read().contains_key(&node.value())
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Drop every cached node and zero the counters.
    pub fn reset(&self) {
        let mut nodes = self.nodes.write();
        debug!(entries = nodes.len(), "cache reset");
        nodes.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
