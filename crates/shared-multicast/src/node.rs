//! # Node Identity
//!
//! Every registry node is keyed by a [`NodeId`] in its peers' sets. Ids are
//! allocated from a process-wide counter and never reused, so a relocated
//! node is always distinguishable from the node it was relocated from.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next id to hand out. Zero is never allocated.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a subscription graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh id.
    pub(crate) fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
