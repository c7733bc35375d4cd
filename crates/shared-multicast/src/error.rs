//! # Relation Errors
//!
//! The plain `subscribe`/`unsubscribe` operations treat malformed requests as
//! silent no-ops. The `try_*` variants report the same conditions through
//! [`RelationError`] so callers that care can tell them apart.

use crate::node::NodeId;
use thiserror::Error;

/// Reasons a subscription graph mutation left the graph unchanged.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RelationError {
    /// A node tried to subscribe to itself.
    #[error("Self subscription rejected: {node}")]
    SelfSubscription { node: NodeId },

    /// The edge already exists.
    #[error("Duplicate subscription rejected: {subscriber} already subscribed to {node}")]
    AlreadySubscribed { node: NodeId, subscriber: NodeId },

    /// There was no edge to remove.
    #[error("Not subscribed: {subscriber} is not a subscriber of {node}")]
    NotSubscribed { node: NodeId, subscriber: NodeId },
}

impl RelationError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RelationError::SelfSubscription { .. } => "self_subscription",
            RelationError::AlreadySubscribed { .. } => "already_subscribed",
            RelationError::NotSubscribed { .. } => "not_subscribed",
        }
    }

    /// The node whose subscriber set the operation targeted.
    pub fn node(&self) -> NodeId {
        match self {
            RelationError::SelfSubscription { node }
            | RelationError::AlreadySubscribed { node, .. }
            | RelationError::NotSubscribed { node, .. } => *node,
        }
    }
}
