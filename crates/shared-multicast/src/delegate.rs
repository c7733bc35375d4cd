//! # Delegate
//!
//! A [`Delegate`] is a [`Subscribable`] node that carries an optional action.
//! Invoking it calls its own action, then invokes every subscriber
//! recursively with the same arguments.
//!
//! ```text
//! root.invoke(x)
//!   ├─► root action(x)
//!   ├─► subscriber 1 ──► action(x) ──► its subscribers ...
//!   └─► subscriber N ──► action(x) ──► its subscribers ...
//! ```
//!
//! ## Invocation contract
//!
//! - A node's own action runs before any of its subscribers' subtrees.
//! - Order among sibling subscribers is unspecified.
//! - A subscriber reachable along two paths runs once per path.
//! - No participant may be mutated, relocated or dropped while an invocation
//!   is in progress. Doing so from inside an action panics on the node's
//!   `RefCell` borrow; it is a caller error, not a reported condition.
//! - A cyclic graph recurses without bound. Nothing detects it.

use crate::error::RelationError;
use crate::node::NodeId;
use crate::subscribable::{Node, Subscribable};
use std::fmt;
use tracing::trace;

/// Stored action of a delegate. Empty by default.
pub(crate) struct ActionSlot<A: ?Sized>(Option<Box<dyn Fn(&A)>>);

impl<A: ?Sized> ActionSlot<A> {
    fn with<F>(action: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self(Some(Box::new(action)))
    }
}

impl<A: ?Sized> Default for ActionSlot<A> {
    fn default() -> Self {
        Self(None)
    }
}

/// Subscribable multicast action taking `&A`.
///
/// Use a tuple for several arguments and interior mutability (`Cell`,
/// `RefCell`) in `A` or in the captured state for actions that write results.
pub struct Delegate<A: ?Sized> {
    registry: Subscribable<ActionSlot<A>>,
}

impl<A: ?Sized> Default for Delegate<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> Delegate<A> {
    /// Create a delegate with no action.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Subscribable::default(),
        }
    }

    /// Create a delegate with an initial action.
    #[must_use]
    pub fn with_action<F>(action: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self {
            registry: Subscribable::with_payload(ActionSlot::with(action)),
        }
    }

    /// Replace the stored action.
    pub fn assign<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(&A) + 'static,
    {
        let previous = self.registry.replace_payload(ActionSlot::with(action));
        drop(previous);
        self
    }

    /// Remove the stored action. Subscribers are still invoked.
    pub fn clear_action(&mut self) -> &mut Self {
        let previous = self.registry.replace_payload(ActionSlot::default());
        drop(previous);
        self
    }

    #[must_use]
    pub fn has_action(&self) -> bool {
        self.registry.node().payload().0.is_some()
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.registry.id()
    }

    /// Subscribe `subscriber` to this delegate. Self and duplicate
    /// subscriptions are ignored.
    pub fn subscribe(&self, subscriber: &Self) -> &Self {
        self.registry.subscribe(&subscriber.registry);
        self
    }

    pub fn try_subscribe(&self, subscriber: &Self) -> Result<(), RelationError> {
        self.registry.try_subscribe(&subscriber.registry)
    }

    /// Unsubscribe `subscriber` from this delegate. No-op if absent.
    pub fn unsubscribe(&self, subscriber: &Self) -> &Self {
        self.registry.unsubscribe(&subscriber.registry);
        self
    }

    pub fn try_unsubscribe(&self, subscriber: &Self) -> Result<(), RelationError> {
        self.registry.try_unsubscribe(&subscriber.registry)
    }

    #[must_use]
    pub fn subscribers(&self) -> Vec<NodeId> {
        self.registry.subscribers()
    }

    #[must_use]
    pub fn subscriptions(&self) -> Vec<NodeId> {
        self.registry.subscriptions()
    }

    #[must_use]
    pub fn has_subscriber(&self, peer: &Self) -> bool {
        self.registry.has_subscriber(&peer.registry)
    }

    #[must_use]
    pub fn has_subscription(&self, peer: &Self) -> bool {
        self.registry.has_subscription(&peer.registry)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.subscriber_count()
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.registry.subscription_count()
    }

    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.registry.is_detached()
    }

    /// Call this delegate's action, then every subscriber recursively.
    pub fn invoke(&self, args: &A) {
        cascade(&self.registry.node(), args);
    }

    pub fn clear_subscribers(&mut self) {
        self.registry.clear_subscribers();
    }

    pub fn clear_subscriptions(&mut self) {
        self.registry.clear_subscriptions();
    }

    /// Remove every edge and the stored action.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.clear_action();
    }

    /// Relocate edges and action into a fresh delegate, leaving `self`
    /// detached and without an action.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            registry: self.registry.take(),
        }
    }

    /// Drop this delegate's edges and action, then adopt those of `source`.
    pub fn relocate_from(&mut self, source: &mut Self) {
        self.registry.relocate_from(&mut source.registry);
    }
}

fn cascade<A: ?Sized>(node: &Node<ActionSlot<A>>, args: &A) {
    trace!(node = %node.id(), "Invoking delegate");
    if let Some(action) = &node.payload().0 {
        action(args);
    }
    for subscriber in node.subscriber_nodes() {
        cascade(&subscriber.borrow(), args);
    }
}

impl<A: ?Sized> fmt::Debug for Delegate<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("id", &self.id())
            .field("has_action", &self.has_action())
            .field("subscribers", &self.subscriber_count())
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}
