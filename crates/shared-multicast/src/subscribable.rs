//! # Relation Registry
//!
//! [`Subscribable`] keeps, for one node, the set of nodes subscribed to it
//! (subscribers) and the set of nodes it is subscribed to (subscriptions).
//! Every edge is recorded on both ends and every mutation updates both ends.
//!
//! ## Storage
//!
//! ```text
//!   Subscribable (owning handle)
//!        │ Rc
//!        ▼
//!   RefCell<Node<P>> ◄──── Weak ──── peer.subscriptions[id]
//!     ├── subscribers:   id -> Weak ────► peer node
//!     ├── subscriptions: id -> Weak ────► peer node
//!     └── payload: P
//! ```
//!
//! The handle is the only strong owner of its node, so moving the handle
//! (into a `Vec`, out of a function) never invalidates an edge. Relocation in
//! the sense of "hand all edges to another node" is explicit: see
//! [`Subscribable::take`] and [`Subscribable::relocate_from`].
//!
//! ## Invariants
//!
//! - **Symmetry**: `a` is a subscriber of `b` iff `b` is a subscription of `a`.
//! - **No self reference**: a node never appears in its own sets.
//! - **No duplicates**: sets are keyed by [`NodeId`].
//! - **No dangling links**: dropping a handle clears every edge it touches.

use crate::error::RelationError;
use crate::node::NodeId;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

pub(crate) type Link<P> = Weak<RefCell<Node<P>>>;

/// Shared state of one graph node.
pub(crate) struct Node<P> {
    id: NodeId,
    subscribers: HashMap<NodeId, Link<P>>,
    subscriptions: HashMap<NodeId, Link<P>>,
    payload: P,
}

impl<P> Node<P> {
    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn payload(&self) -> &P {
        &self.payload
    }

    /// Live subscriber nodes, in unspecified order.
    pub(crate) fn subscriber_nodes(&self) -> impl Iterator<Item = Rc<RefCell<Node<P>>>> + '_ {
        live_nodes(&self.subscribers)
    }
}

/// Upgrade every link in a set.
///
/// A link that fails to upgrade means a peer was dropped without clearing
/// its edges, which the `Drop` impl rules out.
fn live_nodes<P>(
    links: &HashMap<NodeId, Link<P>>,
) -> impl Iterator<Item = Rc<RefCell<Node<P>>>> + '_ {
    links.iter().filter_map(|(id, link)| {
        let node = link.upgrade();
        debug_assert!(node.is_some(), "dangling link to {id}");
        node
    })
}

/// A node in the subscription graph.
///
/// `P` is per-node payload reachable from peers; plain registries use `()`.
/// Not `Clone`: an edge belongs to exactly one node identity.
pub struct Subscribable<P = ()> {
    id: NodeId,
    node: Rc<RefCell<Node<P>>>,
}

impl Subscribable {
    /// Create a detached node.
    #[must_use]
    pub fn new() -> Self {
        Self::with_payload(())
    }
}

impl<P: Default> Default for Subscribable<P> {
    fn default() -> Self {
        Self::with_payload(P::default())
    }
}

impl<P> Subscribable<P> {
    /// Create a detached node carrying `payload`.
    pub(crate) fn with_payload(payload: P) -> Self {
        let id = NodeId::next();
        Self {
            id,
            node: Rc::new(RefCell::new(Node {
                id,
                subscribers: HashMap::new(),
                subscriptions: HashMap::new(),
                payload,
            })),
        }
    }

    /// This node's identity.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn node(&self) -> Ref<'_, Node<P>> {
        self.node.borrow()
    }

    /// Replace the payload, returning the previous one.
    ///
    /// The old payload is handed back rather than dropped in place so that
    /// its destructor runs without this node borrowed.
    pub(crate) fn replace_payload(&mut self, payload: P) -> P {
        mem::replace(&mut self.node.borrow_mut().payload, payload)
    }

    /// Add `subscriber` to this node's subscribers.
    ///
    /// Self and duplicate subscriptions are silently ignored.
    pub fn subscribe(&self, subscriber: &Self) -> &Self {
        let _ = self.try_subscribe(subscriber);
        self
    }

    /// Add `subscriber` to this node's subscribers, reporting why nothing
    /// changed when the edge is rejected.
    pub fn try_subscribe(&self, subscriber: &Self) -> Result<(), RelationError> {
        if self.id == subscriber.id {
            return Err(RelationError::SelfSubscription { node: self.id });
        }

        {
            let mut node = self.node.borrow_mut();
            if node.subscribers.contains_key(&subscriber.id) {
                return Err(RelationError::AlreadySubscribed {
                    node: self.id,
                    subscriber: subscriber.id,
                });
            }
            node.subscribers
                .insert(subscriber.id, Rc::downgrade(&subscriber.node));
        }
        subscriber
            .node
            .borrow_mut()
            .subscriptions
            .insert(self.id, Rc::downgrade(&self.node));

        trace!(node = %self.id, subscriber = %subscriber.id, "Subscriber added");
        Ok(())
    }

    /// Remove `subscriber` from this node's subscribers. No-op if absent.
    pub fn unsubscribe(&self, subscriber: &Self) -> &Self {
        let _ = self.try_unsubscribe(subscriber);
        self
    }

    /// Remove `subscriber` from this node's subscribers, reporting a missing
    /// edge.
    pub fn try_unsubscribe(&self, subscriber: &Self) -> Result<(), RelationError> {
        let removed = self
            .node
            .borrow_mut()
            .subscribers
            .remove(&subscriber.id)
            .is_some();
        if !removed {
            return Err(RelationError::NotSubscribed {
                node: self.id,
                subscriber: subscriber.id,
            });
        }
        subscriber.node.borrow_mut().subscriptions.remove(&self.id);

        trace!(node = %self.id, subscriber = %subscriber.id, "Subscriber removed");
        Ok(())
    }

    /// Snapshot of the nodes subscribed to this node.
    ///
    /// Order is unspecified. The snapshot goes stale on the next mutation.
    #[must_use]
    pub fn subscribers(&self) -> Vec<NodeId> {
        self.node.borrow().subscribers.keys().copied().collect()
    }

    /// Snapshot of the nodes this node is subscribed to.
    ///
    /// Order is unspecified. The snapshot goes stale on the next mutation.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<NodeId> {
        self.node.borrow().subscriptions.keys().copied().collect()
    }

    #[must_use]
    pub fn has_subscriber(&self, peer: &Self) -> bool {
        self.node.borrow().subscribers.contains_key(&peer.id)
    }

    #[must_use]
    pub fn has_subscription(&self, peer: &Self) -> bool {
        self.node.borrow().subscriptions.contains_key(&peer.id)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.node.borrow().subscribers.len()
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.node.borrow().subscriptions.len()
    }

    /// `true` when the node has no edges in either direction.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        let node = self.node.borrow();
        node.subscribers.is_empty() && node.subscriptions.is_empty()
    }

    /// Remove every subscriber, updating each subscriber's subscriptions.
    pub fn clear_subscribers(&mut self) {
        let subscribers = mem::take(&mut self.node.borrow_mut().subscribers);
        for peer in live_nodes(&subscribers) {
            peer.borrow_mut().subscriptions.remove(&self.id);
        }
        if !subscribers.is_empty() {
            debug!(node = %self.id, count = subscribers.len(), "Subscribers cleared");
        }
    }

    /// Remove every subscription, updating each subscription's subscribers.
    pub fn clear_subscriptions(&mut self) {
        let subscriptions = mem::take(&mut self.node.borrow_mut().subscriptions);
        for peer in live_nodes(&subscriptions) {
            peer.borrow_mut().subscribers.remove(&self.id);
        }
        if !subscriptions.is_empty() {
            debug!(node = %self.id, count = subscriptions.len(), "Subscriptions cleared");
        }
    }

    /// Remove every edge in both directions.
    pub fn clear(&mut self) {
        self.clear_subscribers();
        self.clear_subscriptions();
    }
}

impl<P: Default> Subscribable<P> {
    /// Move-assign: drop this node's own edges, then adopt every edge and the
    /// payload of `source`, leaving `source` detached with a default payload.
    ///
    /// Each adopted peer has `source`'s id replaced by this node's id in its
    /// opposite-direction set. Subscriber and subscription sides are rewritten
    /// independently, so a peer that is both (a mutually subscribed pair)
    /// ends up pointing at this node from both directions.
    ///
    /// An edge between this node and `source` is severed by the initial
    /// clear, so relocation never produces a self edge.
    pub fn relocate_from(&mut self, source: &mut Self) {
        self.clear();

        let (subscribers, subscriptions, payload) = {
            let mut old = source.node.borrow_mut();
            (
                mem::take(&mut old.subscribers),
                mem::take(&mut old.subscriptions),
                mem::take(&mut old.payload),
            )
        };

        let link = Rc::downgrade(&self.node);
        for peer in live_nodes(&subscribers) {
            let mut peer_node = peer.borrow_mut();
            peer_node.subscriptions.remove(&source.id);
            peer_node.subscriptions.insert(self.id, link.clone());
        }
        for peer in live_nodes(&subscriptions) {
            let mut peer_node = peer.borrow_mut();
            peer_node.subscribers.remove(&source.id);
            peer_node.subscribers.insert(self.id, link.clone());
        }

        debug!(
            from = %source.id,
            to = %self.id,
            subscribers = subscribers.len(),
            subscriptions = subscriptions.len(),
            "Node relocated"
        );

        let stale = {
            let mut node = self.node.borrow_mut();
            node.subscribers = subscribers;
            node.subscriptions = subscriptions;
            mem::replace(&mut node.payload, payload)
        };
        drop(stale);
    }

    /// Move-construct: relocate this node into a fresh identity and return it.
    ///
    /// `self` is left detached with a default payload.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let mut fresh = Self::with_payload(P::default());
        fresh.relocate_from(self);
        fresh
    }
}

impl<P> Drop for Subscribable<P> {
    fn drop(&mut self) {
        trace!(node = %self.id, "Node dropped");
        self.clear();
    }
}

impl<P> fmt::Debug for Subscribable<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node.borrow();
        f.debug_struct("Subscribable")
            .field("id", &self.id)
            .field("subscribers", &node.subscribers.len())
            .field("subscriptions", &node.subscriptions.len())
            .finish()
    }
}
