//! # Owner-restricted Event
//!
//! An [`Event`] wraps a [`Delegate`] and splits its API in two:
//!
//! | Caller                 | Allowed                                                     |
//! |------------------------|-------------------------------------------------------------|
//! | anyone with `&Event`   | `subscribe`, `unsubscribe`, `try_*`, observation helpers    |
//! | holder of `&O` (owner) | `new`, `invoke`, `take`, `relocate_from`, `clear*`          |
//!
//! `O` is the owner capability. Give it private fields so that only the
//! owning module can construct one; the compiler then rejects every
//! privileged call made from outside that module.
//!
//! ```
//! use shared_multicast::Delegate;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! mod publisher {
//!     use shared_multicast::Event;
//!
//!     pub struct PublisherKey {
//!         _private: (),
//!     }
//!
//!     pub struct Publisher {
//!         key: PublisherKey,
//!         pub on_publish: Event<PublisherKey, str>,
//!     }
//!
//!     impl Publisher {
//!         pub fn new() -> Self {
//!             let key = PublisherKey { _private: () };
//!             let on_publish = Event::new(&key);
//!             Self { key, on_publish }
//!         }
//!
//!         pub fn publish(&self, word: &str) {
//!             self.on_publish.invoke(&self.key, word);
//!         }
//!     }
//! }
//!
//! let publisher = publisher::Publisher::new();
//! let heard = Rc::new(RefCell::new(Vec::new()));
//! let listener = {
//!     let heard = Rc::clone(&heard);
//!     Delegate::with_action(move |word: &str| heard.borrow_mut().push(word.to_string()))
//! };
//! publisher.on_publish.subscribe(&listener);
//!
//! publisher.publish("fox");
//! assert_eq!(*heard.borrow(), vec!["fox".to_string()]);
//! ```
//!
//! Outside the owner's module there is no way to name a `PublisherKey`
//! value, so `publisher.on_publish.invoke(..)` does not compile:
//!
//! ```compile_fail
//! mod publisher {
//!     use shared_multicast::Event;
//!     pub struct PublisherKey { _private: () }
//!     pub struct Publisher { pub on_publish: Event<PublisherKey, str> }
//!     impl Publisher {
//!         pub fn new() -> Self {
//!             Self { on_publish: Event::new(&PublisherKey { _private: () }) }
//!         }
//!     }
//! }
//!
//! let publisher = publisher::Publisher::new();
//! let key = publisher::PublisherKey { _private: () };
//! publisher.on_publish.invoke(&key, "fox");
//! ```

use crate::delegate::Delegate;
use crate::error::RelationError;
use crate::node::NodeId;
use std::fmt;
use std::marker::PhantomData;

/// Multicast node that only the holder of an `O` can fire or reset.
pub struct Event<O, A: ?Sized> {
    delegate: Delegate<A>,
    owner: PhantomData<fn(&O)>,
}

impl<O, A: ?Sized> Event<O, A> {
    /// Create an event with no subscribers.
    #[must_use]
    pub fn new(_owner: &O) -> Self {
        Self {
            delegate: Delegate::new(),
            owner: PhantomData,
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.delegate.id()
    }

    /// Subscribe `subscriber` to this event. Self and duplicate
    /// subscriptions are ignored.
    pub fn subscribe(&self, subscriber: &Delegate<A>) -> &Self {
        self.delegate.subscribe(subscriber);
        self
    }

    pub fn try_subscribe(&self, subscriber: &Delegate<A>) -> Result<(), RelationError> {
        self.delegate.try_subscribe(subscriber)
    }

    /// Unsubscribe `subscriber` from this event. No-op if absent.
    pub fn unsubscribe(&self, subscriber: &Delegate<A>) -> &Self {
        self.delegate.unsubscribe(subscriber);
        self
    }

    pub fn try_unsubscribe(&self, subscriber: &Delegate<A>) -> Result<(), RelationError> {
        self.delegate.try_unsubscribe(subscriber)
    }

    #[must_use]
    pub fn subscribers(&self) -> Vec<NodeId> {
        self.delegate.subscribers()
    }

    #[must_use]
    pub fn subscriptions(&self) -> Vec<NodeId> {
        self.delegate.subscriptions()
    }

    #[must_use]
    pub fn has_subscriber(&self, subscriber: &Delegate<A>) -> bool {
        self.delegate.has_subscriber(subscriber)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.delegate.subscriber_count()
    }

    /// Invoke every subscriber recursively.
    ///
    /// The invocation contract of [`Delegate::invoke`] applies.
    pub fn invoke(&self, _owner: &O, args: &A) {
        self.delegate.invoke(args);
    }

    /// Relocate every edge into a fresh event, leaving `self` detached.
    #[must_use]
    pub fn take(&mut self, _owner: &O) -> Self {
        Self {
            delegate: self.delegate.take(),
            owner: PhantomData,
        }
    }

    /// Drop this event's edges, then adopt those of `source`.
    pub fn relocate_from(&mut self, _owner: &O, source: &mut Self) {
        self.delegate.relocate_from(&mut source.delegate);
    }

    pub fn clear_subscribers(&mut self, _owner: &O) {
        self.delegate.clear_subscribers();
    }

    pub fn clear_subscriptions(&mut self, _owner: &O) {
        self.delegate.clear_subscriptions();
    }

    pub fn clear(&mut self, _owner: &O) {
        self.delegate.clear();
    }
}

impl<O, A: ?Sized> fmt::Debug for Event<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id())
            .field("owner", &std::any::type_name::<O>())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
