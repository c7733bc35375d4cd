//! # Shared Multicast - Subscription Graph and Multicast Delegates
//!
//! In-process notification primitives built on a bidirectional subscription
//! graph.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Event<O, A>                  │  invoke / relocate / clear need &O
//! │   └── Delegate<A>            │  optional action + recursive invoke
//! │         └── Subscribable<P>  │  subscriber / subscription bookkeeping
//! └──────────────────────────────┘
//! ```
//!
//! - [`Subscribable`]: keeps both ends of every edge consistent under
//!   subscribe, unsubscribe, relocation and drop.
//! - [`Delegate`]: calls its own action, then every subscriber, recursively.
//! - [`Event`]: a delegate whose firing and reset are reserved to the holder
//!   of an owner capability; anyone else may only subscribe and unsubscribe.
//!
//! ## Threading
//!
//! Nodes are single-threaded (`!Send`, `!Sync`). All operations run to
//! completion synchronously.
//!
//! ## Invariants
//!
//! - **Symmetry**: `a` is a subscriber of `b` iff `b` is a subscription of `a`.
//! - **No self reference**: a node never subscribes to itself.
//! - **No duplicates**: each edge exists at most once.
//! - **No dangling links**: dropping a node removes it from every peer.
//!
//! ## Example
//!
//! ```
//! use shared_multicast::Delegate;
//! use std::cell::Cell;
//!
//! let root: Delegate<Cell<usize>> = Delegate::new();
//! let listeners: Vec<Delegate<Cell<usize>>> = (0..16)
//!     .map(|i| Delegate::with_action(move |total: &Cell<usize>| total.set(total.get() + i)))
//!     .collect();
//! for listener in &listeners {
//!     root.subscribe(listener);
//! }
//!
//! let total = Cell::new(0);
//! root.invoke(&total);
//! assert_eq!(total.get(), 120);
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod delegate;
pub mod error;
pub mod event;
pub mod node;
pub mod subscribable;

// Re-export main types
pub use delegate::Delegate;
pub use error::RelationError;
pub use event::Event;
pub use node::NodeId;
pub use subscribable::Subscribable;
