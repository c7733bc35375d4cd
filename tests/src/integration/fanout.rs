//! # Fan-out Scenarios
//!
//! Delivery through multi-level delegate graphs and through an owner-restricted
//! event whose listeners have their own subscribers.

#[cfg(test)]
mod tests {
    use shared_multicast::{Delegate, Event, RelationError};
    use std::cell::Cell;
    use std::rc::Rc;

    const TEST_COUNT: usize = 16;

    struct Owner {
        _private: (),
    }

    const OWNER: Owner = Owner { _private: () };

    fn adder(i: usize) -> Delegate<Cell<usize>> {
        Delegate::with_action(move |total: &Cell<usize>| total.set(total.get() + i))
    }

    // =========================================================================
    // DELEGATE GRAPHS
    // =========================================================================

    #[test]
    fn test_sixteen_listeners_sum_to_120() {
        multicast_telemetry::init_for_tests();
        let root: Delegate<Cell<usize>> = Delegate::new();
        let listeners: Vec<_> = (0..TEST_COUNT).map(adder).collect();
        for listener in &listeners {
            root.subscribe(listener);
        }

        let total = Cell::new(0);
        root.invoke(&total);

        assert_eq!(total.get(), 120);
    }

    #[test]
    fn test_two_level_tree_reaches_every_leaf() {
        let root: Delegate<Cell<usize>> = Delegate::new();
        let branches: Vec<_> = (0..4).map(|_| adder(100)).collect();
        let leaves: Vec<_> = (0..TEST_COUNT).map(|_| adder(1)).collect();
        for (i, branch) in branches.iter().enumerate() {
            root.subscribe(branch);
            for leaf in &leaves[i * 4..(i + 1) * 4] {
                branch.subscribe(leaf);
            }
        }

        let total = Cell::new(0);
        root.invoke(&total);

        assert_eq!(total.get(), 4 * 100 + TEST_COUNT);
    }

    #[test]
    fn test_invoking_middle_of_chain_skips_upstream() {
        let nodes: Vec<_> = (1..=4).map(adder).collect();
        for pair in nodes.windows(2) {
            pair[0].subscribe(&pair[1]);
        }

        let total = Cell::new(0);
        nodes[2].invoke(&total);

        assert_eq!(total.get(), 3 + 4);
    }

    #[test]
    fn test_dropped_listeners_stop_contributing() {
        let root: Delegate<Cell<usize>> = Delegate::new();
        let total = Cell::new(0);
        {
            let listeners: Vec<_> = (0..TEST_COUNT).map(adder).collect();
            for listener in &listeners {
                root.subscribe(listener);
            }
            root.invoke(&total);
            assert_eq!(total.get(), 120);
        }

        root.invoke(&total);

        assert_eq!(total.get(), 120);
        assert!(root.is_detached());
    }

    #[test]
    fn test_subscribe_reports_rejections() {
        let root: Delegate<Cell<usize>> = Delegate::new();
        let listener = adder(1);

        assert_eq!(root.try_subscribe(&listener), Ok(()));
        assert!(matches!(
            root.try_subscribe(&listener),
            Err(RelationError::AlreadySubscribed { .. })
        ));
        assert!(matches!(
            root.try_subscribe(&root),
            Err(RelationError::SelfSubscription { .. })
        ));
        assert_eq!(root.subscriber_count(), 1);
    }

    // =========================================================================
    // EVENT → DELEGATE → DELEGATE
    // =========================================================================

    #[test]
    fn test_event_reaches_nested_subscribers() {
        let hits = Rc::new(Cell::new(0));
        let event: Event<Owner, str> = Event::new(&OWNER);
        let relay: Delegate<str> = Delegate::new();
        let sinks: Vec<Delegate<str>> = (0..TEST_COUNT)
            .map(|_| {
                let hits = Rc::clone(&hits);
                Delegate::with_action(move |_: &str| hits.set(hits.get() + 1))
            })
            .collect();
        for sink in &sinks {
            relay.subscribe(sink);
        }
        event.subscribe(&relay);

        event.invoke(&OWNER, "tick");

        assert_eq!(hits.get(), TEST_COUNT);
        assert_eq!(event.subscribers(), vec![relay.id()]);
    }

    #[test]
    fn test_delegate_can_listen_to_two_events() {
        let hits = Rc::new(Cell::new(0));
        let first: Event<Owner, str> = Event::new(&OWNER);
        let second: Event<Owner, str> = Event::new(&OWNER);
        let listener = {
            let hits = Rc::clone(&hits);
            Delegate::with_action(move |_: &str| hits.set(hits.get() + 1))
        };
        first.subscribe(&listener);
        second.subscribe(&listener);

        first.invoke(&OWNER, "a");
        second.invoke(&OWNER, "b");

        assert_eq!(hits.get(), 2);
        assert_eq!(listener.subscription_count(), 2);
        let subscriptions = listener.subscriptions();
        assert!(subscriptions.contains(&first.id()));
        assert!(subscriptions.contains(&second.id()));
    }
}
