//! # Multicast Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | fan-out | `invoke` on a root with N direct subscribers, and down a chain of N |
//! | relocation | `take` of a hub with N subscribers, and of a whole container |
//! | subscription | building and tearing down N edges |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use multicast_tests::integration::publisher::{Listener, Publisher};
use shared_multicast::{Delegate, Subscribable};
use std::cell::Cell;

const SIZES: [usize; 4] = [16, 128, 1024, 4096];

fn adder(i: usize) -> Delegate<Cell<usize>> {
    Delegate::with_action(move |total: &Cell<usize>| total.set(total.get() + i))
}

// ============================================================================
// Fan-out
// ============================================================================

fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan-out");

    for size in SIZES {
        let root: Delegate<Cell<usize>> = Delegate::new();
        let listeners: Vec<_> = (0..size).map(adder).collect();
        for listener in &listeners {
            root.subscribe(listener);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("flat", size), &root, |b, root| {
            b.iter(|| {
                let total = Cell::new(0);
                root.invoke(&total);
                black_box(total.get())
            })
        });
    }

    // Recursion depth grows with the chain; keep it well under stack limits.
    for size in [16usize, 128, 512] {
        let chain: Vec<_> = (0..size).map(adder).collect();
        for pair in chain.windows(2) {
            pair[0].subscribe(&pair[1]);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("chain", size), &chain, |b, chain| {
            b.iter(|| {
                let total = Cell::new(0);
                chain[0].invoke(&total);
                black_box(total.get())
            })
        });
    }

    let publisher = Publisher::new();
    let listeners: Vec<Listener> = (0..16).map(|_| Listener::new()).collect();
    for listener in &listeners {
        publisher.on_publish.subscribe(&listener.publish_handler);
    }
    group.bench_function("event_16_listeners", |b| {
        b.iter(|| publisher.publish(black_box("fox")))
    });

    group.finish();
}

// ============================================================================
// Relocation
// ============================================================================

fn bench_relocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("relocation");

    for size in SIZES {
        let mut hub: Delegate<Cell<usize>> = Delegate::new();
        let listeners: Vec<_> = (0..size).map(adder).collect();
        for listener in &listeners {
            hub.subscribe(listener);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::new("hub_take", size), |b| {
            b.iter(|| {
                let moved = hub.take();
                hub.relocate_from(&mut black_box(moved));
            })
        });
    }

    for size in [16usize, 128, 1024] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::new("container_rebuild", size), |b| {
            let mut nodes: Vec<Subscribable> = (0..size).map(|_| Subscribable::new()).collect();
            for pair in nodes.windows(2) {
                pair[0].subscribe(&pair[1]);
            }
            b.iter(|| {
                nodes = nodes.iter_mut().map(Subscribable::take).collect();
                black_box(nodes.len())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Subscription
// ============================================================================

fn bench_subscription(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscription");

    for size in SIZES {
        let publisher = Subscribable::new();
        let listeners: Vec<Subscribable> = (0..size).map(|_| Subscribable::new()).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("subscribe_unsubscribe", size),
            &listeners,
            |b, listeners| {
                b.iter(|| {
                    for listener in listeners {
                        publisher.subscribe(listener);
                    }
                    for listener in listeners {
                        publisher.unsubscribe(listener);
                    }
                    black_box(publisher.subscriber_count())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fanout, bench_relocation, bench_subscription);
criterion_main!(benches);
