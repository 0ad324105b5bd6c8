mod support;

use support::world::DispatchRunner;
use transit_core::ecs::{Signal, SignalMode};
use transit_core::registry::create_signal;
use transit_core::test_helpers::{create_test_world, spawn_test_bus};

#[test]
fn recomputes_eta_from_the_post_tick_fleet() {
    let mut world = create_test_world(1, 7);
    let mut runner = DispatchRunner::new();
    let bus = spawn_test_bus(&mut world, 1, 0, 30);
    let signal = create_signal(&mut world, "Stop 3", 1, SignalMode::Generic).expect("signal");

    // Initial assignment: 30s countdown plus three 90s hops.
    let initial = *world.get::<Signal>(signal).expect("signal");
    assert_eq!(initial.assigned_bus, Some(bus));
    assert_eq!(initial.remaining_secs, 300);

    // Each tick shaves one second off the bus countdown, and the signal's
    // ETA is recomputed from scratch to match.
    for expected in [299, 298, 297] {
        assert!(runner.run_one(&mut world));
        let refreshed = *world.get::<Signal>(signal).expect("signal");
        assert_eq!(refreshed.assigned_bus, Some(bus));
        assert_eq!(refreshed.remaining_secs, expected);
    }
}

#[test]
fn unassigned_signal_is_retried_until_a_bus_appears() {
    let mut world = create_test_world(1, 7);
    let mut runner = DispatchRunner::new();
    let signal = create_signal(&mut world, "Stop 3", 1, SignalMode::Generic).expect("signal");

    // No fleet: heuristic ETA from the reference pointer, no assignment.
    let pending = *world.get::<Signal>(signal).expect("signal");
    assert_eq!(pending.assigned_bus, None);
    assert_eq!(pending.remaining_secs, 3 * 90 + 30);

    assert!(runner.run_one(&mut world));
    let pending = *world.get::<Signal>(signal).expect("signal");
    assert_eq!(pending.assigned_bus, None);
    assert_eq!(pending.remaining_secs, 3 * 90 + 30);

    // A bus entering service is picked up on the very next tick.
    let bus = spawn_test_bus(&mut world, 1, 0, 50);
    assert!(runner.run_one(&mut world));
    let assigned = *world.get::<Signal>(signal).expect("signal");
    assert_eq!(assigned.assigned_bus, Some(bus));
    assert_eq!(assigned.remaining_secs, 49 + 3 * 90);
}

#[test]
fn present_signals_always_have_positive_remaining_time() {
    let mut world = create_test_world(1, 7);
    let mut runner = DispatchRunner::new();
    spawn_test_bus(&mut world, 1, 0, 5);
    spawn_test_bus(&mut world, 1, 4, 60);
    for stop in ["Stop 1", "Stop 4", "Stop 6"] {
        create_signal(&mut world, stop, 1, SignalMode::Generic).expect("signal");
    }

    for _ in 0..500 {
        assert!(runner.run_one(&mut world));
        let mut signals = world.query::<&Signal>();
        for signal in signals.iter(&world) {
            assert!(signal.remaining_secs > 0);
        }
    }
}
