//! Shared helpers for reproducible test scenarios.

use bevy_ecs::prelude::{Entity, World};

use crate::ecs::{Bus, BusStatus};
use crate::scenario::{build_scenario, LineRoute, ScenarioParams};
use crate::topology::{LineId, RouteTopology, Stop};

/// Seed used by test worlds so countdown draws are stable across runs.
pub const TEST_SEED: u64 = 42;

/// Generic numbered stops ("Stop 0", "Stop 1", ...).
pub fn test_stops(count: usize) -> Vec<Stop> {
    (0..count)
        .map(|i| Stop::new(&format!("Stop {i}"), &format!("Stop {i}"), "", ""))
        .collect()
}

/// A single line looping over `stop_count` numbered stops.
pub fn loop_params(line: LineId, stop_count: usize, buses_per_line: usize) -> ScenarioParams {
    ScenarioParams::default()
        .with_topology(
            test_stops(stop_count),
            vec![LineRoute::new(line, (0..stop_count).collect())],
        )
        .with_buses_per_line(buses_per_line)
        .with_seed(TEST_SEED)
}

/// World with all simulation resources and an empty fleet; tests spawn
/// buses explicitly for full control over positions and countdowns.
pub fn create_test_world(line: LineId, stop_count: usize) -> World {
    let mut world = World::new();
    build_scenario(&mut world, loop_params(line, stop_count, 0)).expect("valid test scenario");
    world
}

/// Spawns a running bus on `line`, copying the line's configured route.
pub fn spawn_test_bus(
    world: &mut World,
    line: LineId,
    position: usize,
    countdown_secs: u64,
) -> Entity {
    let route = world
        .resource::<RouteTopology>()
        .route(line)
        .expect("line exists in test topology")
        .clone();
    world
        .spawn(Bus {
            line,
            route,
            position,
            countdown_secs,
            status: BusStatus::Running,
        })
        .id()
}
