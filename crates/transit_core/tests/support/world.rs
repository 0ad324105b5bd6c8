#![allow(dead_code)]

use bevy_ecs::prelude::{Schedule, World};
use transit_core::runner::{dispatch_schedule, initialize_simulation, run_next_event};
use transit_core::scenario::{build_scenario, ScenarioParams};

/// Helper that owns a reusable `Schedule` so tests can step the event queue.
pub struct DispatchRunner {
    schedule: Schedule,
}

impl Default for DispatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchRunner {
    pub fn new() -> Self {
        Self {
            schedule: dispatch_schedule(),
        }
    }

    /// Run a single event (returns `true` if an event was processed).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_next_event(world, &mut self.schedule)
    }

    /// Run up to `steps` events, returning how many were processed.
    pub fn run_steps(&mut self, world: &mut World, steps: usize) -> usize {
        let mut processed = 0;
        while processed < steps && self.run_one(world) {
            processed += 1;
        }
        processed
    }
}

/// Builds a world from the params and processes the SimulationStarted
/// event, so the configured fleet exists before the test begins.
pub fn build_world(params: ScenarioParams) -> (World, DispatchRunner) {
    let mut world = World::new();
    build_scenario(&mut world, params).expect("valid scenario");
    initialize_simulation(&mut world);
    let mut runner = DispatchRunner::new();
    runner.run_one(&mut world);
    (world, runner)
}
