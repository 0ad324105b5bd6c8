//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression happens here, outside systems. Each step pops the next
//! event from [SimulationClock], inserts it as [CurrentEvent], then runs the
//! schedule. The tick phases are chained so their mandated order holds.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::profiling::EventMetrics;
use crate::systems::{
    arrival_service::arrival_service_system, fleet_advance::fleet_advance_system,
    fleet_spawner::fleet_spawner_system, signal_refresh::signal_refresh_system,
    ticker::ticker_rearm_system,
};

fn is_simulation_started(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::SimulationStarted)
        .unwrap_or(false)
}

fn is_tick(event: Option<Res<CurrentEvent>>) -> bool {
    event.map(|e| e.0.kind == EventKind::Tick).unwrap_or(false)
}

/// Runs one simulation step: pops the next event, inserts it as
/// [CurrentEvent], then runs the schedule. Returns `false` when the clock
/// has nothing pending (the ticker disarmed and nothing re-armed it).
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(event) => event,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));

    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(event.kind);
    }

    schedule.run(world);
    true
}

/// Runs simulation steps until the event queue is empty or `max_steps` is
/// reached. Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Builds the dispatch schedule. The tick phases run strictly in order:
/// fleet advance, arrival service, signal refresh, ticker re-arm, with
/// deferred despawns applied between the phases that need them.
pub fn dispatch_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.add_systems(fleet_spawner_system.run_if(is_simulation_started));
    schedule.add_systems(
        (
            fleet_advance_system,
            arrival_service_system,
            apply_deferred,
            signal_refresh_system,
            apply_deferred,
            ticker_rearm_system,
        )
            .chain()
            .run_if(is_tick),
    );

    schedule
}

/// Schedules the SimulationStarted event at time 0. Call after building the
/// scenario and before running events.
pub fn initialize_simulation(world: &mut World) {
    world
        .resource_mut::<SimulationClock>()
        .schedule_at(0, EventKind::SimulationStarted);
}
