use bevy_ecs::prelude::World;

use crate::clock::SimulationClock;
use crate::ecs::SignalMode;
use crate::profiling::EventMetrics;
use crate::registry::SignalBoard;
use crate::scenario::params::{DispatchTiming, ReferenceProgress, ScenarioParams};
use crate::systems::fleet_advance::TickArrivals;
use crate::systems::ticker::TickerState;
use crate::topology::{RouteTopology, TopologyError};
use crate::view::{BusFilter, ViewPrefs};

/// Inserts every resource a simulation world needs: validated topology,
/// clock, timing, registry bookkeeping, and presentation preferences.
/// The fleet itself spawns when the SimulationStarted event is processed.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), TopologyError> {
    let topology = RouteTopology::new(
        params.stops.clone(),
        params
            .lines
            .iter()
            .map(|line| (line.line, line.stops.clone())),
    )?;

    let selected_stop = topology.stops()[0].name.clone();
    let first_line = topology
        .routes()
        .next()
        .map(|(line, _)| line)
        .unwrap_or_default();

    world.insert_resource(SimulationClock::default());
    world.insert_resource(DispatchTiming {
        inter_stop_secs: params.inter_stop_secs,
        arrival_floor_secs: params.arrival_floor_secs,
    });
    world.insert_resource(ReferenceProgress::default());
    world.insert_resource(SignalBoard::default());
    world.insert_resource(TickArrivals::default());
    world.insert_resource(TickerState::default());
    world.insert_resource(EventMetrics::default());
    world.insert_resource(ViewPrefs {
        selected_stop,
        passenger_mode: SignalMode::Single,
        driver_bus_filter: BusFilter::All,
        driver_filtered_line: first_line,
    });
    world.insert_resource(params.fleet_spawner());
    world.insert_resource(topology);

    Ok(())
}
