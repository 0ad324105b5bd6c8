//! One-shot fleet spawner: places buses evenly along every line's route
//! when the SimulationStarted event is processed.

use bevy_ecs::prelude::{Commands, Res, ResMut};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::ecs::{Bus, BusStatus};
use crate::scenario::FleetSpawner;
use crate::systems::ticker::TickerState;
use crate::topology::RouteTopology;

pub fn fleet_spawner_system(
    mut commands: Commands,
    event: Res<CurrentEvent>,
    topology: Res<RouteTopology>,
    spawner: Res<FleetSpawner>,
    mut ticker: ResMut<TickerState>,
    mut clock: ResMut<SimulationClock>,
) {
    if event.0.kind != EventKind::SimulationStarted {
        return;
    }

    let mut rng = StdRng::seed_from_u64(spawner.seed);
    let mut spawned = 0usize;
    for (line, route) in topology.routes() {
        for i in 0..spawner.buses_per_line {
            let position = i * route.len() / spawner.buses_per_line;
            let countdown_secs =
                rng.gen_range(spawner.countdown_min_secs..=spawner.countdown_max_secs);
            commands.spawn(Bus {
                line,
                route: route.clone(),
                position,
                countdown_secs,
                status: BusStatus::Running,
            });
            spawned += 1;
        }
    }

    // A live fleet must advance even before the first signal arrives.
    if spawned > 0 {
        ticker.arm(&mut clock);
    }
}
