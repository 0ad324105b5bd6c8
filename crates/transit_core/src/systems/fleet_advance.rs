//! Tick phase 1: advance every running bus by one simulated second and
//! record arrivals.
//!
//! A bus whose countdown runs out this second arrives at `route[position]`,
//! rolls over to the next route position, and resets its countdown to the
//! inter-stop duration. At most one arrival per bus per tick.

use bevy_ecs::prelude::{Entity, Query, Res, ResMut, Resource};

use crate::clock::{CurrentEvent, EventKind};
use crate::ecs::Bus;
use crate::profiling::EventMetrics;
use crate::scenario::DispatchTiming;
use crate::topology::StopIndex;

/// One bus reaching one stop during the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub bus: Entity,
    pub stop: StopIndex,
}

/// Arrivals recorded by phase 1 and consumed by phase 2. Cleared at the
/// start of every tick.
#[derive(Debug, Default, Resource)]
pub struct TickArrivals(pub Vec<Arrival>);

pub fn fleet_advance_system(
    event: Res<CurrentEvent>,
    timing: Res<DispatchTiming>,
    mut arrivals: ResMut<TickArrivals>,
    mut metrics: Option<ResMut<EventMetrics>>,
    mut buses: Query<(Entity, &mut Bus)>,
) {
    if event.0.kind != EventKind::Tick {
        return;
    }

    arrivals.0.clear();
    for (entity, mut bus) in buses.iter_mut() {
        if !bus.is_running() {
            continue;
        }
        if bus.countdown_secs > 1 {
            bus.countdown_secs -= 1;
            continue;
        }
        arrivals.0.push(Arrival {
            bus: entity,
            stop: bus.next_stop(),
        });
        bus.position = bus.route.advance(bus.position);
        bus.countdown_secs = timing.inter_stop_secs;
        if let Some(metrics) = metrics.as_mut() {
            metrics.arrivals_recorded += 1;
        }
    }
}
