//! Tick phase 2: a signal is served the moment its assigned bus arrives at
//! the requested stop.

use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind};
use crate::ecs::Signal;
use crate::profiling::EventMetrics;
use crate::registry::SignalBoard;
use crate::systems::fleet_advance::TickArrivals;

pub fn arrival_service_system(
    mut commands: Commands,
    event: Res<CurrentEvent>,
    arrivals: Res<TickArrivals>,
    mut board: ResMut<SignalBoard>,
    mut metrics: Option<ResMut<EventMetrics>>,
    signals: Query<(Entity, &Signal)>,
) {
    if event.0.kind != EventKind::Tick {
        return;
    }
    if arrivals.0.is_empty() {
        return;
    }

    for (entity, signal) in signals.iter() {
        let Some(bus) = signal.assigned_bus else {
            continue;
        };
        let served = arrivals
            .0
            .iter()
            .any(|arrival| arrival.bus == bus && arrival.stop == signal.stop);
        if served {
            commands.entity(entity).despawn();
            board.remove(entity);
            if let Some(metrics) = metrics.as_mut() {
                metrics.signals_served += 1;
            }
        }
    }
}
