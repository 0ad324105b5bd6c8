//! Tick phases 3 and 4: recompute every surviving signal's assignment and
//! ETA from the post-advance fleet, then drop the ones that ran out.
//!
//! No incremental reuse: the displayed ETA always reflects the current
//! fleet, and an unassigned signal is retried against the full fleet every
//! tick.

use bevy_ecs::prelude::{Commands, Entity, Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind};
use crate::ecs::{Bus, Signal};
use crate::matching;
use crate::profiling::EventMetrics;
use crate::registry::SignalBoard;
use crate::scenario::{DispatchTiming, ReferenceProgress};

pub fn signal_refresh_system(
    mut commands: Commands,
    event: Res<CurrentEvent>,
    timing: Res<DispatchTiming>,
    reference: Res<ReferenceProgress>,
    mut board: ResMut<SignalBoard>,
    mut metrics: Option<ResMut<EventMetrics>>,
    buses: Query<(Entity, &Bus)>,
    mut signals: Query<(Entity, &mut Signal)>,
) {
    if event.0.kind != EventKind::Tick {
        return;
    }

    let mut fleet: Vec<(Entity, &Bus)> = buses.iter().collect();
    fleet.sort_by_key(|&(entity, _)| entity);

    for (entity, mut signal) in signals.iter_mut() {
        let assignment = matching::assign(
            signal.stop,
            signal.line,
            &fleet,
            timing.inter_stop_secs,
            timing.arrival_floor_secs,
            reference.0,
        );
        signal.assigned_bus = assignment.bus();
        signal.remaining_secs = assignment.eta_secs();

        if signal.remaining_secs == 0 {
            commands.entity(entity).despawn();
            board.remove(entity);
            if let Some(metrics) = metrics.as_mut() {
                metrics.signals_expired += 1;
            }
        }
    }
}
