//! Read projections over the simulation world: snapshots of buses and
//! signals plus aggregated counts, for presentation collaborators and
//! export.

use bevy_ecs::prelude::{Entity, World};

use crate::ecs::{Bus, BusStatus, GeoPosition, Signal, SignalMode};
use crate::registry::SignalBoard;
use crate::topology::{LineId, RouteTopology, StopIndex};

/// Snapshot of one bus.
#[derive(Debug, Clone)]
pub struct BusSnapshot {
    pub entity: Entity,
    pub line: LineId,
    pub position: usize,
    pub next_stop: StopIndex,
    pub countdown_secs: u64,
    pub status: BusStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy_m: Option<f64>,
}

/// Snapshot of one signal.
#[derive(Debug, Clone)]
pub struct SignalSnapshot {
    pub entity: Entity,
    pub stop: StopIndex,
    pub stop_name: String,
    pub line: LineId,
    pub mode: SignalMode,
    pub requested_at: u64,
    pub remaining_secs: u64,
    pub assigned_bus: Option<Entity>,
}

/// Aggregated counts at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchCounts {
    pub signals_assigned: usize,
    pub signals_waiting: usize,
    pub buses_running: usize,
    pub buses_out_of_service: usize,
}

/// Every bus, in spawn order.
pub fn capture_bus_snapshots(world: &mut World) -> Vec<BusSnapshot> {
    let mut snapshots: Vec<BusSnapshot> = world
        .query::<(Entity, &Bus, Option<&GeoPosition>)>()
        .iter(world)
        .map(|(entity, bus, geo)| BusSnapshot {
            entity,
            line: bus.line,
            position: bus.position,
            next_stop: bus.next_stop(),
            countdown_secs: bus.countdown_secs,
            status: bus.status,
            latitude: geo.map(|g| g.point.lat()),
            longitude: geo.map(|g| g.point.lng()),
            accuracy_m: geo.and_then(|g| g.accuracy_m),
        })
        .collect();
    snapshots.sort_by_key(|snapshot| snapshot.entity);
    snapshots
}

/// Every signal, newest first (the registry's observable ordering).
pub fn capture_signal_snapshots(world: &World) -> Vec<SignalSnapshot> {
    let order: Vec<Entity> = world.resource::<SignalBoard>().iter().collect();
    order
        .into_iter()
        .filter_map(|entity| {
            let signal = *world.get::<Signal>(entity)?;
            let stop_name = world
                .resource::<RouteTopology>()
                .stop(signal.stop)
                .map(|stop| stop.name.clone())
                .unwrap_or_default();
            Some(SignalSnapshot {
                entity,
                stop: signal.stop,
                stop_name,
                line: signal.line,
                mode: signal.mode,
                requested_at: signal.requested_at,
                remaining_secs: signal.remaining_secs,
                assigned_bus: signal.assigned_bus,
            })
        })
        .collect()
}

pub fn capture_counts(world: &mut World) -> DispatchCounts {
    let mut counts = DispatchCounts::default();
    for bus in world.query::<&Bus>().iter(world) {
        match bus.status {
            BusStatus::Running => counts.buses_running += 1,
            BusStatus::OutOfService => counts.buses_out_of_service += 1,
        }
    }
    for signal in world.query::<&Signal>().iter(world) {
        if signal.assigned_bus.is_some() {
            counts.signals_assigned += 1;
        } else {
            counts.signals_waiting += 1;
        }
    }
    counts
}
