//! Best-ETA assignment: picks the fastest eligible bus for a (stop, line)
//! request against a fleet snapshot.
//!
//! Pure functions with no side effects; the registry calls them at signal
//! creation and the refresh tick phase calls them for every surviving
//! signal. Determinism is part of the contract: the same snapshot and
//! request always produce the same outcome, with ties broken by the first
//! encounter in the caller-provided fleet order (spawn order when the
//! snapshot is entity-sorted).

use bevy_ecs::prelude::Entity;

use crate::ecs::Bus;
use crate::topology::{LineId, Route, StopIndex};

use super::types::{Assignment, BusCandidate};

/// Cyclic forward distance from the bus's next stop to the target stop, in
/// stops. Zero when the immediate next stop is the target; `None` when the
/// route does not serve the stop at all.
pub fn stops_ahead(route: &Route, position: usize, stop: StopIndex) -> Option<u64> {
    let target = route.position_of(stop)?;
    let len = route.len();
    Some(((target + len - position) % len) as u64)
}

fn candidate(
    entity: Entity,
    bus: &Bus,
    stop: StopIndex,
    line: LineId,
    inter_stop_secs: u64,
) -> Option<BusCandidate> {
    if bus.line != line || !bus.is_running() {
        return None;
    }
    let ahead = stops_ahead(&bus.route, bus.position, stop)?;
    Some(BusCandidate {
        bus: entity,
        stops_ahead: ahead,
        eta_secs: bus.countdown_secs + ahead * inter_stop_secs,
    })
}

/// Computes the best bus and ETA for a (stop, line) request.
///
/// `fleet` is a snapshot of the whole fleet; iteration order is the
/// tie-break order, so callers pass it entity-sorted for reproducibility.
/// Without an eligible bus the fallback estimates from the shared reference
/// pointer, never below the arrival floor.
pub fn assign(
    stop: StopIndex,
    line: LineId,
    fleet: &[(Entity, &Bus)],
    inter_stop_secs: u64,
    arrival_floor_secs: u64,
    reference_stop: StopIndex,
) -> Assignment {
    let mut best: Option<BusCandidate> = None;
    for &(entity, bus) in fleet {
        let Some(found) = candidate(entity, bus, stop, line, inter_stop_secs) else {
            continue;
        };
        // Strict comparison keeps the earliest candidate on equal ETAs.
        if best.map_or(true, |current| found.eta_secs < current.eta_secs) {
            best = Some(found);
        }
    }

    match best {
        Some(candidate) => Assignment::Assigned {
            bus: candidate.bus,
            eta_secs: candidate.eta_secs,
        },
        None => {
            let ahead = (stop as u64).saturating_sub(reference_stop as u64);
            let eta_secs = (ahead * inter_stop_secs + arrival_floor_secs).max(arrival_floor_secs);
            Assignment::Unassigned { eta_secs }
        }
    }
}
