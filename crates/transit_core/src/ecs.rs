use bevy_ecs::prelude::{Component, Entity};
use h3o::LatLng;

use crate::topology::{LineId, Route, StopIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusStatus {
    Running,
    OutOfService,
}

impl BusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusStatus::Running => "running",
            BusStatus::OutOfService => "out-of-service",
        }
    }
}

/// A simulated vehicle bound to one line's route.
///
/// `position` indexes the route entry the bus is heading to next;
/// `countdown_secs` is the remaining time until it reaches that stop. Both
/// are mutated exclusively by the fleet-advance tick phase; status changes
/// come from explicit actions.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Bus {
    pub line: LineId,
    pub route: Route,
    pub position: usize,
    pub countdown_secs: u64,
    pub status: BusStatus,
}

impl Bus {
    /// The stop this bus reaches when its countdown runs out.
    pub fn next_stop(&self) -> StopIndex {
        self.route.stop_at(self.position)
    }

    pub fn is_running(&self) -> bool {
        self.status == BusStatus::Running
    }
}

/// Last reported geolocation of a bus. Informational only; dispatch never
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct GeoPosition {
    pub point: LatLng,
    pub accuracy_m: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMode {
    /// Exclusive: at most one single-mode signal exists registry-wide.
    Single,
    /// Unbounded concurrent signals.
    Generic,
}

impl SignalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalMode::Single => "single",
            SignalMode::Generic => "generic",
        }
    }
}

/// A passenger's request to be picked up at a stop on a given line.
///
/// `remaining_secs` is the current ETA estimate and stays strictly positive
/// while the signal exists; `assigned_bus` is unset when no eligible bus was
/// found (the assignment is retried every tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Signal {
    pub stop: StopIndex,
    pub line: LineId,
    pub mode: SignalMode,
    pub requested_at: u64,
    pub remaining_secs: u64,
    pub assigned_bus: Option<Entity>,
}
