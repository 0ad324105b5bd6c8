use bevy_ecs::prelude::Entity;

/// Outcome of one assignment pass for a (stop, line) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// A running bus on the requested line will reach the stop in `eta_secs`.
    Assigned { bus: Entity, eta_secs: u64 },
    /// No eligible bus; `eta_secs` is the reference-pointer heuristic.
    Unassigned { eta_secs: u64 },
}

impl Assignment {
    pub fn eta_secs(&self) -> u64 {
        match self {
            Assignment::Assigned { eta_secs, .. } | Assignment::Unassigned { eta_secs } => {
                *eta_secs
            }
        }
    }

    pub fn bus(&self) -> Option<Entity> {
        match self {
            Assignment::Assigned { bus, .. } => Some(*bus),
            Assignment::Unassigned { .. } => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Assignment::Assigned { .. })
    }
}

/// One bus considered during an assignment pass, with its forward distance
/// and resulting ETA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusCandidate {
    pub bus: Entity,
    pub stops_ahead: u64,
    pub eta_secs: u64,
}
