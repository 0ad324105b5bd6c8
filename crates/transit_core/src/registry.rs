//! Signal registry: creation, removal, and the observable newest-first
//! ordering of passenger requests.
//!
//! Signals are entities; the [`SignalBoard`] resource keeps their display
//! order and must be updated alongside every spawn/despawn.

use std::collections::VecDeque;
use std::fmt;

use bevy_ecs::prelude::{Entity, Resource, World};

use crate::clock::SimulationClock;
use crate::ecs::{Bus, Signal, SignalMode};
use crate::matching;
use crate::scenario::{DispatchTiming, ReferenceProgress};
use crate::systems::ticker;
use crate::topology::{LineId, RouteTopology};

/// Caller-input validation failures. The only failure category the core
/// surfaces; everything else is a defined no-op or fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    UnknownStop(String),
    UnknownLine(LineId),
    LineNotServing { line: LineId, stop: String },
    PositionOutOfRange { position: usize, route_len: usize },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::UnknownStop(name) => write!(f, "unknown stop name {name:?}"),
            RequestError::UnknownLine(line) => write!(f, "unknown line {line}"),
            RequestError::LineNotServing { line, stop } => {
                write!(f, "line {line} does not serve stop {stop:?}")
            }
            RequestError::PositionOutOfRange {
                position,
                route_len,
            } => write!(
                f,
                "route position {position} is out of range for a route of length {route_len}"
            ),
        }
    }
}

impl std::error::Error for RequestError {}

/// Ordered view over live signal entities, newest first.
#[derive(Debug, Default, Resource)]
pub struct SignalBoard {
    order: VecDeque<Entity>,
}

impl SignalBoard {
    pub fn push_front(&mut self, signal: Entity) {
        self.order.push_front(signal);
    }

    /// Removes the signal from the ordering; returns whether it was present.
    pub fn remove(&mut self, signal: Entity) -> bool {
        let before = self.order.len();
        self.order.retain(|&entry| entry != signal);
        self.order.len() != before
    }

    pub fn contains(&self, signal: Entity) -> bool {
        self.order.contains(&signal)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Validates and creates a signal, assigning the best bus once up front.
///
/// Single-mode creation silently supersedes the previous single-mode signal
/// (global exclusivity); creation always re-arms the ticker.
pub fn create_signal(
    world: &mut World,
    stop_name: &str,
    line: LineId,
    mode: SignalMode,
) -> Result<Entity, RequestError> {
    let stop = {
        let topology = world.resource::<RouteTopology>();
        let stop = topology
            .resolve_stop(stop_name)
            .ok_or_else(|| RequestError::UnknownStop(stop_name.to_string()))?;
        if topology.route(line).is_none() {
            return Err(RequestError::UnknownLine(line));
        }
        if !topology.serves(line, stop) {
            return Err(RequestError::LineNotServing {
                line,
                stop: stop_name.to_string(),
            });
        }
        stop
    };

    if mode == SignalMode::Single {
        let superseded: Vec<Entity> = world
            .query::<(Entity, &Signal)>()
            .iter(world)
            .filter(|(_, signal)| signal.mode == SignalMode::Single)
            .map(|(entity, _)| entity)
            .collect();
        for entity in superseded {
            remove_signal(world, entity);
        }
    }

    let timing = *world.resource::<DispatchTiming>();
    let reference = world.resource::<ReferenceProgress>().0;
    let requested_at = world.resource::<SimulationClock>().now();

    let assignment = {
        let mut query = world.query::<(Entity, &Bus)>();
        let mut fleet: Vec<(Entity, &Bus)> = query.iter(world).collect();
        fleet.sort_by_key(|&(entity, _)| entity);
        matching::assign(
            stop,
            line,
            &fleet,
            timing.inter_stop_secs,
            timing.arrival_floor_secs,
            reference,
        )
    };

    let signal = world
        .spawn(Signal {
            stop,
            line,
            mode,
            requested_at,
            // A bus arriving this very second still yields a live signal
            // until the next tick resolves it.
            remaining_secs: assignment.eta_secs().max(1),
            assigned_bus: assignment.bus(),
        })
        .id();
    world.resource_mut::<SignalBoard>().push_front(signal);
    ticker::arm(world);

    Ok(signal)
}

/// Removes a signal by id; no-op when the id is absent or not a signal.
pub fn remove_signal(world: &mut World, signal: Entity) -> bool {
    world.resource_mut::<SignalBoard>().remove(signal);
    if world.get::<Signal>(signal).is_none() {
        return false;
    }
    world.despawn(signal)
}
