//! Static route topology: the ordered stop list and per-line cyclic routes.
//!
//! Loaded once at scenario build and never mutated afterwards. Routes refer
//! to stops by index into the stop list; validation rejects any route index
//! outside the list.

use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Index into the ordered stop list.
pub type StopIndex = usize;

/// Identifier of a bus line.
pub type LineId = u32;

/// A fixed boarding location. The distance/ETA labels are display-only
/// strings carried for read projections; dispatch never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    pub name_en: String,
    pub distance_label: String,
    pub eta_label: String,
}

impl Stop {
    pub fn new(name: &str, name_en: &str, distance_label: &str, eta_label: &str) -> Self {
        Self {
            name: name.to_string(),
            name_en: name_en.to_string(),
            distance_label: distance_label.to_string(),
            eta_label: eta_label.to_string(),
        }
    }
}

/// An ordered, cyclic sequence of stop indices. Position `len - 1` wraps
/// back to position 0; routes loop forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stops: Vec<StopIndex>,
}

impl Route {
    pub fn new(stops: Vec<StopIndex>) -> Self {
        Self { stops }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stop index at the given route position.
    pub fn stop_at(&self, position: usize) -> StopIndex {
        self.stops[position]
    }

    /// First route position serving the given stop, if any.
    pub fn position_of(&self, stop: StopIndex) -> Option<usize> {
        self.stops.iter().position(|&s| s == stop)
    }

    pub fn serves(&self, stop: StopIndex) -> bool {
        self.stops.contains(&stop)
    }

    /// Next route position after `position`, wrapping at the end.
    pub fn advance(&self, position: usize) -> usize {
        (position + 1) % self.stops.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = StopIndex> + '_ {
        self.stops.iter().copied()
    }
}

/// Configuration errors raised while building the topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    EmptyStopList,
    NoRoutes,
    EmptyRoute { line: LineId },
    DuplicateLine { line: LineId },
    StopIndexOutOfRange {
        line: LineId,
        index: StopIndex,
        stop_count: usize,
    },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::EmptyStopList => write!(f, "stop list is empty"),
            TopologyError::NoRoutes => write!(f, "route table is empty"),
            TopologyError::EmptyRoute { line } => write!(f, "line {line} has an empty route"),
            TopologyError::DuplicateLine { line } => {
                write!(f, "line {line} appears twice in the route table")
            }
            TopologyError::StopIndexOutOfRange {
                line,
                index,
                stop_count,
            } => write!(
                f,
                "line {line} references stop index {index}, but only {stop_count} stops exist"
            ),
        }
    }
}

impl std::error::Error for TopologyError {}

/// Read-only topology resource: the stop list plus the per-line routes.
#[derive(Debug, Clone, Resource)]
pub struct RouteTopology {
    stops: Vec<Stop>,
    routes: BTreeMap<LineId, Route>,
}

impl RouteTopology {
    /// Builds and validates the topology. Every stop index referenced by a
    /// route must be a valid index into the stop list.
    pub fn new(
        stops: Vec<Stop>,
        lines: impl IntoIterator<Item = (LineId, Vec<StopIndex>)>,
    ) -> Result<Self, TopologyError> {
        if stops.is_empty() {
            return Err(TopologyError::EmptyStopList);
        }

        let mut routes = BTreeMap::new();
        for (line, route_stops) in lines {
            if route_stops.is_empty() {
                return Err(TopologyError::EmptyRoute { line });
            }
            if let Some(&index) = route_stops.iter().find(|&&index| index >= stops.len()) {
                return Err(TopologyError::StopIndexOutOfRange {
                    line,
                    index,
                    stop_count: stops.len(),
                });
            }
            if routes.insert(line, Route::new(route_stops)).is_some() {
                return Err(TopologyError::DuplicateLine { line });
            }
        }
        if routes.is_empty() {
            return Err(TopologyError::NoRoutes);
        }

        Ok(Self { stops, routes })
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn stop(&self, index: StopIndex) -> Option<&Stop> {
        self.stops.get(index)
    }

    /// Exact-match stop name resolution. Returns `None` for unknown names;
    /// callers surface that as an explicit not-found outcome.
    pub fn resolve_stop(&self, name: &str) -> Option<StopIndex> {
        self.stops.iter().position(|stop| stop.name == name)
    }

    pub fn route(&self, line: LineId) -> Option<&Route> {
        self.routes.get(&line)
    }

    pub fn routes(&self) -> impl Iterator<Item = (LineId, &Route)> + '_ {
        self.routes.iter().map(|(&line, route)| (line, route))
    }

    /// Sorted line ids whose route contains the given stop.
    pub fn lines_serving(&self, stop: StopIndex) -> Vec<LineId> {
        self.routes
            .iter()
            .filter(|(_, route)| route.serves(stop))
            .map(|(&line, _)| line)
            .collect()
    }

    pub fn serves(&self, line: LineId, stop: StopIndex) -> bool {
        self.route(line).map_or(false, |route| route.serves(stop))
    }
}
