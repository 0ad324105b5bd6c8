use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::topology::{LineId, Stop, StopIndex};

/// Seconds a bus travels between two consecutive stops.
pub const DEFAULT_INTER_STOP_SECS: u64 = 90;

/// Minimum heuristic arrival time when no bus is assigned.
pub const DEFAULT_ARRIVAL_FLOOR_SECS: u64 = 30;

const DEFAULT_BUSES_PER_LINE: usize = 2;
const DEFAULT_COUNTDOWN_SECS: (u64, u64) = (10, 90);

/// Salt applied to the scenario seed before it reaches the fleet spawner.
const FLEET_SEED_SALT: u64 = 0x00f1_ee75;

/// Timing constants consulted by fleet advance and assignment.
#[derive(Debug, Clone, Copy, Resource)]
pub struct DispatchTiming {
    pub inter_stop_secs: u64,
    pub arrival_floor_secs: u64,
}

impl Default for DispatchTiming {
    fn default() -> Self {
        Self {
            inter_stop_secs: DEFAULT_INTER_STOP_SECS,
            arrival_floor_secs: DEFAULT_ARRIVAL_FLOOR_SECS,
        }
    }
}

/// Shared progress pointer, independent of any specific bus. Feeds the
/// fallback ETA heuristic and is exposed as a read projection.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct ReferenceProgress(pub StopIndex);

/// Configuration for the one-shot fleet spawner that runs on
/// SimulationStarted. The seed makes initial countdowns reproducible.
#[derive(Debug, Clone, Copy, Resource)]
pub struct FleetSpawner {
    pub buses_per_line: usize,
    pub countdown_min_secs: u64,
    pub countdown_max_secs: u64,
    pub seed: u64,
}

/// One line's cyclic route, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRoute {
    pub line: LineId,
    pub stops: Vec<StopIndex>,
}

impl LineRoute {
    pub fn new(line: LineId, stops: Vec<StopIndex>) -> Self {
        Self { line, stops }
    }
}

/// The default stop list: central Oulu, in route order.
pub fn default_stops() -> Vec<Stop> {
    vec![
        Stop::new("Kaupungintalo", "City Hall", "0.3 km", "1 min"),
        Stop::new("Toripakka", "Market Square", "0.8 km", "2 min"),
        Stop::new("Rautatieasema", "Railway Station", "1.5 km", "4 min"),
        Stop::new("Teknologiakylä", "Technology Village", "2.8 km", "7 min"),
        Stop::new("Yliopisto", "University", "4.2 km", "10 min"),
        Stop::new("Kontinkangas", "Kontinkangas", "5.6 km", "13 min"),
        Stop::new("Linnanmaa", "Linnanmaa", "7.1 km", "16 min"),
    ]
}

/// Default route table: lines 1 and 5, both looping over every stop.
pub fn default_lines() -> Vec<LineRoute> {
    let loop_route: Vec<StopIndex> = (0..default_stops().len()).collect();
    vec![
        LineRoute::new(1, loop_route.clone()),
        LineRoute::new(5, loop_route),
    ]
}

/// Parameters for building a simulation scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub stops: Vec<Stop>,
    pub lines: Vec<LineRoute>,
    pub buses_per_line: usize,
    pub inter_stop_secs: u64,
    pub arrival_floor_secs: u64,
    /// Inclusive bounds for the initial countdown draw.
    pub initial_countdown_secs: (u64, u64),
    pub seed: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            stops: default_stops(),
            lines: default_lines(),
            buses_per_line: DEFAULT_BUSES_PER_LINE,
            inter_stop_secs: DEFAULT_INTER_STOP_SECS,
            arrival_floor_secs: DEFAULT_ARRIVAL_FLOOR_SECS,
            initial_countdown_secs: DEFAULT_COUNTDOWN_SECS,
            seed: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_buses_per_line(mut self, buses_per_line: usize) -> Self {
        self.buses_per_line = buses_per_line;
        self
    }

    pub fn with_inter_stop_secs(mut self, secs: u64) -> Self {
        self.inter_stop_secs = secs;
        self
    }

    /// Inclusive bounds for the randomized initial countdown.
    pub fn with_countdown_bounds(mut self, min_secs: u64, max_secs: u64) -> Self {
        self.initial_countdown_secs = (min_secs, max_secs);
        self
    }

    /// Replace the stop list and route table entirely.
    pub fn with_topology(mut self, stops: Vec<Stop>, lines: Vec<LineRoute>) -> Self {
        self.stops = stops;
        self.lines = lines;
        self
    }

    pub(crate) fn fleet_spawner(&self) -> FleetSpawner {
        let (min, max) = self.initial_countdown_secs;
        FleetSpawner {
            buses_per_line: self.buses_per_line,
            countdown_min_secs: min,
            countdown_max_secs: max.max(min),
            seed: self.seed.unwrap_or(0).wrapping_add(FLEET_SEED_SALT),
        }
    }
}
