//! The simulation facade: one owned instance per simulation, no shared
//! state and no background timer.
//!
//! A [`Simulation`] owns its ECS world and schedule. Actions mutate state
//! synchronously; the embedding application drives simulated time
//! explicitly through [`Simulation::step`] or [`Simulation::run_for`], so
//! every action and every tick runs to completion on the caller's thread.
//! Readers always observe either the full pre-tick or full post-tick state.

use bevy_ecs::prelude::{Entity, Schedule, World};
use h3o::LatLng;

use crate::clock::SimulationClock;
use crate::ecs::{Bus, BusStatus, GeoPosition, SignalMode};
use crate::profiling::EventMetrics;
use crate::registry::{self, RequestError};
use crate::runner::{dispatch_schedule, initialize_simulation, run_next_event, run_until_empty};
use crate::scenario::{build_scenario, ReferenceProgress, ScenarioParams};
use crate::systems::ticker::{self, TickerState};
use crate::telemetry::{
    capture_bus_snapshots, capture_counts, capture_signal_snapshots, BusSnapshot, DispatchCounts,
    SignalSnapshot,
};
use crate::topology::{LineId, RouteTopology, Stop, StopIndex, TopologyError};
use crate::view::{BusFilter, ViewPrefs};

pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation").finish_non_exhaustive()
    }
}

impl Simulation {
    /// Builds the scenario and processes the SimulationStarted event, so the
    /// fleet exists (and the ticker is armed) before the first action.
    pub fn new(params: ScenarioParams) -> Result<Self, TopologyError> {
        let mut world = World::new();
        build_scenario(&mut world, params)?;
        initialize_simulation(&mut world);

        let mut simulation = Self {
            world,
            schedule: dispatch_schedule(),
        };
        simulation.step();
        Ok(simulation)
    }

    /// Current simulated time in seconds.
    pub fn now(&self) -> u64 {
        self.world.resource::<SimulationClock>().now()
    }

    /// Processes the next pending event, if any.
    pub fn step(&mut self) -> bool {
        run_next_event(&mut self.world, &mut self.schedule)
    }

    /// Processes every event scheduled within the next `secs` simulated
    /// seconds. Returns the number of events processed.
    pub fn run_for(&mut self, secs: u64) -> usize {
        let end = self.now().saturating_add(secs);
        let mut steps = 0;
        loop {
            let due = self
                .world
                .resource::<SimulationClock>()
                .next_event_time()
                .map_or(false, |timestamp| timestamp <= end);
            if !due || !self.step() {
                break;
            }
            steps += 1;
        }
        steps
    }

    /// Drains the event queue (bounded by `max_steps`); only terminates
    /// early once the ticker has disarmed.
    pub fn run_until_idle(&mut self, max_steps: usize) -> usize {
        run_until_empty(&mut self.world, &mut self.schedule, max_steps)
    }

    /// True when nothing is scheduled: the ticker disarmed and no action
    /// has re-armed it.
    pub fn is_idle(&self) -> bool {
        self.world.resource::<SimulationClock>().is_empty()
    }

    pub fn is_armed(&self) -> bool {
        self.world.resource::<TickerState>().is_armed()
    }

    // --- actions -----------------------------------------------------------

    /// Creates a signal for `stop_name` on `line`. Single-mode creation
    /// supersedes any existing single-mode signal.
    pub fn send_signal(
        &mut self,
        stop_name: &str,
        line: LineId,
        mode: SignalMode,
    ) -> Result<Entity, RequestError> {
        registry::create_signal(&mut self.world, stop_name, line, mode)
    }

    /// Passenger-side removal; no-op for unknown ids.
    pub fn cancel_signal(&mut self, signal: Entity) -> bool {
        registry::remove_signal(&mut self.world, signal)
    }

    /// Driver-side removal; identical semantics to [`Self::cancel_signal`].
    pub fn dismiss_signal(&mut self, signal: Entity) -> bool {
        registry::remove_signal(&mut self.world, signal)
    }

    pub fn set_selected_stop(&mut self, stop_name: &str) -> Result<(), RequestError> {
        if self
            .world
            .resource::<RouteTopology>()
            .resolve_stop(stop_name)
            .is_none()
        {
            return Err(RequestError::UnknownStop(stop_name.to_string()));
        }
        self.world.resource_mut::<ViewPrefs>().selected_stop = stop_name.to_string();
        Ok(())
    }

    pub fn set_passenger_mode(&mut self, mode: SignalMode) {
        self.world.resource_mut::<ViewPrefs>().passenger_mode = mode;
    }

    pub fn set_driver_bus_filter(&mut self, filter: BusFilter) {
        self.world.resource_mut::<ViewPrefs>().driver_bus_filter = filter;
    }

    pub fn set_driver_filtered_line(&mut self, line: LineId) -> Result<(), RequestError> {
        if self.world.resource::<RouteTopology>().route(line).is_none() {
            return Err(RequestError::UnknownLine(line));
        }
        self.world.resource_mut::<ViewPrefs>().driver_filtered_line = line;
        Ok(())
    }

    /// Adds a running bus on `line` at the given route position.
    pub fn add_bus(
        &mut self,
        line: LineId,
        position: usize,
        countdown_secs: u64,
    ) -> Result<Entity, RequestError> {
        let route = {
            let topology = self.world.resource::<RouteTopology>();
            topology
                .route(line)
                .ok_or(RequestError::UnknownLine(line))?
                .clone()
        };
        if position >= route.len() {
            return Err(RequestError::PositionOutOfRange {
                position,
                route_len: route.len(),
            });
        }

        let bus = self
            .world
            .spawn(Bus {
                line,
                route,
                position,
                countdown_secs,
                status: BusStatus::Running,
            })
            .id();
        ticker::arm(&mut self.world);
        Ok(bus)
    }

    /// Records a bus's last known geolocation. Informational only; no-op
    /// for unknown ids.
    pub fn update_bus_position(&mut self, bus: Entity, point: LatLng, accuracy_m: Option<f64>) {
        if self.world.get::<Bus>(bus).is_none() {
            return;
        }
        self.world
            .entity_mut(bus)
            .insert(GeoPosition { point, accuracy_m });
    }

    /// Idempotent status change; no-op for unknown ids. Returning a bus to
    /// service re-arms the ticker.
    pub fn set_bus_status(&mut self, bus: Entity, status: BusStatus) {
        match self.world.get_mut::<Bus>(bus) {
            Some(mut component) => component.status = status,
            None => return,
        }
        if status == BusStatus::Running {
            ticker::arm(&mut self.world);
        }
    }

    /// Moves the shared reference progress pointer forward, clamped at the
    /// last stop.
    pub fn advance_reference_stop(&mut self) {
        let last = self.world.resource::<RouteTopology>().stop_count() - 1;
        let mut reference = self.world.resource_mut::<ReferenceProgress>();
        reference.0 = (reference.0 + 1).min(last);
    }

    // --- read projections --------------------------------------------------

    pub fn stops(&self) -> &[Stop] {
        self.world.resource::<RouteTopology>().stops()
    }

    pub fn reference_stop(&self) -> StopIndex {
        self.world.resource::<ReferenceProgress>().0
    }

    /// Sorted line ids serving the given stop; constrains which line a
    /// request may name.
    pub fn lines_serving(&self, stop: StopIndex) -> Vec<LineId> {
        self.world.resource::<RouteTopology>().lines_serving(stop)
    }

    /// Signals newest first.
    pub fn signals(&self) -> Vec<SignalSnapshot> {
        capture_signal_snapshots(&self.world)
    }

    /// Every bus, in spawn order.
    pub fn buses(&mut self) -> Vec<BusSnapshot> {
        capture_bus_snapshots(&mut self.world)
    }

    /// Buses as the driver dashboard shows them, honoring the display
    /// filter. Filtering never touches engine state.
    pub fn driver_buses(&mut self) -> Vec<BusSnapshot> {
        let prefs = self.world.resource::<ViewPrefs>();
        let (filter, line) = (prefs.driver_bus_filter, prefs.driver_filtered_line);
        let mut buses = capture_bus_snapshots(&mut self.world);
        if filter == BusFilter::SingleLine {
            buses.retain(|bus| bus.line == line);
        }
        buses
    }

    pub fn counts(&mut self) -> DispatchCounts {
        capture_counts(&mut self.world)
    }

    pub fn view_prefs(&self) -> &ViewPrefs {
        self.world.resource::<ViewPrefs>()
    }

    pub fn metrics(&self) -> &EventMetrics {
        self.world.resource::<EventMetrics>()
    }
}
