mod build;
mod params;

pub use build::build_scenario;
pub use params::{
    default_lines, default_stops, DispatchTiming, FleetSpawner, LineRoute, ReferenceProgress,
    ScenarioParams, DEFAULT_ARRIVAL_FLOOR_SECS, DEFAULT_INTER_STOP_SECS,
};
