pub mod clock;
pub mod ecs;
pub mod matching;
pub mod profiling;
pub mod registry;
pub mod runner;
pub mod scenario;
pub mod simulation;
pub mod systems;
pub mod telemetry;
pub mod telemetry_export;
pub mod topology;
pub mod view;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
