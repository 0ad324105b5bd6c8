pub mod arrival_service;
pub mod fleet_advance;
pub mod fleet_spawner;
pub mod signal_refresh;
pub mod ticker;
