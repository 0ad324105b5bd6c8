//! Presentation preferences held on behalf of external collaborators.
//!
//! Everything here affects only what a passenger or driver screen shows;
//! dispatch never consults it.

use bevy_ecs::prelude::Resource;

use crate::ecs::SignalMode;
use crate::topology::LineId;

/// Scope of the driver dashboard's bus list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusFilter {
    /// Show buses on every line.
    #[default]
    All,
    /// Show only buses on the selected line.
    SingleLine,
}

#[derive(Debug, Clone, Resource)]
pub struct ViewPrefs {
    pub selected_stop: String,
    pub passenger_mode: SignalMode,
    pub driver_bus_filter: BusFilter,
    pub driver_filtered_line: LineId,
}
