//! The periodic driver's arming state and self-idling re-arm phase.
//!
//! Exactly one Tick event is pending while armed. Arming an armed ticker is
//! a no-op; the re-arm phase at the end of each tick either schedules the
//! next Tick or disarms when nothing is left to drive.

use bevy_ecs::prelude::{Mut, Query, Res, ResMut, Resource, World};

use crate::clock::{CurrentEvent, EventKind, SimulationClock, TICK_INTERVAL_SECS};
use crate::ecs::Bus;
use crate::registry::SignalBoard;

#[derive(Debug, Default, Resource)]
pub struct TickerState {
    armed: bool,
}

impl TickerState {
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Schedules the next Tick unless one is already pending.
    pub fn arm(&mut self, clock: &mut SimulationClock) {
        if self.armed {
            return;
        }
        clock.schedule_in(TICK_INTERVAL_SECS, EventKind::Tick);
        self.armed = true;
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

/// Arms the ticker from facade context (signal creation, a bus returning to
/// service, fleet spawn).
pub fn arm(world: &mut World) {
    world.resource_scope(|world, mut ticker: Mut<TickerState>| {
        let mut clock = world.resource_mut::<SimulationClock>();
        ticker.arm(&mut clock);
    });
}

/// Final tick phase: keep ticking while any signal or running bus remains,
/// otherwise stop consuming ticks until something re-arms.
pub fn ticker_rearm_system(
    event: Res<CurrentEvent>,
    mut ticker: ResMut<TickerState>,
    mut clock: ResMut<SimulationClock>,
    board: Res<SignalBoard>,
    buses: Query<&Bus>,
) {
    if event.0.kind != EventKind::Tick {
        return;
    }

    let any_running = buses.iter().any(Bus::is_running);
    if board.is_empty() && !any_running {
        ticker.disarm();
        return;
    }
    clock.schedule_in(TICK_INTERVAL_SECS, EventKind::Tick);
}
