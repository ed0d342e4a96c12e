//! Combat tick schedule and simulation clock
//!
//! # Архитектура
//!
//! **FixedUpdate (60 Hz)** → run_combat_tick
//!   └─ step_combat(dt) → CombatClock.advance(dt) → CombatTick
//!
//! Headless hosts and tests skip FixedUpdate and call `step_combat` directly,
//! so timing is exact and independent of wall-clock.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

pub mod timers;

pub use timers::{ScheduledTimer, TimerAction, TimerQueue};

/// Custom schedule: one combat tick.
///
/// All combat systems live here (chained, single-threaded order).
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatTick;

/// Simulation clock for combat timers.
///
/// `elapsed` is f64 so deadlines do not drift over long sessions.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct CombatClock {
    elapsed: f64,
    delta: f32,
    tick: u64,
}

impl CombatClock {
    /// Advance by one tick of `dt` seconds (negative dt is treated as 0).
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.delta = dt;
        self.elapsed += dt as f64;
        self.tick = self.tick.wrapping_add(1);
    }

    /// Simulation time since start (seconds)
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Length of the current tick (seconds)
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}

/// Run one combat tick of `dt` seconds, then swap combat event buffers.
///
/// Requires `CombatCorePlugin` (or `CombatSimulationPlugin`) on the app.
/// An event survives one more step after the tick that wrote it, so hosts
/// read outbound events between steps.
pub fn step_combat(world: &mut World, dt: f32) {
    if advance_and_run(world, dt) {
        crate::combat::update_combat_events(world);
    }
}

/// System: drive `CombatTick` from the fixed timestep (exclusive).
///
/// Event buffers are left to Bevy's own `First`-stage update here.
pub fn run_combat_tick(world: &mut World) {
    let delta = world.resource::<Time<Fixed>>().delta_secs();
    advance_and_run(world, delta);
}

fn advance_and_run(world: &mut World, dt: f32) -> bool {
    let Some(mut clock) = world.get_resource_mut::<CombatClock>() else {
        crate::log_error("step_combat: CombatClock missing, is CombatCorePlugin added?");
        return false;
    };
    clock.advance(dt);

    world.run_schedule(CombatTick);
    true
}
