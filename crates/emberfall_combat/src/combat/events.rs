//! Combat events
//!
//! Inbound (host → engine): AttackRequest, VolumeContact, DamageRequest
//! Outbound (engine → UI/animation/world): WeaponPhaseChanged, DamageDealt,
//! EntityDied, EntityRemoved

use bevy::prelude::*;

use crate::components::AttackPhase;

/// Request: start an attack with `weapon` (ignored unless the weapon is Idle)
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackRequest {
    pub weapon: Entity,
}

/// Collision subsystem: volumes `a` and `b` began overlapping.
///
/// Either side may be the weapon. Re-reporting the same pair on later ticks
/// deals damage again (subject to invulnerability and single-hit mode).
#[derive(Event, Debug, Clone, Copy)]
pub struct VolumeContact {
    pub a: Entity,
    pub b: Entity,
}

/// Request: apply `amount` damage to `target` (non-weapon sources, scripts)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    pub source: Option<Entity>,
}

/// Damage instruction handed to the health controller within the same tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub source_weapon: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub timestamp: f64,
}

/// Event: weapon changed phase (для анимации и звука)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponPhaseChanged {
    pub weapon: Entity,
    pub from: AttackPhase,
    pub to: AttackPhase,
    pub timestamp: f64,
}

/// Event: damage applied to health
///
/// Only emitted for applied damage; discarded hits produce nothing.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: f32,
    pub health_after: f32,
    pub fatal: bool,
    pub timestamp: f64,
}

/// Event: entity entered Dying (exactly once per entity)
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Event: death fade finished, owner should release the entity
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityRemoved {
    pub entity: Entity,
}
