//! Weapon attack controller
//!
//! Drives `Weapon` through Idle → Active → Cooldown → Idle:
//! - AttackRequest → `begin_attack` (Idle only) → timer(active_window)
//! - ActiveWindowElapsed → Cooldown, timer(max(cooldown - active, 0))
//! - CooldownElapsed (or immediately when the remainder ≤ 0) → Idle
//!
//! Re-entrant requests are dropped silently: spamming attack is normal play.

use bevy::prelude::*;

use crate::combat::{AttackRequest, WeaponPhaseChanged};
use crate::components::{AttackPhase, Weapon};
use crate::schedules::{CombatClock, TimerAction, TimerQueue};

/// Idle → Active + schedule the end of the active window.
///
/// Returns false when the weapon is not Idle.
pub(crate) fn begin_attack(
    weapon_entity: Entity,
    weapon: &mut Weapon,
    now: f64,
    timers: &mut TimerQueue,
    phase_events: &mut EventWriter<WeaponPhaseChanged>,
) -> bool {
    if !weapon.try_begin_attack() {
        return false;
    }

    timers.schedule(
        now,
        weapon.stats().active_window,
        weapon_entity,
        TimerAction::ActiveWindowElapsed,
    );
    phase_events.write(WeaponPhaseChanged {
        weapon: weapon_entity,
        from: AttackPhase::Idle,
        to: AttackPhase::Active,
        timestamp: now,
    });

    crate::log(&format!(
        "⚔️ Attack started (weapon: {:?}, active: {:.2}s)",
        weapon_entity,
        weapon.stats().active_window
    ));
    true
}

/// Active → Cooldown; Cooldown → Idle right away when nothing is left to wait.
pub(crate) fn on_active_window_elapsed(
    weapon_entity: Entity,
    weapon: &mut Weapon,
    now: f64,
    timers: &mut TimerQueue,
    phase_events: &mut EventWriter<WeaponPhaseChanged>,
) {
    let Some(remaining) = weapon.end_active_window() else {
        return;
    };

    phase_events.write(WeaponPhaseChanged {
        weapon: weapon_entity,
        from: AttackPhase::Active,
        to: AttackPhase::Cooldown,
        timestamp: now,
    });

    if remaining > 0.0 {
        timers.schedule(now, remaining, weapon_entity, TimerAction::CooldownElapsed);
    } else {
        on_cooldown_elapsed(weapon_entity, weapon, now, phase_events);
    }
}

pub(crate) fn on_cooldown_elapsed(
    weapon_entity: Entity,
    weapon: &mut Weapon,
    now: f64,
    phase_events: &mut EventWriter<WeaponPhaseChanged>,
) {
    if !weapon.finish_cooldown() {
        return;
    }

    phase_events.write(WeaponPhaseChanged {
        weapon: weapon_entity,
        from: AttackPhase::Cooldown,
        to: AttackPhase::Idle,
        timestamp: now,
    });
}

/// System: process AttackRequest events
pub fn process_attack_requests(
    mut requests: EventReader<AttackRequest>,
    clock: Res<CombatClock>,
    mut timers: ResMut<TimerQueue>,
    mut weapons: Query<&mut Weapon>,
    mut phase_events: EventWriter<WeaponPhaseChanged>,
) {
    let now = clock.elapsed();

    for request in requests.read() {
        let Ok(mut weapon) = weapons.get_mut(request.weapon) else {
            crate::log_warning(&format!(
                "AttackRequest: entity {:?} has no Weapon, ignored",
                request.weapon
            ));
            continue;
        };

        begin_attack(request.weapon, &mut weapon, now, &mut timers, &mut phase_events);
    }
}

/// System: report weapon configuration problems once, when a weapon appears
///
/// No target filter is legal (hits everything) but almost always a setup
/// mistake, so it is reported as a warning.
pub fn report_weapon_configuration(weapons: Query<(Entity, &Weapon), Added<Weapon>>) {
    for (entity, weapon) in weapons.iter() {
        if weapon.stats().target_filter.is_none() {
            crate::log_warning(&format!(
                "No target classification set for weapon {:?}. Damage will be sent to every volume hit",
                entity
            ));
        }

        if let Err(err) = weapon.stats().validate() {
            crate::log_warning(&format!("Weapon {:?} misconfigured: {}", entity, err));
        }
    }
}
