//! Entity health controller: applies damage instructions to `Vitality`.
//!
//! Both damage paths end in `resolve_damage`:
//! - VolumeContact → dispatcher → resolve_damage (same tick)
//! - DamageRequest → apply_damage_requests → resolve_damage

use bevy::prelude::*;

use crate::combat::{DamageDealt, DamageEvent, DamageRequest, EntityDied};
use crate::components::{DamageOutcome, IgnoreReason, Vitality};
use crate::schedules::{CombatClock, TimerAction, TimerQueue};

/// Apply one damage instruction and publish the result.
///
/// Wounded → schedules the invulnerability expiry, emits DamageDealt.
/// Killed → emits DamageDealt + EntityDied (the death sequence starts from it).
/// Ignored → no state change.
pub(crate) fn resolve_damage(
    hit: DamageEvent,
    vitality: &mut Vitality,
    timers: &mut TimerQueue,
    dealt_events: &mut EventWriter<DamageDealt>,
    died_events: &mut EventWriter<EntityDied>,
) -> DamageOutcome {
    let outcome = vitality.apply_damage(hit.amount, hit.timestamp);

    match outcome {
        DamageOutcome::Wounded {
            health,
            invulnerable_until,
        } => {
            timers.schedule_at(
                invulnerable_until,
                hit.target,
                TimerAction::InvulnerabilityElapsed {
                    deadline: invulnerable_until,
                },
            );
            dealt_events.write(DamageDealt {
                source: hit.source_weapon,
                target: hit.target,
                amount: hit.amount,
                health_after: health,
                fatal: false,
                timestamp: hit.timestamp,
            });

            crate::log(&format!(
                "💥 {:?} took {} damage (HP: {})",
                hit.target, hit.amount, health
            ));
        }
        DamageOutcome::Killed => {
            dealt_events.write(DamageDealt {
                source: hit.source_weapon,
                target: hit.target,
                amount: hit.amount,
                health_after: vitality.health(),
                fatal: true,
                timestamp: hit.timestamp,
            });
            died_events.write(EntityDied {
                entity: hit.target,
                killer: hit.source_weapon,
            });

            crate::log_info(&format!(
                "☠️ Entity {:?} killed by {:?}",
                hit.target, hit.source_weapon
            ));
        }
        DamageOutcome::Ignored(IgnoreReason::InvalidAmount) => {
            crate::log_warning(&format!(
                "Invalid damage amount {} for {:?}, ignored",
                hit.amount, hit.target
            ));
        }
        DamageOutcome::Ignored(_) => {}
    }

    outcome
}

/// System: apply DamageRequest events
pub fn apply_damage_requests(
    mut requests: EventReader<DamageRequest>,
    clock: Res<CombatClock>,
    mut timers: ResMut<TimerQueue>,
    mut vitals: Query<&mut Vitality>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    for request in requests.read() {
        let Ok(mut vitality) = vitals.get_mut(request.target) else {
            crate::log_warning(&format!(
                "DamageRequest: target {:?} has no Vitality, ignored",
                request.target
            ));
            continue;
        };

        let hit = DamageEvent {
            source_weapon: request.source,
            target: request.target,
            amount: request.amount,
            timestamp: clock.elapsed(),
        };
        resolve_damage(hit, &mut vitality, &mut timers, &mut dealt_events, &mut died_events);
    }
}

/// Read-only health query (None if `entity` is not a combatant or is gone)
pub fn combatant_health(world: &World, entity: Entity) -> Option<f32> {
    world.get::<Vitality>(entity).map(Vitality::health)
}
