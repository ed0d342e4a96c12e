//! Collision damage dispatcher
//!
//! VolumeContact (from the collision subsystem) → filter → health controller.
//!
//! - Only weapons with an enabled damage volume (phase == Active) deal damage
//! - Target filter mismatch → discarded, not an error
//! - Target = contacted entity with Vitality, or the owner of a Hurtbox
//! - No de-duplication: every reported contact is a hit (unless the weapon
//!   opted into single-hit mode)

use bevy::prelude::*;

use crate::combat::damage::resolve_damage;
use crate::combat::{DamageDealt, DamageEvent, EntityDied, VolumeContact};
use crate::components::{Classification, Hurtbox, Vitality, Weapon};
use crate::schedules::{CombatClock, TimerQueue};

/// System: turn contacts into damage, synchronously within the tick
pub fn dispatch_contact_damage(
    mut contacts: EventReader<VolumeContact>,
    clock: Res<CombatClock>,
    mut timers: ResMut<TimerQueue>,
    mut weapons: Query<&mut Weapon>,
    mut vitals: Query<&mut Vitality>,
    classifications: Query<&Classification>,
    hurtboxes: Query<&Hurtbox>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    let now = clock.elapsed();

    for contact in contacts.read() {
        if contact.a == contact.b {
            continue;
        }

        // Either side may be the weapon
        for (weapon_entity, other) in [(contact.a, contact.b), (contact.b, contact.a)] {
            let Ok(mut weapon) = weapons.get_mut(weapon_entity) else {
                continue;
            };
            if !weapon.is_volume_enabled() {
                continue;
            }

            let classification = classifications.get(other).ok();
            crate::log(&format!(
                "Weapon {:?} has hit {:?} ({})",
                weapon_entity,
                other,
                classification.map_or("untagged", Classification::as_str)
            ));

            if !weapon.accepts(classification) {
                continue;
            }

            let target = if vitals.contains(other) {
                other
            } else if let Ok(hurtbox) = hurtboxes.get(other) {
                hurtbox.owner
            } else {
                continue;
            };

            let Ok(mut vitality) = vitals.get_mut(target) else {
                crate::log_warning(&format!(
                    "Hurtbox {:?} points at {:?} which has no Vitality",
                    other, target
                ));
                continue;
            };

            if !weapon.can_hit(target) {
                continue;
            }

            let hit = DamageEvent {
                source_weapon: Some(weapon_entity),
                target,
                amount: weapon.damage(),
                timestamp: now,
            };
            let outcome = resolve_damage(hit, &mut vitality, &mut timers, &mut dealt_events, &mut died_events);

            if outcome.is_applied() {
                weapon.register_hit(target);
            }
        }
    }
}
