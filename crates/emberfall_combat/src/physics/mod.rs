//! Contact sources
//!
//! The engine never detects collisions itself. With the `rapier` feature,
//! `RapierContactBridgePlugin` forwards bevy_rapier3d collision starts into
//! `VolumeContact`; other hosts write `VolumeContact` directly.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use crate::combat::{dispatch_contact_damage, VolumeContact};
use crate::schedules::CombatTick;

/// Forwards rapier sensor/collider starts into the combat tick
pub struct RapierContactBridgePlugin;

impl Plugin for RapierContactBridgePlugin {
    fn build(&self, app: &mut App) {
        // Без RapierPhysicsPlugin событие никто не регистрирует
        app.add_event::<CollisionEvent>().add_systems(
            CombatTick,
            forward_rapier_contacts.before(dispatch_contact_damage),
        );
    }
}

/// System: CollisionEvent::Started → VolumeContact
///
/// Weapon colliders need `ActiveEvents::COLLISION_EVENTS` (and usually `Sensor`).
pub fn forward_rapier_contacts(
    mut collisions: EventReader<CollisionEvent>,
    mut contacts: EventWriter<VolumeContact>,
) {
    for collision in collisions.read() {
        if let CollisionEvent::Started(a, b, _flags) = collision {
            contacts.write(VolumeContact { a: *a, b: *b });
        }
    }
}
