//! Input router: delivers player input to the one attached combatant.
//!
//! The router is an explicit resource owned by the host app. Attaching a
//! combatant replaces the previous one; combatants marked `PlayerControlled`
//! attach themselves when spawned.

use bevy::prelude::*;

use crate::combat::{AttackRequest, EntityRemoved};
use crate::components::{Armed, PlayerControlled};
use crate::input::{InputAction, InputStatus, PlayerInput};

/// Which combatant receives player input
#[derive(Resource, Debug, Default)]
pub struct InputRouter {
    combatant: Option<Entity>,
}

impl InputRouter {
    /// Route input to `combatant`. Returns the previously attached one.
    pub fn attach(&mut self, combatant: Entity) -> Option<Entity> {
        self.combatant.replace(combatant)
    }

    pub fn detach(&mut self) -> Option<Entity> {
        self.combatant.take()
    }

    pub fn combatant(&self) -> Option<Entity> {
        self.combatant
    }
}

/// System: attach newly spawned PlayerControlled combatants
pub fn bind_player_controlled(
    added: Query<Entity, Added<PlayerControlled>>,
    mut router: ResMut<InputRouter>,
) {
    for entity in added.iter() {
        if let Some(previous) = router.attach(entity) {
            if previous != entity {
                crate::log_info(&format!(
                    "Input router moved from {:?} to {:?}",
                    previous, entity
                ));
            }
        }
    }
}

/// System: translate player input into combat requests
///
/// Actions the combat system does not handle are reported, never fatal.
pub fn route_player_input(
    mut inputs: EventReader<PlayerInput>,
    router: Res<InputRouter>,
    armed: Query<&Armed>,
    mut attack_requests: EventWriter<AttackRequest>,
) {
    for input in inputs.read() {
        match input.action {
            InputAction::MeleeAttack => {
                if input.status != InputStatus::Started {
                    continue;
                }

                let Some(combatant) = router.combatant() else {
                    crate::log("Attack input with no combatant attached to the router");
                    continue;
                };
                let Ok(armed) = armed.get(combatant) else {
                    crate::log_warning(&format!(
                        "Attack input for {:?}, but it has no weapon",
                        combatant
                    ));
                    continue;
                };

                attack_requests.write(AttackRequest {
                    weapon: armed.weapon,
                });
            }
            other => {
                crate::log_warning(&format!(
                    "An invalid input ({:?}) was given to the combat system, and wasn't handled",
                    other
                ));
            }
        }
    }
}

/// System: detach combatants that finished dying
pub fn release_removed_from_router(
    mut removed: EventReader<EntityRemoved>,
    mut router: ResMut<InputRouter>,
) {
    for event in removed.read() {
        if router.combatant() == Some(event.entity) {
            router.detach();
        }
    }
}
