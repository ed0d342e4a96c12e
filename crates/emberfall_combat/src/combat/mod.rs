//! Combat resolution module
//!
//! ECS ответственность:
//! - Weapon attack phases (Idle → Active → Cooldown → Idle)
//! - Contact → damage dispatch, health + invulnerability
//! - Death fade and removal
//!
//! Host ответственность (external collaborators):
//! - Input translation → PlayerInput / AttackRequest
//! - Collision detection → VolumeContact
//! - Rendering of WeaponPose / Opacity

use bevy::prelude::*;

use crate::config::CombatConfig;
use crate::input::{
    bind_player_controlled, release_removed_from_router, route_player_input, InputRouter,
    PlayerInput,
};
use crate::schedules::{CombatClock, CombatTick, TimerQueue};

pub mod attack;
pub mod damage;
pub mod death;
pub mod dispatch;
pub mod events;
pub mod timers;

pub use attack::{process_attack_requests, report_weapon_configuration};
pub use damage::{apply_damage_requests, combatant_health};
pub use death::{advance_death_fades, begin_death_sequences, DeathFade};
pub use dispatch::dispatch_contact_damage;
pub use events::{
    AttackRequest, DamageDealt, DamageEvent, DamageRequest, EntityDied, EntityRemoved,
    VolumeContact, WeaponPhaseChanged,
};
pub use timers::fire_due_timers;

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Swap the double buffers of every event the combat core registers.
///
/// `app.update()` does this in `First`; `step_combat` calls it after each
/// tick so events older than one step are dropped.
pub fn update_combat_events(world: &mut World) {
    update_events::<PlayerInput>(world);
    update_events::<AttackRequest>(world);
    update_events::<VolumeContact>(world);
    update_events::<DamageRequest>(world);
    update_events::<WeaponPhaseChanged>(world);
    update_events::<DamageDealt>(world);
    update_events::<EntityDied>(world);
    update_events::<EntityRemoved>(world);
    #[cfg(feature = "rapier")]
    update_events::<bevy_rapier3d::prelude::CollisionEvent>(world);
}

/// Combat core: resources, events and the `CombatTick` schedule.
///
/// Does not hook into FixedUpdate; drive it with `step_combat`, or add
/// `CombatSimulationPlugin` instead.
///
/// Порядок выполнения (один tick):
/// 1. report_weapon_configuration: warnings for new weapons
/// 2. bind_player_controlled: input router attachment
/// 3. fire_due_timers: weapon windows, invulnerability expiry
/// 4. route_player_input: PlayerInput → AttackRequest
/// 5. process_attack_requests: Idle → Active
/// 6. dispatch_contact_damage: VolumeContact → damage
/// 7. apply_damage_requests: DamageRequest → damage
/// 8. advance_death_fades: fades started on earlier ticks
/// 9. begin_death_sequences: this tick's deaths
/// 10. release_removed_from_router
pub struct CombatCorePlugin;

impl Plugin for CombatCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatConfig>()
            .init_resource::<CombatClock>()
            .init_resource::<TimerQueue>()
            .init_resource::<InputRouter>();

        app.add_event::<PlayerInput>()
            .add_event::<AttackRequest>()
            .add_event::<VolumeContact>()
            .add_event::<DamageRequest>()
            .add_event::<WeaponPhaseChanged>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<EntityRemoved>();

        app.init_schedule(CombatTick);
        app.add_systems(
            CombatTick,
            (
                report_weapon_configuration,
                bind_player_controlled,
                fire_due_timers,
                route_player_input,
                process_attack_requests,
                dispatch_contact_damage,
                apply_damage_requests,
                advance_death_fades,
                begin_death_sequences,
                release_removed_from_router,
            )
                .chain(),
        );
    }
}
