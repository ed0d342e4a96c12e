//! System: fire due timers and apply their transitions.

use bevy::prelude::*;

use crate::combat::attack::{on_active_window_elapsed, on_cooldown_elapsed};
use crate::combat::WeaponPhaseChanged;
use crate::components::{Vitality, Weapon};
use crate::schedules::{CombatClock, TimerAction, TimerQueue};

/// Drains every timer with deadline ≤ now, earliest first.
///
/// Timers whose target is gone (despawned) or whose transition no longer
/// applies are dropped without effect.
pub fn fire_due_timers(
    clock: Res<CombatClock>,
    mut timers: ResMut<TimerQueue>,
    mut weapons: Query<&mut Weapon>,
    mut vitals: Query<&mut Vitality>,
    mut phase_events: EventWriter<WeaponPhaseChanged>,
) {
    let now = clock.elapsed();

    while let Some(timer) = timers.pop_due(now) {
        match timer.action {
            TimerAction::ActiveWindowElapsed => {
                let Ok(mut weapon) = weapons.get_mut(timer.target) else {
                    crate::log(&format!("⏱️ Active window timer for missing weapon {:?}", timer.target));
                    continue;
                };
                on_active_window_elapsed(timer.target, &mut weapon, now, &mut timers, &mut phase_events);
            }
            TimerAction::CooldownElapsed => {
                let Ok(mut weapon) = weapons.get_mut(timer.target) else {
                    crate::log(&format!("⏱️ Cooldown timer for missing weapon {:?}", timer.target));
                    continue;
                };
                on_cooldown_elapsed(timer.target, &mut weapon, now, &mut phase_events);
            }
            TimerAction::InvulnerabilityElapsed { deadline } => {
                let Ok(mut vitality) = vitals.get_mut(timer.target) else {
                    continue;
                };
                if vitality.end_invulnerability(deadline) {
                    crate::log(&format!("🛡️ Invulnerability ended (entity: {:?})", timer.target));
                }
            }
        }
    }
}
