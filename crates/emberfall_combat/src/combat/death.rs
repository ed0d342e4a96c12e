//! Death sequencer: Dying → linear opacity fade → Removed → release.
//!
//! Started once per entity from EntityDied. The fade advances by the tick
//! delta, starting on the tick after death. When it finishes the entity is
//! marked Removed and EntityRemoved is sent; with `despawn_on_removal` the
//! entity (and its armed weapon) is despawned as well.

use bevy::prelude::*;

use crate::combat::{EntityDied, EntityRemoved};
use crate::components::{Armed, LifeState, Opacity, Vitality};
use crate::config::CombatConfig;
use crate::schedules::CombatClock;

/// Running death fade
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DeathFade {
    elapsed: f32,
    duration: f32,
}

impl DeathFade {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advance by `dt` seconds, returns the new opacity
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.opacity()
    }

    /// 1 → 0 linearly over `duration`
    pub fn opacity(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (1.0 - self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.opacity() <= 0.0
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// System: start fades for this tick's deaths
pub fn begin_death_sequences(
    mut deaths: EventReader<EntityDied>,
    mut commands: Commands,
    config: Res<CombatConfig>,
    vitals: Query<&Vitality, Without<DeathFade>>,
) {
    for death in deaths.read() {
        let Ok(vitality) = vitals.get(death.entity) else {
            continue;
        };
        if vitality.life_state() != LifeState::Dying {
            continue;
        }

        commands
            .entity(death.entity)
            .insert((DeathFade::new(config.fade_out_secs), Opacity(1.0)));

        crate::log(&format!(
            "⚰️ Death fade started (entity: {:?}, {:.2}s)",
            death.entity, config.fade_out_secs
        ));
    }
}

/// System: advance fades, finish Dying → Removed
pub fn advance_death_fades(
    clock: Res<CombatClock>,
    config: Res<CombatConfig>,
    mut commands: Commands,
    mut fading: Query<(Entity, &mut DeathFade, &mut Vitality, &mut Opacity, Option<&Armed>)>,
    mut removed_events: EventWriter<EntityRemoved>,
) {
    let delta = clock.delta();

    for (entity, mut fade, mut vitality, mut opacity, armed) in fading.iter_mut() {
        opacity.0 = fade.advance(delta);

        if !fade.is_finished() {
            continue;
        }

        vitality.mark_removed();
        commands.entity(entity).remove::<DeathFade>();
        removed_events.write(EntityRemoved { entity });

        crate::log_info(&format!("Entity {:?} removed", entity));

        if config.despawn_on_removal {
            if let Some(armed) = armed {
                if let Ok(mut weapon_commands) = commands.get_entity(armed.weapon) {
                    weapon_commands.despawn();
                }
            }
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_is_linear() {
        let mut fade = DeathFade::new(2.0);
        assert_eq!(fade.opacity(), 1.0);

        assert_eq!(fade.advance(0.5), 0.75);
        assert_eq!(fade.advance(0.5), 0.5);
        assert!(!fade.is_finished());

        assert_eq!(fade.advance(1.0), 0.0);
        assert!(fade.is_finished());
    }

    #[test]
    fn test_fade_overshoot_clamps() {
        let mut fade = DeathFade::new(1.0);
        assert_eq!(fade.advance(1.5), 0.0);
        assert!(fade.elapsed() > fade.duration());
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let fade = DeathFade::new(0.0);
        assert!(fade.is_finished());
    }
}
