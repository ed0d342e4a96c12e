//! Combatant components: Vitality (health + invulnerability + life state),
//! classification tags, hurtboxes, input/weapon links.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CombatConfig;

/// Invulnerability window used by `Vitality::new` (seconds)
pub const DEFAULT_INVULNERABILITY_SECS: f32 = 0.5;

// Alive ⇒ health > 0, also at spawn
const MIN_SPAWN_HEALTH: f32 = f32::MIN_POSITIVE;

/// Life cycle of a combatant. Terminal once `Removed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    /// Fatal damage taken, death fade running
    Dying,
    /// Fade finished, owner told to release the entity
    Removed,
}

/// Why `apply_damage` left the combatant untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Inside the post-hit invulnerability window
    Invulnerable,
    /// Dying or Removed
    NotAlive,
    /// Negative or NaN amount (would heal)
    InvalidAmount,
}

/// Result of one `apply_damage` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Non-fatal: health reduced, invulnerable until the deadline
    Wounded { health: f32, invulnerable_until: f64 },
    /// Fatal: Alive → Dying (happens once per combatant)
    Killed,
    Ignored(IgnoreReason),
}

impl DamageOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, DamageOutcome::Ignored(_))
    }
}

/// Health state machine of a combatant
///
/// Alive(vulnerable) → damage → Alive(invulnerable until deadline) → timer → Alive(vulnerable)
/// Alive → fatal damage → Dying → fade → Removed
///
/// Инвариант: 0 ≤ health ≤ max_health снаружи `apply_damage`.
/// `apply_damage` is the only mutator of `health`; there is no heal.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Opacity)]
pub struct Vitality {
    health: f32,
    max_health: f32,
    invulnerability_secs: f32,
    invulnerable_until: Option<f64>,
    life_state: LifeState,
}

impl Default for Vitality {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Vitality {
    /// Non-positive `max_health` is clamped to `f32::MIN_POSITIVE`.
    pub fn new(max_health: f32) -> Self {
        let max_health = max_health.max(MIN_SPAWN_HEALTH);
        Self {
            health: max_health,
            max_health,
            invulnerability_secs: DEFAULT_INVULNERABILITY_SECS,
            invulnerable_until: None,
            life_state: LifeState::Alive,
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.max_health).with_invulnerability(config.invulnerability_secs)
    }

    pub fn with_invulnerability(mut self, secs: f32) -> Self {
        self.invulnerability_secs = secs.max(0.0);
        self
    }

    /// Start wounded (clamped to `MIN_POSITIVE..=max_health`)
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health.clamp(MIN_SPAWN_HEALTH, self.max_health);
        self
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn life_state(&self) -> LifeState {
        self.life_state
    }

    pub fn is_alive(&self) -> bool {
        self.life_state == LifeState::Alive
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_until.is_some()
    }

    pub fn invulnerable_until(&self) -> Option<f64> {
        self.invulnerable_until
    }

    pub fn invulnerability_secs(&self) -> f32 {
        self.invulnerability_secs
    }

    /// Apply `amount` damage at simulation time `now`.
    ///
    /// - not Alive → ignored
    /// - invulnerable → ignored, health untouched
    /// - health ≤ 0 after subtraction → Dying (health floored at 0 afterwards)
    /// - otherwise → invulnerable until `now + invulnerability_secs`
    ///
    /// The caller schedules the matching `InvulnerabilityElapsed` timer.
    pub fn apply_damage(&mut self, amount: f32, now: f64) -> DamageOutcome {
        if self.life_state != LifeState::Alive {
            return DamageOutcome::Ignored(IgnoreReason::NotAlive);
        }
        if self.invulnerable_until.is_some() {
            return DamageOutcome::Ignored(IgnoreReason::Invulnerable);
        }
        if !(amount >= 0.0) {
            return DamageOutcome::Ignored(IgnoreReason::InvalidAmount);
        }

        // Без clamp до проверки смерти
        self.health -= amount;

        if self.health <= 0.0 {
            self.health = 0.0;
            self.invulnerable_until = None;
            self.life_state = LifeState::Dying;
            return DamageOutcome::Killed;
        }

        let deadline = now + self.invulnerability_secs as f64;
        self.invulnerable_until = Some(deadline);
        DamageOutcome::Wounded {
            health: self.health,
            invulnerable_until: deadline,
        }
    }

    /// Close the invulnerability window opened with `deadline`.
    ///
    /// Returns false for stale deadlines (window already closed or restarted).
    pub fn end_invulnerability(&mut self, deadline: f64) -> bool {
        if self.invulnerable_until == Some(deadline) {
            self.invulnerable_until = None;
            true
        } else {
            false
        }
    }

    /// Dying → Removed. Returns false from any other state.
    pub(crate) fn mark_removed(&mut self) -> bool {
        if self.life_state == LifeState::Dying {
            self.life_state = LifeState::Removed;
            true
        } else {
            false
        }
    }
}

/// Visual opacity (1 = opaque). Faded to 0 by the death sequence.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Opacity(pub f32);

impl Default for Opacity {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Tag of a collision volume ("Enemy", "Player", ...)
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct Classification(pub String);

impl Classification {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Collision volume that forwards hits to a combatant
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub owner: Entity,
}

/// Weapon a combatant attacks with
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Armed {
    pub weapon: Entity,
}

/// Marker: combatant receives player input through `InputRouter`
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerControlled;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_starts_invulnerability() {
        let mut vitality = Vitality::new(100.0).with_invulnerability(0.5);

        let outcome = vitality.apply_damage(30.0, 1.0);

        assert_eq!(
            outcome,
            DamageOutcome::Wounded {
                health: 70.0,
                invulnerable_until: 1.5
            }
        );
        assert!(vitality.is_invulnerable());
        assert_eq!(vitality.health(), 70.0);
    }

    #[test]
    fn test_invulnerable_discards_damage() {
        let mut vitality = Vitality::new(100.0);
        vitality.apply_damage(30.0, 0.0);

        let outcome = vitality.apply_damage(30.0, 0.2);

        assert_eq!(outcome, DamageOutcome::Ignored(IgnoreReason::Invulnerable));
        assert_eq!(vitality.health(), 70.0);
    }

    #[test]
    fn test_window_end_restores_vulnerability() {
        let mut vitality = Vitality::new(100.0).with_invulnerability(0.5);
        vitality.apply_damage(30.0, 0.0);

        assert!(vitality.end_invulnerability(0.5));
        assert!(!vitality.is_invulnerable());

        vitality.apply_damage(30.0, 0.75);
        assert_eq!(vitality.health(), 40.0);
        assert_eq!(vitality.invulnerable_until(), Some(1.25));
    }

    #[test]
    fn test_stale_window_end_is_ignored() {
        let mut vitality = Vitality::new(100.0).with_invulnerability(0.5);
        vitality.apply_damage(10.0, 0.0);

        assert!(!vitality.end_invulnerability(0.25));
        assert!(vitality.is_invulnerable());
    }

    #[test]
    fn test_fatal_damage_transitions_once() {
        let mut vitality = Vitality::new(100.0).with_health(10.0);

        assert_eq!(vitality.apply_damage(15.0, 0.0), DamageOutcome::Killed);
        assert_eq!(vitality.life_state(), LifeState::Dying);
        assert_eq!(vitality.health(), 0.0);

        assert_eq!(
            vitality.apply_damage(5.0, 0.1),
            DamageOutcome::Ignored(IgnoreReason::NotAlive)
        );
        assert_eq!(vitality.life_state(), LifeState::Dying);
    }

    #[test]
    fn test_exact_lethal_damage_kills() {
        let mut vitality = Vitality::new(20.0);
        assert_eq!(vitality.apply_damage(20.0, 0.0), DamageOutcome::Killed);
    }

    #[test]
    fn test_negative_damage_never_heals() {
        let mut vitality = Vitality::new(100.0).with_health(50.0);

        assert_eq!(
            vitality.apply_damage(-25.0, 0.0),
            DamageOutcome::Ignored(IgnoreReason::InvalidAmount)
        );
        assert_eq!(
            vitality.apply_damage(f32::NAN, 0.0),
            DamageOutcome::Ignored(IgnoreReason::InvalidAmount)
        );
        assert_eq!(vitality.health(), 50.0);
        assert!(!vitality.is_invulnerable());
    }

    #[test]
    fn test_removed_only_from_dying() {
        let mut vitality = Vitality::new(10.0);
        assert!(!vitality.mark_removed());

        vitality.apply_damage(25.0, 0.0);
        assert!(vitality.mark_removed());
        assert_eq!(vitality.life_state(), LifeState::Removed);
        assert!(!vitality.mark_removed());

        assert_eq!(
            vitality.apply_damage(5.0, 1.0),
            DamageOutcome::Ignored(IgnoreReason::NotAlive)
        );
    }

    #[test]
    fn test_spawn_health_is_never_zero() {
        let empty = Vitality::new(0.0);
        assert!(empty.is_alive());
        assert!(empty.health() > 0.0);

        let mut wounded = Vitality::new(100.0).with_health(0.0);
        assert!(wounded.health() > 0.0);
        assert_eq!(wounded.apply_damage(1.0, 0.0), DamageOutcome::Killed);
        assert_eq!(wounded.health(), 0.0);
    }

    #[test]
    fn test_from_config() {
        let config = CombatConfig {
            max_health: 80.0,
            invulnerability_secs: 0.25,
            ..Default::default()
        };
        let vitality = Vitality::from_config(&config);

        assert_eq!(vitality.health(), 80.0);
        assert_eq!(vitality.max_health(), 80.0);
        assert_eq!(vitality.invulnerability_secs(), 0.25);
    }
}
