//! Weapon component: stats, attack phase, damage volume flag, activation hooks.
//!
//! Phase machine (driven by `combat::attack`):
//!
//! ```text
//! Idle --attack--> Active --active_window--> Cooldown --(cooldown_window - active_window)--> Idle
//! ```
//!
//! The damage volume is enabled iff phase == Active. Weapon variants only
//! customise `ActivationHook`; they never touch timing.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Classification;
use crate::config::{ensure_non_negative, ConfigError};

/// Attack cycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AttackPhase {
    #[default]
    Idle,
    /// Damage volume enabled
    Active,
    /// Waiting out the rest of the attack interval
    Cooldown,
}

/// Static weapon parameters
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Damage per hit
    pub damage: f32,
    /// How long the damage volume stays enabled (seconds)
    pub active_window: f32,
    /// Time between attack starts (seconds), includes the active window
    pub cooldown_window: f32,
    /// Only volumes with this classification take damage (None = anything)
    pub target_filter: Option<Classification>,
    /// One hit per target per activation instead of one per reported contact
    pub single_hit_per_activation: bool,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self::sword()
    }
}

impl WeaponStats {
    pub fn new(damage: f32, active_window: f32, cooldown_window: f32) -> Self {
        Self {
            damage,
            active_window,
            cooldown_window,
            target_filter: None,
            single_hit_per_activation: false,
        }
    }

    /// Меч: 25 dmg, 0.2s swing, one swing per 0.5s, hits "Enemy"
    pub fn sword() -> Self {
        Self::new(25.0, 0.2, 0.5).with_target_filter("Enemy")
    }

    /// Empty tag means no filter
    pub fn with_target_filter(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.target_filter = if tag.is_empty() {
            None
        } else {
            Some(Classification(tag))
        };
        self
    }

    pub fn single_hit(mut self) -> Self {
        self.single_hit_per_activation = true;
        self
    }

    /// Cooldown left after the active window ends (may be ≤ 0)
    pub fn cooldown_remainder(&self) -> f32 {
        self.cooldown_window - self.active_window
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("damage", self.damage as f64)?;
        ensure_non_negative("active_window", self.active_window as f64)?;
        ensure_non_negative("cooldown_window", self.cooldown_window as f64)?;
        Ok(())
    }
}

/// Transient visual pose offset written by activation hooks (Euler degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct WeaponPose {
    pub euler_degrees: Vec3,
}

/// Activation/deactivation hook: the only customisation point of a weapon.
///
/// Whatever `on_active_start` does to the pose, `on_active_end` must undo.
pub trait ActivationHook {
    fn on_active_start(&self, _pose: &mut WeaponPose) {}

    fn on_active_end(&self, _pose: &mut WeaponPose) {}
}

/// Weapon variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub enum WeaponKind {
    #[default]
    Plain,
    /// Rotates by `swing_degrees` for the active window
    Blade { swing_degrees: Vec3 },
}

impl WeaponKind {
    pub fn blade() -> Self {
        WeaponKind::Blade {
            swing_degrees: Vec3::new(70.0, 0.0, 0.0),
        }
    }
}

impl ActivationHook for WeaponKind {
    fn on_active_start(&self, pose: &mut WeaponPose) {
        if let WeaponKind::Blade { swing_degrees } = self {
            pose.euler_degrees += *swing_degrees;
        }
    }

    fn on_active_end(&self, pose: &mut WeaponPose) {
        if let WeaponKind::Blade { swing_degrees } = self {
            pose.euler_degrees -= *swing_degrees;
        }
    }
}

/// Weapon state. Mutated only by the attack controller.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    stats: WeaponStats,
    kind: WeaponKind,
    phase: AttackPhase,
    volume_enabled: bool,
    pose: WeaponPose,
    /// Targets already hit this activation (single-hit mode only)
    hit_this_swing: Vec<Entity>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WeaponStats::default())
    }
}

impl Weapon {
    pub fn new(stats: WeaponStats) -> Self {
        Self {
            stats,
            kind: WeaponKind::Plain,
            phase: AttackPhase::Idle,
            volume_enabled: false,
            pose: WeaponPose::default(),
            hit_this_swing: Vec::new(),
        }
    }

    pub fn sword() -> Self {
        Self::new(WeaponStats::sword()).with_kind(WeaponKind::blade())
    }

    pub fn with_kind(mut self, kind: WeaponKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn is_volume_enabled(&self) -> bool {
        self.volume_enabled
    }

    pub fn pose(&self) -> WeaponPose {
        self.pose
    }

    pub fn damage(&self) -> f32 {
        self.stats.damage
    }

    /// Target filter check: no filter accepts everything, including untagged volumes
    pub fn accepts(&self, classification: Option<&Classification>) -> bool {
        match &self.stats.target_filter {
            None => true,
            Some(filter) => classification == Some(filter),
        }
    }

    /// Idle → Active. Returns false (no-op) from any other phase.
    pub fn try_begin_attack(&mut self) -> bool {
        if self.phase != AttackPhase::Idle {
            return false;
        }

        self.kind.on_active_start(&mut self.pose);
        self.hit_this_swing.clear();
        self.volume_enabled = true;
        self.phase = AttackPhase::Active;
        true
    }

    /// Active → Cooldown. Returns the remaining cooldown (may be ≤ 0),
    /// None if the weapon was not Active.
    pub fn end_active_window(&mut self) -> Option<f32> {
        if self.phase != AttackPhase::Active {
            return None;
        }

        self.kind.on_active_end(&mut self.pose);
        self.volume_enabled = false;
        self.phase = AttackPhase::Cooldown;
        Some(self.stats.cooldown_remainder())
    }

    /// Cooldown → Idle. Returns false if the weapon was not in Cooldown.
    pub fn finish_cooldown(&mut self) -> bool {
        if self.phase != AttackPhase::Cooldown {
            return false;
        }

        self.phase = AttackPhase::Idle;
        true
    }

    /// Single-hit mode: false once `target` took a hit this activation
    pub fn can_hit(&self, target: Entity) -> bool {
        !self.stats.single_hit_per_activation || !self.hit_this_swing.contains(&target)
    }

    /// Remember a landed hit (single-hit mode only)
    pub fn register_hit(&mut self, target: Entity) {
        if self.stats.single_hit_per_activation && !self.hit_this_swing.contains(&target) {
            self.hit_this_swing.push(target);
        }
    }
}
