//! ECS Components
//!
//! - combatant: Vitality (health state machine), Opacity, Classification, Hurtbox, Armed, PlayerControlled
//! - weapon: Weapon (attack phase machine), WeaponStats, WeaponKind + ActivationHook

pub mod combatant;
pub mod weapon;

pub use combatant::*;
pub use weapon::*;
