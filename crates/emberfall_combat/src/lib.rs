//! Emberfall Combat Core
//!
//! Combat resolution на Bevy 0.16 ECS: weapon attack phases, contact damage,
//! health with invulnerability, death fade and removal.
//!
//! Архитектура:
//! - ECS = combat rules (this crate)
//! - Host = rendering, collision detection, input devices
//!
//! Host пишет AttackRequest / VolumeContact / DamageRequest / PlayerInput,
//! читает WeaponPhaseChanged / DamageDealt / EntityDied / EntityRemoved.

use bevy::prelude::*;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod input;
pub mod logger;
#[cfg(feature = "rapier")]
pub mod physics;
pub mod schedules;

// Re-export для удобства
pub use combat::{
    combatant_health, AttackRequest, CombatCorePlugin, DamageDealt, DamageEvent, DamageRequest,
    DeathFade, EntityDied, EntityRemoved, VolumeContact, WeaponPhaseChanged,
};
pub use components::*;
pub use config::{CombatConfig, ConfigError};
pub use input::{InputAction, InputRouter, InputStatus, PlayerInput};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level,
    set_logger, set_logger_if_needed, ConsoleLogger, LogLevel, LogPrinter,
};
#[cfg(feature = "rapier")]
pub use physics::RapierContactBridgePlugin;
pub use schedules::{step_combat, CombatClock, CombatTick, TimerAction, TimerQueue};

/// Главный plugin: combat core + fixed timestep driver
///
/// Invalid config is reported and replaced with defaults.
#[derive(Default)]
pub struct CombatSimulationPlugin {
    pub config: CombatConfig,
}

impl CombatSimulationPlugin {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }
}

impl Plugin for CombatSimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(err) => {
                log_error(&format!("Invalid combat config ({}), using defaults", err));
                CombatConfig::default()
            }
        };

        app
            // Fixed timestep (60Hz по умолчанию) для combat tick
            .insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .insert_resource(config)
            .add_plugins(CombatCorePlugin)
            .add_systems(FixedUpdate, schedules::run_combat_tick);
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(config: CombatConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(CombatSimulationPlugin::new(config));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Entities sorted by index, components rendered through Debug.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<String> {
    let mut query = world.query::<(Entity, &T)>();
    let mut entries: Vec<_> = query.iter(world).collect();

    entries.sort_by_key(|(entity, _)| entity.index());

    entries
        .into_iter()
        .map(|(entity, component)| format!("{}: {:?}", entity.index(), component))
        .collect()
}
