//! Logger capture test
//!
//! Отдельный test binary: глобальный logger подменяется на capture,
//! поэтому здесь ровно один тест.

use std::sync::{Arc, Mutex};

use emberfall_combat::*;

const DT: f32 = 1.0 / 64.0;

#[derive(Clone, Default)]
struct CaptureLogger {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl CaptureLogger {
    fn warnings(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Warning)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(logged, message)| *logged == level && message.contains(needle))
    }
}

impl LogPrinter for CaptureLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

#[test]
fn test_fail_soft_paths_are_reported() {
    let capture = CaptureLogger::default();
    let mut app = create_headless_app(CombatConfig::default());
    set_logger(Box::new(capture.clone()));
    set_log_level(LogLevel::Debug);

    let world = app.world_mut();
    let unfiltered = world
        .spawn(Weapon::new(WeaponStats::new(5.0, 0.1, 0.2)))
        .id();
    let broken = world
        .spawn(Weapon::new(WeaponStats::new(-1.0, 0.1, 0.2).with_target_filter("Enemy")))
        .id();
    let sword = world.spawn(Weapon::sword()).id();
    let player = world
        .spawn((Vitality::new(100.0), Armed { weapon: sword }, PlayerControlled))
        .id();
    let dummy = world
        .spawn((Vitality::new(100.0), Classification::new("Enemy")))
        .id();

    world.send_event(PlayerInput::new(InputAction::Dash, InputStatus::Started));
    world.send_event(PlayerInput::attack());
    step_combat(world, DT);

    world.send_event(VolumeContact { a: sword, b: dummy });
    world.send_event(DamageRequest {
        target: sword,
        amount: 10.0,
        source: Some(player),
    });
    step_combat(world, DT);

    let warnings = capture.warnings();

    // Неизвестное действие: warning, без паники
    assert!(
        warnings
            .iter()
            .any(|line| line.contains("An invalid input (Dash)") && line.contains("wasn't handled")),
        "{:?}",
        warnings
    );

    // Оружие без фильтра
    assert!(warnings.iter().any(|line| line.contains(&format!(
        "No target classification set for weapon {:?}",
        unfiltered
    ))));
    assert!(!warnings.iter().any(|line| line.contains(&format!(
        "No target classification set for weapon {:?}",
        sword
    ))));

    // Невалидные stats
    assert!(warnings.iter().any(|line| line.contains(&format!("Weapon {:?} misconfigured", broken))
        && line.contains("damage must not be negative")));

    // Урон по entity без Vitality
    assert!(warnings.iter().any(|line| line.contains("has no Vitality")));

    // Debug: попадание и урон
    assert!(capture.contains(LogLevel::Debug, &format!("Weapon {:?} has hit {:?} (Enemy)", sword, dummy)));
    assert_eq!(combatant_health(app.world(), dummy), Some(75.0));

    // Порог уровня отсекает debug
    set_log_level(LogLevel::Warning);
    let before = capture.lines.lock().unwrap().len();
    log("debug line below threshold");
    log_info("info line below threshold");
    assert_eq!(capture.lines.lock().unwrap().len(), before);
    log_error("error line above threshold");
    assert!(capture.contains(LogLevel::Error, "error line above threshold"));
}
