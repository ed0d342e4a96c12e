//! Тесты детерминизма
//!
//! Один и тот же сценарий (атаки, контакты, смерть) даёт идентичные результаты

use bevy::prelude::*;
use emberfall_combat::*;

const DT: f32 = 1.0 / 60.0;

#[derive(Debug, PartialEq)]
struct DuelResult {
    vitality: Vec<String>,
    weapons: Vec<String>,
    damage_log: Vec<String>,
    phase_log: Vec<String>,
    clock_tick: u64,
}

/// Два бойца рубят друг друга, контакты каждый тик пока клинок активен
fn run_duel(tick_count: u32) -> DuelResult {
    let mut app = create_headless_app(CombatConfig {
        despawn_on_removal: false,
        ..Default::default()
    });
    let world = app.world_mut();

    let blade_a = world
        .spawn(Weapon::new(WeaponStats::new(12.0, 0.2, 0.45).with_target_filter("Blue")))
        .id();
    let blade_b = world
        .spawn(Weapon::new(WeaponStats::new(9.0, 0.15, 0.3).with_target_filter("Red")))
        .id();
    let red = world
        .spawn((
            Vitality::new(100.0),
            Classification::new("Red"),
            Armed { weapon: blade_a },
        ))
        .id();
    let blue = world
        .spawn((
            Vitality::new(80.0).with_invulnerability(0.3),
            Classification::new("Blue"),
            Armed { weapon: blade_b },
        ))
        .id();

    let mut damage_log = Vec::new();
    let mut phase_log = Vec::new();

    for tick in 0..tick_count {
        let world = app.world_mut();

        if tick % 7 == 0 {
            world.send_event(AttackRequest { weapon: blade_a });
        }
        if tick % 11 == 0 {
            world.send_event(AttackRequest { weapon: blade_b });
        }

        for (blade, target) in [(blade_a, blue), (blade_b, red)] {
            let active = world
                .get::<Weapon>(blade)
                .is_some_and(Weapon::is_volume_enabled);
            if active {
                world.send_event(VolumeContact { a: blade, b: target });
            }
        }

        step_combat(world, DT);

        damage_log.extend(
            world
                .resource_mut::<Events<DamageDealt>>()
                .drain()
                .map(|event| format!("{:?}", event)),
        );
        phase_log.extend(
            world
                .resource_mut::<Events<WeaponPhaseChanged>>()
                .drain()
                .map(|event| format!("{:?}", event)),
        );
    }

    let world = app.world_mut();
    DuelResult {
        vitality: world_snapshot::<Vitality>(world),
        weapons: world_snapshot::<Weapon>(world),
        damage_log,
        phase_log,
        clock_tick: world.resource::<CombatClock>().tick(),
    }
}

#[test]
fn test_duel_is_deterministic() {
    const TICK_COUNT: u32 = 600;

    let first = run_duel(TICK_COUNT);
    let second = run_duel(TICK_COUNT);

    assert!(!first.damage_log.is_empty(), "duel should deal damage");
    assert_eq!(first.clock_tick, TICK_COUNT as u64);
    assert_eq!(first, second, "одинаковый сценарий дал разные результаты");
}

#[test]
fn test_duel_multiple_runs() {
    const TICK_COUNT: u32 = 300;

    // Запускаем 4 раза: все должны быть идентичны
    let results: Vec<_> = (0..4).map(|_| run_duel(TICK_COUNT)).collect();

    for (i, result) in results.iter().enumerate().skip(1) {
        assert_eq!(
            results[0], *result,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_duel_ends_in_a_death() {
    // 10s: red (12 dmg, 0.45s) добивает blue (80 HP) задолго до конца
    let result = run_duel(600);

    assert!(
        result.damage_log.iter().any(|line| line.contains("fatal: true")),
        "expected a fatal hit, got {:?}",
        result.damage_log
    );
}
