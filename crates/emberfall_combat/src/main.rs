//! Headless duel Emberfall
//!
//! Player with a sword swings at a training dummy until it dies and fades out.
//! Contacts are scripted: while the blade volume is enabled it touches the
//! dummy's hurtbox every tick.

use emberfall_combat::{
    create_headless_app, step_combat, Armed, AttackPhase, Classification, CombatConfig, Hurtbox,
    PlayerControlled, PlayerInput, VolumeContact, Vitality, Weapon,
};

fn main() {
    let config = CombatConfig::default();
    let dt = config.tick_secs();
    println!("Starting Emberfall headless duel ({} Hz)", config.tick_hz);

    let mut app = create_headless_app(config.clone());
    let world = app.world_mut();

    let sword = world.spawn(Weapon::sword()).id();
    let player = world
        .spawn((
            Vitality::from_config(&config),
            Classification::new("Player"),
            Armed { weapon: sword },
            PlayerControlled,
        ))
        .id();
    let dummy = world
        .spawn((Vitality::from_config(&config), Classification::new("Enemy")))
        .id();
    let dummy_hurtbox = world
        .spawn((Hurtbox { owner: dummy }, Classification::new("Enemy")))
        .id();

    println!("Player {:?} (sword {:?}) vs dummy {:?}", player, sword, dummy);

    // 10 секунд симуляции
    let ticks = (config.tick_hz * 10.0) as u32;
    for tick in 0..ticks {
        let world = app.world_mut();

        // Кнопка атаки раз в 0.25s
        if tick % 15 == 0 {
            world.send_event(PlayerInput::attack());
        }

        let blade_out = world
            .get::<Weapon>(sword)
            .is_some_and(|weapon| weapon.is_volume_enabled());
        if blade_out {
            world.send_event(VolumeContact {
                a: sword,
                b: dummy_hurtbox,
            });
        }

        step_combat(world, dt);

        if tick % 60 == 0 {
            let phase = world
                .get::<Weapon>(sword)
                .map_or(AttackPhase::Idle, Weapon::phase);
            let dummy_state = world
                .get::<Vitality>(dummy)
                .map(|vitality| format!("{:?} {:.0} HP", vitality.life_state(), vitality.health()));
            println!(
                "Tick {}: sword {:?}, dummy {}",
                tick,
                phase,
                dummy_state.as_deref().unwrap_or("removed")
            );
        }

        if world.get_entity(dummy).is_err() {
            println!("Dummy removed at tick {}", tick);
            break;
        }
    }

    println!("Duel complete!");
}
