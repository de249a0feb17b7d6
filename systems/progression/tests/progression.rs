use std::time::Duration;

use wildgrove_core::{AttackKind, Command, Event};
use wildgrove_system_progression::Progression;
use wildgrove_world::{self as world, query, World, WorldConfig};

const FRAME: Duration = Duration::from_millis(16);

fn tiny_world() -> World {
    World::new(WorldConfig {
        columns: 1,
        rows: 1,
        blocked_chance: 0.0,
        checkpoint_count: 0,
        ..WorldConfig::default()
    })
    .expect("config is valid")
}

/// Funds the player with exactly one upgrade's worth of leaves by hunting a
/// boss. On a one-cell grid the boss spawns overlapping the player and then
/// oscillates between (0,0) and (3,3); the heavy attack's centred strike
/// strip overlaps the boss at both points, so every one of the 50 scripted
/// ticks lands and the 500-health boss falls exactly on the last tick.
fn earn_boss_bounty(world: &mut World) {
    let mut events = Vec::new();
    world::apply(world, Command::SpawnBoss, &mut events);
    assert!(matches!(
        events.as_slice(),
        [Event::BossSpawned { .. }],
    ));

    world::apply(
        world,
        Command::SetAttackIntent {
            attack: Some(AttackKind::Heavy),
        },
        &mut events,
    );
    for _ in 0..50 {
        world::apply(world, Command::Tick { dt: FRAME }, &mut events);
    }
    world::apply(
        world,
        Command::SetAttackIntent { attack: None },
        &mut events,
    );

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BossDefeated { reward: 100, .. })));
    assert!(!events.contains(&Event::PlayerDefeated));
}

#[test]
fn accepted_offer_levels_the_player_up() {
    let mut world = tiny_world();
    let mut progression = Progression::default();
    earn_boss_bounty(&mut world);
    assert_eq!(query::leaves(&world), 100);

    let mut request_events = Vec::new();
    world::apply(&mut world, Command::RequestUpgrade, &mut request_events);
    assert_eq!(
        request_events,
        vec![Event::UpgradeOffered { cost: 100 }],
    );

    let mut commands = Vec::new();
    progression.handle(&request_events, &mut |_| true, &mut commands);
    assert_eq!(commands, vec![Command::ConfirmUpgrade]);

    let mut confirm_events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut confirm_events);
    }
    assert_eq!(
        confirm_events,
        vec![Event::UpgradeApplied {
            level: 2,
            cost: 100,
        }],
    );
    assert_eq!(query::level(&world), 2);
    assert_eq!(query::leaves(&world), 0);
}

#[test]
fn declined_offer_leaves_the_world_untouched() {
    let mut world = tiny_world();
    let mut progression = Progression::default();
    earn_boss_bounty(&mut world);

    let mut request_events = Vec::new();
    world::apply(&mut world, Command::RequestUpgrade, &mut request_events);

    let mut commands = Vec::new();
    progression.handle(&request_events, &mut |_| false, &mut commands);

    assert!(commands.is_empty());
    assert_eq!(query::level(&world), 1);
    assert_eq!(query::leaves(&world), 100);
}

#[test]
fn unaffordable_request_never_reaches_the_boundary() {
    let mut world = tiny_world();
    let mut progression = Progression::default();

    let mut request_events = Vec::new();
    world::apply(&mut world, Command::RequestUpgrade, &mut request_events);
    assert_eq!(
        request_events,
        vec![Event::UpgradeRejected {
            required: 100,
            available: 0,
        }],
    );

    let mut asked = false;
    let mut commands = Vec::new();
    progression.handle(
        &request_events,
        &mut |_| {
            asked = true;
            true
        },
        &mut commands,
    );
    assert!(!asked, "rejections are never presented for confirmation");
    assert!(commands.is_empty());
    assert_eq!(query::level(&world), 1);
}
