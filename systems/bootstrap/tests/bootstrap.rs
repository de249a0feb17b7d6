use wildgrove_core::{BossClass, Command};
use wildgrove_system_bootstrap::Bootstrap;
use wildgrove_world::{self as world, query, World, WorldConfig};

#[test]
fn startup_seeds_legend_bosses_and_greets_the_player() {
    let mut world = World::new(WorldConfig::default()).expect("config is valid");
    let bootstrap = Bootstrap::default();

    assert_eq!(bootstrap.welcome_banner(&world), "Welcome to Wildgrove.");
    assert_eq!(bootstrap.tile_grid(&world).columns(), 100);
    assert_eq!(bootstrap.startup_commands(), vec![Command::SpawnLegendBosses]);

    let mut events = Vec::new();
    for command in bootstrap.startup_commands() {
        world::apply(&mut world, command, &mut events);
    }

    let bosses = query::boss_view(&world).into_vec();
    assert!(!bosses.is_empty(), "expected at least one legend");
    assert!(bosses
        .iter()
        .all(|boss| boss.class == BossClass::Legend));
}
