use kd_core::{ResourceKind, Stat, Vec2};
use kd_simulation::{Action, ActionState, SimConfig, SimEventKind, Simulation, TuningProfile};
use kd_simulation::systems::VitalsSystem;
use proptest::prelude::*;

const DT: f64 = 1.0 / 60.0;

/// A simulation with the default systems and an empty world.
fn bare_sim() -> Simulation {
    let profile = TuningProfile::classic().without_spawning();
    let config = SimConfig::default().with_profile(profile);
    let mut sim = Simulation::with_default_systems(config).unwrap();
    sim.init().unwrap();
    sim
}

fn hold(actions: &[Action]) -> ActionState {
    ActionState::holding(actions)
}

fn count(sim: &Simulation, pred: impl Fn(&SimEventKind) -> bool) -> usize {
    sim.events().count_of(pred)
}

#[test]
fn empty_profile_spawns_nothing() {
    let mut sim = bare_sim();
    sim.run(600, &ActionState::new(), DT).unwrap();
    assert_eq!(sim.state().registry.total(), 0);
}

#[test]
fn tree_with_one_hp_falls_in_one_tick() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position + Vec2::new(20.0, 0.0);
    let tree = sim.state_mut().registry.spawn_tree(pos, 1);

    sim.step(&hold(&[Action::Chop]), DT).unwrap();

    assert_eq!(sim.state().registry.count(ResourceKind::Tree), 0);
    assert_eq!(sim.state().player.inventory.wood, 1);
    assert_eq!(sim.events().events_for_entity(tree).len(), 1);
}

#[test]
fn tree_with_two_hp_needs_two_ticks() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_tree(pos, 2);
    let chop = hold(&[Action::Chop]);

    sim.step(&chop, DT).unwrap();
    assert_eq!(sim.state().registry.count(ResourceKind::Tree), 1);
    assert_eq!(sim.state().player.inventory.wood, 0);

    sim.step(&chop, DT).unwrap();
    assert_eq!(sim.state().registry.count(ResourceKind::Tree), 0);
    assert_eq!(sim.state().player.inventory.wood, 1);

    // Holding on with nothing left changes nothing
    sim.step(&chop, DT).unwrap();
    assert_eq!(sim.state().player.inventory.wood, 1);
}

#[test]
fn chop_hits_every_tree_in_reach() {
    let mut sim = bare_sim();
    let c = sim.state().player.position;
    for offset in [Vec2::new(10.0, 0.0), Vec2::new(0.0, 40.0), Vec2::new(-50.0, 0.0)] {
        sim.state_mut().registry.spawn_tree(c + offset, 1);
    }
    sim.state_mut().registry.spawn_tree(c + Vec2::new(100.0, 0.0), 1);

    sim.step(&hold(&[Action::Chop]), DT).unwrap();

    assert_eq!(sim.state().player.inventory.wood, 3);
    assert_eq!(sim.state().registry.count(ResourceKind::Tree), 1);
    assert_eq!(count(&sim, |k| matches!(k, SimEventKind::TreeFelled { .. })), 3);
}

#[test]
fn rock_takes_three_hits_and_yields_stone() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_rock(pos, 3);
    sim.run(3, &hold(&[Action::Mine]), DT).unwrap();
    assert_eq!(sim.state().player.inventory.stone, 1);
    assert_eq!(sim.state().registry.count(ResourceKind::Rock), 0);
}

#[test]
fn hit_interval_rate_limits_chopping() {
    let mut profile = TuningProfile::classic().without_spawning();
    profile.actions.hit_interval = 0.25;
    let config = SimConfig::default().with_profile(profile);
    let mut sim = Simulation::with_default_systems(config).unwrap();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_tree(pos, 2);

    // 0.125s per tick: hits land on ticks 1 and 3
    let chop = hold(&[Action::Chop]);
    sim.step(&chop, 0.125).unwrap();
    sim.step(&chop, 0.125).unwrap();
    assert_eq!(sim.state().player.inventory.wood, 0);
    sim.step(&chop, 0.125).unwrap();
    assert_eq!(sim.state().player.inventory.wood, 1);
}

#[test]
fn berry_underfoot_is_eaten_and_hunger_capped() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_berry(pos);
    sim.state_mut().registry.spawn_berry(pos + Vec2::new(5.0, 5.0));
    sim.state_mut().player.vitals.set(Stat::Hunger, 90.0);

    sim.step(&ActionState::new(), DT).unwrap();

    assert_eq!(sim.state().registry.count(ResourceKind::Berry), 0);
    let hunger = sim.state().player.vitals.hunger();
    assert!(hunger <= 100.0 && hunger > 99.0, "hunger was {hunger}");
    assert_eq!(count(&sim, |k| matches!(k, SimEventKind::BerryEaten { .. })), 2);
}

#[test]
fn berry_outside_pickup_radius_stays() {
    let mut sim = bare_sim();
    // reach 64 * 0.7 = 44.8
    let pos = sim.state().player.position + Vec2::new(45.0, 0.0);
    sim.state_mut().registry.spawn_berry(pos);
    sim.step(&ActionState::new(), DT).unwrap();
    assert_eq!(sim.state().registry.count(ResourceKind::Berry), 1);
}

#[test]
fn standing_in_water_refills_thirst() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_water(pos, 30.0);
    sim.state_mut().player.vitals.set(Stat::Thirst, 50.0);

    sim.step(&ActionState::new(), 0.05).unwrap();

    // +30/s regen, -9/s decay
    let thirst = sim.state().player.vitals.thirst();
    assert!((thirst - (50.0 + 1.5 - 0.45)).abs() < 1e-9);
    assert_eq!(sim.state().registry.count(ResourceKind::Water), 1);
}

#[test]
fn campfire_heals_nearby() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_campfire(pos + Vec2::new(30.0, 0.0));
    sim.state_mut().player.vitals.set(Stat::Health, 50.0);

    sim.step(&ActionState::new(), 0.05).unwrap();

    assert!((sim.state().player.vitals.health() - 50.4).abs() < 1e-9);
}

#[test]
fn craft_is_atomic() {
    let mut sim = bare_sim();
    sim.state_mut().player.inventory.wood = 1;
    sim.state_mut().player.inventory.stone = 5;

    sim.step(&hold(&[Action::Craft]), DT).unwrap();
    assert_eq!(sim.state().player.inventory.wood, 1);
    assert_eq!(sim.state().player.inventory.stone, 5);
    assert_eq!(sim.hud().campfires, 0);
    assert_eq!(count(&sim, |k| matches!(k, SimEventKind::CraftRejected { .. })), 1);

    sim.step(&ActionState::new(), DT).unwrap();
    sim.state_mut().player.inventory.wood = 2;
    sim.state_mut().player.inventory.stone = 1;
    sim.step(&hold(&[Action::Craft]), DT).unwrap();
    assert_eq!(sim.state().player.inventory.wood, 0);
    assert_eq!(sim.state().player.inventory.stone, 0);
    assert_eq!(sim.hud().campfires, 1);
}

#[test]
fn held_craft_fires_once_per_press() {
    let mut sim = bare_sim();
    sim.state_mut().player.inventory.wood = 10;
    sim.state_mut().player.inventory.stone = 10;
    let craft = hold(&[Action::Craft]);

    sim.run(5, &craft, DT).unwrap();
    assert_eq!(sim.hud().campfires, 1);

    sim.step(&ActionState::new(), DT).unwrap();
    sim.run(5, &craft, DT).unwrap();
    assert_eq!(sim.hud().campfires, 2);
    assert_eq!(sim.state().player.inventory.wood, 6);
    assert_eq!(sim.state().player.inventory.stone, 8);
}

#[test]
fn incapacitated_player_cannot_move() {
    let mut sim = bare_sim();
    sim.state_mut().player.vitals.set(Stat::Health, 0.0);
    let start = sim.state().player.position;
    let before = sim.state().player.vitals.clone();

    sim.run(30, &hold(&[Action::Up, Action::Right]), DT).unwrap();

    let player = &sim.state().player;
    assert_eq!(player.position, start);
    assert!(player.is_incapacitated());
    assert!(player.vitals.hunger() < before.hunger());
    assert!(player.vitals.thirst() < before.thirst());
    assert_eq!(count(&sim, |k| *k == SimEventKind::Incapacitated), 1);
}

#[test]
fn campfire_heals_a_collapsed_player() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_campfire(pos);
    sim.state_mut().player.vitals.set(Stat::Health, 0.0);

    sim.run(60, &ActionState::new(), DT).unwrap();

    // 8/s for one second
    let health = sim.state().player.vitals.health();
    assert!((health - 8.0).abs() < 1e-6, "health {health}");
    assert!(!sim.state().player.is_incapacitated());
}

#[test]
fn movement_returns_once_health_recovers() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_campfire(pos);
    sim.state_mut().player.vitals.set(Stat::Health, 0.0);
    let walk = hold(&[Action::Right]);

    // Input is dropped on the tick that starts at zero health
    sim.step(&walk, DT).unwrap();
    assert_eq!(sim.state().player.position, pos);

    sim.step(&walk, DT).unwrap();
    assert!(sim.state().player.position.x > pos.x);
}

#[test]
fn collapse_is_reported_again_after_recovery() {
    let mut sim = bare_sim();
    let idle = ActionState::new();
    {
        let vitals = &mut sim.state_mut().player.vitals;
        vitals.set(Stat::Hunger, 0.0);
        vitals.set(Stat::Thirst, 0.0);
        vitals.set(Stat::Health, 0.05);
    }
    sim.run(3, &idle, DT).unwrap();
    assert_eq!(count(&sim, |k| *k == SimEventKind::Incapacitated), 1);

    sim.state_mut().player.vitals.set(Stat::Health, 0.05);
    sim.run(3, &idle, DT).unwrap();
    assert_eq!(count(&sim, |k| *k == SimEventKind::Incapacitated), 2);
    assert!(sim.get_system::<VitalsSystem>().unwrap().is_down());
}

#[test]
fn double_deficit_drains_health_to_zero_and_holds() {
    let mut sim = bare_sim();
    {
        let vitals = &mut sim.state_mut().player.vitals;
        vitals.set(Stat::Hunger, 0.0);
        vitals.set(Stat::Thirst, 0.0);
        vitals.set(Stat::Health, 5.0);
    }
    let idle = ActionState::new();
    // 6/s * 1.2 per tick of 1/60s
    let per_tick = 6.0 * 1.2 * DT;

    let mut prev = sim.state().player.vitals.health();
    while prev > 0.0 {
        sim.step(&idle, DT).unwrap();
        let health = sim.state().player.vitals.health();
        assert!(health < prev);
        if health > 0.0 {
            assert!((prev - health - per_tick).abs() < 1e-9);
        }
        prev = health;
    }

    sim.run(60, &idle, DT).unwrap();
    assert_eq!(sim.state().player.vitals.health(), 0.0);
    assert_eq!(
        count(&sim, |k| *k == SimEventKind::StatDepleted { stat: Stat::Health }),
        1
    );
}

#[test]
fn zero_dt_tick_changes_nothing() {
    let mut sim = bare_sim();
    let pos = sim.state().player.position;
    sim.state_mut().registry.spawn_tree(pos, 1);
    sim.state_mut().registry.spawn_berry(pos);
    sim.state_mut().player.vitals.set(Stat::Hunger, 0.0);
    let player = sim.state().player.clone();

    let everything = hold(&Action::ALL);
    sim.step(&everything, 0.0).unwrap();

    assert_eq!(sim.state().player, player);
    assert_eq!(sim.state().registry.count(ResourceKind::Tree), 1);
    assert_eq!(sim.state().registry.count(ResourceKind::Berry), 1);
}

#[test]
fn zero_dt_tick_can_resolve_a_queued_craft_once() {
    let mut sim = bare_sim();
    sim.state_mut().player.inventory.wood = 4;
    sim.state_mut().player.inventory.stone = 2;
    let craft = hold(&[Action::Craft]);

    sim.step(&craft, 0.0).unwrap();
    sim.step(&craft, 0.0).unwrap();

    assert_eq!(sim.hud().campfires, 1);
    assert_eq!(sim.state().player.inventory.wood, 2);
}

#[test]
fn respawn_tops_up_below_threshold() {
    let mut profile = TuningProfile::classic();
    profile.spawn.berries.initial = 0;
    profile.spawn.berries.rate = 1000.0;
    profile.survival.berry_pickup_factor = 0.0;
    let config = SimConfig::default().with_profile(profile).with_seed(5);
    let mut sim = Simulation::with_default_systems(config).unwrap();

    sim.run(60, &ActionState::new(), DT).unwrap();

    // One roll per tick, and only while below the threshold of 10
    assert_eq!(sim.state().registry.count(ResourceKind::Berry), 10);
}

#[test]
fn kinds_at_threshold_do_not_respawn() {
    let config = SimConfig::default().with_seed(9);
    let mut sim = Simulation::with_default_systems(config).unwrap();
    sim.run(600, &ActionState::new(), DT).unwrap();
    // Initial counts already exceed every threshold
    let reg = &sim.state().registry;
    assert_eq!(reg.count(ResourceKind::Tree), 12);
    assert_eq!(reg.count(ResourceKind::Rock), 10);
    assert_eq!(reg.count(ResourceKind::Water), 5);
}

#[test]
fn event_log_is_bounded() {
    let config = SimConfig::default().with_max_events(8);
    let mut sim = Simulation::with_default_systems(config).unwrap();
    sim.init().unwrap();
    assert_eq!(sim.events().len(), 8);
}

#[test]
fn profile_from_file_drives_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slow.json");
    let mut profile = TuningProfile::brisk().without_spawning();
    profile.name = "slow".to_string();
    profile.player.speed = 1.0;
    std::fs::write(&path, profile.to_json_pretty().unwrap()).unwrap();

    let loaded = TuningProfile::load(&path).unwrap();
    let mut sim =
        Simulation::with_default_systems(SimConfig::default().with_profile(loaded)).unwrap();
    let start = sim.state().player.position.x;
    sim.step(&hold(&[Action::Right]), 0.05).unwrap();
    // 1.0 * (1 + 0.4) * 0.05 * 60
    assert!((sim.state().player.position.x - start - 4.2).abs() < 1e-9);
}

fn input_from_mask(mask: u8) -> ActionState {
    let mut state = ActionState::new();
    for (bit, action) in Action::ALL.into_iter().enumerate() {
        state.set(action, mask & (1 << bit) != 0);
    }
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn invariants_hold_for_any_input(
        seed in any::<u64>(),
        frames in proptest::collection::vec((any::<u8>(), -0.05f64..0.2), 1..300),
    ) {
        let mut sim = Simulation::with_default_systems(SimConfig::default().with_seed(seed)).unwrap();
        let margin = sim.profile().player.margin;
        for (mask, dt) in frames {
            let input = input_from_mask(mask);
            let applied = sim.step(&input, dt).unwrap();
            prop_assert!((0.0..=0.06).contains(&applied));

            let state = sim.state();
            for stat in [Stat::Health, Stat::Hunger, Stat::Thirst] {
                prop_assert!((0.0..=100.0).contains(&state.player.vitals.get(stat)));
            }
            let p = state.player.position;
            prop_assert!(p.x >= margin && p.x <= state.bounds.width - margin);
            prop_assert!(p.y >= margin && p.y <= state.bounds.height - margin);
        }

        // Every material credited came from exactly one felled/broken entity
        let felled = count(&sim, |k| matches!(k, SimEventKind::TreeFelled { .. })) as u32;
        let broken = count(&sim, |k| matches!(k, SimEventKind::RockBroken { .. })) as u32;
        let crafted = count(&sim, |k| matches!(k, SimEventKind::CampfireCrafted { .. })) as u32;
        let inv = &sim.state().player.inventory;
        prop_assert_eq!(inv.wood, felled - 2 * crafted);
        prop_assert_eq!(inv.stone, broken - crafted);
        prop_assert_eq!(sim.hud().campfires, crafted);
    }
}
