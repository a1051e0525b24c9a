//! World state machine integration tests
//!
//! Plays seeded sessions through the public dispatch API and checks the
//! invariants that must hold after every transition.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

use wildhex::core::{CreatureLifetime, WildConfig};
use wildhex::hex::AxialCoord;
use wildhex::world::{Rejection, WorldAction, WorldEngine, WorldPhase, WorldSnapshot};

fn engine_with(config: WildConfig) -> WorldEngine {
    WorldEngine::with_defaults(config).unwrap()
}

fn random_step(world: &WorldSnapshot, rng: &mut ChaCha8Rng) -> Option<AxialCoord> {
    let options: Vec<AxialCoord> = world
        .player
        .position
        .neighbors()
        .into_iter()
        .filter(|n| {
            world
                .hex(*n)
                .is_some_and(|h| h.visible && h.terrain.is_passable())
        })
        .collect();
    if options.is_empty() {
        None
    } else {
        Some(options[rng.gen_range(0..options.len())])
    }
}

fn discovered(world: &WorldSnapshot) -> BTreeSet<AxialCoord> {
    world
        .hexes
        .values()
        .filter(|h| h.discovered)
        .map(|h| h.coord)
        .collect()
}

/// Walk a session and check the per-turn invariants
#[test]
fn test_random_walk_invariants() {
    let engine = engine_with(WildConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let (mut world, _) = engine.start(&mut rng).unwrap();

    for _ in 0..40 {
        let Some(target) = random_step(&world, &mut rng) else {
            break;
        };
        let before_hexes = world.hexes.len();
        let before_discovered = discovered(&world);

        let moved = engine.dispatch(&world, WorldAction::MovePlayer(target), &mut rng);
        assert!(moved.is_accepted(), "{:?}", moved.outcome);
        let next = engine
            .dispatch(&moved.snapshot, WorldAction::SpawnCreatures, &mut rng)
            .snapshot;

        // Hexes are only ever added
        assert!(next.hexes.len() >= before_hexes);
        // Discovery is a one-way latch and always renders visible
        let after = discovered(&next);
        assert!(before_discovered.is_subset(&after));
        for coord in &after {
            assert!(next.hexes[coord].visible);
        }
        // The player's hex is visited and passable
        let here = next.hex(next.player.position).unwrap();
        assert!(here.visited);
        assert!(here.terrain.is_passable());
        // Default lifetime: every creature stands on an in-range hex
        for creature in next.creatures_sorted() {
            assert!(next.hexes[&creature.coord].in_range);
        }

        world = next;
        if world.is_game_over() {
            break;
        }
    }
}

/// The same seed replays the same session
#[test]
fn test_seeded_sessions_replay() {
    let engine = engine_with(WildConfig::default());

    let play = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (mut world, _) = engine.start(&mut rng).unwrap();
        for _ in 0..15 {
            let Some(target) = random_step(&world, &mut rng) else {
                break;
            };
            world = engine
                .dispatch(&world, WorldAction::MovePlayer(target), &mut rng)
                .snapshot;
            world = engine
                .dispatch(&world, WorldAction::SpawnCreatures, &mut rng)
                .snapshot;
        }
        world
    };

    let a = play(77);
    let b = play(77);
    assert_eq!(a.player, b.player);
    assert_eq!(a.sorted_coords(), b.sorted_coords());
    for coord in a.sorted_coords() {
        assert_eq!(a.hexes[&coord], b.hexes[&coord]);
    }
    let ids_a: Vec<_> = a.creatures_sorted().iter().map(|c| (c.id, c.coord)).collect();
    let ids_b: Vec<_> = b.creatures_sorted().iter().map(|c| (c.id, c.coord)).collect();
    assert_eq!(ids_a, ids_b);
}

/// Creatures persist out of range when configured to live until hunted
#[test]
fn test_until_hunted_keeps_creatures() {
    let config = WildConfig {
        creature_lifetime: CreatureLifetime::UntilHunted,
        roaming_rate: 0.0,
        ..WildConfig::default()
    };
    let engine = engine_with(config);
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let (mut world, _) = engine.start(&mut rng).unwrap();
    let mut seen = world.creature_count();

    for _ in 0..20 {
        let Some(target) = random_step(&world, &mut rng) else {
            break;
        };
        let moved = engine.dispatch(&world, WorldAction::MovePlayer(target), &mut rng);
        assert_eq!(moved.outcome.as_ref().unwrap().despawned(), 0);
        let spawned = engine.dispatch(&moved.snapshot, WorldAction::SpawnCreatures, &mut rng);
        seen += spawned.outcome.as_ref().unwrap().spawned();
        world = spawned.snapshot;
        assert_eq!(world.creature_count(), seen);
    }
}

/// Illegal transitions return the input unchanged with a reason
#[test]
fn test_rejections_leave_snapshot_untouched() {
    let engine = engine_with(WildConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let (world, _) = engine.start(&mut rng).unwrap();

    let far = AxialCoord::new(world.player.position.q + 3, world.player.position.r);
    let t = engine.dispatch(&world, WorldAction::MovePlayer(far), &mut rng);
    assert!(matches!(t.outcome, Err(Rejection::NotAdjacent { .. })));
    assert_eq!(t.snapshot.player, world.player);
    assert_eq!(t.snapshot.turn, world.turn);

    let t = engine.dispatch(&world, WorldAction::GenerateTerrainFeatures, &mut rng);
    assert!(matches!(
        t.outcome,
        Err(Rejection::WrongPhase {
            phase: WorldPhase::Exploring,
            ..
        })
    ));
}

/// Day and night alternate with the configured cycle
#[test]
fn test_day_night_follows_turns() {
    let config = WildConfig {
        day_length: 3,
        night_length: 2,
        ..WildConfig::default()
    };
    let engine = engine_with(config.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let (mut world, _) = engine.start(&mut rng).unwrap();

    for _ in 0..10 {
        let Some(target) = random_step(&world, &mut rng) else {
            break;
        };
        world = engine
            .dispatch(&world, WorldAction::MovePlayer(target), &mut rng)
            .snapshot;
        if world.is_game_over() {
            break;
        }
        let expect_day = world.turn % 5 < 3;
        assert_eq!(
            world.time_of_day(&config) == wildhex::core::TimeOfDay::Day,
            expect_day
        );
    }
}
