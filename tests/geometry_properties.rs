//! Hex geometry, terrain fill and visibility properties

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wildhex::hex::{AxialCoord, HexDirection};
use wildhex::terrain::{
    generate_terrain, walk_feature, FeatureKind, LinearFeatures, TerrainRules, TerrainType,
};
use wildhex::visibility::calculate_visibility;
use wildhex::world::{Hex, HexMap};

fn coord() -> impl Strategy<Value = AxialCoord> {
    (-200i32..200, -200i32..200).prop_map(|(q, r)| AxialCoord::new(q, r))
}

fn map_of(cells: &[(AxialCoord, TerrainType)]) -> HexMap {
    cells
        .iter()
        .map(|(c, t)| (*c, Hex::new(*c, *t)))
        .collect()
}

proptest! {
    #[test]
    fn prop_distance_identity_and_symmetry(a in coord(), b in coord()) {
        prop_assert_eq!(a.distance(&a), 0);
        prop_assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn prop_distance_triangle(a in coord(), b in coord(), c in coord()) {
        prop_assert!(a.distance(&c) <= a.distance(&b) + b.distance(&c));
    }

    #[test]
    fn prop_line_endpoints_length_and_contiguity(a in coord(), b in coord()) {
        let line = a.line_to(&b);
        prop_assert_eq!(line.len() as u32, a.distance(&b) + 1);
        prop_assert_eq!(line[0], a);
        prop_assert_eq!(*line.last().unwrap(), b);
        for pair in line.windows(2) {
            prop_assert_eq!(pair[0].distance(&pair[1]), 1);
        }
    }

    #[test]
    fn prop_range_count(center in coord(), radius in 0u32..8) {
        let hexes = center.hexes_in_range(radius);
        let n = radius as usize;
        prop_assert_eq!(hexes.len(), 3 * n * (n + 1) + 1);
        prop_assert!(hexes.iter().all(|h| center.distance(h) <= radius));
    }

    #[test]
    fn prop_fill_is_deterministic(seed in any::<u64>(), pick in 0usize..4) {
        let terrains = [
            TerrainType::Plains,
            TerrainType::Forest,
            TerrainType::Hills,
            TerrainType::River,
        ];
        let target = AxialCoord::ORIGIN;
        let neighbors: Vec<(AxialCoord, TerrainType)> = target
            .neighbors()
            .iter()
            .enumerate()
            .take(pick + 2)
            .map(|(i, c)| (*c, terrains[(i + pick) % terrains.len()]))
            .collect();
        let existing = map_of(&neighbors);
        let rules = TerrainRules::default();
        let features = LinearFeatures::new();

        let first = generate_terrain(
            target, &existing, &features, &rules, &mut ChaCha8Rng::seed_from_u64(seed),
        );
        let second = generate_terrain(
            target, &existing, &features, &rules, &mut ChaCha8Rng::seed_from_u64(seed),
        );
        prop_assert_eq!(first, second);
        prop_assert!(!first.is_linear());
    }

    #[test]
    fn prop_discovery_survives_any_move(q in -6i32..6, r in -6i32..6) {
        let mut hexes: HexMap = AxialCoord::ORIGIN
            .hexes_in_range(8)
            .into_iter()
            .map(|c| (c, Hex::new(c, TerrainType::Plains)))
            .collect();
        hexes = calculate_visibility(AxialCoord::ORIGIN, &hexes);
        let seen: Vec<AxialCoord> = hexes.values().filter(|h| h.discovered).map(|h| h.coord).collect();

        let moved = calculate_visibility(AxialCoord::new(q, r), &hexes);
        for coord in seen {
            prop_assert!(moved[&coord].discovered);
            prop_assert!(moved[&coord].visible);
        }
    }
}

/// Plains viewer, mountains in between: in range but hidden
#[test]
fn test_mountain_blocks_target() {
    let hexes = map_of(&[
        (AxialCoord::new(0, 0), TerrainType::Plains),
        (AxialCoord::new(1, 0), TerrainType::Mountains),
        (AxialCoord::new(2, 0), TerrainType::Plains),
    ]);
    let result = calculate_visibility(AxialCoord::ORIGIN, &hexes);
    let target = &result[&AxialCoord::new(2, 0)];
    assert!(target.in_range);
    assert!(!target.visible);
    assert!(!target.discovered);
    assert!(result[&AxialCoord::new(1, 0)].visible);
}

/// A river walked with no meander is a straight line
#[test]
fn test_straight_river() {
    let rules = TerrainRules::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let river = walk_feature(
        FeatureKind::River,
        AxialCoord::ORIGIN,
        HexDirection::from_index(0),
        10,
        0.0,
        &rules,
        &mut rng,
    );
    let coords: Vec<AxialCoord> = river.iter().map(|h| h.coord).collect();
    let expected: Vec<AxialCoord> = (0..10).map(|q| AxialCoord::new(q, 0)).collect();
    assert_eq!(coords, expected);
    assert!(river.iter().all(|h| h.terrain == TerrainType::River));
}

/// Linear features override the fill and win over later overlaps
#[test]
fn test_feature_hex_keeps_feature_terrain() {
    let rules = TerrainRules::default();
    let mut features = LinearFeatures::new();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    features.extend(walk_feature(
        FeatureKind::MountainRange,
        AxialCoord::ORIGIN,
        HexDirection::from_index(1),
        3,
        0.0,
        &rules,
        &mut rng,
    ));
    features.extend(walk_feature(
        FeatureKind::River,
        AxialCoord::ORIGIN,
        HexDirection::from_index(0),
        3,
        0.0,
        &rules,
        &mut rng,
    ));

    let existing = HexMap::default();
    let at_origin = generate_terrain(AxialCoord::ORIGIN, &existing, &features, &rules, &mut rng);
    assert!(matches!(at_origin, TerrainType::Mountains | TerrainType::Crags));
    let on_river = generate_terrain(AxialCoord::new(1, 0), &existing, &features, &rules, &mut rng);
    assert_eq!(on_river, TerrainType::River);
}
