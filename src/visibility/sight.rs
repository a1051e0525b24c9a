//! Fog of war with permanent discovery
//!
//! Each pass recomputes which hexes are in range and in line of sight of the
//! player. Discovery is a one-way latch: a hex that has been seen once is
//! rendered as visible forever after, even out of range or behind cover.

use serde::{Deserialize, Serialize};

use crate::hex::AxialCoord;
use crate::world::hex::HexMap;

/// Sight radius used when the player's own hex has not been materialized
pub const DEFAULT_SIGHT_RADIUS: u32 = 2;

/// Sight radius of the terrain the player stands on
pub fn sight_radius(hexes: &HexMap, at: AxialCoord) -> u32 {
    hexes
        .get(&at)
        .map(|h| h.terrain.sight_radius())
        .unwrap_or(DEFAULT_SIGHT_RADIUS)
}

/// Check line of sight between two hexes
///
/// Only interior hexes of the line can block; the endpoints never do.
/// Hexes that have not been materialized do not block.
pub fn has_line_of_sight(hexes: &HexMap, from: AxialCoord, to: AxialCoord) -> bool {
    let line = from.line_to(&to);
    line.iter()
        .skip(1)
        .take(line.len().saturating_sub(2))
        .all(|coord| {
            hexes
                .get(coord)
                .map_or(true, |hex| !hex.terrain.blocks_sight())
        })
}

/// Recompute visibility around the player
///
/// Returns a fresh mapping; the input is left untouched.
pub fn calculate_visibility(player: AxialCoord, hexes: &HexMap) -> HexMap {
    let base_visibility = sight_radius(hexes, player);

    let mut updated = hexes.clone();
    for hex in updated.values_mut() {
        hex.visible = false;
        hex.in_range = false;
    }

    if let Some(hex) = updated.get_mut(&player) {
        hex.visible = true;
        hex.in_range = true;
        hex.discovered = true;
        hex.visited = true;
    }

    for target in player.hexes_in_range(base_visibility) {
        if target == player {
            continue;
        }
        if !updated.contains_key(&target) {
            continue;
        }

        // Occlusion is judged against the terrain, which the pass never changes
        let clear = has_line_of_sight(hexes, player, target);
        if let Some(hex) = updated.get_mut(&target) {
            hex.in_range = true;
            if clear {
                hex.visible = true;
                hex.discovered = true;
            }
        }
    }

    for hex in updated.values_mut() {
        if hex.discovered {
            hex.visible = true;
        }
    }

    tracing::debug!(
        "Visibility from {} (radius {}): {}",
        player,
        base_visibility,
        VisibilitySummary::of(&updated)
    );

    updated
}

/// Counts of hexes by visibility state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySummary {
    pub total: usize,
    pub in_range: usize,
    pub visible: usize,
    pub discovered: usize,
    pub visited: usize,
}

impl VisibilitySummary {
    pub fn of(hexes: &HexMap) -> Self {
        let mut summary = Self {
            total: hexes.len(),
            ..Self::default()
        };
        for hex in hexes.values() {
            summary.in_range += hex.in_range as usize;
            summary.visible += hex.visible as usize;
            summary.discovered += hex.discovered as usize;
            summary.visited += hex.visited as usize;
        }
        summary
    }
}

impl std::fmt::Display for VisibilitySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} hexes, {} in range, {} visible, {} discovered, {} visited",
            self.total, self.in_range, self.visible, self.discovered, self.visited
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainType;
    use crate::world::hex::Hex;

    fn open_map(radius: u32) -> HexMap {
        AxialCoord::ORIGIN
            .hexes_in_range(radius)
            .into_iter()
            .map(|c| (c, Hex::new(c, TerrainType::Plains)))
            .collect()
    }

    fn set_terrain(map: &mut HexMap, coord: AxialCoord, terrain: TerrainType) {
        if let Some(hex) = map.get_mut(&coord) {
            hex.terrain = terrain;
        }
    }

    #[test]
    fn test_player_hex_always_marked() {
        let map = open_map(3);
        let result = calculate_visibility(AxialCoord::ORIGIN, &map);
        let own = &result[&AxialCoord::ORIGIN];
        assert!(own.visible && own.in_range && own.discovered && own.visited);
    }

    #[test]
    fn test_plains_sees_two_hexes() {
        let map = open_map(4);
        let result = calculate_visibility(AxialCoord::ORIGIN, &map);
        assert!(result[&AxialCoord::new(2, 0)].visible);
        assert!(result[&AxialCoord::new(-1, 2)].in_range);
        assert!(!result[&AxialCoord::new(3, 0)].in_range);
        assert!(!result[&AxialCoord::new(3, 0)].visible);
    }

    #[test]
    fn test_mountain_occludes_target() {
        let mut map = open_map(3);
        set_terrain(&mut map, AxialCoord::new(1, 0), TerrainType::Mountains);

        let result = calculate_visibility(AxialCoord::ORIGIN, &map);
        let target = &result[&AxialCoord::new(2, 0)];
        assert!(target.in_range);
        assert!(!target.visible);
        assert!(!target.discovered);

        // The blocker itself is an endpoint of its own line and is seen
        assert!(result[&AxialCoord::new(1, 0)].visible);
    }

    #[test]
    fn test_discovery_persists_out_of_range() {
        let map = open_map(6);
        let first = calculate_visibility(AxialCoord::ORIGIN, &map);
        assert!(first[&AxialCoord::new(-2, 0)].discovered);

        let second = calculate_visibility(AxialCoord::new(4, 0), &first);
        let remembered = &second[&AxialCoord::new(-2, 0)];
        assert!(!remembered.in_range);
        assert!(remembered.discovered);
        assert!(remembered.visible);
        assert!(second[&AxialCoord::ORIGIN].visited);
    }

    #[test]
    fn test_input_map_untouched() {
        let map = open_map(2);
        let _ = calculate_visibility(AxialCoord::ORIGIN, &map);
        assert!(map.values().all(|h| !h.visible && !h.discovered));
    }

    #[test]
    fn test_missing_player_hex_uses_default_radius() {
        let mut map = open_map(4);
        map.remove(&AxialCoord::ORIGIN);
        let result = calculate_visibility(AxialCoord::ORIGIN, &map);
        assert!(result[&AxialCoord::new(0, 2)].visible);
        assert!(!result[&AxialCoord::new(0, 3)].in_range);
    }

    #[test]
    fn test_forest_limits_sight() {
        let mut map = open_map(3);
        set_terrain(&mut map, AxialCoord::ORIGIN, TerrainType::Forest);
        let result = calculate_visibility(AxialCoord::ORIGIN, &map);
        assert!(result[&AxialCoord::new(1, 0)].visible);
        assert!(!result[&AxialCoord::new(2, 0)].in_range);
    }

    #[test]
    fn test_summary_counts() {
        let map = open_map(3);
        let result = calculate_visibility(AxialCoord::ORIGIN, &map);
        let summary = VisibilitySummary::of(&result);
        assert_eq!(summary.total, 37);
        assert_eq!(summary.in_range, 19);
        assert_eq!(summary.visible, 19);
        assert_eq!(summary.visited, 1);
    }
}
