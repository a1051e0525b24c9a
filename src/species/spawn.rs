//! Creature spawning from the habitat table

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::definition::{BehaviorType, SpeciesDefinition, SpeciesRegistry};
use super::habitat::HabitatSpawnTable;
use crate::core::types::CreatureId;
use crate::hex::AxialCoord;
use crate::terrain::TerrainType;

/// Lowest maturity a spawned individual can have
pub const MIN_MATURITY: f64 = 0.3;

/// Pack sizes drawn for pack species
pub const PACK_SIZE_RANGE: std::ops::RangeInclusive<u32> = 2..=4;

/// A spawned individual on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureInstance {
    pub id: CreatureId,
    pub species: String,
    pub coord: AxialCoord,
    /// Maturity scalar; multiplies nutrition and weight
    pub size: f64,
    /// Mature enough to count as an adult encounter
    ///
    /// Reported in the spawn event for presentation; combat reads `size`.
    pub adult: bool,
    pub pack_size: u32,
}

impl CreatureInstance {
    /// Effective body weight of this individual
    pub fn weight(&self, species: &SpeciesDefinition) -> f64 {
        species.weight * self.size
    }

    /// Effective nutrition of this individual
    pub fn nutrition(&self, species: &SpeciesDefinition) -> f64 {
        species.nutrition * self.size
    }
}

/// Run the spawn trials for one hex
///
/// Every species listed for the terrain gets an independent roll at its
/// weight, in species-name order. Species absent from the registry are
/// skipped. `next_id` advances once per spawned creature.
pub fn spawn_on_hex<R: Rng + ?Sized>(
    coord: AxialCoord,
    terrain: TerrainType,
    registry: &SpeciesRegistry,
    habitats: &HabitatSpawnTable,
    next_id: &mut CreatureId,
    rng: &mut R,
) -> Vec<CreatureInstance> {
    let Some(weights) = habitats.weights_for(terrain) else {
        return Vec::new();
    };

    let mut spawned = Vec::new();
    for (name, weight) in weights {
        if rng.gen::<f64>() >= *weight {
            continue;
        }
        let Some(species) = registry.get(name) else {
            tracing::warn!("Habitat {} lists unknown species {}; skipped", terrain, name);
            continue;
        };

        let maturity = rng.gen_range(MIN_MATURITY..=1.0);
        let pack_size = if species.behavior == BehaviorType::Pack {
            rng.gen_range(PACK_SIZE_RANGE)
        } else {
            1
        };

        spawned.push(CreatureInstance {
            id: *next_id,
            species: species.name.clone(),
            coord,
            size: maturity,
            adult: species.is_adult_at(maturity),
            pack_size,
        });
        *next_id = next_id.next();
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sure_table() -> (SpeciesRegistry, HabitatSpawnTable) {
        let mut registry = SpeciesRegistry::new();
        registry.insert(SpeciesDefinition::new("Beetle", 0.1, 0.01, 0.5, 0.005));
        registry.insert(
            SpeciesDefinition::new("Raptor", 20.0, 80.0, 1.8, 15.0)
                .with_behavior(BehaviorType::Pack)
                .with_minimum_age(0.5),
        );
        let mut table = HabitatSpawnTable::new();
        table.set_weight(TerrainType::Forest, "Beetle", 1.0);
        table.set_weight(TerrainType::Forest, "Raptor", 1.0);
        table.set_weight(TerrainType::Plains, "Beetle", 0.0);
        (registry, table)
    }

    #[test]
    fn test_certain_weights_spawn_every_species() {
        let (registry, table) = sure_table();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut next_id = CreatureId(1);
        let spawned = spawn_on_hex(
            AxialCoord::ORIGIN,
            TerrainType::Forest,
            &registry,
            &table,
            &mut next_id,
            &mut rng,
        );

        assert_eq!(spawned.len(), 2);
        assert_eq!(spawned[0].species, "Beetle");
        assert_eq!(spawned[0].id, CreatureId(1));
        assert_eq!(spawned[1].id, CreatureId(2));
        assert_eq!(next_id, CreatureId(3));
    }

    #[test]
    fn test_zero_weight_never_spawns() {
        let (registry, table) = sure_table();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut next_id = CreatureId(1);
        for _ in 0..100 {
            let spawned = spawn_on_hex(
                AxialCoord::ORIGIN,
                TerrainType::Plains,
                &registry,
                &table,
                &mut next_id,
                &mut rng,
            );
            assert!(spawned.is_empty());
        }
    }

    #[test]
    fn test_pack_and_maturity() {
        let (registry, table) = sure_table();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut next_id = CreatureId(1);
        for _ in 0..50 {
            let spawned = spawn_on_hex(
                AxialCoord::ORIGIN,
                TerrainType::Forest,
                &registry,
                &table,
                &mut next_id,
                &mut rng,
            );
            let raptor = spawned.iter().find(|c| c.species == "Raptor").unwrap();
            assert!(PACK_SIZE_RANGE.contains(&raptor.pack_size));
            assert!((MIN_MATURITY..=1.0).contains(&raptor.size));
            assert_eq!(raptor.adult, raptor.size >= 0.5);

            let beetle = spawned.iter().find(|c| c.species == "Beetle").unwrap();
            assert_eq!(beetle.pack_size, 1);
            assert!(beetle.adult);
        }
    }

    #[test]
    fn test_unknown_species_skipped() {
        let registry = SpeciesRegistry::new();
        let mut table = HabitatSpawnTable::new();
        table.set_weight(TerrainType::Desert, "Sandworm", 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut next_id = CreatureId(1);
        let spawned = spawn_on_hex(
            AxialCoord::ORIGIN,
            TerrainType::Desert,
            &registry,
            &table,
            &mut next_id,
            &mut rng,
        );
        assert!(spawned.is_empty());
        assert_eq!(next_id, CreatureId(1));
    }

    #[test]
    fn test_size_scales_weight_and_nutrition() {
        let species = SpeciesDefinition::new("Turtle", 4.0, 3.0, 0.6, 5.0);
        let creature = CreatureInstance {
            id: CreatureId(1),
            species: "Turtle".into(),
            coord: AxialCoord::ORIGIN,
            size: 0.5,
            adult: false,
            pack_size: 1,
        };
        assert_eq!(creature.weight(&species), 2.5);
        assert_eq!(creature.nutrition(&species), 2.0);
    }
}
