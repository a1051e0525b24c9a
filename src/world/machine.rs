//! World state machine
//!
//! Each dispatch: validate phase -> validate target -> apply to a private
//! copy of the snapshot -> report. The input snapshot is never mutated.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::{resolve_hunt, Diagnostics, HuntOutcome};
use crate::core::config::{CreatureLifetime, WildConfig};
use crate::core::error::Result;
use crate::core::types::{CreatureId, Turn};
use crate::hex::AxialCoord;
use crate::species::{spawn_on_hex, HabitatSpawnTable, SpeciesRegistry};
use crate::terrain::{generate_terrain, generate_terrain_features, TerrainRules, TerrainType};
use crate::visibility::calculate_visibility;
use crate::world::hex::Hex;
use crate::world::snapshot::{EndCause, WorldPhase, WorldSnapshot};

/// Everything a caller can ask the world to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldAction {
    GenerateTerrainFeatures,
    GenerateHex(AxialCoord),
    UpdateVisibility,
    MovePlayer(AxialCoord),
    SpawnCreatures,
    Hunt(CreatureId),
}

impl WorldAction {
    pub fn name(&self) -> &'static str {
        match self {
            WorldAction::GenerateTerrainFeatures => "generate terrain features",
            WorldAction::GenerateHex(_) => "generate hex",
            WorldAction::UpdateVisibility => "update visibility",
            WorldAction::MovePlayer(_) => "move player",
            WorldAction::SpawnCreatures => "spawn creatures",
            WorldAction::Hunt(_) => "hunt",
        }
    }
}

/// Why an action was refused; the snapshot is returned unchanged
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,

    #[error("cannot {action} while {phase}")]
    WrongPhase {
        action: &'static str,
        phase: WorldPhase,
    },

    #[error("hex {0} does not exist")]
    UnknownHex(AxialCoord),

    #[error("hex {target} is not adjacent to {from}")]
    NotAdjacent { from: AxialCoord, target: AxialCoord },

    #[error("hex {0} is not visible")]
    NotVisible(AxialCoord),

    #[error("hex {0} is impassable {1}")]
    Impassable(AxialCoord, TerrainType),

    #[error("no creature {0}")]
    UnknownCreature(CreatureId),

    #[error("creature {id} at {at} is out of reach")]
    OutOfReach { id: CreatureId, at: AxialCoord },

    #[error("creature {id} has unknown species {species}")]
    UnknownSpecies { id: CreatureId, species: String },
}

/// Something notable that happened during a transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub turn: Turn,
    pub event_type: WorldEventType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEventType {
    PhaseChanged { from: WorldPhase, to: WorldPhase },
    HexGenerated { coord: AxialCoord, terrain: TerrainType },
    PlayerMoved { from: AxialCoord, to: AxialCoord },
    CreatureSpawned {
        id: CreatureId,
        species: String,
        coord: AxialCoord,
        size: f64,
        adult: bool,
    },
    CreatureRoamed { id: CreatureId, from: AxialCoord, to: AxialCoord },
    CreatureDespawned { id: CreatureId },
    Hunted(HuntOutcome),
    GameEnded(EndCause),
}

/// What an accepted action did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub events: Vec<WorldEvent>,
    /// The caller should issue `SpawnCreatures` once its settle delay passes
    pub spawn_pending: bool,
    /// Combat inputs that had to be replaced
    pub diagnostics: Diagnostics,
}

impl ActionReport {
    fn push(&mut self, turn: Turn, event_type: WorldEventType) {
        self.events.push(WorldEvent { turn, event_type });
    }

    /// Append a later report's events and diagnostics
    pub fn merge(&mut self, later: ActionReport) {
        self.events.extend(later.events);
        self.spawn_pending = later.spawn_pending;
        self.diagnostics.absorb(later.diagnostics);
    }

    pub fn generated_hexes(&self) -> usize {
        self.count(|e| matches!(e, WorldEventType::HexGenerated { .. }))
    }

    pub fn spawned(&self) -> usize {
        self.count(|e| matches!(e, WorldEventType::CreatureSpawned { .. }))
    }

    pub fn despawned(&self) -> usize {
        self.count(|e| matches!(e, WorldEventType::CreatureDespawned { .. }))
    }

    pub fn hunt(&self) -> Option<&HuntOutcome> {
        self.events.iter().find_map(|e| match &e.event_type {
            WorldEventType::Hunted(outcome) => Some(outcome),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&WorldEventType) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.event_type)).count()
    }
}

/// Result of one dispatch: the next snapshot plus what happened
#[derive(Debug, Clone)]
pub struct Transition {
    pub snapshot: WorldSnapshot,
    pub outcome: std::result::Result<ActionReport, Rejection>,
}

impl Transition {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Drives world snapshots through their phases
///
/// Holds only read-only configuration and reference data; all mutable state
/// lives in the snapshots passed through `dispatch`.
#[derive(Debug, Clone)]
pub struct WorldEngine {
    pub config: WildConfig,
    pub terrain_rules: TerrainRules,
    pub registry: SpeciesRegistry,
    pub habitats: HabitatSpawnTable,
}

impl WorldEngine {
    pub fn new(
        config: WildConfig,
        terrain_rules: TerrainRules,
        registry: SpeciesRegistry,
        habitats: HabitatSpawnTable,
    ) -> Self {
        Self {
            config,
            terrain_rules,
            registry,
            habitats,
        }
    }

    /// Engine with the bundled species and habitat tables
    pub fn with_defaults(config: WildConfig) -> Result<Self> {
        config.validate()?;
        let registry = SpeciesRegistry::with_defaults()?;
        let habitats = HabitatSpawnTable::with_defaults()?;
        habitats.validate_against(&registry)?;
        Ok(Self::new(config, TerrainRules::default(), registry, habitats))
    }

    /// A fresh, empty world
    pub fn new_world(&self) -> WorldSnapshot {
        WorldSnapshot::new(&self.config)
    }

    /// Run the full initialization sequence and return a playable world
    ///
    /// Features are placed, the area around the player is materialized,
    /// visibility is computed (entering Exploring) and a first spawn pass
    /// runs. The report collects the events of every startup step.
    pub fn start<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> std::result::Result<(WorldSnapshot, ActionReport), Rejection> {
        let mut report = ActionReport::default();
        let world = self.new_world();
        let mut world = self.apply(&world, WorldAction::GenerateTerrainFeatures, &mut report, rng)?;

        let position = self.starting_position(&world);
        world.player.position = position;
        self.materialize_around(&mut world, position, &mut report, rng);

        let world = self.apply(&world, WorldAction::UpdateVisibility, &mut report, rng)?;
        let world = self.apply(&world, WorldAction::SpawnCreatures, &mut report, rng)?;
        tracing::info!(
            "World started at {} with {} hexes and {} creatures",
            world.player.position,
            world.hexes.len(),
            world.creature_count()
        );
        Ok((world, report))
    }

    /// Dispatch an action, folding its report into `report`
    fn apply<R: Rng + ?Sized>(
        &self,
        snapshot: &WorldSnapshot,
        action: WorldAction,
        report: &mut ActionReport,
        rng: &mut R,
    ) -> std::result::Result<WorldSnapshot, Rejection> {
        let transition = self.dispatch(snapshot, action, rng);
        report.merge(transition.outcome?);
        Ok(transition.snapshot)
    }

    /// Apply one action to a snapshot
    ///
    /// Rejected actions hand back an unchanged copy of the input.
    pub fn dispatch<R: Rng + ?Sized>(
        &self,
        snapshot: &WorldSnapshot,
        action: WorldAction,
        rng: &mut R,
    ) -> Transition {
        let mut next = snapshot.clone();
        let mut report = ActionReport::default();

        let result = self.step(&mut next, action, &mut report, rng);
        match result {
            Ok(()) => {
                tracing::debug!(
                    "Applied {} at turn {} ({} events)",
                    action.name(),
                    next.turn,
                    report.events.len()
                );
                Transition {
                    snapshot: next,
                    outcome: Ok(report),
                }
            }
            Err(rejection) => {
                tracing::debug!("Rejected {}: {}", action.name(), rejection);
                Transition {
                    snapshot: snapshot.clone(),
                    outcome: Err(rejection),
                }
            }
        }
    }

    fn step<R: Rng + ?Sized>(
        &self,
        world: &mut WorldSnapshot,
        action: WorldAction,
        report: &mut ActionReport,
        rng: &mut R,
    ) -> std::result::Result<(), Rejection> {
        if world.is_game_over() {
            return Err(Rejection::GameOver);
        }

        match action {
            WorldAction::GenerateTerrainFeatures => {
                require_phase(world, action, WorldPhase::Initializing)?;
                world.features = generate_terrain_features(
                    world.player.position,
                    self.config.feature_radius,
                    &self.terrain_rules,
                    rng,
                );
                set_phase(world, WorldPhase::GeneratingFeatures, report);
            }
            WorldAction::GenerateHex(coord) => {
                self.materialize(world, coord, report, rng);
            }
            WorldAction::UpdateVisibility => {
                world.hexes = calculate_visibility(world.player.position, &world.hexes);
                if world.phase == WorldPhase::GeneratingFeatures
                    && world.hexes.contains_key(&world.player.position)
                {
                    set_phase(world, WorldPhase::Exploring, report);
                }
            }
            WorldAction::MovePlayer(target) => {
                require_phase(world, action, WorldPhase::Exploring)?;
                self.move_player(world, target, report, rng)?;
            }
            WorldAction::SpawnCreatures => {
                require_phase(world, action, WorldPhase::Exploring)?;
                self.spawn_creatures(world, report, rng);
            }
            WorldAction::Hunt(id) => {
                require_phase(world, action, WorldPhase::Exploring)?;
                self.hunt(world, id, report, rng)?;
            }
        }

        Ok(())
    }

    /// Generate a hex if it does not exist yet
    fn materialize<R: Rng + ?Sized>(
        &self,
        world: &mut WorldSnapshot,
        coord: AxialCoord,
        report: &mut ActionReport,
        rng: &mut R,
    ) {
        if world.hexes.contains_key(&coord) {
            return;
        }
        let terrain = generate_terrain(coord, &world.hexes, &world.features, &self.terrain_rules, rng);
        world.hexes.insert(coord, Hex::new(coord, terrain));
        report.push(world.turn, WorldEventType::HexGenerated { coord, terrain });
    }

    /// Generate every missing hex within the reveal radius, nearest first
    fn materialize_around<R: Rng + ?Sized>(
        &self,
        world: &mut WorldSnapshot,
        center: AxialCoord,
        report: &mut ActionReport,
        rng: &mut R,
    ) {
        let mut coords = center.hexes_in_range(self.config.reveal_radius);
        coords.sort_by_key(|c| center.distance(c));
        for coord in coords {
            self.materialize(world, coord, report, rng);
        }
    }

    /// Nearest hex to the origin not claimed by an impassable feature
    fn starting_position(&self, world: &WorldSnapshot) -> AxialCoord {
        let origin = world.player.position;
        let mut candidates = origin.hexes_in_range(self.config.feature_radius.unsigned_abs());
        candidates.sort_by_key(|c| origin.distance(c));
        candidates
            .into_iter()
            .find(|c| {
                world
                    .features
                    .terrain_at(*c)
                    .map_or(true, |t| t.is_passable())
            })
            .unwrap_or(origin)
    }

    fn move_player<R: Rng + ?Sized>(
        &self,
        world: &mut WorldSnapshot,
        target: AxialCoord,
        report: &mut ActionReport,
        rng: &mut R,
    ) -> std::result::Result<(), Rejection> {
        let from = world.player.position;
        let hex = world.hex(target).ok_or(Rejection::UnknownHex(target))?;
        if !from.is_adjacent(&target) {
            return Err(Rejection::NotAdjacent { from, target });
        }
        if !hex.visible {
            return Err(Rejection::NotVisible(target));
        }
        if !hex.terrain.is_passable() {
            return Err(Rejection::Impassable(target, hex.terrain));
        }

        world.player.position = target;
        world.moves += 1;
        world.turn += 1;
        if let Some(hex) = world.hexes.get_mut(&target) {
            hex.visited = true;
        }
        report.push(world.turn, WorldEventType::PlayerMoved { from, to: target });

        world.player.spend_move(&self.config);
        if !world.player.is_alive() {
            end_game(world, EndCause::Starved, report);
            return Ok(());
        }

        self.materialize_around(world, target, report, rng);
        world.hexes = calculate_visibility(target, &world.hexes);
        self.roam_creatures(world, report, rng);
        self.apply_lifetime_policy(world, report);

        report.spawn_pending = true;
        Ok(())
    }

    /// Each creature may wander to a random passable neighbor
    fn roam_creatures<R: Rng + ?Sized>(
        &self,
        world: &mut WorldSnapshot,
        report: &mut ActionReport,
        rng: &mut R,
    ) {
        let ids: Vec<CreatureId> = world.creatures_sorted().iter().map(|c| c.id).collect();
        for id in ids {
            if rng.gen::<f64>() >= self.config.roaming_rate {
                continue;
            }
            let Some(from) = world.creature(id).map(|c| c.coord) else {
                continue;
            };
            let options: Vec<AxialCoord> = from
                .neighbors()
                .into_iter()
                .filter(|n| world.hex(*n).is_some_and(|h| h.terrain.is_passable()))
                .collect();
            if options.is_empty() {
                continue;
            }
            let to = options[rng.gen_range(0..options.len())];
            if let Some(mut creature) = world.remove_creature(id) {
                creature.coord = to;
                world.place_creature(creature);
                report.push(world.turn, WorldEventType::CreatureRoamed { id, from, to });
            }
        }
    }

    fn apply_lifetime_policy(&self, world: &mut WorldSnapshot, report: &mut ActionReport) {
        if self.config.creature_lifetime == CreatureLifetime::UntilHunted {
            return;
        }
        let gone: Vec<CreatureId> = world
            .creatures_sorted()
            .iter()
            .filter(|c| !world.hex(c.coord).is_some_and(|h| h.in_range))
            .map(|c| c.id)
            .collect();
        for id in gone {
            world.remove_creature(id);
            report.push(world.turn, WorldEventType::CreatureDespawned { id });
        }
    }

    /// Spawn trials on in-range hexes that were not in range last pass
    fn spawn_creatures<R: Rng + ?Sized>(
        &self,
        world: &mut WorldSnapshot,
        report: &mut ActionReport,
        rng: &mut R,
    ) {
        let in_range: Vec<AxialCoord> = world
            .sorted_coords()
            .into_iter()
            .filter(|c| world.hexes[c].in_range)
            .collect();

        for coord in &in_range {
            if *coord == world.player.position || world.spawn_frontier.contains(coord) {
                continue;
            }
            let terrain = world.hexes[coord].terrain;
            let spawned = spawn_on_hex(
                *coord,
                terrain,
                &self.registry,
                &self.habitats,
                &mut world.next_creature_id,
                rng,
            );
            for creature in spawned {
                report.push(
                    world.turn,
                    WorldEventType::CreatureSpawned {
                        id: creature.id,
                        species: creature.species.clone(),
                        coord: creature.coord,
                        size: creature.size,
                        adult: creature.adult,
                    },
                );
                world.place_creature(creature);
            }
        }

        world.spawn_frontier = in_range.into_iter().collect();
    }

    fn hunt<R: Rng + ?Sized>(
        &self,
        world: &mut WorldSnapshot,
        id: CreatureId,
        report: &mut ActionReport,
        rng: &mut R,
    ) -> std::result::Result<(), Rejection> {
        let creature = world
            .creature(id)
            .cloned()
            .ok_or(Rejection::UnknownCreature(id))?;
        if world.player.position.distance(&creature.coord) > 1 {
            return Err(Rejection::OutOfReach {
                id,
                at: creature.coord,
            });
        }
        let species = self
            .registry
            .get(&creature.species)
            .ok_or_else(|| Rejection::UnknownSpecies {
                id,
                species: creature.species.clone(),
            })?;

        let mut diag = Diagnostics::new();
        let outcome = resolve_hunt(&world.player, &creature, species, &self.config, rng, &mut diag);
        world.remove_creature(id);
        outcome.apply(&mut world.player, &self.config);
        report.diagnostics = diag;
        report.push(world.turn, WorldEventType::Hunted(outcome.clone()));

        if outcome.lethal || !world.player.is_alive() {
            end_game(
                world,
                EndCause::KilledBy {
                    species: outcome.species,
                },
                report,
            );
        }
        Ok(())
    }
}

fn require_phase(
    world: &WorldSnapshot,
    action: WorldAction,
    phase: WorldPhase,
) -> std::result::Result<(), Rejection> {
    if world.phase == phase {
        Ok(())
    } else {
        Err(Rejection::WrongPhase {
            action: action.name(),
            phase: world.phase,
        })
    }
}

fn set_phase(world: &mut WorldSnapshot, phase: WorldPhase, report: &mut ActionReport) {
    let from = world.phase;
    world.phase = phase;
    tracing::info!("World phase {} -> {}", from, phase);
    report.push(world.turn, WorldEventType::PhaseChanged { from, to: phase });
}

fn end_game(world: &mut WorldSnapshot, cause: EndCause, report: &mut ActionReport) {
    tracing::info!("Game over at turn {}: {}", world.turn, cause);
    world.end_cause = Some(cause.clone());
    set_phase(world, WorldPhase::GameOver, report);
    report.push(world.turn, WorldEventType::GameEnded(cause));
}
