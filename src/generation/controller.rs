//! Level generation orchestration
//!
//! Owns the difficulty state, the active roster, and every region spawner.
//! The host owns the loop and the world: it calls `start` once, `tick` every
//! fixed step, `update_level` whenever experience changes, and `restart` at
//! round boundaries.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{ConfigError, GenerationConfig};
use crate::generation::catalog::{EntityCatalog, Roster};
use crate::generation::difficulty::DifficultyCurve;
use crate::generation::spawner::RegionSpawner;
use crate::world::{EntityClass, OccupancyWorld};

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenPhase {
    /// Constructed, no round started yet
    Uninitialized,
    /// Round running; `tick` maintains density
    Active,
}

/// Orchestrates difficulty transitions and drives every region spawner.
#[derive(Debug)]
pub struct LevelGeneration {
    curve: DifficultyCurve,
    catalog: EntityCatalog,
    start_spawner: RegionSpawner,
    ambient_spawners: Vec<RegionSpawner>,
    clearance_radius: f32,
    /// Flattened pool for the active band; rebuilt lazily on first use and on
    /// every band change
    roster: Roster,
    level: u32,
    active_category: usize,
    rng: Pcg32,
    phase: GenPhase,
    entities_requested: u64,
    roster_rebuilds: u32,
}

impl LevelGeneration {
    /// Validates the whole configuration up front; a catalog that could
    /// produce an empty roster never becomes a controller.
    pub fn new(config: GenerationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = EntityCatalog::new(config.categories)?;
        let curve = DifficultyCurve::new(config.progression_k, config.max_level);
        let level = curve.floor_level();
        let active_category = catalog.category_index_for(level);
        let ambient_target = catalog.category(active_category).target_population;

        Ok(Self {
            curve,
            start_spawner: RegionSpawner::new(config.start_region, config.start_population),
            ambient_spawners: config
                .regions
                .into_iter()
                .map(|region| RegionSpawner::new(region, ambient_target))
                .collect(),
            clearance_radius: config.clearance_radius,
            roster: Roster::default(),
            level,
            active_category,
            catalog,
            rng: Pcg32::seed_from_u64(seed),
            phase: GenPhase::Uninitialized,
            entities_requested: 0,
            roster_rebuilds: 0,
        })
    }

    /// Current difficulty level (read-only to collaborators)
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> GenPhase {
        self.phase
    }

    /// Total instantiate requests issued so far
    pub fn entities_requested(&self) -> u64 {
        self.entities_requested
    }

    /// Times the roster pool has been (re)built
    pub fn roster_rebuilds(&self) -> u32 {
        self.roster_rebuilds
    }

    /// Name of the active difficulty band
    pub fn active_category_name(&self) -> &str {
        &self.catalog.category(self.active_category).name
    }

    /// Begin the first round: level at the curve floor, fresh roster, start
    /// region pre-populated before control returns to the host.
    pub fn start<W: OccupancyWorld>(&mut self, world: &mut W) {
        if self.phase != GenPhase::Uninitialized {
            debug_assert!(false, "start called on an active controller");
            log::error!("start called on an active controller; ignoring");
            return;
        }
        self.level = self.curve.floor_level();
        self.apply_category(self.catalog.category_index_for(self.level));
        let placed = self.start_spawner.fill_to_target(
            world,
            &self.roster,
            &mut self.rng,
            self.clearance_radius,
        );
        self.entities_requested += placed as u64;
        self.phase = GenPhase::Active;
        log::info!(
            "round start: {placed} entities pre-placed in `{}`",
            self.start_spawner.region().name
        );
    }

    /// Clear the field and refill for a new round. Valid only once started.
    pub fn restart<W: OccupancyWorld>(&mut self, world: &mut W) {
        if self.phase != GenPhase::Active {
            debug_assert!(false, "restart called before start");
            log::error!("restart called before start; ignoring");
            return;
        }
        world.destroy_all(EntityClass::Hazard);
        world.destroy_all(EntityClass::Projectile);
        self.level = self.curve.floor_level();
        self.apply_category(self.catalog.category_index_for(self.level));
        let placed = self.start_spawner.fill_to_target(
            world,
            &self.roster,
            &mut self.rng,
            self.clearance_radius,
        );
        self.entities_requested += placed as u64;
        log::info!("round restart: field cleared, {placed} entities pre-placed");
    }

    /// React to an experience update from the progression side. The roster is
    /// rebuilt only when the difficulty band actually changes, not on every
    /// level bump.
    pub fn update_level(&mut self, xp: f32) {
        let new_level = self.curve.level_for(xp);
        if new_level == self.level {
            return;
        }
        log::debug!("level {} -> {}", self.level, new_level);
        self.level = new_level;
        self.apply_category(self.catalog.category_index_for(new_level));
    }

    /// Drive every ambient spawner once, in stable order. Invoke once per
    /// fixed simulation step; placement cadence comes from the host's tick
    /// rate, not from wall time.
    pub fn tick<W: OccupancyWorld>(&mut self, world: &mut W) {
        if self.phase != GenPhase::Active {
            return;
        }
        for spawner in &self.ambient_spawners {
            let placed = spawner.tick(world, &self.roster, &mut self.rng, self.clearance_radius);
            self.entities_requested += placed as u64;
        }
    }

    /// Retarget ambient spawners for `index` and rebuild the roster when the
    /// band changed (or was never built).
    fn apply_category(&mut self, index: usize) {
        let target = self.catalog.category(index).target_population;
        for spawner in &mut self.ambient_spawners {
            spawner.set_target_population(target);
        }
        if index != self.active_category || self.roster.is_empty() {
            let category = self.catalog.category(index);
            self.roster = Roster::build(category);
            self.active_category = index;
            self.roster_rebuilds += 1;
            log::info!(
                "level {}: roster -> `{}` ({} slots, ambient target {})",
                self.level,
                category.name,
                self.roster.len(),
                target
            );
        }
    }
}
