//! Data-driven generation tuning
//!
//! Everything the generator needs to run a field: curve constants, region
//! bounds, population targets, and the weighted catalog. Hosts load it from
//! JSON or start from the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    AMBIENT_POPULATION, CLEARANCE_RADIUS, DEFAULT_MAX_LEVEL, LEVEL_PROGRESSION_K, START_POPULATION,
};
use crate::generation::{EntityCategory, Rect, SpawnRegion, WeightedEntry};

/// Template handles used by the default catalog; the host maps them to actual
/// prefabs/archetypes.
pub mod templates {
    use crate::generation::EntityTemplate;

    pub const SMALL_PLANET: EntityTemplate = EntityTemplate(1);
    pub const LARGE_PLANET: EntityTemplate = EntityTemplate(2);
    pub const SUN: EntityTemplate = EntityTemplate(3);
    pub const BLACK_HOLE: EntityTemplate = EntityTemplate(4);
    pub const HEALTH_PICKUP: EntityTemplate = EntityTemplate(5);
    pub const COIN_PICKUP: EntityTemplate = EntityTemplate(6);
}

/// Startup-fatal configuration problems. The engine refuses to run with a
/// catalog or region set that could wedge placement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("entity catalog has no categories")]
    EmptyCatalog,
    #[error("category `{0}` has no entries")]
    EmptyCategory(String),
    #[error("category `{0}` has zero total weight")]
    ZeroWeight(String),
    #[error("`{0}` has a zero population target")]
    ZeroTarget(String),
    #[error("region `{0}` has degenerate bounds")]
    DegenerateRegion(String),
    #[error("progression constant must be finite and positive (got {0})")]
    BadProgression(f32),
    #[error("max level must be at least 1")]
    BadMaxLevel,
    #[error("clearance radius must be finite and positive (got {0})")]
    BadClearance(f32),
}

/// Full generation tuning for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Curve steepness: level = 1 + floor(k * sqrt(xp))
    pub progression_k: f32,
    /// Inclusive level cap
    pub max_level: u32,
    /// Minimum free disk around a spawn candidate (world units)
    pub clearance_radius: f32,
    /// Population pre-placed in the start region before play begins
    pub start_population: usize,
    /// Launch corridor, filled synchronously at round start
    pub start_region: SpawnRegion,
    /// Ambient regions, serviced once per tick in order
    pub regions: Vec<SpawnRegion>,
    /// Difficulty bands; sorted by the catalog at construction
    pub categories: Vec<EntityCategory>,
}

impl Default for GenerationConfig {
    /// Tuning of the original field: a launch corridor around the comet's
    /// start, flanked by two deeper bands that keep the field populated as it
    /// scrolls past.
    fn default() -> Self {
        Self {
            progression_k: LEVEL_PROGRESSION_K,
            max_level: DEFAULT_MAX_LEVEL,
            clearance_radius: CLEARANCE_RADIUS,
            start_population: START_POPULATION,
            start_region: SpawnRegion::new(
                "launch-corridor",
                Rect::from_center(Vec2::new(0.0, 60.0), Vec2::new(45.0, 50.0)),
            ),
            regions: vec![
                SpawnRegion::new(
                    "field-near",
                    Rect::from_center(Vec2::new(0.0, 220.0), Vec2::new(90.0, 100.0)),
                ),
                SpawnRegion::new(
                    "field-deep",
                    Rect::from_center(Vec2::new(0.0, 460.0), Vec2::new(90.0, 130.0)),
                ),
            ],
            categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<EntityCategory> {
    let entry = |template, weight| WeightedEntry { template, weight };
    vec![
        EntityCategory {
            name: "calm-space".into(),
            min_level: 1,
            target_population: AMBIENT_POPULATION,
            entries: vec![
                entry(templates::SMALL_PLANET, 4),
                entry(templates::LARGE_PLANET, 2),
                entry(templates::HEALTH_PICKUP, 1),
                entry(templates::COIN_PICKUP, 1),
            ],
        },
        EntityCategory {
            name: "burning-space".into(),
            min_level: 4,
            target_population: AMBIENT_POPULATION + 2,
            entries: vec![
                entry(templates::SMALL_PLANET, 3),
                entry(templates::LARGE_PLANET, 3),
                entry(templates::SUN, 2),
                entry(templates::HEALTH_PICKUP, 1),
                entry(templates::COIN_PICKUP, 1),
            ],
        },
        EntityCategory {
            name: "deep-space".into(),
            min_level: 8,
            target_population: AMBIENT_POPULATION + 4,
            entries: vec![
                entry(templates::SMALL_PLANET, 2),
                entry(templates::LARGE_PLANET, 3),
                entry(templates::SUN, 3),
                entry(templates::BLACK_HOLE, 1),
                entry(templates::COIN_PICKUP, 1),
            ],
        },
    ]
}

impl GenerationConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Startup validation; run before the controller is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.progression_k.is_finite() && self.progression_k > 0.0) {
            return Err(ConfigError::BadProgression(self.progression_k));
        }
        if self.max_level == 0 {
            return Err(ConfigError::BadMaxLevel);
        }
        if !(self.clearance_radius.is_finite() && self.clearance_radius > 0.0) {
            return Err(ConfigError::BadClearance(self.clearance_radius));
        }
        if self.start_population == 0 {
            return Err(ConfigError::ZeroTarget(self.start_region.name.clone()));
        }
        for region in std::iter::once(&self.start_region).chain(&self.regions) {
            if region.bounds.is_degenerate() {
                return Err(ConfigError::DegenerateRegion(region.name.clone()));
            }
        }
        if self.categories.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for category in &self.categories {
            category.validate()?;
        }
        Ok(())
    }
}
