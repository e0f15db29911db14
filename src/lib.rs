//! Comet Field - procedural difficulty and spawning engine
//!
//! Core modules:
//! - `generation`: Deterministic level generation (difficulty curve, weighted
//!   catalog, region spawners, controller)
//! - `world`: Occupancy/instantiation seam to the host's physics world
//! - `config`: Data-driven generation tuning

pub mod config;
pub mod generation;
pub mod world;

pub use config::{ConfigError, GenerationConfig};
pub use generation::{DifficultyCurve, EntityCatalog, LevelGeneration};
pub use world::{FieldWorld, OccupancyWorld};

/// Generation tuning constants
pub mod consts {
    /// Fixed simulation timestep for the headless demo loop (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Difficulty curve steepness: level = 1 + floor(K * sqrt(xp))
    pub const LEVEL_PROGRESSION_K: f32 = 0.04;
    /// Default level cap
    pub const DEFAULT_MAX_LEVEL: u32 = 12;

    /// Default ambient population target per region
    pub const AMBIENT_POPULATION: usize = 10;
    /// Start region population, pre-placed before play begins
    pub const START_POPULATION: usize = 5;
    /// Minimum free disk around a spawn candidate (world units)
    pub const CLEARANCE_RADIUS: f32 = 5.0;
}
