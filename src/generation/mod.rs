//! Deterministic level generation
//!
//! All spawning logic lives here. This module must stay pure and deterministic:
//! - Driven only by host ticks and experience updates
//! - Seeded RNG only (one `Pcg32` per controller)
//! - Stable region servicing order
//! - No rendering or platform dependencies; the host world is reached through
//!   the `OccupancyWorld` trait

pub mod catalog;
pub mod controller;
pub mod difficulty;
pub mod region;
pub mod spawner;

pub use catalog::{EntityCatalog, EntityCategory, EntityTemplate, Roster, WeightedEntry};
pub use controller::{GenPhase, LevelGeneration};
pub use difficulty::DifficultyCurve;
pub use region::{Rect, SpawnRegion};
pub use spawner::{FillPolicy, RegionSpawner};
