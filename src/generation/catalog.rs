//! Weighted entity catalog and per-level rosters
//!
//! Each difficulty band owns a weighted set of spawnable templates. The band
//! active for a level is the one with the greatest `min_level` at or below it;
//! its entries flatten into a roster pool where a template with weight `w`
//! occupies `w` slots, so a uniform draw over the pool is a weighted draw.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Copyable handle to a host-owned entity definition (prefab, archetype...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityTemplate(pub u32);

/// One spawnable template plus its relative draw frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEntry {
    pub template: EntityTemplate,
    /// Contributes `weight` slots to the roster pool
    pub weight: u32,
}

/// One difficulty band, active once the level reaches `min_level`.
///
/// Immutable after catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCategory {
    pub name: String,
    /// Lowest level at which this band takes over
    pub min_level: u32,
    /// Ambient population target while this band is active
    pub target_population: usize,
    pub entries: Vec<WeightedEntry>,
}

impl EntityCategory {
    fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// A band that could produce an empty roster, or one that would idle
    /// every ambient spawner, is a configuration bug.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::EmptyCategory(self.name.clone()));
        }
        if self.total_weight() == 0 {
            return Err(ConfigError::ZeroWeight(self.name.clone()));
        }
        if self.target_population == 0 {
            return Err(ConfigError::ZeroTarget(self.name.clone()));
        }
        Ok(())
    }
}

/// Immutable level -> category mapping, validated at startup.
#[derive(Debug, Clone)]
pub struct EntityCatalog {
    /// Sorted by `min_level` ascending
    categories: Vec<EntityCategory>,
}

impl EntityCatalog {
    /// Rejects an empty catalog and any band that could wedge placement;
    /// the engine must not run with an invalid catalog.
    pub fn new(mut categories: Vec<EntityCategory>) -> Result<Self, ConfigError> {
        if categories.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for category in &categories {
            category.validate()?;
        }
        categories.sort_by_key(|c| c.min_level);
        Ok(Self { categories })
    }

    /// Index of the band with the greatest `min_level <= level`, falling back
    /// to the lowest band when none qualifies.
    pub fn category_index_for(&self, level: u32) -> usize {
        self.categories
            .iter()
            .rposition(|c| c.min_level <= level)
            .unwrap_or(0)
    }

    pub fn category_for(&self, level: u32) -> &EntityCategory {
        &self.categories[self.category_index_for(level)]
    }

    pub fn category(&self, index: usize) -> &EntityCategory {
        &self.categories[index]
    }

    pub fn categories(&self) -> &[EntityCategory] {
        &self.categories
    }
}

/// Flattened selection pool for the active category.
///
/// Rebuilt only on category change, never per tick.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pool: Vec<EntityTemplate>,
}

impl Roster {
    pub fn build(category: &EntityCategory) -> Self {
        let mut pool = Vec::with_capacity(category.total_weight() as usize);
        for entry in &category.entries {
            for _ in 0..entry.weight {
                pool.push(entry.template);
            }
        }
        debug_assert!(!pool.is_empty(), "catalog validation admits no empty roster");
        Self { pool }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Uniform draw from the flattened pool.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> EntityTemplate {
        self.pool[rng.random_range(0..self.pool.len())]
    }

    /// Number of pool slots held by `template`.
    pub fn count_of(&self, template: EntityTemplate) -> usize {
        self.pool.iter().filter(|t| **t == template).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, min_level: u32, entries: &[(u32, u32)]) -> EntityCategory {
        EntityCategory {
            name: name.into(),
            min_level,
            target_population: 10,
            entries: entries
                .iter()
                .map(|&(id, weight)| WeightedEntry {
                    template: EntityTemplate(id),
                    weight,
                })
                .collect(),
        }
    }

    fn three_band_catalog() -> EntityCatalog {
        EntityCatalog::new(vec![
            category("calm", 1, &[(1, 1)]),
            category("burning", 5, &[(2, 1)]),
            category("deep", 10, &[(3, 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn picks_greatest_min_level_at_or_below() {
        let catalog = three_band_catalog();
        assert_eq!(catalog.category_for(1).name, "calm");
        assert_eq!(catalog.category_for(4).name, "calm");
        assert_eq!(catalog.category_for(5).name, "burning");
        assert_eq!(catalog.category_for(9).name, "burning");
        assert_eq!(catalog.category_for(10).name, "deep");
        assert_eq!(catalog.category_for(99).name, "deep");
    }

    #[test]
    fn falls_back_to_lowest_band() {
        let catalog = EntityCatalog::new(vec![category("late", 5, &[(1, 1)])]).unwrap();
        assert_eq!(catalog.category_for(1).name, "late");
    }

    #[test]
    fn selection_is_deterministic() {
        let catalog = three_band_catalog();
        let a = catalog.category_for(7) as *const EntityCategory;
        let b = catalog.category_for(7) as *const EntityCategory;
        assert_eq!(a, b);
    }

    #[test]
    fn unsorted_input_is_sorted_by_min_level() {
        let catalog = EntityCatalog::new(vec![
            category("deep", 10, &[(3, 1)]),
            category("calm", 1, &[(1, 1)]),
        ])
        .unwrap();
        assert_eq!(catalog.categories()[0].name, "calm");
        assert_eq!(catalog.category_for(2).name, "calm");
    }

    #[test]
    fn roster_slots_match_weights() {
        let band = category("mixed", 1, &[(1, 4), (2, 2), (3, 1)]);
        let roster = Roster::build(&band);
        assert_eq!(roster.len(), 7);
        assert_eq!(roster.count_of(EntityTemplate(1)), 4);
        assert_eq!(roster.count_of(EntityTemplate(2)), 2);
        assert_eq!(roster.count_of(EntityTemplate(3)), 1);
    }

    #[test]
    fn zero_weight_entries_claim_no_slots() {
        let band = category("sparse", 1, &[(1, 0), (2, 3)]);
        let roster = Roster::build(&band);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.count_of(EntityTemplate(1)), 0);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(
            EntityCatalog::new(vec![]).unwrap_err(),
            ConfigError::EmptyCatalog
        );
    }

    #[test]
    fn empty_category_is_rejected() {
        let err = EntityCatalog::new(vec![category("hollow", 1, &[])]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyCategory("hollow".into()));
    }

    #[test]
    fn zero_population_target_is_rejected() {
        let mut band = category("idle", 1, &[(1, 1)]);
        band.target_population = 0;
        let err = EntityCatalog::new(vec![band]).unwrap_err();
        assert_eq!(err, ConfigError::ZeroTarget("idle".into()));
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let err = EntityCatalog::new(vec![category("weightless", 1, &[(1, 0), (2, 0)])])
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroWeight("weightless".into()));
    }
}
