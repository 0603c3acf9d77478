//! Task archetypes: immutable catalog definitions of dispatchable work.
//!
//! Archetypes are seeded once by the catalog collaborator and never
//! mutated at runtime. Runtime [`TaskInstance`](crate::task::TaskInstance)s
//! and [`TaskOffer`](crate::offer::TaskOffer)s reference them by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use guildhall_types::{ResourceBundle, Stat, TaskArchetypeId, TaskCategory, TickDuration};

use crate::error::EntityError;

/// Deserialized constructor input for a [`TaskArchetype`].
///
/// Packs the archetype's many fields into one struct so the persistence
/// collaborator can feed deserialized primitives straight in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskArchetypeSpec {
    /// Unique catalog identifier.
    pub id: TaskArchetypeId,
    /// Display name.
    pub name: String,
    /// Work category; doctrines can filter on it.
    pub category: TaskCategory,
    /// How long an instance of this task runs.
    pub duration: TickDuration,
    /// Minimum party size (>= 1).
    pub min_adventurers: u32,
    /// Maximum party size (>= min).
    pub max_adventurers: u32,
    /// The stat that dominates the resolution score.
    pub primary_stat: Stat,
    /// The stat that contributes at half weight.
    pub secondary_stat: Stat,
    /// Cost charged when the task is started.
    pub entry_cost: ResourceBundle,
    /// Reward bundle before the level multiplier.
    pub base_reward: ResourceBundle,
    /// Track thresholds the organization must independently satisfy for
    /// this archetype to be offered, keyed by track key.
    pub required_track_thresholds: BTreeMap<String, u64>,
}

/// An immutable catalog definition of a dispatchable task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskArchetype {
    /// Validated archetype data.
    spec: TaskArchetypeSpec,
}

impl TaskArchetype {
    /// Validate and construct an archetype from its spec.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::EmptyName`] for a blank name, or
    /// [`EntityError::AdventurerBoundsInvalid`] if `min_adventurers` is 0
    /// or exceeds `max_adventurers`.
    pub fn new(spec: TaskArchetypeSpec) -> Result<Self, EntityError> {
        if spec.name.trim().is_empty() {
            return Err(EntityError::EmptyName {
                entity: "task archetype",
            });
        }
        if spec.min_adventurers == 0 || spec.max_adventurers < spec.min_adventurers {
            return Err(EntityError::AdventurerBoundsInvalid {
                min: spec.min_adventurers,
                max: spec.max_adventurers,
            });
        }
        Ok(Self { spec })
    }

    /// Return the archetype id.
    pub const fn id(&self) -> &TaskArchetypeId {
        &self.spec.id
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Return the work category.
    pub const fn category(&self) -> TaskCategory {
        self.spec.category
    }

    /// Return the task duration.
    pub const fn duration(&self) -> TickDuration {
        self.spec.duration
    }

    /// Return the minimum party size.
    pub const fn min_adventurers(&self) -> u32 {
        self.spec.min_adventurers
    }

    /// Return the maximum party size.
    pub const fn max_adventurers(&self) -> u32 {
        self.spec.max_adventurers
    }

    /// Return the primary scoring stat.
    pub const fn primary_stat(&self) -> Stat {
        self.spec.primary_stat
    }

    /// Return the secondary scoring stat.
    pub const fn secondary_stat(&self) -> Stat {
        self.spec.secondary_stat
    }

    /// Return the entry cost bundle.
    pub const fn entry_cost(&self) -> &ResourceBundle {
        &self.spec.entry_cost
    }

    /// Return the base reward bundle.
    pub const fn base_reward(&self) -> &ResourceBundle {
        &self.spec.base_reward
    }

    /// Return the archetype's own track gates.
    pub const fn required_track_thresholds(&self) -> &BTreeMap<String, u64> {
        &self.spec.required_track_thresholds
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use guildhall_types::Resource;

    /// Helper: a minimal valid archetype spec shared across entity tests.
    pub(crate) fn spec(id: &str) -> TaskArchetypeSpec {
        TaskArchetypeSpec {
            id: TaskArchetypeId::parse(id).unwrap(),
            name: "Herb Gathering".to_owned(),
            category: TaskCategory::Gathering,
            duration: TickDuration::from_hours(2),
            min_adventurers: 1,
            max_adventurers: 3,
            primary_stat: Stat::Strength,
            secondary_stat: Stat::Agility,
            entry_cost: ResourceBundle::of(Resource::Supplies, 2),
            base_reward: ResourceBundle::of(Resource::Gold, 40),
            required_track_thresholds: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn valid_spec_constructs() {
        let archetype = TaskArchetype::new(spec("arch-1")).unwrap();
        assert_eq!(archetype.name(), "Herb Gathering");
        assert_eq!(archetype.min_adventurers(), 1);
    }

    #[test]
    fn zero_min_adventurers_rejected() {
        let mut s = spec("arch-2");
        s.min_adventurers = 0;
        assert!(TaskArchetype::new(s).is_err());
    }

    #[test]
    fn max_below_min_rejected() {
        let mut s = spec("arch-3");
        s.min_adventurers = 3;
        s.max_adventurers = 2;
        assert!(TaskArchetype::new(s).is_err());
    }

    #[test]
    fn blank_name_rejected() {
        let mut s = spec("arch-4");
        s.name = " ".to_owned();
        assert!(TaskArchetype::new(s).is_err());
    }
}
