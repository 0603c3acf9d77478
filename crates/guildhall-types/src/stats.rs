//! Stats and the immutable [`StatMap`].
//!
//! Stat maps carry adventurer base stats, per-level growth bonuses, item
//! modifiers, and facility bonuses. Values are signed: catalog data may
//! tune an effect negative (a cursed item, a penalizing facility tier),
//! so `i64` is the representation even though most values are positive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::TypeError;

// ---------------------------------------------------------------------------
// Stat
// ---------------------------------------------------------------------------

/// The stat keys used by archetypes, adventurers, items, and facilities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Stat {
    /// Physical power; primary for combat and gathering work.
    Strength,
    /// Reasoning and lore; primary for research work.
    Intellect,
    /// Speed and finesse; primary for logistics work.
    Agility,
    /// Resolve under pressure; secondary for most dangerous work.
    Willpower,
    /// Social grace; primary for diplomacy work.
    Charisma,
}

// ---------------------------------------------------------------------------
// StatMap
// ---------------------------------------------------------------------------

/// An immutable mapping from stat key to numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatMap {
    /// Value per stat; absent stats read as 0.
    values: BTreeMap<Stat, i64>,
}

impl StatMap {
    /// Create an empty stat map (all stats 0).
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Create a stat map from a values map.
    pub const fn from_values(values: BTreeMap<Stat, i64>) -> Self {
        Self { values }
    }

    /// Create a stat map holding a single stat value.
    pub fn of(stat: Stat, value: i64) -> Self {
        Self::from_values(BTreeMap::from([(stat, value)]))
    }

    /// Return the value for a stat (0 if absent).
    pub fn get(&self, stat: Stat) -> i64 {
        self.values.get(&stat).copied().unwrap_or(0)
    }

    /// Return a new map with `other`'s values added entry-wise.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::AmountOverflow`] if any sum overflows `i64`.
    pub fn plus(&self, other: &Self) -> Result<Self, TypeError> {
        let mut merged = self.values.clone();
        for (stat, value) in &other.values {
            let entry = merged.entry(*stat).or_insert(0);
            *entry = entry.checked_add(*value).ok_or(TypeError::AmountOverflow {
                context: "stat value overflow in plus",
            })?;
        }
        Ok(Self { values: merged })
    }

    /// Sum of the values for the given stats, saturating at the `i64`
    /// bounds. Used for scoring only.
    pub fn total_of(&self, stats: &[Stat]) -> i64 {
        stats
            .iter()
            .fold(0_i64, |acc, stat| acc.saturating_add(self.get(*stat)))
    }

    /// Read-only view of the values map.
    pub const fn values(&self) -> &BTreeMap<Stat, i64> {
        &self.values
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn absent_stats_read_zero() {
        let m = StatMap::new();
        assert_eq!(m.get(Stat::Strength), 0);
    }

    #[test]
    fn plus_merges_entrywise() {
        let base = StatMap::from_values(BTreeMap::from([
            (Stat::Strength, 10),
            (Stat::Agility, 4),
        ]));
        let bonus = StatMap::from_values(BTreeMap::from([
            (Stat::Strength, 5),
            (Stat::Intellect, 3),
        ]));
        let merged = base.plus(&bonus).unwrap();
        assert_eq!(merged.get(Stat::Strength), 15);
        assert_eq!(merged.get(Stat::Agility), 4);
        assert_eq!(merged.get(Stat::Intellect), 3);
    }

    #[test]
    fn plus_does_not_mutate_operands() {
        let base = StatMap::of(Stat::Willpower, 2);
        let bonus = StatMap::of(Stat::Willpower, 3);
        let _ = base.plus(&bonus).unwrap();
        assert_eq!(base.get(Stat::Willpower), 2);
        assert_eq!(bonus.get(Stat::Willpower), 3);
    }

    #[test]
    fn total_of_selected_stats() {
        let m = StatMap::from_values(BTreeMap::from([
            (Stat::Strength, 10),
            (Stat::Intellect, 7),
            (Stat::Charisma, 1),
        ]));
        assert_eq!(m.total_of(&[Stat::Strength, Stat::Intellect]), 17);
        assert_eq!(m.total_of(&[]), 0);
    }

    #[test]
    fn plus_overflow_fails() {
        let a = StatMap::of(Stat::Strength, i64::MAX);
        let b = StatMap::of(Stat::Strength, 1);
        assert!(a.plus(&b).is_err());
    }
}
