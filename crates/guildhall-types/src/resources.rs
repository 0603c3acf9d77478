//! Resources and the immutable [`ResourceBundle`].
//!
//! A bundle maps resource types to non-negative integer amounts. The
//! invariant is absolute: no negative amount is ever stored, and no
//! operation silently clamps. [`ResourceBundle::subtract`] is the single
//! authoritative negative-balance guard -- every "can afford" check in the
//! economy ultimately bottoms out here.
//!
//! All mutation operations return a new bundle; the type never mutates in
//! place. Zero-amount entries are pruned so that two bundles with the same
//! effective contents always compare equal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::TypeError;

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

/// The resource types circulating in the guild economy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Resource {
    /// The primary currency.
    Gold,
    /// Construction and crafting materials.
    Materials,
    /// Rare crystals used for high-tier facilities and items.
    Crystals,
    /// Consumable supplies for expeditions.
    Supplies,
    /// The guild's reputation score, spent on prestige unlocks.
    Renown,
}

// ---------------------------------------------------------------------------
// ResourceBundle
// ---------------------------------------------------------------------------

/// An immutable mapping from resource type to a non-negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceBundle {
    /// Amounts per resource; zero entries are never stored.
    amounts: BTreeMap<Resource, u64>,
}

impl ResourceBundle {
    /// Create an empty bundle.
    pub const fn new() -> Self {
        Self {
            amounts: BTreeMap::new(),
        }
    }

    /// Create a bundle from an amounts map, pruning zero entries.
    pub fn from_amounts(amounts: BTreeMap<Resource, u64>) -> Self {
        Self {
            amounts: amounts.into_iter().filter(|(_, qty)| *qty > 0).collect(),
        }
    }

    /// Create a bundle holding a single resource amount.
    pub fn of(resource: Resource, amount: u64) -> Self {
        Self::from_amounts(BTreeMap::from([(resource, amount)]))
    }

    /// Return the amount of a resource (0 if absent).
    pub fn amount(&self, resource: Resource) -> u64 {
        self.amounts.get(&resource).copied().unwrap_or(0)
    }

    /// True iff the bundle holds nothing.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// True iff for every resource in `required`, this bundle holds at
    /// least as much.
    pub fn has_all(&self, required: &Self) -> bool {
        required
            .amounts
            .iter()
            .all(|(resource, qty)| self.amount(*resource) >= *qty)
    }

    /// Return a new bundle with `other`'s amounts added to this one.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::AmountOverflow`] if any resulting amount would
    /// exceed `u64::MAX`.
    pub fn add(&self, other: &Self) -> Result<Self, TypeError> {
        let mut merged = self.amounts.clone();
        for (resource, qty) in &other.amounts {
            let entry = merged.entry(*resource).or_insert(0);
            *entry = entry.checked_add(*qty).ok_or(TypeError::AmountOverflow {
                context: "resource amount overflow in add",
            })?;
        }
        Ok(Self { amounts: merged })
    }

    /// Equivalent to [`add`](Self::add); kept for call-site readability
    /// when combining reward bundles.
    pub fn merge(&self, other: &Self) -> Result<Self, TypeError> {
        self.add(other)
    }

    /// Return a new bundle with `other`'s amounts removed.
    ///
    /// Zero-amount entries are pruned from the result. This is the
    /// authoritative negative-balance guard.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InsufficientResources`] if any resulting
    /// amount would go negative; the bundle is unchanged (it is immutable).
    pub fn subtract(&self, other: &Self) -> Result<Self, TypeError> {
        let mut remaining = self.amounts.clone();
        for (resource, qty) in &other.amounts {
            let available = self.amount(*resource);
            let left = available
                .checked_sub(*qty)
                .ok_or(TypeError::InsufficientResources {
                    resource: *resource,
                    requested: *qty,
                    available,
                })?;
            if left == 0 {
                remaining.remove(resource);
            } else {
                remaining.insert(*resource, left);
            }
        }
        Ok(Self { amounts: remaining })
    }

    /// Return a new bundle with every amount scaled by `pct` percent,
    /// rounding down (integer floor division).
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::AmountOverflow`] if any intermediate product
    /// overflows.
    pub fn scale_pct(&self, pct: u64) -> Result<Self, TypeError> {
        let mut scaled = BTreeMap::new();
        for (resource, qty) in &self.amounts {
            let product = qty.checked_mul(pct).ok_or(TypeError::AmountOverflow {
                context: "resource amount overflow in scale_pct",
            })?;
            let result = product.checked_div(100).unwrap_or(0);
            if result > 0 {
                scaled.insert(*resource, result);
            }
        }
        Ok(Self { amounts: scaled })
    }

    /// Sum of all amounts across resource types.
    ///
    /// Saturates at `u64::MAX`; used only for coarse scoring, never for
    /// wallet mutation.
    pub fn total(&self) -> u64 {
        self.amounts
            .values()
            .fold(0_u64, |acc, qty| acc.saturating_add(*qty))
    }

    /// Read-only view of the amounts map.
    pub const fn amounts(&self) -> &BTreeMap<Resource, u64> {
        &self.amounts
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Helper: bundle from (resource, amount) pairs.
    fn bundle(pairs: &[(Resource, u64)]) -> ResourceBundle {
        ResourceBundle::from_amounts(pairs.iter().copied().collect())
    }

    #[test]
    fn empty_bundle_has_nothing() {
        let b = ResourceBundle::new();
        assert!(b.is_empty());
        assert_eq!(b.amount(Resource::Gold), 0);
    }

    #[test]
    fn zero_entries_pruned_at_construction() {
        let b = bundle(&[(Resource::Gold, 0), (Resource::Materials, 3)]);
        assert_eq!(b, bundle(&[(Resource::Materials, 3)]));
    }

    #[test]
    fn add_then_subtract_roundtrips() {
        let base = bundle(&[(Resource::Gold, 100), (Resource::Materials, 20)]);
        let delta = bundle(&[(Resource::Gold, 50), (Resource::Crystals, 5)]);
        let roundtrip = base.add(&delta).unwrap().subtract(&delta).unwrap();
        assert_eq!(roundtrip, base);
    }

    #[test]
    fn subtract_more_than_available_fails() {
        let base = bundle(&[(Resource::Gold, 100)]);
        let result = base.subtract(&bundle(&[(Resource::Gold, 200)]));
        assert!(result.is_err());
        // Source untouched (immutability).
        assert_eq!(base.amount(Resource::Gold), 100);
    }

    #[test]
    fn subtract_missing_resource_fails() {
        let base = bundle(&[(Resource::Gold, 100)]);
        assert!(base.subtract(&bundle(&[(Resource::Supplies, 1)])).is_err());
    }

    #[test]
    fn subtract_to_zero_prunes_entry() {
        let base = bundle(&[(Resource::Gold, 50), (Resource::Materials, 10)]);
        let result = base.subtract(&bundle(&[(Resource::Gold, 50)])).unwrap();
        assert_eq!(result, bundle(&[(Resource::Materials, 10)]));
        assert!(!result.amounts().contains_key(&Resource::Gold));
    }

    #[test]
    fn has_all_checks_every_resource() {
        let wallet = bundle(&[(Resource::Gold, 100), (Resource::Supplies, 5)]);
        assert!(wallet.has_all(&bundle(&[(Resource::Gold, 50)])));
        assert!(wallet.has_all(&bundle(&[(Resource::Gold, 100), (Resource::Supplies, 5)])));
        assert!(!wallet.has_all(&bundle(&[(Resource::Gold, 101)])));
        assert!(!wallet.has_all(&bundle(&[(Resource::Crystals, 1)])));
    }

    #[test]
    fn scale_pct_floors() {
        let base = bundle(&[(Resource::Gold, 10)]);
        // 10 * 115 / 100 = 11.5 -> 11
        assert_eq!(
            base.scale_pct(115).unwrap(),
            bundle(&[(Resource::Gold, 11)]),
        );
        // Scaling to zero prunes.
        assert!(base.scale_pct(0).unwrap().is_empty());
    }

    #[test]
    fn add_overflow_fails() {
        let base = bundle(&[(Resource::Gold, u64::MAX)]);
        assert!(base.add(&bundle(&[(Resource::Gold, 1)])).is_err());
    }

    #[test]
    fn total_sums_across_resources() {
        let b = bundle(&[(Resource::Gold, 7), (Resource::Materials, 3)]);
        assert_eq!(b.total(), 10);
    }
}
