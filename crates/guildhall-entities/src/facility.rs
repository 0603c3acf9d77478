//! Facility templates, tiers, and runtime facility instances.
//!
//! A template defines an ordered ladder of tiers; each tier carries its
//! build cost, the track thresholds that gate it, and the effects it
//! grants while the facility is active. Instances climb the ladder one
//! tier at a time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use guildhall_types::{FacilityId, FacilityState, FacilityTemplateId, OrgId, ResourceBundle, Stat};

use crate::error::EntityError;

// ---------------------------------------------------------------------------
// Effects and tiers
// ---------------------------------------------------------------------------

/// An effect granted by an active facility tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FacilityEffect {
    /// Additive bonus to a stat during task resolution.
    StatBonus {
        /// The stat receiving the bonus.
        stat: Stat,
        /// The additive amount.
        amount: i64,
    },
    /// Percentage speed-up applied by collaborators when scheduling
    /// crafting jobs (the crafting system itself only consumes timers).
    CraftSpeedPct {
        /// Speed-up in percent.
        pct: u64,
    },
}

/// One rung of a facility's tier ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityTier {
    /// Cost to build or upgrade into this tier.
    pub build_cost: ResourceBundle,
    /// Track thresholds gating this tier, keyed by track key.
    pub required_track_thresholds: BTreeMap<String, u64>,
    /// Effects granted while this tier is active.
    pub effects: Vec<FacilityEffect>,
}

// ---------------------------------------------------------------------------
// FacilityTemplate
// ---------------------------------------------------------------------------

/// An immutable catalog definition of a facility and its tier ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityTemplate {
    /// Unique catalog identifier.
    id: FacilityTemplateId,
    /// Display name.
    name: String,
    /// Tier ladder; index 0 is tier 1.
    tiers: Vec<FacilityTier>,
}

impl FacilityTemplate {
    /// Validate and construct a template.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NoTiers`] for an empty ladder, or
    /// [`EntityError::EmptyName`] for a blank name.
    pub fn new(
        id: FacilityTemplateId,
        name: String,
        tiers: Vec<FacilityTier>,
    ) -> Result<Self, EntityError> {
        if name.trim().is_empty() {
            return Err(EntityError::EmptyName {
                entity: "facility template",
            });
        }
        if tiers.is_empty() {
            return Err(EntityError::NoTiers);
        }
        Ok(Self { id, name, tiers })
    }

    /// Return the template id.
    pub const fn id(&self) -> &FacilityTemplateId {
        &self.id
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the tier definition for a 1-based tier number.
    pub fn tier(&self, tier: u32) -> Option<&FacilityTier> {
        let index = usize::try_from(tier).ok()?.checked_sub(1)?;
        self.tiers.get(index)
    }

    /// Return the number of tiers.
    pub fn tier_count(&self) -> u32 {
        u32::try_from(self.tiers.len()).unwrap_or(u32::MAX)
    }
}

// ---------------------------------------------------------------------------
// FacilityInstance
// ---------------------------------------------------------------------------

/// A runtime facility owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityInstance {
    /// Unique identifier.
    id: FacilityId,
    /// Owning organization.
    org: OrgId,
    /// The template this facility was built from.
    template: FacilityTemplateId,
    /// Current tier (1-based).
    tier: u32,
    /// Lifecycle state.
    state: FacilityState,
    /// Snapshot of the active tier's effects.
    active_effects: Vec<FacilityEffect>,
}

impl FacilityInstance {
    /// Create a tier-1 facility under construction.
    pub const fn new(id: FacilityId, org: OrgId, template: FacilityTemplateId) -> Self {
        Self {
            id,
            org,
            template,
            tier: 1,
            state: FacilityState::UnderConstruction,
            active_effects: Vec::new(),
        }
    }

    /// Return the facility id.
    pub const fn id(&self) -> &FacilityId {
        &self.id
    }

    /// Return the owning organization.
    pub const fn org(&self) -> &OrgId {
        &self.org
    }

    /// Return the template reference.
    pub const fn template(&self) -> &FacilityTemplateId {
        &self.template
    }

    /// Return the current tier (1-based).
    pub const fn tier(&self) -> u32 {
        self.tier
    }

    /// Return the lifecycle state.
    pub const fn state(&self) -> FacilityState {
        self.state
    }

    /// Return the currently active effects.
    pub fn active_effects(&self) -> &[FacilityEffect] {
        &self.active_effects
    }

    /// True iff the facility is operational.
    pub fn is_active(&self) -> bool {
        matches!(self.state, FacilityState::Active)
    }

    /// Finish construction: activate the facility with its tier effects.
    pub fn activate(&mut self, effects: Vec<FacilityEffect>) {
        self.state = FacilityState::Active;
        self.active_effects = effects;
    }

    /// Upgrade to the next tier, replacing the active effect snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::TierInvalid`] unless `tier` is exactly one
    /// above the current tier and the facility is active.
    pub fn upgrade_to(&mut self, tier: u32, effects: Vec<FacilityEffect>) -> Result<(), EntityError> {
        let next = self.tier.checked_add(1);
        if !self.is_active() || next != Some(tier) {
            return Err(EntityError::TierInvalid {
                current: self.tier,
                requested: tier,
            });
        }
        self.tier = tier;
        self.active_effects = effects;
        Ok(())
    }
}
