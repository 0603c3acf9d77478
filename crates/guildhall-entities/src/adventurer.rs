//! Agent templates and adventurer instances.
//!
//! Templates are immutable catalog data: base stats plus per-level growth
//! bonuses. Instances carry the mutable runtime state -- level, XP,
//! effective stats, availability status -- and recompute effective stats
//! from their bound template on level-up.
//!
//! # Level-Up Formula
//!
//! XP required to advance from level N to N+1 is `N * 100`. XP carries
//! over across level-ups: applying 100 XP to a fresh level-1 adventurer
//! yields level 2 with 0 XP toward level 3.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use guildhall_types::{AdventurerId, AdventurerStatus, AgentTemplateId, OrgId, StatMap, TaskId};

use crate::error::EntityError;

/// XP required per current level to reach the next one.
const XP_PER_LEVEL: u64 = 100;

// ---------------------------------------------------------------------------
// AgentTemplate
// ---------------------------------------------------------------------------

/// An immutable catalog definition of an adventurer archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTemplate {
    /// Unique catalog identifier.
    id: AgentTemplateId,
    /// Display name.
    name: String,
    /// Role label consumed by auto-equip priorities (e.g. `"warden"`).
    role: String,
    /// Stats at level 1.
    base_stats: StatMap,
    /// Growth bonuses granted on reaching each level (keys >= 2). Effective
    /// stats at level L are base plus every bonus with key <= L.
    growth: BTreeMap<u32, StatMap>,
}

impl AgentTemplate {
    /// Validate and construct a template.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::EmptyName`] for a blank name, or
    /// [`EntityError::GrowthLevelInvalid`] if any growth key is below 2
    /// (level 1 is the base, not a growth step).
    pub fn new(
        id: AgentTemplateId,
        name: String,
        role: String,
        base_stats: StatMap,
        growth: BTreeMap<u32, StatMap>,
    ) -> Result<Self, EntityError> {
        if name.trim().is_empty() {
            return Err(EntityError::EmptyName {
                entity: "agent template",
            });
        }
        if let Some(level) = growth.keys().find(|level| **level < 2) {
            return Err(EntityError::GrowthLevelInvalid { level: *level });
        }
        Ok(Self {
            id,
            name,
            role,
            base_stats,
            growth,
        })
    }

    /// Return the template id.
    pub const fn id(&self) -> &AgentTemplateId {
        &self.id
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the role label.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Return the level-1 base stats.
    pub const fn base_stats(&self) -> &StatMap {
        &self.base_stats
    }

    /// Compute the effective stats at `level`: base plus every growth
    /// bonus whose level key is `<= level`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Type`] on stat overflow.
    pub fn stats_at_level(&self, level: u32) -> Result<StatMap, EntityError> {
        let mut stats = self.base_stats.clone();
        for (_, bonus) in self.growth.range(..=level) {
            stats = stats.plus(bonus)?;
        }
        Ok(stats)
    }
}

// ---------------------------------------------------------------------------
// AdventurerInstance
// ---------------------------------------------------------------------------

/// A runtime adventurer: level, XP, effective stats, and availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventurerInstance {
    /// Unique identifier.
    id: AdventurerId,
    /// Owning organization.
    org: OrgId,
    /// Display name.
    name: String,
    /// Current level (>= 1).
    level: u32,
    /// XP accumulated toward the next level.
    xp: u64,
    /// Current effective stats (template-derived when bound).
    effective_stats: StatMap,
    /// Availability status.
    status: AdventurerStatus,
    /// The task this adventurer is assigned to, if any.
    current_task: Option<TaskId>,
    /// Bound template, used to recompute stats on level-up.
    template: Option<AgentTemplateId>,
}

impl AdventurerInstance {
    /// Validate and construct an adventurer.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::LevelInvalid`] if `level` is 0, or
    /// [`EntityError::EmptyName`] for a blank name.
    pub fn new(
        id: AdventurerId,
        org: OrgId,
        name: String,
        level: u32,
        effective_stats: StatMap,
        template: Option<AgentTemplateId>,
    ) -> Result<Self, EntityError> {
        if name.trim().is_empty() {
            return Err(EntityError::EmptyName {
                entity: "adventurer",
            });
        }
        if level == 0 {
            return Err(EntityError::LevelInvalid { level });
        }
        Ok(Self {
            id,
            org,
            name,
            level,
            xp: 0,
            effective_stats,
            status: AdventurerStatus::Idle,
            current_task: None,
            template,
        })
    }

    /// Construct a fresh level-1 adventurer from a catalog template,
    /// bound to it for stat growth.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::EmptyName`] for a blank name.
    pub fn from_template(
        id: AdventurerId,
        org: OrgId,
        name: String,
        template: &AgentTemplate,
    ) -> Result<Self, EntityError> {
        Self::new(
            id,
            org,
            name,
            1,
            template.base_stats().clone(),
            Some(template.id().clone()),
        )
    }

    /// Return the adventurer id.
    pub const fn id(&self) -> &AdventurerId {
        &self.id
    }

    /// Return the owning organization.
    pub const fn org(&self) -> &OrgId {
        &self.org
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the current level.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Return XP accumulated toward the next level.
    pub const fn xp(&self) -> u64 {
        self.xp
    }

    /// Return the current effective stats.
    pub const fn effective_stats(&self) -> &StatMap {
        &self.effective_stats
    }

    /// Return the availability status.
    pub const fn status(&self) -> AdventurerStatus {
        self.status
    }

    /// Return the current task assignment, if any.
    pub const fn current_task(&self) -> Option<&TaskId> {
        self.current_task.as_ref()
    }

    /// Return the bound template, if any.
    pub const fn template(&self) -> Option<&AgentTemplateId> {
        self.template.as_ref()
    }

    /// Assign the adventurer to a task.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::AdventurerNotIdle`] unless the status is
    /// `Idle`.
    pub fn assign_to(&mut self, task: TaskId) -> Result<(), EntityError> {
        if self.status != AdventurerStatus::Idle {
            return Err(EntityError::AdventurerNotIdle {
                adventurer: self.id.clone(),
                status: self.status,
            });
        }
        self.status = AdventurerStatus::Assigned;
        self.current_task = Some(task);
        Ok(())
    }

    /// Release the adventurer from their task back to idle.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::AdventurerNotAssigned`] unless the status
    /// is `Assigned`.
    pub fn release(&mut self) -> Result<(), EntityError> {
        if self.status != AdventurerStatus::Assigned {
            return Err(EntityError::AdventurerNotAssigned {
                adventurer: self.id.clone(),
                status: self.status,
            });
        }
        self.status = AdventurerStatus::Idle;
        self.current_task = None;
        Ok(())
    }

    /// Injure the adventurer. Clears any task assignment.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::AdventurerNotIdle`] if already injured
    /// (injuring twice is a caller bug); any other status transitions.
    pub fn injure(&mut self) -> Result<(), EntityError> {
        if self.status == AdventurerStatus::Injured {
            return Err(EntityError::AdventurerNotIdle {
                adventurer: self.id.clone(),
                status: self.status,
            });
        }
        self.status = AdventurerStatus::Injured;
        self.current_task = None;
        Ok(())
    }

    /// Recover from injury back to idle.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::AdventurerNotInjured`] unless the status is
    /// `Injured`.
    pub fn recover(&mut self) -> Result<(), EntityError> {
        if self.status != AdventurerStatus::Injured {
            return Err(EntityError::AdventurerNotInjured {
                adventurer: self.id.clone(),
                status: self.status,
            });
        }
        self.status = AdventurerStatus::Idle;
        Ok(())
    }

    /// Apply XP, levelling up as thresholds are crossed. When a template
    /// is supplied and a level-up occurred, effective stats are recomputed
    /// from it. Returns the number of levels gained.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::CounterOverflow`] on XP overflow, or a stat
    /// overflow from the template recomputation.
    pub fn apply_xp(
        &mut self,
        amount: u64,
        template: Option<&AgentTemplate>,
    ) -> Result<u32, EntityError> {
        self.xp = self
            .xp
            .checked_add(amount)
            .ok_or(EntityError::CounterOverflow {
                context: "adventurer xp",
            })?;

        let mut gained = 0_u32;
        loop {
            let threshold = u64::from(self.level).saturating_mul(XP_PER_LEVEL);
            if self.xp < threshold {
                break;
            }
            self.xp = self.xp.saturating_sub(threshold);
            self.level = self.level.saturating_add(1);
            gained = gained.saturating_add(1);
        }

        if gained > 0 {
            if let Some(template) = template {
                self.effective_stats = template.stats_at_level(self.level)?;
            }
        }
        Ok(gained)
    }
}
