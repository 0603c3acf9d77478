//! Mission doctrines: configurable automation policies.
//!
//! A doctrine tells the mission automation system what to optimize for
//! (focus), how much risk to accept, and which missions and adventurers
//! are even considered (category and level filters). It proposes nothing
//! itself; the doctrine engine reads it each tick.

use serde::{Deserialize, Serialize};

use guildhall_types::{DoctrineFocus, DoctrineId, DoctrineState, OrgId, RiskTolerance, TaskCategory};

use crate::error::EntityError;

/// An automation policy for mission selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionDoctrine {
    /// Unique identifier.
    id: DoctrineId,
    /// Owning organization.
    org: OrgId,
    /// What the doctrine optimizes for.
    focus: DoctrineFocus,
    /// How much risk the doctrine accepts.
    risk_tolerance: RiskTolerance,
    /// Only consider missions of this category, when set.
    category_filter: Option<TaskCategory>,
    /// Only consider adventurers at or above this level, when set.
    min_level: Option<u32>,
    /// Only consider adventurers at or below this level, when set.
    max_level: Option<u32>,
    /// Whether the doctrine is driving automation.
    state: DoctrineState,
}

impl MissionDoctrine {
    /// Validate and construct an active doctrine.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::LevelFilterInvalid`] if both level bounds
    /// are set and `max < min`.
    pub fn new(
        id: DoctrineId,
        org: OrgId,
        focus: DoctrineFocus,
        risk_tolerance: RiskTolerance,
        category_filter: Option<TaskCategory>,
        min_level: Option<u32>,
        max_level: Option<u32>,
    ) -> Result<Self, EntityError> {
        if let (Some(min), Some(max)) = (min_level, max_level) {
            if max < min {
                return Err(EntityError::LevelFilterInvalid { min, max });
            }
        }
        Ok(Self {
            id,
            org,
            focus,
            risk_tolerance,
            category_filter,
            min_level,
            max_level,
            state: DoctrineState::Active,
        })
    }

    /// Return the doctrine id.
    pub const fn id(&self) -> &DoctrineId {
        &self.id
    }

    /// Return the owning organization.
    pub const fn org(&self) -> &OrgId {
        &self.org
    }

    /// Return the focus.
    pub const fn focus(&self) -> DoctrineFocus {
        self.focus
    }

    /// Return the risk tolerance.
    pub const fn risk_tolerance(&self) -> RiskTolerance {
        self.risk_tolerance
    }

    /// Return the automation state.
    pub const fn state(&self) -> DoctrineState {
        self.state
    }

    /// True iff the doctrine is driving automation.
    pub fn is_active(&self) -> bool {
        matches!(self.state, DoctrineState::Active)
    }

    /// Resume automation.
    pub fn activate(&mut self) {
        self.state = DoctrineState::Active;
    }

    /// Pause automation.
    pub fn suspend(&mut self) {
        self.state = DoctrineState::Suspended;
    }

    /// True iff a mission of `category` passes the category filter.
    pub fn allows_category(&self, category: TaskCategory) -> bool {
        self.category_filter.is_none_or(|filter| filter == category)
    }

    /// True iff an adventurer at `level` passes the level filters.
    pub fn allows_level(&self, level: u32) -> bool {
        self.min_level.is_none_or(|min| level >= min)
            && self.max_level.is_none_or(|max| level <= max)
    }
}
