//! Active task instances and their state machine.
//!
//! A task is `InProgress` from construction and transitions exactly once
//! to `Completed` or `Cancelled`. Completion readiness is pure data: the
//! stored `expected_completion_at` compared against an externally
//! supplied `now`, with an inclusive boundary.

use serde::{Deserialize, Serialize};

use guildhall_types::{AdventurerId, OrgId, TaskArchetypeId, TaskId, TaskOutcome, TaskStatus, Timestamp};

use crate::error::EntityError;

/// Deserialized constructor input for a [`TaskInstance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Unique identifier.
    pub id: TaskId,
    /// Owning organization.
    pub org: OrgId,
    /// The archetype this task was started from.
    pub archetype: TaskArchetypeId,
    /// When the task started.
    pub started_at: Timestamp,
    /// When the task is expected to complete (must not precede start).
    pub expected_completion_at: Timestamp,
    /// The adventurers assigned to the task.
    pub assigned: Vec<AdventurerId>,
}

/// An active task: archetype reference, timers, party, and outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInstance {
    /// Unique identifier.
    id: TaskId,
    /// Owning organization.
    org: OrgId,
    /// The archetype this task was started from.
    archetype: TaskArchetypeId,
    /// When the task started.
    started_at: Timestamp,
    /// When the task becomes ready for resolution.
    expected_completion_at: Timestamp,
    /// Current lifecycle status.
    status: TaskStatus,
    /// Assigned adventurers.
    assigned: Vec<AdventurerId>,
    /// Outcome category, set on completion.
    outcome: Option<TaskOutcome>,
    /// Opaque outcome details for the UI collaborator, set on completion.
    outcome_details: Option<serde_json::Value>,
    /// When the task actually completed or was cancelled.
    ended_at: Option<Timestamp>,
}

impl TaskInstance {
    /// Validate and construct an in-progress task.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::TimerOrderInvalid`] if the expected
    /// completion precedes the start.
    pub fn new(spec: TaskSpec) -> Result<Self, EntityError> {
        if spec.expected_completion_at.before(spec.started_at) {
            return Err(EntityError::TimerOrderInvalid {
                started_at: spec.started_at,
                expected_completion_at: spec.expected_completion_at,
            });
        }
        Ok(Self {
            id: spec.id,
            org: spec.org,
            archetype: spec.archetype,
            started_at: spec.started_at,
            expected_completion_at: spec.expected_completion_at,
            status: TaskStatus::InProgress,
            assigned: spec.assigned,
            outcome: None,
            outcome_details: None,
            ended_at: None,
        })
    }

    /// Return the task id.
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Return the owning organization.
    pub const fn org(&self) -> &OrgId {
        &self.org
    }

    /// Return the archetype reference.
    pub const fn archetype(&self) -> &TaskArchetypeId {
        &self.archetype
    }

    /// Return when the task started.
    pub const fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Return the expected completion instant.
    pub const fn expected_completion_at(&self) -> Timestamp {
        self.expected_completion_at
    }

    /// Return the current status.
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Return the assigned adventurers.
    pub fn assigned(&self) -> &[AdventurerId] {
        &self.assigned
    }

    /// Return the outcome category, if resolved.
    pub const fn outcome(&self) -> Option<TaskOutcome> {
        self.outcome
    }

    /// Return the opaque outcome details, if resolved.
    pub const fn outcome_details(&self) -> Option<&serde_json::Value> {
        self.outcome_details.as_ref()
    }

    /// Return when the task ended, if it has.
    pub const fn ended_at(&self) -> Option<Timestamp> {
        self.ended_at
    }

    /// True iff the task is in progress and `now` has reached the
    /// expected completion instant (inclusive boundary).
    pub fn is_ready_for_resolution(&self, now: Timestamp) -> bool {
        matches!(self.status, TaskStatus::InProgress)
            && now.at_or_after(self.expected_completion_at)
    }

    /// Mark the task completed with its resolved outcome.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::TaskNotInProgress`] unless the task is
    /// `InProgress`.
    pub fn mark_completed(
        &mut self,
        outcome: TaskOutcome,
        details: serde_json::Value,
        completed_at: Timestamp,
    ) -> Result<(), EntityError> {
        if self.status != TaskStatus::InProgress {
            return Err(EntityError::TaskNotInProgress {
                task: self.id.clone(),
                status: self.status,
            });
        }
        self.status = TaskStatus::Completed;
        self.outcome = Some(outcome);
        self.outcome_details = Some(details);
        self.ended_at = Some(completed_at);
        Ok(())
    }

    /// Cancel the task by explicit state transition.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::TaskNotInProgress`] unless the task is
    /// `InProgress`.
    pub fn mark_cancelled(&mut self, cancelled_at: Timestamp) -> Result<(), EntityError> {
        if self.status != TaskStatus::InProgress {
            return Err(EntityError::TaskNotInProgress {
                task: self.id.clone(),
                status: self.status,
            });
        }
        self.status = TaskStatus::Cancelled;
        self.ended_at = Some(cancelled_at);
        Ok(())
    }
}
