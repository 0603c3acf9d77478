//! Crafting queues and jobs.
//!
//! A queue owns a bounded set of active slots and a FIFO backlog. Jobs
//! move `Queued -> InProgress -> Completed`; the completion instant is
//! stored on the job and compared against an externally supplied `now`
//! (inclusive), like every other timer in the core.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use guildhall_types::{CraftJobId, CraftJobState, OrgId, ResourceBundle, TickDuration, Timestamp};

use crate::error::EntityError;

// ---------------------------------------------------------------------------
// CraftJob
// ---------------------------------------------------------------------------

/// A single crafting job with its output bundle and timers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftJob {
    /// Unique identifier.
    id: CraftJobId,
    /// Owning organization.
    org: OrgId,
    /// What the job produces on completion.
    output: ResourceBundle,
    /// How long the job takes once started.
    duration: TickDuration,
    /// Lifecycle state.
    state: CraftJobState,
    /// When the job was enqueued.
    queued_at: Timestamp,
    /// When the job started, if it has.
    started_at: Option<Timestamp>,
    /// When the job completes, set on start.
    complete_at: Option<Timestamp>,
    /// When the job actually completed.
    completed_at: Option<Timestamp>,
}

impl CraftJob {
    /// Create a queued job.
    pub const fn new(
        id: CraftJobId,
        org: OrgId,
        output: ResourceBundle,
        duration: TickDuration,
        queued_at: Timestamp,
    ) -> Self {
        Self {
            id,
            org,
            output,
            duration,
            state: CraftJobState::Queued,
            queued_at,
            started_at: None,
            complete_at: None,
            completed_at: None,
        }
    }

    /// Return the job id.
    pub const fn id(&self) -> &CraftJobId {
        &self.id
    }

    /// Return the owning organization.
    pub const fn org(&self) -> &OrgId {
        &self.org
    }

    /// Return the output bundle.
    pub const fn output(&self) -> &ResourceBundle {
        &self.output
    }

    /// Return the job duration.
    pub const fn duration(&self) -> TickDuration {
        self.duration
    }

    /// Return the lifecycle state.
    pub const fn state(&self) -> CraftJobState {
        self.state
    }

    /// Return when the job was enqueued.
    pub const fn queued_at(&self) -> Timestamp {
        self.queued_at
    }

    /// Return the completion instant, set when the job starts.
    pub const fn complete_at(&self) -> Option<Timestamp> {
        self.complete_at
    }

    /// True iff the job is in progress and its completion instant has
    /// passed (inclusive).
    pub fn is_ready(&self, now: Timestamp) -> bool {
        matches!(self.state, CraftJobState::InProgress)
            && self.complete_at.is_some_and(|at| now.at_or_after(at))
    }

    /// Start the job: it completes at `now + duration`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::JobStateInvalid`] unless the job is
    /// `Queued`.
    pub fn start(&mut self, now: Timestamp) -> Result<(), EntityError> {
        if self.state != CraftJobState::Queued {
            return Err(EntityError::JobStateInvalid {
                job: self.id.clone(),
                state: self.state,
                expected: CraftJobState::Queued,
            });
        }
        self.state = CraftJobState::InProgress;
        self.started_at = Some(now);
        self.complete_at = Some(now.saturating_add(self.duration));
        Ok(())
    }

    /// Complete the job.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::JobStateInvalid`] unless the job is
    /// `InProgress`.
    pub fn complete(&mut self, now: Timestamp) -> Result<(), EntityError> {
        if self.state != CraftJobState::InProgress {
            return Err(EntityError::JobStateInvalid {
                job: self.id.clone(),
                state: self.state,
                expected: CraftJobState::InProgress,
            });
        }
        self.state = CraftJobState::Completed;
        self.completed_at = Some(now);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CraftingQueue
// ---------------------------------------------------------------------------

/// A bounded crafting queue: active slots plus a FIFO backlog of job ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingQueue {
    /// Owning organization.
    org: OrgId,
    /// Number of jobs that can run concurrently (>= 1).
    active_slots: u32,
    /// Ids of jobs currently occupying slots.
    active: Vec<CraftJobId>,
    /// Ids of jobs waiting, oldest first.
    queued: VecDeque<CraftJobId>,
}

impl CraftingQueue {
    /// Create an empty queue with the given slot count.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::ZeroSlots`] if `active_slots` is 0.
    pub fn new(org: OrgId, active_slots: u32) -> Result<Self, EntityError> {
        if active_slots == 0 {
            return Err(EntityError::ZeroSlots);
        }
        Ok(Self {
            org,
            active_slots,
            active: Vec::new(),
            queued: VecDeque::new(),
        })
    }

    /// Return the owning organization.
    pub const fn org(&self) -> &OrgId {
        &self.org
    }

    /// Return the slot count.
    pub const fn active_slots(&self) -> u32 {
        self.active_slots
    }

    /// Return the ids of jobs occupying slots.
    pub fn active(&self) -> &[CraftJobId] {
        &self.active
    }

    /// Return the ids of waiting jobs, oldest first.
    pub const fn queued(&self) -> &VecDeque<CraftJobId> {
        &self.queued
    }

    /// True iff a slot is free.
    pub fn has_free_slot(&self) -> bool {
        u32::try_from(self.active.len()).unwrap_or(u32::MAX) < self.active_slots
    }

    /// Peek the next job to start (FIFO head).
    pub fn next_queued(&self) -> Option<&CraftJobId> {
        self.queued.front()
    }

    /// Append a job to the backlog.
    pub fn enqueue(&mut self, job: CraftJobId) {
        self.queued.push_back(job);
    }

    /// Move the FIFO head into an active slot, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::QueueFull`] if no slot is free, or
    /// [`EntityError::QueueEmpty`] if the backlog is empty.
    pub fn promote_next(&mut self) -> Result<CraftJobId, EntityError> {
        if !self.has_free_slot() {
            return Err(EntityError::QueueFull {
                active: self.active.len(),
                slots: self.active_slots,
            });
        }
        let job = self.queued.pop_front().ok_or(EntityError::QueueEmpty)?;
        self.active.push(job.clone());
        Ok(job)
    }

    /// Release a job's slot after completion.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::JobNotTracked`] if the job does not occupy
    /// a slot.
    pub fn finish(&mut self, job: &CraftJobId) -> Result<(), EntityError> {
        let position = self.active.iter().position(|active| active == job).ok_or(
            EntityError::JobNotTracked {
                job: job.clone(),
                list: "active",
            },
        )?;
        let _ = self.active.remove(position);
        Ok(())
    }
}
