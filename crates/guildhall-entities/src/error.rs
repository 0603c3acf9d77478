//! Error types for entity construction and mutation.
//!
//! Three families, all fatal to the failing call:
//! - validation errors from constructors (bad bounds, malformed timers),
//! - state-transition errors from mutators invoked in the wrong state,
//! - counter/clock invariant violations (overflow, non-monotonic time).
//!
//! Callers that want to avoid a state-transition error check state first;
//! nothing here is silently clamped or retried.

use guildhall_types::{
    AdventurerId, AdventurerStatus, CraftJobId, CraftJobState, OfferId, TaskId, TaskStatus,
    Timestamp, TypeError,
};

/// Errors that can occur during entity construction or mutation.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// An entity was given an empty display name.
    #[error("{entity} name must not be empty")]
    EmptyName {
        /// The entity type that rejected the name.
        entity: &'static str,
    },

    /// Archetype adventurer bounds are malformed.
    #[error("invalid adventurer bounds: min {min} must be >= 1 and <= max {max}")]
    AdventurerBoundsInvalid {
        /// Minimum party size requested.
        min: u32,
        /// Maximum party size requested.
        max: u32,
    },

    /// A task's expected completion precedes its start.
    #[error("expected completion {expected_completion_at:?} precedes start {started_at:?}")]
    TimerOrderInvalid {
        /// When the task started.
        started_at: Timestamp,
        /// The malformed expected completion instant.
        expected_completion_at: Timestamp,
    },

    /// An adventurer level below 1 was supplied.
    #[error("adventurer level must be >= 1, got {level}")]
    LevelInvalid {
        /// The rejected level.
        level: u32,
    },

    /// A doctrine level filter has max below min.
    #[error("doctrine level filter invalid: min {min} exceeds max {max}")]
    LevelFilterInvalid {
        /// Filter lower bound.
        min: u32,
        /// Filter upper bound.
        max: u32,
    },

    /// A facility template was constructed with no tiers.
    #[error("facility template must define at least one tier")]
    NoTiers,

    /// A facility upgrade skipped a tier or went backwards.
    #[error("facility tier transition invalid: at tier {current}, requested {requested}")]
    TierInvalid {
        /// The facility's current tier.
        current: u32,
        /// The requested tier.
        requested: u32,
    },

    /// Agent template growth entries must start at level 2.
    #[error("growth bonus level must be >= 2, got {level}")]
    GrowthLevelInvalid {
        /// The rejected growth level key.
        level: u32,
    },

    /// A crafting queue was constructed with zero active slots.
    #[error("crafting queue must have at least one active slot")]
    ZeroSlots,

    /// A task mutator required `InProgress` but found another status.
    #[error("task {task} is {status:?}, not in progress")]
    TaskNotInProgress {
        /// The task.
        task: TaskId,
        /// Its actual status.
        status: TaskStatus,
    },

    /// An offer was marked taken twice.
    #[error("offer {offer} has already been taken")]
    OfferAlreadyTaken {
        /// The offer.
        offer: OfferId,
    },

    /// An adventurer mutator required `Idle` but found another status.
    #[error("adventurer {adventurer} is {status:?}, not idle")]
    AdventurerNotIdle {
        /// The adventurer.
        adventurer: AdventurerId,
        /// Their actual status.
        status: AdventurerStatus,
    },

    /// An adventurer mutator required `Assigned` but found another status.
    #[error("adventurer {adventurer} is {status:?}, not assigned")]
    AdventurerNotAssigned {
        /// The adventurer.
        adventurer: AdventurerId,
        /// Their actual status.
        status: AdventurerStatus,
    },

    /// An adventurer mutator required `Injured` but found another status.
    #[error("adventurer {adventurer} is {status:?}, not injured")]
    AdventurerNotInjured {
        /// The adventurer.
        adventurer: AdventurerId,
        /// Their actual status.
        status: AdventurerStatus,
    },

    /// A crafting job mutator was invoked in the wrong state.
    #[error("craft job {job} is {state:?}, expected {expected:?}")]
    JobStateInvalid {
        /// The job.
        job: CraftJobId,
        /// Its actual state.
        state: CraftJobState,
        /// The state the mutator required.
        expected: CraftJobState,
    },

    /// A job was promoted while every active slot was occupied.
    #[error("crafting queue is full: {active} of {slots} slots occupied")]
    QueueFull {
        /// Jobs currently occupying slots.
        active: usize,
        /// Total slot count.
        slots: u32,
    },

    /// A job was promoted from an empty backlog.
    #[error("crafting queue backlog is empty")]
    QueueEmpty,

    /// A job id was not found where the queue expected it.
    #[error("craft job {job} is not tracked in the {list} list")]
    JobNotTracked {
        /// The job.
        job: CraftJobId,
        /// Which list was searched ("active" or "queued").
        list: &'static str,
    },

    /// The per-organization simulation clock would move backwards.
    #[error("simulation clock would move backwards: at {current:?}, requested {requested:?}")]
    ClockMovedBackwards {
        /// The organization's current `last_simulated_at`.
        current: Timestamp,
        /// The earlier instant that was requested.
        requested: Timestamp,
    },

    /// A counter increment overflowed.
    #[error("counter overflow: {context}")]
    CounterOverflow {
        /// Description of the counter being incremented.
        context: &'static str,
    },

    /// A value-object operation failed.
    #[error(transparent)]
    Type(#[from] TypeError),
}
