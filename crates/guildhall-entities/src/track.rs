//! Progress tracks: named non-negative counters gating unlocks.
//!
//! A track is scoped to an organization and only ever moves up. Negative
//! increments are unrepresentable here (`u64` amounts), so the only
//! failure mode is counter overflow.

use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// A named non-negative progress counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressTrack {
    /// The track key (e.g. `"research"`, `"renown"`).
    key: String,
    /// Current accumulated value.
    current_value: u64,
}

impl ProgressTrack {
    /// Create a new track starting at 0.
    pub const fn new(key: String) -> Self {
        Self {
            key,
            current_value: 0,
        }
    }

    /// Restore a track from persisted parts.
    pub const fn from_parts(key: String, current_value: u64) -> Self {
        Self { key, current_value }
    }

    /// Return the track key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Return the current value.
    pub const fn current_value(&self) -> u64 {
        self.current_value
    }

    /// Increment the counter, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::CounterOverflow`] if the counter would
    /// exceed `u64::MAX`.
    pub fn increment(&mut self, amount: u64) -> Result<u64, EntityError> {
        self.current_value =
            self.current_value
                .checked_add(amount)
                .ok_or(EntityError::CounterOverflow {
                    context: "progress track increment",
                })?;
        Ok(self.current_value)
    }

    /// True iff the track has reached `threshold` (inclusive).
    pub const fn reached(&self, threshold: u64) -> bool {
        self.current_value >= threshold
    }
}
