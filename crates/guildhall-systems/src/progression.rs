//! The progression system: track increments and unlock detection.
//!
//! Tracks only move up; unlock detection is a read-only query. The
//! system does not remember which unlocks it already reported -- callers
//! keep their own applied-unlock bookkeeping, which makes
//! [`process_unlocks`] idempotent and safe to rerun after a replay.

use serde::{Deserialize, Serialize};

use guildhall_entities::{Organization, UnlockEffects, UnlockRule};
use guildhall_types::UnlockRuleId;

use crate::error::SystemError;

/// One pending track increment, typically produced by task resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackChange {
    /// The track key to increment.
    pub key: String,
    /// The amount to add.
    pub amount: u64,
}

/// A satisfied unlock rule and the content it releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockResult {
    /// The satisfied rule.
    pub rule: UnlockRuleId,
    /// The content the rule releases.
    pub effects: UnlockEffects,
}

/// Increment a track, creating it at 0 first if absent. Returns the new
/// track value.
///
/// # Errors
///
/// Returns [`SystemError::Entity`] on counter overflow; the track keeps
/// its previous value.
pub fn increment_track(
    org: &mut Organization,
    key: &str,
    amount: u64,
) -> Result<u64, SystemError> {
    let value = org.ensure_track(key).increment(amount)?;
    Ok(value)
}

/// Apply a batch of track changes in order.
///
/// # Errors
///
/// Returns [`SystemError::Entity`] on the first overflowing increment;
/// earlier changes in the batch remain applied.
pub fn apply_track_changes(
    org: &mut Organization,
    changes: &[TrackChange],
) -> Result<(), SystemError> {
    for change in changes {
        let _ = increment_track(org, &change.key, change.amount)?;
    }
    Ok(())
}

/// Query which rules the organization currently satisfies, in rule
/// order. No deduplication across calls: a satisfied rule is reported
/// every time.
pub fn process_unlocks(org: &Organization, rules: &[UnlockRule]) -> Vec<UnlockResult> {
    rules
        .iter()
        .filter(|rule| org.track_reached(rule.track_key(), rule.threshold()))
        .map(|rule| UnlockResult {
            rule: rule.id().clone(),
            effects: rule.effects().clone(),
        })
        .collect()
}
