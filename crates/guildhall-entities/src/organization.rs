//! Organizations (guilds): the player's persistent economic aggregate.
//!
//! An organization owns a wallet, a map of progress tracks, and its
//! simulation timestamps. The `last_simulated_at` clock is monotonic per
//! organization: it starts at `created_at` and [`advance_to`] refuses to
//! move it backwards. This is the anchor for deterministic offline
//! catch-up -- the scheduler replays elapsed time by advancing it forward
//! only.
//!
//! [`advance_to`]: Organization::advance_to

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use guildhall_types::{OrgId, ResourceBundle, Timestamp};

use crate::error::EntityError;
use crate::track::ProgressTrack;

/// A guild: wallet, progress tracks, and simulation clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier.
    id: OrgId,
    /// Display name.
    name: String,
    /// The guild's resource wallet.
    wallet: ResourceBundle,
    /// Progress tracks keyed by track key.
    tracks: BTreeMap<String, ProgressTrack>,
    /// When the organization was created.
    created_at: Timestamp,
    /// Last player interaction.
    last_active_at: Timestamp,
    /// Monotonic simulation clock; never precedes `created_at`.
    last_simulated_at: Timestamp,
}

impl Organization {
    /// Create a new organization at `created_at` with a starting wallet.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::EmptyName`] if the name is blank.
    pub fn new(
        id: OrgId,
        name: String,
        wallet: ResourceBundle,
        created_at: Timestamp,
    ) -> Result<Self, EntityError> {
        if name.trim().is_empty() {
            return Err(EntityError::EmptyName {
                entity: "organization",
            });
        }
        Ok(Self {
            id,
            name,
            wallet,
            tracks: BTreeMap::new(),
            created_at,
            last_active_at: created_at,
            last_simulated_at: created_at,
        })
    }

    /// Restore an organization from persisted parts.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::ClockMovedBackwards`] if `last_simulated_at`
    /// precedes `created_at`, or [`EntityError::EmptyName`] for a blank
    /// name.
    pub fn from_parts(
        id: OrgId,
        name: String,
        wallet: ResourceBundle,
        tracks: BTreeMap<String, ProgressTrack>,
        created_at: Timestamp,
        last_active_at: Timestamp,
        last_simulated_at: Timestamp,
    ) -> Result<Self, EntityError> {
        if name.trim().is_empty() {
            return Err(EntityError::EmptyName {
                entity: "organization",
            });
        }
        if last_simulated_at.before(created_at) {
            return Err(EntityError::ClockMovedBackwards {
                current: created_at,
                requested: last_simulated_at,
            });
        }
        Ok(Self {
            id,
            name,
            wallet,
            tracks,
            created_at,
            last_active_at,
            last_simulated_at,
        })
    }

    /// Return the organization id.
    pub const fn id(&self) -> &OrgId {
        &self.id
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the wallet.
    pub const fn wallet(&self) -> &ResourceBundle {
        &self.wallet
    }

    /// Replace the wallet. Used by the economy system after a validated
    /// cost or reward application; not a public affordance for arbitrary
    /// balance edits.
    pub fn replace_wallet(&mut self, wallet: ResourceBundle) {
        self.wallet = wallet;
    }

    /// Return the track for `key`, if it exists.
    pub fn track(&self, key: &str) -> Option<&ProgressTrack> {
        self.tracks.get(key)
    }

    /// Return the track for `key`, creating it at 0 if absent.
    pub fn ensure_track(&mut self, key: &str) -> &mut ProgressTrack {
        self.tracks
            .entry(key.to_owned())
            .or_insert_with(|| ProgressTrack::new(key.to_owned()))
    }

    /// Current value of the track for `key` (0 if the track is absent).
    pub fn track_value(&self, key: &str) -> u64 {
        self.tracks.get(key).map_or(0, ProgressTrack::current_value)
    }

    /// True iff the track for `key` has reached `threshold`. An absent
    /// track counts as value 0.
    pub fn track_reached(&self, key: &str, threshold: u64) -> bool {
        self.track_value(key) >= threshold
    }

    /// Read-only view of all tracks.
    pub const fn tracks(&self) -> &BTreeMap<String, ProgressTrack> {
        &self.tracks
    }

    /// Return the creation instant.
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Return the last player-activity instant.
    pub const fn last_active_at(&self) -> Timestamp {
        self.last_active_at
    }

    /// Return the simulation clock position.
    pub const fn last_simulated_at(&self) -> Timestamp {
        self.last_simulated_at
    }

    /// Record player activity at `now`.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_active_at = now;
    }

    /// Advance the simulation clock to `now`.
    ///
    /// Advancing to the current position is a no-op and succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::ClockMovedBackwards`] if `now` precedes the
    /// current clock position.
    pub fn advance_to(&mut self, now: Timestamp) -> Result<(), EntityError> {
        if now.before(self.last_simulated_at) {
            return Err(EntityError::ClockMovedBackwards {
                current: self.last_simulated_at,
                requested: now,
            });
        }
        self.last_simulated_at = now;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use guildhall_types::Resource;

    /// Helper: organization created at t=1000 with 100 gold.
    fn org() -> Organization {
        Organization::new(
            OrgId::parse("org-1").unwrap(),
            "Order of the Ledger".to_owned(),
            ResourceBundle::of(Resource::Gold, 100),
            Timestamp::from_millis(1_000),
        )
        .unwrap()
    }

    #[test]
    fn new_org_clocks_start_at_created() {
        let org = org();
        assert_eq!(org.last_simulated_at(), org.created_at());
        assert_eq!(org.last_active_at(), org.created_at());
    }

    #[test]
    fn blank_name_rejected() {
        let result = Organization::new(
            OrgId::parse("org-2").unwrap(),
            "   ".to_owned(),
            ResourceBundle::new(),
            Timestamp::UNIX_EPOCH,
        );
        assert!(result.is_err());
    }

    #[test]
    fn advance_is_monotonic() {
        let mut org = org();
        let t1 = Timestamp::from_millis(2_000);
        let t2 = Timestamp::from_millis(3_000);

        org.advance_to(t1).unwrap();
        org.advance_to(t2).unwrap();
        assert_eq!(org.last_simulated_at(), t2);

        // Moving backwards throws and leaves the clock alone.
        assert!(org.advance_to(t1).is_err());
        assert_eq!(org.last_simulated_at(), t2);
    }

    #[test]
    fn advance_to_same_instant_is_noop() {
        let mut org = org();
        let t = Timestamp::from_millis(5_000);
        org.advance_to(t).unwrap();
        org.advance_to(t).unwrap();
        assert_eq!(org.last_simulated_at(), t);
    }

    #[test]
    fn from_parts_rejects_clock_before_creation() {
        let result = Organization::from_parts(
            OrgId::parse("org-3").unwrap(),
            "Broken Clock".to_owned(),
            ResourceBundle::new(),
            BTreeMap::new(),
            Timestamp::from_millis(1_000),
            Timestamp::from_millis(1_000),
            Timestamp::from_millis(999),
        );
        assert!(result.is_err());
    }

    #[test]
    fn ensure_track_creates_at_zero() {
        let mut org = org();
        assert!(org.track("research").is_none());
        assert_eq!(org.ensure_track("research").current_value(), 0);
        assert!(org.track("research").is_some());
    }

    #[test]
    fn absent_track_reads_zero() {
        let org = org();
        assert_eq!(org.track_value("nonexistent"), 0);
        assert!(org.track_reached("nonexistent", 0));
        assert!(!org.track_reached("nonexistent", 1));
    }

    #[test]
    fn wallet_replacement() {
        let mut org = org();
        org.replace_wallet(ResourceBundle::of(Resource::Gold, 50));
        assert_eq!(org.wallet().amount(Resource::Gold), 50);
    }
}
