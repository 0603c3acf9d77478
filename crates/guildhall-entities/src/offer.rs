//! Task offers: time-boxed, not-yet-accepted opportunities.
//!
//! An offer references an archetype and can be taken exactly once.
//! Expiry is inclusive: at `expires_at` the offer is already expired.

use serde::{Deserialize, Serialize};

use guildhall_types::{OfferId, OrgId, TaskArchetypeId, Timestamp};

use crate::error::EntityError;

/// A time-boxed task opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOffer {
    /// Unique identifier.
    id: OfferId,
    /// Owning organization.
    org: OrgId,
    /// The archetype on offer.
    archetype: TaskArchetypeId,
    /// When the offer was generated.
    created_at: Timestamp,
    /// When the offer lapses, if it does.
    expires_at: Option<Timestamp>,
    /// Whether the offer has been accepted.
    taken: bool,
    /// When the offer was accepted, if it was.
    taken_at: Option<Timestamp>,
}

impl TaskOffer {
    /// Create a fresh, untaken offer.
    pub const fn new(
        id: OfferId,
        org: OrgId,
        archetype: TaskArchetypeId,
        created_at: Timestamp,
        expires_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            org,
            archetype,
            created_at,
            expires_at,
            taken: false,
            taken_at: None,
        }
    }

    /// Return the offer id.
    pub const fn id(&self) -> &OfferId {
        &self.id
    }

    /// Return the owning organization.
    pub const fn org(&self) -> &OrgId {
        &self.org
    }

    /// Return the archetype on offer.
    pub const fn archetype(&self) -> &TaskArchetypeId {
        &self.archetype
    }

    /// Return when the offer was generated.
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Return the expiry instant, if any.
    pub const fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// True iff the offer has been taken.
    pub const fn is_taken(&self) -> bool {
        self.taken
    }

    /// When the offer was taken, if it was.
    pub const fn taken_at(&self) -> Option<Timestamp> {
        self.taken_at
    }

    /// True iff `now` has reached the expiry instant (inclusive). Offers
    /// without an expiry never expire.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expiry| now.at_or_after(expiry))
    }

    /// True iff the offer can still be accepted at `now`.
    pub fn is_available(&self, now: Timestamp) -> bool {
        !self.taken && !self.is_expired(now)
    }

    /// Mark the offer taken.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::OfferAlreadyTaken`] if the offer was taken
    /// before; taking is a once-only transition.
    pub fn mark_taken(&mut self, now: Timestamp) -> Result<(), EntityError> {
        if self.taken {
            return Err(EntityError::OfferAlreadyTaken {
                offer: self.id.clone(),
            });
        }
        self.taken = true;
        self.taken_at = Some(now);
        Ok(())
    }
}
