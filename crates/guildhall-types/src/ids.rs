//! Phantom-typed identifiers over plain strings.
//!
//! Every entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. The underlying
//! representation is a plain string (a UUID v7 when generated here), so
//! the persistence and UI collaborators round-trip IDs as strings; the
//! kind separation exists only in the type system and costs nothing at
//! runtime. Equality is plain string equality within a kind.

use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Marker trait for identifier kinds.
///
/// Implemented by zero-sized tag types only. The `LABEL` names the kind
/// in error messages; it is never consulted for equality.
pub trait IdKind: Copy + Clone + Eq + Ord + Hash + fmt::Debug {
    /// Human-readable label for this identifier kind.
    const LABEL: &'static str;
}

/// An opaque identifier parameterized by a phantom kind tag.
///
/// Two identifiers are equal iff their string values are equal and they
/// share the same kind; identifiers of different kinds cannot be compared
/// at all -- the compiler rejects it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent, bound(serialize = "", deserialize = ""))]
pub struct Id<K: IdKind> {
    /// The underlying opaque string value.
    value: String,
    #[serde(skip)]
    _kind: PhantomData<K>,
}

impl<K: IdKind> Id<K> {
    /// Generate a fresh identifier using UUID v7 (time-ordered).
    ///
    /// Collision probability is negligible; callers treat the value as
    /// opaque.
    pub fn generate() -> Self {
        Self {
            value: Uuid::now_v7().to_string(),
            _kind: PhantomData,
        }
    }

    /// Parse an identifier from an existing string value.
    ///
    /// The value is trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::EmptyIdentifier`] if the string is empty or
    /// whitespace-only.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyIdentifier { kind: K::LABEL });
        }
        Ok(Self {
            value: trimmed.to_owned(),
            _kind: PhantomData,
        })
    }

    /// Return the identifier's string value.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume the identifier, returning the inner string.
    pub fn into_string(self) -> String {
        self.value
    }
}

impl<K: IdKind> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Generates a zero-sized kind marker plus its identifier alias.
macro_rules! define_kind {
    (
        $(#[$meta:meta])*
        $kind:ident => $alias:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $kind;

        impl IdKind for $kind {
            const LABEL: &'static str = $label;
        }

        $(#[$meta])*
        pub type $alias = Id<$kind>;
    };
}

define_kind! {
    /// Identifier kind for organizations (guilds).
    OrgKind => OrgId, "organization"
}

define_kind! {
    /// Identifier kind for adventurer instances.
    AdventurerKind => AdventurerId, "adventurer"
}

define_kind! {
    /// Identifier kind for agent templates (catalog).
    AgentTemplateKind => AgentTemplateId, "agent-template"
}

define_kind! {
    /// Identifier kind for task archetypes (catalog).
    TaskArchetypeKind => TaskArchetypeId, "task-archetype"
}

define_kind! {
    /// Identifier kind for active task instances.
    TaskKind => TaskId, "task"
}

define_kind! {
    /// Identifier kind for task offers.
    OfferKind => OfferId, "offer"
}

define_kind! {
    /// Identifier kind for facility templates (catalog).
    FacilityTemplateKind => FacilityTemplateId, "facility-template"
}

define_kind! {
    /// Identifier kind for facility instances.
    FacilityKind => FacilityId, "facility"
}

define_kind! {
    /// Identifier kind for unlock rules (catalog).
    UnlockRuleKind => UnlockRuleId, "unlock-rule"
}

define_kind! {
    /// Identifier kind for crafting jobs.
    CraftJobKind => CraftJobId, "craft-job"
}

define_kind! {
    /// Identifier kind for mission doctrines.
    DoctrineKind => DoctrineId, "doctrine"
}

define_kind! {
    /// Identifier kind for armory items.
    ItemKind => ItemId, "item"
}
