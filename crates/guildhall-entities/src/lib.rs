//! Entity definitions and state machines for the Guildhall simulation.
//!
//! This crate contains the domain layer -- every aggregate, template, and
//! instance the simulation operates on, plus the [`state::GameState`]
//! root that owns them at runtime. It sits between `guildhall-types`
//! (which defines the value objects) and `guildhall-systems` (which runs
//! the tick pipeline). Nothing here reads a wall clock or performs I/O;
//! every timer is plain data compared against a caller-supplied `now`.
//!
//! # Modules
//!
//! - [`organization`] -- The [`Organization`] aggregate: wallet, tracks, timestamps
//! - [`track`] -- Named monotonic [`ProgressTrack`] counters
//! - [`archetype`] -- Reusable [`TaskArchetype`] mission definitions
//! - [`task`] -- Running [`TaskInstance`] missions with completion timers
//! - [`offer`] -- Time-limited [`TaskOffer`] postings
//! - [`adventurer`] -- [`AgentTemplate`] growth curves and [`AdventurerInstance`] roster members
//! - [`facility`] -- Tiered [`FacilityTemplate`] buildings and built [`FacilityInstance`]s
//! - [`unlock`] -- Threshold-gated [`UnlockRule`] content gates
//! - [`crafting`] -- [`CraftingQueue`] slots and [`CraftJob`] production timers
//! - [`doctrine`] -- [`MissionDoctrine`] automation policies
//! - [`item`] -- Armory [`ItemInstance`] equipment
//! - [`state`] -- The [`Entity`] sum type and [`GameState`] aggregate root
//! - [`error`] -- Error types for entity operations ([`EntityError`])

pub mod adventurer;
pub mod archetype;
pub mod crafting;
pub mod doctrine;
pub mod error;
pub mod facility;
pub mod item;
pub mod offer;
pub mod organization;
pub mod state;
pub mod task;
pub mod track;
pub mod unlock;

// Re-export primary types at crate root for convenience.
pub use adventurer::{AdventurerInstance, AgentTemplate};
pub use archetype::{TaskArchetype, TaskArchetypeSpec};
pub use crafting::{CraftJob, CraftingQueue};
pub use doctrine::MissionDoctrine;
pub use error::EntityError;
pub use facility::{FacilityEffect, FacilityInstance, FacilityTemplate, FacilityTier};
pub use item::ItemInstance;
pub use offer::TaskOffer;
pub use organization::Organization;
pub use state::{Entity, EntityKind, GameState};
pub use task::{TaskInstance, TaskSpec};
pub use track::ProgressTrack;
pub use unlock::{UnlockEffects, UnlockRule};
