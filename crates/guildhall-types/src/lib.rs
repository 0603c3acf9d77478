//! Shared value objects and type definitions for the Guildhall simulation.
//!
//! This crate is the single source of truth for the primitive types used
//! across the Guildhall workspace: typed identifiers, timestamps and
//! durations, resource bundles, stat maps, and the finite-state
//! discriminants. Enums defined here flow downstream to `TypeScript` via
//! `ts-rs` for the browser client.
//!
//! # Modules
//!
//! - [`ids`] -- Phantom-typed identifier wrapper and entity kind markers
//! - [`time`] -- [`Timestamp`] (ms since epoch) and [`TickDuration`] spans
//! - [`resources`] -- [`Resource`] enum and the immutable [`ResourceBundle`]
//! - [`stats`] -- [`Stat`] enum and the immutable [`StatMap`]
//! - [`enums`] -- Finite-state labels shared by entities and systems
//! - [`error`] -- Error types for value-object operations ([`TypeError`])

pub mod enums;
pub mod error;
pub mod ids;
pub mod resources;
pub mod stats;
pub mod time;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AdventurerStatus, CraftJobState, DoctrineFocus, DoctrineState, EquipSlot, FacilityState,
    ItemCondition, ItemRarity, RiskTolerance, TaskCategory, TaskOutcome, TaskStatus,
};
pub use error::TypeError;
pub use ids::{
    AdventurerId, AgentTemplateId, CraftJobId, DoctrineId, FacilityId, FacilityTemplateId, Id,
    IdKind, ItemId, OfferId, OrgId, TaskArchetypeId, TaskId, UnlockRuleId,
};
pub use resources::{Resource, ResourceBundle};
pub use stats::{Stat, StatMap};
pub use time::{TickDuration, Timestamp};
