//! Domain systems for the Guildhall simulation.
//!
//! This crate contains the logic layer -- everything that computes over
//! the entity model without touching I/O. It sits between
//! `guildhall-entities` (which defines the aggregates) and the command
//! dispatcher / scheduler collaborators (which apply the [`Action`]s the
//! systems emit and persist the results). Every system takes `now` as an
//! argument and uses no RNG, so a replay over the same state produces
//! the same proposals and reports.
//!
//! # Modules
//!
//! - [`actions`] -- The [`Action`] proposals systems emit and dispatchers apply
//! - [`automation`] -- The doctrine engine: scoring offers against idle rosters
//! - [`autoequip`] -- Per-slot equipment upgrades under role priorities
//! - [`config`] -- Tunable parameters for all systems ([`SimulationConfig`])
//! - [`crafting`] -- Per-tick crafting queue transitions
//! - [`economy`] -- Validated wallet debits and credits
//! - [`error`] -- Error types for system operations ([`SystemError`])
//! - [`offers`] -- Offer generation and expiry
//! - [`progression`] -- Track increments and unlock detection
//! - [`resolution`] -- Batch task resolution ([`ResolutionReport`])

pub mod actions;
pub mod automation;
pub mod autoequip;
pub mod config;
pub mod crafting;
pub mod economy;
pub mod error;
pub mod offers;
pub mod progression;
pub mod resolution;

// Re-export primary types at crate root for convenience.
pub use actions::Action;
pub use autoequip::{AutoEquipRules, RolePriorities};
pub use config::SimulationConfig;
pub use error::SystemError;
pub use progression::{TrackChange, UnlockResult};
pub use resolution::{AgentChange, ResolutionInputs, ResolutionReport, TaskResult};
