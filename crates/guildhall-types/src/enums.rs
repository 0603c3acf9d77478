//! Finite-state labels shared by entities and systems.
//!
//! Every entity with a lifecycle carries one of these discriminants; the
//! legal transitions are enforced by the entity mutators, not here. All
//! enums export to `TypeScript` for the browser client.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifecycle of an active task: `InProgress` is the only non-terminal
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TaskStatus {
    /// The task is running; it resolves once its completion instant passes.
    InProgress,
    /// The task resolved (terminal).
    Completed,
    /// The task was cancelled by explicit state transition (terminal).
    Cancelled,
}

/// Outcome category assigned by task resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TaskOutcome {
    /// Score reached the great-success threshold.
    GreatSuccess,
    /// Score reached the success threshold.
    Success,
    /// Score fell below the success threshold.
    Failure,
}

/// Availability state of an adventurer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AdventurerStatus {
    /// Available for assignment.
    Idle,
    /// Currently assigned to a task.
    Assigned,
    /// Injured; unavailable until recovered.
    Injured,
    /// Unavailable for another reason (on leave, story-locked).
    Unavailable,
}

/// What a mission doctrine optimizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DoctrineFocus {
    /// Maximize gold rewards.
    Gold,
    /// Maximize adventurer experience.
    Xp,
    /// Maximize material rewards.
    Materials,
    /// Weigh all rewards evenly.
    Balanced,
}

/// How much risk a doctrine accepts when pairing adventurers to missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RiskTolerance {
    /// Penalize pairings likely to fail.
    Low,
    /// No risk adjustment.
    Medium,
    /// Chase high rewards even at failure risk.
    High,
}

/// Whether a doctrine is currently driving automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DoctrineState {
    /// The doctrine proposes missions each tick.
    Active,
    /// The doctrine is paused; it proposes nothing.
    Suspended,
}

/// Lifecycle of a crafting job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CraftJobState {
    /// Waiting in the queue (FIFO).
    Queued,
    /// Occupying an active slot; completes when its timer passes.
    InProgress,
    /// Finished (terminal).
    Completed,
}

/// Lifecycle of a facility instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FacilityState {
    /// Being built; effects are not yet active.
    UnderConstruction,
    /// Operational; tier effects apply.
    Active,
}

/// Rarity grade of an armory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ItemRarity {
    /// Baseline equipment.
    Common,
    /// Above-average equipment.
    Fine,
    /// Rare equipment; auto-equip touches it only when allowed by rule.
    Rare,
}

/// Where an armory item currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ItemCondition {
    /// Stored in the armory; eligible for auto-equip.
    InArmory,
    /// Worn by an adventurer.
    Equipped,
    /// Durability exhausted; never a candidate.
    Broken,
}

/// Equipment slot on an adventurer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EquipSlot {
    /// Main-hand weapon.
    Weapon,
    /// Body armor.
    Armor,
    /// Accessory slot.
    Trinket,
}

/// Category of a task archetype; doctrines can filter on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TaskCategory {
    /// Resource gathering expeditions.
    Gathering,
    /// Combat contracts.
    Combat,
    /// Research projects.
    Research,
    /// Diplomatic envoys.
    Diplomacy,
    /// Caravan and supply work.
    Logistics,
}
