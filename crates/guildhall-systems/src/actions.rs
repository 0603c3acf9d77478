//! Actions proposed by the systems.
//!
//! Systems never mutate state they do not own: automation, auto-equip,
//! and crafting emit [`Action`] values describing what should happen, and
//! the command dispatcher (a collaborator) validates and applies them.
//! This keeps every proposal replayable and auditable.

use serde::{Deserialize, Serialize};

use guildhall_types::{AdventurerId, CraftJobId, DoctrineId, EquipSlot, ItemId, OfferId, OrgId};

/// A proposed state change, emitted by a system and applied by the
/// command dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum Action {
    /// Accept an offer and dispatch an adventurer on it.
    StartMission {
        /// The doctrine that proposed the mission.
        doctrine: DoctrineId,
        /// The offer to accept.
        offer: OfferId,
        /// The adventurer to dispatch.
        adventurer: AdventurerId,
    },
    /// Move a queued crafting job into an active slot and start it.
    StartCrafting {
        /// The organization whose queue holds the job.
        queue: OrgId,
        /// The job to start.
        job: CraftJobId,
    },
    /// Complete an active crafting job and release its slot.
    CompleteCrafting {
        /// The organization whose queue holds the job.
        queue: OrgId,
        /// The job to complete.
        job: CraftJobId,
    },
    /// Equip an armory item on an adventurer.
    EquipItem {
        /// The adventurer receiving the item.
        adventurer: AdventurerId,
        /// The slot being filled.
        slot: EquipSlot,
        /// The item to equip.
        item: ItemId,
        /// The item displaced back to the armory, if the slot was
        /// occupied.
        replaces: Option<ItemId>,
    },
}
