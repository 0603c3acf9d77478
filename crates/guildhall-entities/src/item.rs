//! Armory items consumed by the auto-equip system.

use serde::{Deserialize, Serialize};

use guildhall_types::{EquipSlot, ItemCondition, ItemId, ItemRarity, OrgId, StatMap};

use crate::error::EntityError;

/// A piece of equipment in an organization's armory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInstance {
    /// Unique identifier.
    id: ItemId,
    /// Owning organization.
    org: OrgId,
    /// Display name.
    name: String,
    /// The slot this item occupies when worn.
    slot: EquipSlot,
    /// Rarity grade.
    rarity: ItemRarity,
    /// Stat modifiers granted while worn.
    stats: StatMap,
    /// Remaining durability; 0 means unusable.
    durability: u32,
    /// Where the item currently is.
    condition: ItemCondition,
}

impl ItemInstance {
    /// Construct an item in the armory.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::EmptyName`] for a blank name.
    pub fn new(
        id: ItemId,
        org: OrgId,
        name: String,
        slot: EquipSlot,
        rarity: ItemRarity,
        stats: StatMap,
        durability: u32,
    ) -> Result<Self, EntityError> {
        if name.trim().is_empty() {
            return Err(EntityError::EmptyName { entity: "item" });
        }
        let condition = if durability == 0 {
            ItemCondition::Broken
        } else {
            ItemCondition::InArmory
        };
        Ok(Self {
            id,
            org,
            name,
            slot,
            rarity,
            stats,
            durability,
            condition,
        })
    }

    /// Return the item id.
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Return the owning organization.
    pub const fn org(&self) -> &OrgId {
        &self.org
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the equipment slot.
    pub const fn slot(&self) -> EquipSlot {
        self.slot
    }

    /// Return the rarity grade.
    pub const fn rarity(&self) -> ItemRarity {
        self.rarity
    }

    /// Return the stat modifiers.
    pub const fn stats(&self) -> &StatMap {
        &self.stats
    }

    /// Return the remaining durability.
    pub const fn durability(&self) -> u32 {
        self.durability
    }

    /// Return the item's current condition.
    pub const fn condition(&self) -> ItemCondition {
        self.condition
    }

    /// Move the item onto an adventurer.
    pub fn equip(&mut self) {
        self.condition = ItemCondition::Equipped;
    }

    /// Return the item to the armory.
    pub fn unequip(&mut self) {
        self.condition = if self.durability == 0 {
            ItemCondition::Broken
        } else {
            ItemCondition::InArmory
        };
    }
}
