//! The auto-equip system.
//!
//! For each equipment slot the system picks the best armory candidate
//! under the adventurer's role priorities and proposes an
//! [`Action::EquipItem`] only when it strictly beats what the adventurer
//! already wears. Ties keep the incumbent, so repeated passes over an
//! unchanged armory settle immediately.

use serde::{Deserialize, Serialize};

use guildhall_types::{EquipSlot, ItemCondition, ItemRarity, Stat};

use guildhall_entities::{AdventurerInstance, ItemInstance};

use crate::actions::Action;

/// The slots considered, in proposal order.
const SLOTS: [EquipSlot; 3] = [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Trinket];

/// Player-facing knobs for automatic equipment swaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoEquipRules {
    /// Whether rare items may be auto-equipped (players often reserve
    /// them for manual assignment).
    pub allow_rare_auto_equip: bool,
    /// Global multiplier on the stat component of every item score.
    pub focus_multiplier: i64,
    /// Flat score bonus for fine items.
    pub fine_bonus: i64,
    /// Flat score bonus for rare items.
    pub rare_bonus: i64,
}

impl Default for AutoEquipRules {
    fn default() -> Self {
        Self {
            allow_rare_auto_equip: false,
            focus_multiplier: 1,
            fine_bonus: 5,
            rare_bonus: 10,
        }
    }
}

/// An adventurer role's stat preference, most important first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePriorities {
    /// The role label this priority list belongs to.
    pub role: String,
    /// Stats in descending importance.
    pub priorities: Vec<Stat>,
}

/// Score an item under the role priorities: each stat value weighted by
/// its priority rank (most important stat gets the largest weight), then
/// the focus multiplier, then the flat rarity bonus.
fn item_score(item: &ItemInstance, priorities: &RolePriorities, rules: &AutoEquipRules) -> i64 {
    let rank_count = i64::try_from(priorities.priorities.len()).unwrap_or(i64::MAX);
    let stat_component = priorities
        .priorities
        .iter()
        .enumerate()
        .map(|(index, stat)| {
            let weight = rank_count.saturating_sub(i64::try_from(index).unwrap_or(i64::MAX));
            item.stats().get(*stat).saturating_mul(weight)
        })
        .fold(0_i64, i64::saturating_add);

    let rarity_bonus = match item.rarity() {
        ItemRarity::Common => 0,
        ItemRarity::Fine => rules.fine_bonus,
        ItemRarity::Rare => rules.rare_bonus,
    };

    stat_component
        .saturating_mul(rules.focus_multiplier)
        .saturating_add(rarity_bonus)
}

fn is_candidate(item: &ItemInstance, slot: EquipSlot, rules: &AutoEquipRules) -> bool {
    item.slot() == slot
        && item.condition() == ItemCondition::InArmory
        && item.durability() > 0
        && (item.rarity() != ItemRarity::Rare || rules.allow_rare_auto_equip)
}

/// Propose equipment swaps for one adventurer.
///
/// `armory` holds the items available to equip; `equipped` holds what
/// the adventurer currently wears (at most one item per slot). An empty
/// slot counts as score 0, so zero-value candidates are not proposed.
pub fn propose_equipment(
    adventurer: &AdventurerInstance,
    priorities: &RolePriorities,
    armory: &[&ItemInstance],
    equipped: &[&ItemInstance],
    rules: &AutoEquipRules,
) -> Vec<Action> {
    let mut actions = Vec::new();

    for slot in SLOTS {
        let incumbent = equipped.iter().copied().find(|item| item.slot() == slot);
        let incumbent_score = incumbent.map_or(0, |item| item_score(item, priorities, rules));

        let mut best: Option<(i64, &ItemInstance)> = None;
        for item in armory.iter().copied() {
            if !is_candidate(item, slot, rules) {
                continue;
            }
            let score = item_score(item, priorities, rules);
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, item));
            }
        }

        if let Some((score, item)) = best {
            if score > incumbent_score {
                actions.push(Action::EquipItem {
                    adventurer: adventurer.id().clone(),
                    slot,
                    item: item.id().clone(),
                    replaces: incumbent.map(|worn| worn.id().clone()),
                });
            }
        }
    }

    actions
}
