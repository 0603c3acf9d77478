//! The game state aggregate root.
//!
//! [`GameState`] owns every runtime entity in one id-keyed map. The
//! [`Entity`] sum type centralizes the discriminant: systems match on it
//! exhaustively instead of scattering string type checks. Ownership
//! discipline replaces the defensive copying of a looser runtime --
//! constructors take their containers by value, queries hand out fresh
//! `Vec`s of references, and [`GameState::snapshot`] deep-clones for the
//! UI collaborator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use guildhall_types::{AdventurerStatus, OrgId, ResourceBundle, Timestamp};

use crate::adventurer::AdventurerInstance;
use crate::crafting::{CraftJob, CraftingQueue};
use crate::doctrine::MissionDoctrine;
use crate::facility::FacilityInstance;
use crate::item::ItemInstance;
use crate::offer::TaskOffer;
use crate::organization::Organization;
use crate::task::TaskInstance;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Discriminant for the entity sum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// An [`Organization`].
    Organization,
    /// An [`AdventurerInstance`].
    Adventurer,
    /// A [`TaskInstance`].
    Task,
    /// A [`TaskOffer`].
    Offer,
    /// A [`FacilityInstance`].
    Facility,
    /// A [`CraftingQueue`].
    CraftingQueue,
    /// A [`CraftJob`].
    CraftJob,
    /// A [`MissionDoctrine`].
    Doctrine,
    /// An [`ItemInstance`].
    Item,
}

/// A runtime entity: one variant per instance type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Entity {
    /// An organization aggregate.
    Organization(Organization),
    /// An adventurer.
    Adventurer(AdventurerInstance),
    /// An active task.
    Task(TaskInstance),
    /// A task offer.
    Offer(TaskOffer),
    /// A facility.
    Facility(FacilityInstance),
    /// A crafting queue.
    CraftingQueue(CraftingQueue),
    /// A crafting job.
    CraftJob(CraftJob),
    /// A mission doctrine.
    Doctrine(MissionDoctrine),
    /// An armory item.
    Item(ItemInstance),
}

impl Entity {
    /// Return the discriminant.
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Organization(_) => EntityKind::Organization,
            Self::Adventurer(_) => EntityKind::Adventurer,
            Self::Task(_) => EntityKind::Task,
            Self::Offer(_) => EntityKind::Offer,
            Self::Facility(_) => EntityKind::Facility,
            Self::CraftingQueue(_) => EntityKind::CraftingQueue,
            Self::CraftJob(_) => EntityKind::CraftJob,
            Self::Doctrine(_) => EntityKind::Doctrine,
            Self::Item(_) => EntityKind::Item,
        }
    }

    /// Return the raw id string used as the state map key.
    ///
    /// Crafting queues have no id of their own; they key by their owning
    /// organization with a fixed suffix.
    pub fn key(&self) -> String {
        match self {
            Self::Organization(org) => org.id().as_str().to_owned(),
            Self::Adventurer(adv) => adv.id().as_str().to_owned(),
            Self::Task(task) => task.id().as_str().to_owned(),
            Self::Offer(offer) => offer.id().as_str().to_owned(),
            Self::Facility(facility) => facility.id().as_str().to_owned(),
            Self::CraftingQueue(queue) => format!("{}/crafting-queue", queue.org().as_str()),
            Self::CraftJob(job) => job.id().as_str().to_owned(),
            Self::Doctrine(doctrine) => doctrine.id().as_str().to_owned(),
            Self::Item(item) => item.id().as_str().to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The aggregate root: every runtime entity plus global resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// All entities, keyed by raw id string.
    entities: BTreeMap<String, Entity>,
    /// Global (non-wallet) resources.
    resources: ResourceBundle,
    /// When the player last played.
    last_played_at: Timestamp,
}

impl GameState {
    /// Create a state from an owned entity map. Taking the map by value
    /// guarantees the caller retains no handle to the backing storage.
    pub const fn new(
        entities: BTreeMap<String, Entity>,
        resources: ResourceBundle,
        last_played_at: Timestamp,
    ) -> Self {
        Self {
            entities,
            resources,
            last_played_at,
        }
    }

    /// Create an empty state.
    pub const fn empty(last_played_at: Timestamp) -> Self {
        Self {
            entities: BTreeMap::new(),
            resources: ResourceBundle::new(),
            last_played_at,
        }
    }

    /// Return the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True iff no entities are stored.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Return the global resources.
    pub const fn resources(&self) -> &ResourceBundle {
        &self.resources
    }

    /// Replace the global resources.
    pub fn replace_resources(&mut self, resources: ResourceBundle) {
        self.resources = resources;
    }

    /// Return when the player last played.
    pub const fn last_played_at(&self) -> Timestamp {
        self.last_played_at
    }

    /// Record a play session at `now`.
    pub fn record_played(&mut self, now: Timestamp) {
        self.last_played_at = now;
    }

    /// Insert an entity, returning whatever previously held its key.
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.key(), entity)
    }

    /// Remove an entity by raw id. Removal is always explicit; nothing
    /// is garbage-collected implicitly.
    pub fn remove(&mut self, key: &str) -> Option<Entity> {
        self.entities.remove(key)
    }

    /// Look up an entity by raw id.
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Look up an entity mutably by raw id.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Look up an organization by id.
    pub fn organization(&self, id: &OrgId) -> Option<&Organization> {
        match self.entities.get(id.as_str()) {
            Some(Entity::Organization(org)) => Some(org),
            _ => None,
        }
    }

    /// Look up an organization mutably by id.
    pub fn organization_mut(&mut self, id: &OrgId) -> Option<&mut Organization> {
        match self.entities.get_mut(id.as_str()) {
            Some(Entity::Organization(org)) => Some(org),
            _ => None,
        }
    }

    /// All entities of a kind, in key order.
    pub fn of_kind(&self, kind: EntityKind) -> Vec<&Entity> {
        self.entities
            .values()
            .filter(|entity| entity.kind() == kind)
            .collect()
    }

    /// All adventurers belonging to `org` with the given status, in key
    /// order.
    pub fn adventurers_with_status(
        &self,
        org: &OrgId,
        status: AdventurerStatus,
    ) -> Vec<&AdventurerInstance> {
        self.entities
            .values()
            .filter_map(|entity| match entity {
                Entity::Adventurer(adv) if adv.org() == org && adv.status() == status => Some(adv),
                _ => None,
            })
            .collect()
    }

    /// All offers belonging to `org` still available at `now`.
    pub fn available_offers(&self, org: &OrgId, now: Timestamp) -> Vec<&TaskOffer> {
        self.entities
            .values()
            .filter_map(|entity| match entity {
                Entity::Offer(offer) if offer.org() == org && offer.is_available(now) => {
                    Some(offer)
                }
                _ => None,
            })
            .collect()
    }

    /// All in-progress tasks ready for resolution at `now`.
    pub fn tasks_ready(&self, now: Timestamp) -> Vec<&TaskInstance> {
        self.entities
            .values()
            .filter_map(|entity| match entity {
                Entity::Task(task) if task.is_ready_for_resolution(now) => Some(task),
                _ => None,
            })
            .collect()
    }

    /// All active facilities belonging to `org`.
    pub fn active_facilities(&self, org: &OrgId) -> Vec<&FacilityInstance> {
        self.entities
            .values()
            .filter_map(|entity| match entity {
                Entity::Facility(facility) if facility.org() == org && facility.is_active() => {
                    Some(facility)
                }
                _ => None,
            })
            .collect()
    }

    /// Deep-clone the state for the UI collaborator.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}
