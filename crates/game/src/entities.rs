//! Grapple props and the lookup used to find them.
//!
//! The grapple never holds references into the world. It holds
//! [`EntityId`]s and resolves them every tick, so a prop that has been
//! despawned simply stops resolving.

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque handle to a world entity.
///
/// Ids are never reused, so a stale id resolves to nothing rather than to
/// a different entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Raw id value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How heavy a grapple target is.
///
/// Decides who moves during a pull: light props come to the player, the
/// player goes to heavy props, medium props meet the player halfway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    Light,
    Medium,
    /// Also the fallback for unknown tags.
    #[default]
    Heavy,
}

impl WeightClass {
    /// All classes, in candidate discovery order.
    pub const ALL: [Self; 3] = [Self::Light, Self::Medium, Self::Heavy];

    /// Scene tag for this class.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
        }
    }

    /// Parse a scene tag. Unknown tags return `None`; callers that need a
    /// class anyway should fall back to [`WeightClass::default`].
    pub fn parse_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.tag() == tag)
    }
}

/// A grapple-able object in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    /// Position in world space.
    pub position: Vec3,

    /// Weight class.
    pub weight: WeightClass,
}

/// Entity lookup used by grapple targeting and pulling.
pub trait TargetWorld {
    /// All entities of a weight class, in stable query order.
    fn find_by_weight(&self, weight: WeightClass) -> Vec<EntityId>;

    /// Current position of an entity, or `None` if it no longer exists.
    fn position(&self, id: EntityId) -> Option<Vec3>;

    /// Weight class of an entity, or `None` if it no longer exists.
    fn weight(&self, id: EntityId) -> Option<WeightClass>;

    /// Move an entity. Returns `false` if it no longer exists.
    fn set_position(&mut self, id: EntityId, position: Vec3) -> bool;
}

/// Simple owning store of props.
///
/// Query order is spawn order.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    props: BTreeMap<EntityId, Prop>,
    next_id: u32,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prop to the world.
    pub fn spawn(&mut self, position: Vec3, weight: WeightClass) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.props.insert(id, Prop { position, weight });
        id
    }

    /// Add a prop by scene tag. Unknown tags become [`WeightClass::Heavy`].
    pub fn spawn_tagged(&mut self, position: Vec3, tag: &str) -> EntityId {
        self.spawn(position, WeightClass::parse_tag(tag).unwrap_or_default())
    }

    /// Remove a prop. Its id will never resolve again.
    pub fn despawn(&mut self, id: EntityId) -> Option<Prop> {
        self.props.remove(&id)
    }

    /// Look up a prop.
    pub fn get(&self, id: EntityId) -> Option<&Prop> {
        self.props.get(&id)
    }

    /// Number of live props.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether the store has no props.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Iterate over live props in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Prop)> {
        self.props.iter().map(|(id, prop)| (*id, prop))
    }
}

impl TargetWorld for EntityStore {
    fn find_by_weight(&self, weight: WeightClass) -> Vec<EntityId> {
        self.props
            .iter()
            .filter(|(_, prop)| prop.weight == weight)
            .map(|(id, _)| *id)
            .collect()
    }

    fn position(&self, id: EntityId) -> Option<Vec3> {
        self.props.get(&id).map(|prop| prop.position)
    }

    fn weight(&self, id: EntityId) -> Option<WeightClass> {
        self.props.get(&id).map(|prop| prop.weight)
    }

    fn set_position(&mut self, id: EntityId, position: Vec3) -> bool {
        match self.props.get_mut(&id) {
            Some(prop) => {
                prop.position = position;
                true
            }
            None => false,
        }
    }
}
