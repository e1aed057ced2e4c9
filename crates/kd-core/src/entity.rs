use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Unique identifier for every resource entity in the world.
///
/// Ids are allocated from a single counter and never reused within a session,
/// so an id stays valid as a key even after the entity it named is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a resource entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Choppable, yields wood.
    Tree,
    /// Mineable, yields stone.
    Rock,
    /// Eaten on contact, restores hunger.
    Berry,
    /// Permanent pool, restores thirst while standing in it.
    Water,
    /// Crafted fire, restores health nearby.
    Campfire,
}

impl ResourceKind {
    /// Every kind, in draw order (ground features first).
    pub const ALL: [Self; 5] = [
        Self::Water,
        Self::Tree,
        Self::Rock,
        Self::Berry,
        Self::Campfire,
    ];
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree => write!(f, "tree"),
            Self::Rock => write!(f, "rock"),
            Self::Berry => write!(f, "berry"),
            Self::Water => write!(f, "water"),
            Self::Campfire => write!(f, "campfire"),
        }
    }
}

/// A tree. Falls when its hit points run out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Where the trunk stands.
    pub position: Vec2,
    /// Remaining hits before it falls.
    pub hp: u32,
}

/// A rock. Breaks when its hit points run out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rock {
    /// Where the rock lies.
    pub position: Vec2,
    /// Remaining hits before it breaks.
    pub hp: u32,
}

/// A berry bush, eaten in one go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Berry {
    /// Where the bush grows.
    pub position: Vec2,
}

/// A circular water pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterPool {
    /// Center of the pool.
    pub position: Vec2,
    /// Radius of the pool surface.
    pub radius: f64,
}

/// A crafted campfire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campfire {
    /// Where the fire burns.
    pub position: Vec2,
}

/// Something that takes hits until it is used up.
pub trait Breakable {
    /// Remaining hit points.
    fn hp(&self) -> u32;

    /// Mutable access to the hit points.
    fn hp_mut(&mut self) -> &mut u32;

    /// Apply one hit. Returns true when the entity is now depleted.
    fn hit(&mut self) -> bool {
        let hp = self.hp_mut();
        *hp = hp.saturating_sub(1);
        *hp == 0
    }
}

impl Breakable for Tree {
    fn hp(&self) -> u32 {
        self.hp
    }

    fn hp_mut(&mut self) -> &mut u32 {
        &mut self.hp
    }
}

impl Breakable for Rock {
    fn hp(&self) -> u32 {
        self.hp
    }

    fn hp_mut(&mut self) -> &mut u32 {
        &mut self.hp
    }
}

/// Anything placed in the world at a fixed point.
pub trait Positioned {
    /// The entity's position.
    fn position(&self) -> Vec2;
}

macro_rules! impl_positioned {
    ($($ty:ty),*) => {
        $(impl Positioned for $ty {
            fn position(&self) -> Vec2 {
                self.position
            }
        })*
    };
}

impl_positioned!(Tree, Rock, Berry, WaterPool, Campfire);
