use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Upper bound shared by every survival stat.
pub const STAT_MAX: f64 = 100.0;

/// The three survival stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Drops only while starving or dehydrated. Zero is terminal.
    Health,
    /// Refilled by berries.
    Hunger,
    /// Refilled by standing in water.
    Thirst,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health => write!(f, "health"),
            Self::Hunger => write!(f, "hunger"),
            Self::Thirst => write!(f, "thirst"),
        }
    }
}

/// Survival stats, each held in `0.0..=100.0`.
///
/// Fields are private so every write goes through a clamping method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    health: f64,
    hunger: f64,
    thirst: f64,
}

impl Default for Vitals {
    fn default() -> Self {
        Self::full()
    }
}

impl Vitals {
    /// All stats at the maximum.
    pub fn full() -> Self {
        Self {
            health: STAT_MAX,
            hunger: STAT_MAX,
            thirst: STAT_MAX,
        }
    }

    /// Current value of a stat.
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Health => self.health,
            Stat::Hunger => self.hunger,
            Stat::Thirst => self.thirst,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Health => &mut self.health,
            Stat::Hunger => &mut self.hunger,
            Stat::Thirst => &mut self.thirst,
        }
    }

    /// Set a stat, clamping into range. NaN is ignored.
    pub fn set(&mut self, stat: Stat, value: f64) {
        if value.is_nan() {
            return;
        }
        *self.slot(stat) = value.clamp(0.0, STAT_MAX);
    }

    /// Increase a stat by `amount`, clamping to the maximum.
    pub fn restore(&mut self, stat: Stat, amount: f64) {
        let v = self.get(stat);
        self.set(stat, v + amount.max(0.0));
    }

    /// Decrease a stat by `amount`, clamping to zero.
    pub fn deplete(&mut self, stat: Stat, amount: f64) {
        let v = self.get(stat);
        self.set(stat, v - amount.max(0.0));
    }

    /// Returns true if the stat sits at zero.
    pub fn is_depleted(&self, stat: Stat) -> bool {
        self.get(stat) <= 0.0
    }

    /// Health, in `0.0..=100.0`.
    pub fn health(&self) -> f64 {
        self.health
    }

    /// Hunger (fullness), in `0.0..=100.0`.
    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    /// Thirst (hydration), in `0.0..=100.0`.
    pub fn thirst(&self) -> f64 {
        self.thirst
    }
}

/// Gatherable crafting materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// From trees.
    Wood,
    /// From rocks.
    Stone,
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wood => write!(f, "wood"),
            Self::Stone => write!(f, "stone"),
        }
    }
}

/// Carried materials. Counts are unsigned and spending is all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Wood carried.
    pub wood: u32,
    /// Stone carried.
    pub stone: u32,
}

impl Inventory {
    /// Count of a material.
    pub fn count(&self, material: Material) -> u32 {
        match material {
            Material::Wood => self.wood,
            Material::Stone => self.stone,
        }
    }

    /// Add `amount` of a material.
    pub fn credit(&mut self, material: Material, amount: u32) {
        let slot = match material {
            Material::Wood => &mut self.wood,
            Material::Stone => &mut self.stone,
        };
        *slot = slot.saturating_add(amount);
    }

    /// Spend `wood` and `stone` together. Nothing changes unless both are
    /// affordable.
    pub fn try_spend(&mut self, wood: u32, stone: u32) -> bool {
        if self.wood < wood || self.stone < stone {
            return false;
        }
        self.wood -= wood;
        self.stone -= stone;
        true
    }
}

/// The player-controlled survivor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current position, kept inside the world margins.
    pub position: Vec2,
    /// Collision radius, also the fallback draw radius.
    pub size: f64,
    /// Base movement speed in units per normalized frame.
    pub speed: f64,
    /// Interaction radius for chopping and mining.
    pub reach: f64,
    /// Survival stats.
    pub vitals: Vitals,
    /// Carried materials.
    pub inventory: Inventory,
}

impl Player {
    /// A fresh player with full stats and an empty inventory.
    pub fn new(position: Vec2, size: f64, speed: f64, reach: f64) -> Self {
        Self {
            position,
            size,
            speed,
            reach,
            vitals: Vitals::full(),
            inventory: Inventory::default(),
        }
    }

    /// Returns true while health sits at zero. Healing above zero clears it.
    pub fn is_incapacitated(&self) -> bool {
        self.vitals.is_depleted(Stat::Health)
    }

    /// Distance from the player to a point.
    pub fn distance_to(&self, p: Vec2) -> f64 {
        self.position.distance(p)
    }
}
