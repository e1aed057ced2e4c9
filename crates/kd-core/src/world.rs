use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::geometry::Bounds;
use crate::player::Player;
use crate::registry::Registry;

/// The complete mutable game state: the world rectangle, the player, and
/// every resource entity.
///
/// Owned by a single simulation and handed to renderers by shared reference
/// once a tick has finished.
#[derive(Debug, Clone)]
pub struct WorldState {
    /// The playable area.
    pub bounds: Bounds,
    /// The survivor.
    pub player: Player,
    /// All resource entities.
    pub registry: Registry,
}

impl WorldState {
    /// Create a world with an empty registry.
    pub fn new(bounds: Bounds, player: Player) -> CoreResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(bounds.width) || !valid(bounds.height) {
            return Err(CoreError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(Self {
            bounds,
            player,
            registry: Registry::new(),
        })
    }

    /// Integer view of the values a HUD displays.
    pub fn hud(&self) -> HudSnapshot {
        let vitals = &self.player.vitals;
        HudSnapshot {
            health: floor_stat(vitals.health()),
            hunger: floor_stat(vitals.hunger()),
            thirst: floor_stat(vitals.thirst()),
            wood: self.player.inventory.wood,
            stone: self.player.inventory.stone,
            campfires: self.registry.campfires.len() as u32,
        }
    }
}

fn floor_stat(v: f64) -> u32 {
    v.floor().max(0.0) as u32
}

/// Floor-rounded values for display. Carries no formatting decisions beyond
/// the compact [`Display`](fmt::Display) line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Health, rounded down.
    pub health: u32,
    /// Hunger, rounded down.
    pub hunger: u32,
    /// Thirst, rounded down.
    pub thirst: u32,
    /// Wood carried.
    pub wood: u32,
    /// Stone carried.
    pub stone: u32,
    /// Campfires built this session.
    pub campfires: u32,
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP {} | Food {} | Water {} | Wood {} | Stone {} | Fires {}",
            self.health, self.hunger, self.thirst, self.wood, self.stone, self.campfires
        )
    }
}
